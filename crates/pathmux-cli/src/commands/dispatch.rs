//! The `dispatch` management command.
//!
//! Sends a request through a [`Router`] built from the declared routes and
//! prints the JSON response, honoring each route's allowed methods.

use http::{Method, Request};
use pathmux_core::{PathmuxError, PathmuxResult, Settings};
use pathmux_http::{Response, Router};

use crate::command::ManagementCommand;

/// Dispatches a request against the declared routes.
pub struct DispatchCommand;

/// Dispatches `method path` through a router built from `settings`.
///
/// # Errors
///
/// Returns configuration errors for an invalid method or path, or the
/// router's error.
pub fn dispatch_request(settings: &Settings, method: &str, path: &str) -> PathmuxResult<Response> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| PathmuxError::ConfigurationError(format!("Invalid HTTP method '{method}'")))?;
    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(())
        .map_err(|e| PathmuxError::ConfigurationError(format!("Invalid request path '{path}': {e}")))?;

    Router::from_settings(settings)?.dispatch(&request)
}

impl ManagementCommand for DispatchCommand {
    fn name(&self) -> &'static str {
        "dispatch"
    }

    fn help(&self) -> &'static str {
        "Dispatch a request and print the route's response"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("path")
                .required(true)
                .help("Request path, e.g. /users/42"),
        )
        .arg(
            clap::Arg::new("method")
                .long("method")
                .short('X')
                .default_value("GET")
                .help("HTTP method"),
        )
    }

    fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
        let path = matches
            .get_one::<String>("path")
            .ok_or_else(|| PathmuxError::ConfigurationError("Missing path".to_string()))?;
        let method = matches
            .get_one::<String>("method")
            .map_or("GET", String::as_str);

        let response = dispatch_request(settings, method, path)?;
        println!("{:#}", serde_json::Value::Object(response));
        Ok(())
    }
}
