//! The `resolve` management command.
//!
//! Resolves a path against the declared routes and prints the winning
//! template and extracted parameters as JSON.

use pathmux_core::{PathmuxError, PathmuxResult, Settings};
use pathmux_http::Registry;
use serde_json::json;

use crate::command::ManagementCommand;

/// Resolves a path against the declared routes.
pub struct ResolveCommand;

/// Resolves `path` against the routes in `settings`.
///
/// The result is a JSON object with the matched `template`, route `name`,
/// whether the exact-match fast path was taken, and the `params`.
///
/// # Errors
///
/// Returns registration errors for invalid declarations, or the resolution
/// error (`NotFound`, `Ambiguous`).
pub fn resolve_path(settings: &Settings, path: &str) -> PathmuxResult<serde_json::Value> {
    let mut registry = Registry::new();
    for route in &settings.routes {
        registry.register(&route.template, route.display_name())?;
    }

    let resolved = registry.resolve(path)?;
    Ok(json!({
        "template": resolved.route.template(),
        "name": resolved.route.handler(),
        "exact": resolved.exact,
        "params": resolved.params,
    }))
}

impl ManagementCommand for ResolveCommand {
    fn name(&self) -> &'static str {
        "resolve"
    }

    fn help(&self) -> &'static str {
        "Show which route a path resolves to"
    }

    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd.arg(
            clap::Arg::new("path")
                .required(true)
                .help("Request path, e.g. /users/42"),
        )
    }

    fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
        let path = matches
            .get_one::<String>("path")
            .ok_or_else(|| PathmuxError::ConfigurationError("Missing path".to_string()))?;
        let value = resolve_path(settings, path)?;
        println!("{value:#}");
        Ok(())
    }
}
