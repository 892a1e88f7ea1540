//! The `routes` management command.
//!
//! Lists the declared routes together with their compiled patterns.

use pathmux_core::{PathmuxError, PathmuxResult, Settings};
use pathmux_http::{AllowedMethods, ParamDescriptor, PathPattern};

use crate::command::ManagementCommand;

/// Lists declared routes and their compiled patterns.
pub struct RoutesCommand;

/// One line of the route listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteListing {
    /// The route name, or its template when unnamed.
    pub name: String,
    /// The template as declared.
    pub template: String,
    /// The allowed methods, e.g. `GET,POST` or `*`.
    pub methods: String,
    /// The compiled regex.
    pub regex: String,
    /// Parameters as `label:flavor`, in template order.
    pub params: Vec<String>,
}

fn describe_param(param: &ParamDescriptor) -> String {
    format!("{}:{}", param.label(), param.flavor())
}

/// Compiles each declared route and describes it, in declaration order.
///
/// # Errors
///
/// Returns the first compilation or method-parsing error.
pub fn list_routes(settings: &Settings) -> PathmuxResult<Vec<RouteListing>> {
    settings
        .routes
        .iter()
        .map(|route| {
            let pattern = PathPattern::compile(&route.template)?;
            let methods = AllowedMethods::parse(&route.methods)?;
            Ok(RouteListing {
                name: route.display_name().to_string(),
                template: route.template.clone(),
                methods: methods.to_string(),
                regex: pattern.regex().as_str().to_string(),
                params: pattern.params().iter().map(describe_param).collect(),
            })
        })
        .collect()
}

impl ManagementCommand for RoutesCommand {
    fn name(&self) -> &'static str {
        "routes"
    }

    fn help(&self) -> &'static str {
        "List declared routes with their compiled patterns"
    }

    fn handle(&self, _matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
        for listing in list_routes(settings)? {
            println!(
                "{:<8} {}  [{}]  {}",
                listing.methods,
                listing.template,
                listing.params.join(", "),
                listing.regex
            );
        }
        Ok(())
    }
}
