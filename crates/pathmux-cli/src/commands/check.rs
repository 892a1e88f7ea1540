//! The `check` management command.
//!
//! Compiles every configured route and reports all problems at once instead
//! of stopping at the first one.

use pathmux_core::{PathmuxError, Settings};
use pathmux_http::{AllowedMethods, Registry};

use crate::command::ManagementCommand;

/// Validates the route declarations in the settings.
pub struct CheckCommand;

/// The result of a single check.
#[derive(Debug, Clone)]
pub struct CheckMessage {
    /// The severity level of this check result.
    pub level: CheckLevel,
    /// A human-readable description of the issue.
    pub msg: String,
    /// An optional hint for how to resolve the issue.
    pub hint: Option<String>,
    /// A unique identifier for this check (e.g. "routes.E001").
    pub id: String,
}

/// Severity levels for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckLevel {
    /// Informational message.
    Info,
    /// A warning that may indicate a problem.
    Warning,
    /// An error that must be resolved.
    Error,
}

impl std::fmt::Display for CheckLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARNING"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

fn error(id: &str, msg: String, hint: &str) -> CheckMessage {
    CheckMessage {
        level: CheckLevel::Error,
        msg,
        hint: Some(hint.to_string()),
        id: id.to_string(),
    }
}

/// Runs all route checks against the given settings.
pub fn run_checks(settings: &Settings) -> Vec<CheckMessage> {
    let mut messages = Vec::new();

    if settings.routes.is_empty() {
        messages.push(CheckMessage {
            level: CheckLevel::Warning,
            msg: "No routes are declared".to_string(),
            hint: Some("Add [[routes]] entries with a template".to_string()),
            id: "routes.W001".to_string(),
        });
    }

    let mut registry = Registry::new();
    for route in &settings.routes {
        if let Err(e) = AllowedMethods::parse(&route.methods) {
            messages.push(error(
                "routes.E004",
                format!("{}: {e}", route.display_name()),
                "Use standard HTTP method names or \"*\"",
            ));
        }

        match registry.register(&route.template, ()) {
            Ok(()) => {}
            Err(e @ PathmuxError::DuplicateTemplate(_)) => messages.push(error(
                "routes.E001",
                e.to_string(),
                "Declare each template once",
            )),
            Err(e @ PathmuxError::DuplicateParameterName { .. }) => messages.push(error(
                "routes.E002",
                e.to_string(),
                "Give every parameter in a template a distinct name",
            )),
            Err(e) => messages.push(error(
                "routes.E003",
                e.to_string(),
                "Literal text is used as a regular expression; check brackets and special characters",
            )),
        }
    }

    messages
}

impl ManagementCommand for CheckCommand {
    fn name(&self) -> &'static str {
        "check"
    }

    fn help(&self) -> &'static str {
        "Validate the declared routes"
    }

    fn handle(&self, _matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
        let messages = run_checks(settings);

        if messages.is_empty() {
            tracing::info!(routes = settings.routes.len(), "Route check identified no issues");
            return Ok(());
        }

        let errors = messages.iter().filter(|m| m.level >= CheckLevel::Error).count();
        let warnings = messages.iter().filter(|m| m.level == CheckLevel::Warning).count();

        for msg in &messages {
            let hint_text = msg
                .hint
                .as_ref()
                .map_or(String::new(), |h| format!("\n\tHINT: {h}"));
            tracing::warn!("{} ({}): {}{}", msg.level, msg.id, msg.msg, hint_text);
        }

        tracing::info!(
            "Route check identified {} issue(s) ({} error(s), {} warning(s))",
            messages.len(),
            errors,
            warnings
        );

        if errors > 0 {
            return Err(PathmuxError::ConfigurationError(format!(
                "Route check found {errors} error(s)"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pathmux_core::RouteSettings;

    use super::*;

    fn settings(routes: Vec<RouteSettings>) -> Settings {
        Settings {
            routes,
            ..Settings::default()
        }
    }

    fn ids(messages: &[CheckMessage]) -> Vec<&str> {
        messages.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_check_no_routes_warns() {
        let messages = run_checks(&Settings::default());
        assert_eq!(ids(&messages), vec!["routes.W001"]);
        assert_eq!(messages[0].level, CheckLevel::Warning);
    }

    #[test]
    fn test_check_valid_routes() {
        let messages = run_checks(&settings(vec![
            RouteSettings::new("/users/:id").with_methods(["GET"]),
            RouteSettings::new("/files/:path*"),
        ]));
        assert!(messages.is_empty());
    }

    #[test]
    fn test_check_reports_every_problem() {
        let messages = run_checks(&settings(vec![
            RouteSettings::new("/a/:x"),
            RouteSettings::new("/a/:x"),
            RouteSettings::new("/b/:y/:y"),
            RouteSettings::new("/wrong/(path"),
            RouteSettings::new("/c").with_methods(["N0 PE"]),
        ]));
        assert_eq!(
            ids(&messages),
            vec!["routes.E001", "routes.E002", "routes.E003", "routes.E004"]
        );
        assert!(messages.iter().all(|m| m.level == CheckLevel::Error));
    }

    #[test]
    fn test_check_handle_fails_on_errors() {
        let cmd = CheckCommand;
        let matches = clap::ArgMatches::default();

        let bad = settings(vec![RouteSettings::new("/wrong/(path")]);
        assert!(cmd.handle(&matches, &bad).is_err());

        let good = settings(vec![RouteSettings::new("/ok")]);
        assert!(cmd.handle(&matches, &good).is_ok());

        // Warnings alone do not fail the check.
        assert!(cmd.handle(&matches, &Settings::default()).is_ok());
    }

    #[test]
    fn test_check_level_ordering() {
        assert!(CheckLevel::Error > CheckLevel::Warning);
        assert_eq!(CheckLevel::Info.to_string(), "INFO");
    }
}
