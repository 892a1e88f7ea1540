//! Settings for pathmux.
//!
//! This module provides the [`Settings`] struct, which holds logging options and
//! the route declarations an application wants registered at startup. Every field
//! has a default so a settings file only needs to mention what it changes.

use serde::{Deserialize, Serialize};

/// A route declared in a settings file.
///
/// The `response` table is an optional static JSON object returned by the
/// management CLI's `dispatch` command; library users normally attach their own
/// handlers instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteSettings {
    /// The path template, e.g. `/users/:id/files/:path*`.
    pub template: String,
    /// An optional human-readable name used in listings and logs.
    pub name: Option<String>,
    /// Allowed HTTP methods. Empty or `["*"]` means any method.
    pub methods: Vec<String>,
    /// A static response body for the route.
    pub response: serde_json::Map<String, serde_json::Value>,
}

impl RouteSettings {
    /// Creates a route declaration for a template that accepts any method.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Self::default()
        }
    }

    /// Sets the allowed methods.
    #[must_use]
    pub fn with_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the route name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the name if set, otherwise the template.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.template)
    }
}

/// The complete set of settings.
///
/// # Examples
///
/// ```
/// use pathmux_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// assert!(settings.routes.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The log filter directive (e.g. "info", "pathmux_http=debug").
    pub log_level: String,
    /// Routes to register at startup.
    pub routes: Vec<RouteSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            routes: Vec::new(),
        }
    }
}
