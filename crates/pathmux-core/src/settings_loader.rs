//! Reading [`Settings`] from disk and the environment.
//!
//! A settings file is TOML unless its name ends in `.json`. Anything the file
//! leaves out keeps its default, and the `PATHMUX_DEBUG` and
//! `PATHMUX_LOG_LEVEL` environment variables win over both.
//!
//! ```rust,no_run
//! use pathmux_core::settings_loader;
//!
//! let settings = settings_loader::from_file_with_env("config/routes.toml").unwrap();
//! assert!(!settings.routes.is_empty());
//! ```

use std::path::Path;

use crate::error::PathmuxError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// Fields not present in the TOML keep their default values.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, PathmuxError> {
    toml::from_str(toml_str)
        .map_err(|e| PathmuxError::ConfigurationError(format!("Failed to parse TOML: {e}")))
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, PathmuxError> {
    from_toml_str(&read_file(path.as_ref())?)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, PathmuxError> {
    serde_json::from_str(json_str)
        .map_err(|e| PathmuxError::ConfigurationError(format!("Failed to parse JSON: {e}")))
}

/// Loads settings from a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the JSON is malformed.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, PathmuxError> {
    from_json_str(&read_file(path.as_ref())?)
}

/// Loads settings from a file, picking the format from its extension
/// (`.json` is JSON, anything else is TOML), then applies environment overrides.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, PathmuxError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let mut settings = if is_json {
        from_json_file(path)?
    } else {
        from_toml_file(path)?
    };
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Default settings with environment overrides applied.
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Overwrites fields named by `PATHMUX_*` environment variables.
///
/// - `PATHMUX_DEBUG` -> `debug` (values: "true"/"1"/"yes" => true, anything else => false)
/// - `PATHMUX_LOG_LEVEL` -> `log_level`
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("PATHMUX_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("PATHMUX_LOG_LEVEL") {
        settings.log_level = val;
    }
}

fn parse_bool(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_file(path: &Path) -> Result<String, PathmuxError> {
    std::fs::read_to_string(path).map_err(|e| {
        PathmuxError::ConfigurationError(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })
}
