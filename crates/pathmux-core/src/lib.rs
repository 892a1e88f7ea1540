//! # pathmux-core
//!
//! Core types, settings, and error types for the pathmux routing workspace.
//! This crate has no routing logic of its own and provides the foundation the
//! other crates build on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Settings and route declarations
//! - [`settings_loader`] - Loading settings from TOML/JSON files and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{PathmuxError, PathmuxResult};
pub use settings::{RouteSettings, Settings};
