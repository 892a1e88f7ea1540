//! # pathmux-cli
//!
//! Management commands for working with a pathmux route table from the shell.
//!
//! - **Management commands** - A framework for defining and registering CLI
//!   commands, plus built-in commands (`check`, `routes`, `resolve`, `dispatch`)
//! - **Settings loading** - [`load_settings`] reads the file named by the
//!   global `--settings` option, applying environment overrides
//!
//! ## Quick Start
//!
//! ```rust
//! use pathmux_cli::command::CommandRegistry;
//! use pathmux_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"check"));
//! assert!(names.contains(&"resolve"));
//! ```

// These clippy lints are intentionally allowed:
// - result_large_err: PathmuxError is the workspace-wide error type
// - doc_markdown: backtick requirements for documentation items are too strict
// - module_name_repetitions: re-exports make module-prefixed names redundant
#![allow(clippy::result_large_err)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod commands;

use pathmux_core::settings_loader;
use pathmux_core::{PathmuxResult, Settings};

// Re-export primary types at the crate root for convenience.
pub use command::{CommandRegistry, ManagementCommand, SETTINGS_ARG};
pub use commands::{
    register_builtin_commands, CheckCommand, DispatchCommand, ResolveCommand, RoutesCommand,
};

/// Loads the settings named by the global `--settings` option.
///
/// Without the option, settings come from the defaults plus environment
/// overrides.
pub fn load_settings(matches: &clap::ArgMatches) -> PathmuxResult<Settings> {
    match matches.get_one::<String>(SETTINGS_ARG) {
        Some(path) => settings_loader::from_file_with_env(path),
        None => Ok(settings_loader::from_env()),
    }
}

/// Builds the command registry, parses `args`, and runs the chosen command.
///
/// Logging is initialized from the loaded settings before the command runs.
pub fn run<I, T>(args: I) -> PathmuxResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let mut registry = CommandRegistry::new();
    register_builtin_commands(&mut registry);

    let matches = registry.build_cli().get_matches_from(args);
    let settings = load_settings(&matches)?;
    pathmux_core::logging::setup_logging(&settings);

    registry.execute(&matches, &settings)
}
