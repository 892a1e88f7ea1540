//! The command framework behind the `pathmux` binary.
//!
//! A [`ManagementCommand`] is one subcommand. The [`CommandRegistry`] collects
//! them, turns them into a clap parser with a shared `--settings` option, and
//! runs whichever one the parsed arguments select.
//!
//! ```rust
//! use pathmux_cli::command::{CommandRegistry, ManagementCommand};
//! use pathmux_core::{PathmuxError, Settings};
//!
//! struct Count;
//!
//! impl ManagementCommand for Count {
//!     fn name(&self) -> &'static str { "count" }
//!     fn help(&self) -> &'static str { "Print the number of declared routes" }
//!
//!     fn handle(&self, _: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
//!         println!("{}", settings.routes.len());
//!         Ok(())
//!     }
//! }
//!
//! let mut registry = CommandRegistry::new();
//! registry.register(Box::new(Count));
//! let matches = registry.build_cli().try_get_matches_from(["pathmux", "count"]).unwrap();
//! registry.execute(&matches, &Settings::default()).unwrap();
//! ```

use std::collections::BTreeMap;

use pathmux_core::{PathmuxError, Settings};

/// The id of the global option naming the settings file.
pub const SETTINGS_ARG: &str = "settings";

/// One `pathmux` subcommand.
pub trait ManagementCommand: Send + Sync {
    /// The subcommand name typed on the command line.
    fn name(&self) -> &'static str;

    /// One-line description shown in `--help`.
    fn help(&self) -> &'static str;

    /// Declares the subcommand's own arguments. Defaults to none.
    fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
        cmd
    }

    /// Runs the subcommand against the loaded settings.
    fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError>;
}

/// Subcommands keyed by name.
#[derive(Default)]
pub struct CommandRegistry {
    commands: BTreeMap<&'static str, Box<dyn ManagementCommand>>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subcommand, replacing any earlier one with the same name.
    pub fn register(&mut self, command: Box<dyn ManagementCommand>) {
        self.commands.insert(command.name(), command);
    }

    /// Returns the subcommand registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&dyn ManagementCommand> {
        self.commands.get(name).map(AsRef::as_ref)
    }

    /// Subcommand names in alphabetical order.
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.keys().copied().collect()
    }

    /// Returns the number of registered subcommands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if no subcommands are registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Builds the `pathmux` parser: one clap subcommand per registered
    /// command, plus the global `--settings FILE` option.
    pub fn build_cli(&self) -> clap::Command {
        let settings_arg = clap::Arg::new(SETTINGS_ARG)
            .long("settings")
            .short('s')
            .value_name("FILE")
            .global(true)
            .help("Settings file declaring routes (TOML, or JSON by extension)");

        self.commands.values().fold(
            clap::Command::new("pathmux")
                .about("Inspect and exercise a pathmux route table")
                .subcommand_required(true)
                .arg(settings_arg),
            |app, command| {
                let sub = clap::Command::new(command.name()).about(command.help());
                app.subcommand(command.add_arguments(sub))
            },
        )
    }

    /// Runs the subcommand selected in `matches`.
    pub fn execute(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(PathmuxError::ConfigurationError(
                "No subcommand specified".to_string(),
            ));
        };
        let command = self
            .get(name)
            .ok_or_else(|| PathmuxError::ConfigurationError(format!("Unknown command: {name}")))?;

        tracing::debug!(command = name, "running command");
        command.handle(sub_matches, settings)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use pathmux_core::RouteSettings;

    use super::*;

    /// Records the route count and the `--limit` it was given.
    struct RouteCounter {
        name: &'static str,
        seen: Arc<AtomicUsize>,
    }

    impl RouteCounter {
        fn boxed(name: &'static str) -> (Box<dyn ManagementCommand>, Arc<AtomicUsize>) {
            let seen = Arc::new(AtomicUsize::new(0));
            let counter = Self {
                name,
                seen: Arc::clone(&seen),
            };
            (Box::new(counter), seen)
        }
    }

    impl ManagementCommand for RouteCounter {
        fn name(&self) -> &'static str {
            self.name
        }

        fn help(&self) -> &'static str {
            "Count routes"
        }

        fn add_arguments(&self, cmd: clap::Command) -> clap::Command {
            cmd.arg(
                clap::Arg::new("limit")
                    .long("limit")
                    .value_parser(clap::value_parser!(usize)),
            )
        }

        fn handle(&self, matches: &clap::ArgMatches, settings: &Settings) -> Result<(), PathmuxError> {
            let limit = matches.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
            if settings.routes.len() > limit {
                return Err(PathmuxError::ConfigurationError("too many routes".to_string()));
            }
            self.seen.store(settings.routes.len(), Ordering::SeqCst);
            Ok(())
        }
    }

    fn two_routes() -> Settings {
        Settings {
            routes: vec![RouteSettings::new("/a"), RouteSettings::new("/b/:c")],
            ..Settings::default()
        }
    }

    #[test]
    fn test_empty_registry() {
        let registry = CommandRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.list_commands().is_empty());
        assert!(registry.get("routes").is_none());
    }

    #[test]
    fn test_names_listed_alphabetically() {
        let mut registry = CommandRegistry::new();
        for name in ["resolve", "check", "routes"] {
            registry.register(RouteCounter::boxed(name).0);
        }
        assert_eq!(registry.list_commands(), vec!["check", "resolve", "routes"]);
        assert_eq!(registry.get("check").unwrap().help(), "Count routes");
    }

    #[test]
    fn test_same_name_replaces() {
        let mut registry = CommandRegistry::new();
        let (first, first_seen) = RouteCounter::boxed("count");
        let (second, second_seen) = RouteCounter::boxed("count");
        registry.register(first);
        registry.register(second);
        assert_eq!(registry.len(), 1);

        let matches = registry
            .build_cli()
            .try_get_matches_from(["pathmux", "count"])
            .unwrap();
        registry.execute(&matches, &two_routes()).unwrap();
        assert_eq!(first_seen.load(Ordering::SeqCst), 0);
        assert_eq!(second_seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_settings_option_is_global() {
        let mut registry = CommandRegistry::new();
        registry.register(RouteCounter::boxed("count").0);

        for args in [
            ["pathmux", "--settings", "r.toml", "count"],
            ["pathmux", "count", "-s", "r.toml"],
        ] {
            let matches = registry.build_cli().try_get_matches_from(args).unwrap();
            assert_eq!(matches.get_one::<String>(SETTINGS_ARG).unwrap(), "r.toml");
        }
    }

    #[test]
    fn test_subcommand_required() {
        let mut registry = CommandRegistry::new();
        registry.register(RouteCounter::boxed("count").0);
        assert!(registry.build_cli().try_get_matches_from(["pathmux"]).is_err());
        assert!(registry
            .build_cli()
            .try_get_matches_from(["pathmux", "nope"])
            .is_err());
    }

    #[test]
    fn test_execute_passes_subcommand_arguments() {
        let mut registry = CommandRegistry::new();
        registry.register(RouteCounter::boxed("count").0);

        let ok = registry
            .build_cli()
            .try_get_matches_from(["pathmux", "count", "--limit", "2"])
            .unwrap();
        assert!(registry.execute(&ok, &two_routes()).is_ok());

        let too_few = registry
            .build_cli()
            .try_get_matches_from(["pathmux", "count", "--limit", "1"])
            .unwrap();
        assert!(registry.execute(&too_few, &two_routes()).is_err());
    }

    #[test]
    fn test_execute_without_subcommand() {
        let registry = CommandRegistry::new();
        let err = registry
            .execute(&clap::ArgMatches::default(), &Settings::default())
            .unwrap_err();
        assert!(matches!(err, PathmuxError::ConfigurationError(_)));
    }
}
