//! Built-in management commands.
//!
//! Each command implements the
//! [`ManagementCommand`](crate::command::ManagementCommand) trait and works on
//! the routes declared in the loaded settings.

pub mod check;
pub mod dispatch;
pub mod resolve;
pub mod routes;

pub use check::CheckCommand;
pub use dispatch::DispatchCommand;
pub use resolve::ResolveCommand;
pub use routes::RoutesCommand;

use crate::command::CommandRegistry;

/// Registers all built-in management commands into the given registry.
pub fn register_builtin_commands(registry: &mut CommandRegistry) {
    registry.register(Box::new(CheckCommand));
    registry.register(Box::new(RoutesCommand));
    registry.register(Box::new(ResolveCommand));
    registry.register(Box::new(DispatchCommand));
}
