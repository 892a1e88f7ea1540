//! # pathmux
//!
//! Path-template routing for Rust.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `pathmux` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```rust
//! use pathmux::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register("/users/:id", "user").unwrap();
//! registry.register("/users/:id/files/:path*", "files").unwrap();
//!
//! let found = registry.resolve("/users/42/files/a/b.txt").unwrap();
//! assert_eq!(*found.route.handler(), "files");
//! assert_eq!(found.params["path"], "a/b.txt");
//! ```

/// Settings, logging, and error types.
pub use pathmux_core as core;

/// Template compilation, resolution, and dispatch.
#[cfg(feature = "http")]
pub use pathmux_http as routing;

/// Management commands (CLI).
#[cfg(feature = "cli")]
pub use pathmux_cli as cli;

pub use pathmux_core::{PathmuxError, PathmuxResult, RouteSettings, Settings};

#[cfg(feature = "http")]
pub use pathmux_http::{
    AllowedMethods, Params, PathPattern, Registry, ResolverMatch, RouteHandler, Router,
};

/// Third-party crates that appear in the public API.
pub mod deps {
    pub use http;
    pub use serde_json;
    pub use tracing;
}
