//! Path templates and route resolution.
//!
//! - [`pattern`]: template compilation into anchored, parameter-capturing patterns
//! - [`resolver`]: the route registry and specificity-ranked resolution
//!
//! # Examples
//!
//! ```
//! use pathmux_http::urls::resolver::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register("/some/:path/with/:param", 1).unwrap();
//! registry.register("/some/:path/with/:param/:optional?", 2).unwrap();
//!
//! let m = registry.resolve("/some/a/with/b/c").unwrap();
//! assert_eq!(*m.route.handler(), 2);
//! assert_eq!(m.params["optional"], "c");
//!
//! // Both templates fit this path equally well.
//! assert!(registry.resolve("/some/a/with/b").is_err());
//! ```

pub mod pattern;
pub mod resolver;
