//! # pathmux-http
//!
//! Routing layer for pathmux. Compiles path templates such as
//! `/users/:id/files/:path*` into anchored patterns, resolves request paths
//! against a table of templates by specificity, and dispatches to handlers
//! that declare their allowed HTTP methods.

pub mod dispatch;
pub mod urls;

pub use dispatch::{AllowedMethods, HandlerRef, Response, RouteHandler, Router, StaticHandler};
pub use urls::pattern::{ParamDescriptor, ParamFlavor, Params, PathPattern};
pub use urls::resolver::{Registry, ResolverMatch, Route};
