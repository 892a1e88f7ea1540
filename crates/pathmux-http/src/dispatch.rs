//! Handler dispatch on top of path resolution.
//!
//! A [`RouteHandler`] declares which HTTP methods it accepts and produces a JSON
//! object response. [`Router`] resolves a request's path with a
//! [`Registry`] and hands the request to the winning route, after checking the
//! method against the handler's [`AllowedMethods`].

use std::fmt;
use std::sync::Arc;

use http::{Method, Request};

use pathmux_core::{PathmuxError, PathmuxResult, RouteSettings, Settings};

use crate::urls::pattern::Params;
use crate::urls::resolver::{Registry, Route};

/// The body a handler returns: a JSON object.
pub type Response = serde_json::Map<String, serde_json::Value>;

/// The HTTP methods a handler accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedMethods {
    /// Every method is accepted.
    Any,
    /// Only the listed methods are accepted. An empty list accepts nothing.
    Only(Vec<Method>),
}

impl AllowedMethods {
    /// Returns `true` if `method` is accepted.
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Only(methods) => methods.contains(method),
        }
    }

    /// Parses method names as written in a settings file.
    ///
    /// An empty list, or a list whose first entry is `"*"`, accepts any method.
    /// Names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`PathmuxError::ConfigurationError`] for a name that is not a
    /// valid HTTP method token.
    pub fn parse<S: AsRef<str>>(methods: &[S]) -> PathmuxResult<Self> {
        match methods.first().map(AsRef::as_ref) {
            None | Some("*") => Ok(Self::Any),
            Some(_) => methods
                .iter()
                .map(|m| {
                    let name = m.as_ref().trim().to_ascii_uppercase();
                    Method::from_bytes(name.as_bytes()).map_err(|_| {
                        PathmuxError::ConfigurationError(format!(
                            "Invalid HTTP method '{}'",
                            m.as_ref()
                        ))
                    })
                })
                .collect::<PathmuxResult<Vec<_>>>()
                .map(Self::Only),
        }
    }
}

impl fmt::Display for AllowedMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Only(methods) => {
                let names: Vec<&str> = methods.iter().map(Method::as_str).collect();
                f.write_str(&names.join(","))
            }
        }
    }
}

/// A handler that a route dispatches to.
pub trait RouteHandler: Send + Sync {
    /// Returns the methods this handler accepts.
    fn allowed_methods(&self) -> AllowedMethods;

    /// Handles a request whose path matched the handler's route.
    fn handle(&self, request: &Request<()>, params: &Params) -> PathmuxResult<Response>;
}

/// A shared, type-erased handler as stored in a [`Router`].
pub type HandlerRef = Arc<dyn RouteHandler>;

impl Route<HandlerRef> {
    /// Runs the route's handler if it accepts the request method.
    ///
    /// # Errors
    ///
    /// Returns [`PathmuxError::MethodNotAllowed`] if the method is rejected, or
    /// whatever the handler returns.
    pub fn exec(&self, request: &Request<()>, params: &Params) -> PathmuxResult<Response> {
        if !self.handler().allowed_methods().allows(request.method()) {
            return Err(PathmuxError::MethodNotAllowed {
                method: request.method().to_string(),
                template: self.template().to_string(),
            });
        }
        self.handler().handle(request, params)
    }
}

/// A handler that returns a fixed response plus the extracted parameters.
///
/// Routes declared in a settings file are served by this handler. The
/// parameters are added under the `"params"` key.
#[derive(Debug, Clone)]
pub struct StaticHandler {
    methods: AllowedMethods,
    response: Response,
}

impl StaticHandler {
    /// Creates a handler returning `response` for the given methods.
    pub const fn new(methods: AllowedMethods, response: Response) -> Self {
        Self { methods, response }
    }

    /// Builds a handler from a route declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the declared methods are invalid.
    pub fn from_settings(route: &RouteSettings) -> PathmuxResult<Self> {
        let methods = AllowedMethods::parse(&route.methods)?;
        Ok(Self::new(methods, route.response.clone()))
    }
}

impl RouteHandler for StaticHandler {
    fn allowed_methods(&self) -> AllowedMethods {
        self.methods.clone()
    }

    fn handle(&self, _request: &Request<()>, params: &Params) -> PathmuxResult<Response> {
        let mut response = self.response.clone();
        let params: serde_json::Map<String, serde_json::Value> = params
            .iter()
            .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
            .collect();
        response.insert("params".to_string(), serde_json::Value::Object(params));
        Ok(response)
    }
}

/// A route table of shared handlers with request dispatch.
///
/// # Examples
///
/// ```
/// use http::{Method, Request};
/// use pathmux_http::dispatch::{AllowedMethods, Response, Router, StaticHandler};
///
/// let mut router = Router::new();
/// router
///     .route(
///         "/users/:id",
///         StaticHandler::new(AllowedMethods::Only(vec![Method::GET]), Response::new()),
///     )
///     .unwrap();
///
/// let request = Request::get("/users/42").body(()).unwrap();
/// let response = router.dispatch(&request).unwrap();
/// assert_eq!(response["params"]["id"], "42");
///
/// let request = Request::post("/users/42").body(()).unwrap();
/// assert_eq!(router.dispatch(&request).unwrap_err().status_code(), 405);
/// ```
#[derive(Debug, Default)]
pub struct Router {
    registry: Registry<HandlerRef>,
}

impl Router {
    /// Creates an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a router from the routes declared in `settings`, each served by
    /// a [`StaticHandler`].
    ///
    /// # Errors
    ///
    /// Returns the first registration or method-parsing error.
    pub fn from_settings(settings: &Settings) -> PathmuxResult<Self> {
        let mut router = Self::new();
        for route in &settings.routes {
            router.route(&route.template, StaticHandler::from_settings(route)?)?;
        }
        Ok(router)
    }

    /// Registers `handler` under `template`.
    ///
    /// # Errors
    ///
    /// Returns the registry's error for duplicate or invalid templates.
    pub fn route<T>(&mut self, template: &str, handler: T) -> PathmuxResult<()>
    where
        T: RouteHandler + 'static,
    {
        self.registry.register(template, Arc::new(handler))
    }

    /// Returns the underlying registry.
    pub const fn registry(&self) -> &Registry<HandlerRef> {
        &self.registry
    }

    /// Resolves the request path and runs the matching route.
    ///
    /// # Errors
    ///
    /// Returns resolution errors (`NotFound`, `Ambiguous`), `MethodNotAllowed`,
    /// or the handler's own error.
    pub fn dispatch(&self, request: &Request<()>) -> PathmuxResult<Response> {
        let resolved = self.registry.resolve(request.uri().path())?;
        tracing::debug!(
            method = %request.method(),
            template = resolved.route.template(),
            "dispatching"
        );
        resolved.route.exec(request, &resolved.params)
    }
}
