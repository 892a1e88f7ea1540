//! Route registry and path resolution.
//!
//! This module provides [`Registry`], a keyed table of compiled routes, and the
//! resolution algorithm that picks one route for an incoming path.
//!
//! Resolution tries an exact template match first. Otherwise every route is
//! evaluated and each match becomes a candidate. Candidates are ranked by the
//! length of the matched span, then by how many parameter values are non-empty.
//! If any two candidates share a rank, even below the winner, the lookup fails
//! with [`PathmuxError::Ambiguous`], so registration order never matters.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use pathmux_core::logging::resolve_span;
use pathmux_core::{PathmuxError, PathmuxResult};

use super::pattern::{ParamDescriptor, Params, PathPattern};

/// A compiled route: a template's pattern plus the handler it maps to.
///
/// Routes are owned by a [`Registry`] and never change after registration.
pub struct Route<H> {
    pattern: PathPattern,
    handler: H,
}

impl<H> fmt::Debug for Route<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

impl<H> Route<H> {
    /// Returns the template this route was registered under.
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    /// Returns the compiled pattern.
    pub const fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the parameters in template order.
    pub fn params(&self) -> &[ParamDescriptor] {
        self.pattern.params()
    }

    /// Returns the handler.
    pub const fn handler(&self) -> &H {
        &self.handler
    }
}

/// The result of successfully resolving a path.
pub struct ResolverMatch<'r, H> {
    /// The winning route.
    pub route: &'r Route<H>,
    /// Extracted parameter values. Empty on an exact template match.
    pub params: Params,
    /// Whether the exact-match fast path produced this result.
    pub exact: bool,
}

impl<H> fmt::Debug for ResolverMatch<'_, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverMatch")
            .field("template", &self.route.template())
            .field("params", &self.params)
            .field("exact", &self.exact)
            .finish()
    }
}

/// A route whose pattern matched the path under resolution.
struct Candidate<'r, H> {
    route: &'r Route<H>,
    params: Params,
    /// `(matched span length, non-empty parameter count)`
    rank: (usize, usize),
}

impl<'r, H> Candidate<'r, H> {
    fn evaluate(route: &'r Route<H>, path: &str) -> Option<Self> {
        let m = route.pattern.captures(path)?;
        let rank = (m.span.len(), m.non_empty_count());
        tracing::trace!(
            template = route.template(),
            span = m.span,
            non_empty = rank.1,
            "candidate"
        );
        Some(Self {
            route,
            params: m.values,
            rank,
        })
    }
}

/// Picks the highest-ranked candidate.
///
/// Any rank shared by two candidates makes the path ambiguous, even when a
/// third candidate outranks both. The error lists the templates of the
/// highest shared rank.
fn select_best<'r, H>(
    path: &str,
    candidates: Vec<Candidate<'r, H>>,
) -> PathmuxResult<Candidate<'r, H>> {
    let mut by_rank: BTreeMap<(usize, usize), Vec<Candidate<'r, H>>> = BTreeMap::new();
    for candidate in candidates {
        by_rank.entry(candidate.rank).or_default().push(candidate);
    }

    if let Some(group) = by_rank.values().rev().find(|group| group.len() > 1) {
        let mut tied: Vec<&str> = group.iter().map(|c| c.route.template()).collect();
        tied.sort_unstable();
        tracing::warn!(path, templates = ?tied, "ambiguous route table");
        return Err(PathmuxError::Ambiguous {
            path: path.to_string(),
            templates: tied.into_iter().map(String::from).collect(),
        });
    }

    by_rank
        .into_values()
        .next_back()
        .and_then(|mut group| group.pop())
        .ok_or_else(|| PathmuxError::NotFound(format!("No route matches '{path}'")))
}

/// A table of compiled routes keyed by template.
///
/// # Examples
///
/// ```
/// use pathmux_http::urls::resolver::Registry;
///
/// let mut registry = Registry::new();
/// registry.register("/users/:id", "user-detail").unwrap();
/// registry.register("/users/:id/posts/:post?", "user-posts").unwrap();
///
/// let m = registry.resolve("/users/42/posts/7").unwrap();
/// assert_eq!(*m.route.handler(), "user-posts");
/// assert_eq!(m.params["id"], "42");
/// assert_eq!(m.params["post"], "7");
/// ```
pub struct Registry<H> {
    routes: HashMap<String, Route<H>>,
}

impl<H> Default for Registry<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("templates", &self.templates())
            .finish()
    }
}

impl<H> Registry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Compiles `template` and stores it with `handler`.
    ///
    /// Nothing is stored if the call fails.
    ///
    /// # Errors
    ///
    /// Returns [`PathmuxError::DuplicateTemplate`] if the template is already
    /// registered, or the compiler's error if the template is invalid.
    pub fn register(&mut self, template: &str, handler: H) -> PathmuxResult<()> {
        if self.routes.contains_key(template) {
            return Err(PathmuxError::DuplicateTemplate(template.to_string()));
        }

        let pattern = PathPattern::compile(template)?;
        tracing::debug!(
            template,
            regex = pattern.regex().as_str(),
            params = pattern.params().len(),
            "registered route"
        );
        self.routes
            .insert(template.to_string(), Route { pattern, handler });
        Ok(())
    }

    /// Resolves `path` to a single route and its parameter values.
    ///
    /// # Errors
    ///
    /// Returns [`PathmuxError::NotFound`] if no route matches, or
    /// [`PathmuxError::Ambiguous`] if the best match is not unique.
    pub fn resolve(&self, path: &str) -> PathmuxResult<ResolverMatch<'_, H>> {
        let span = resolve_span(path);
        let _guard = span.enter();

        if let Some(route) = self.routes.get(path) {
            tracing::debug!("exact template match");
            return Ok(ResolverMatch {
                route,
                params: Params::new(),
                exact: true,
            });
        }

        let candidates: Vec<Candidate<'_, H>> = self
            .routes
            .values()
            .filter_map(|route| Candidate::evaluate(route, path))
            .collect();
        tracing::debug!(candidates = candidates.len(), "evaluated routes");

        let best = select_best(path, candidates)?;
        tracing::debug!(template = best.route.template(), "resolved");
        Ok(ResolverMatch {
            route: best.route,
            params: best.params,
            exact: false,
        })
    }

    /// Returns the route registered under `template`, if any.
    pub fn get(&self, template: &str) -> Option<&Route<H>> {
        self.routes.get(template)
    }

    /// Returns `true` if `template` is registered.
    pub fn contains(&self, template: &str) -> bool {
        self.routes.contains_key(template)
    }

    /// Returns the number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes are registered.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Returns the registered templates, sorted.
    pub fn templates(&self) -> Vec<&str> {
        let mut templates: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        templates.sort_unstable();
        templates
    }

    /// Iterates over the registered routes in unspecified order.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.values()
    }
}
