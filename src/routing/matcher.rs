//! Route matching module
//!
//! Routes are kept in registration order; lookup checks the method first,
//! then the path shape, and returns the first hit.

use hyper::Method;

use super::pattern::{PathParams, RoutePattern};

#[derive(Debug, Clone)]
struct Route<H> {
    method: Method,
    pattern: RoutePattern,
    handler: H,
}

/// Ordered set of routes bound to handlers of type `H`
#[derive(Debug, Clone)]
pub struct RouteTable<H> {
    routes: Vec<Route<H>>,
}

/// Successful lookup
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    pub handler: &'a H,
    pub pattern: &'a RoutePattern,
    pub params: PathParams,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route after all existing ones
    #[must_use]
    pub fn route(mut self, method: Method, pattern: &str, handler: H) -> Self {
        self.routes.push(Route {
            method,
            pattern: RoutePattern::parse(pattern),
            handler,
        });
        self
    }

    /// Append every route of `group` under `prefix`, keeping the group's order
    #[must_use]
    pub fn mount(mut self, prefix: &str, group: Self) -> Self {
        let prefix = RoutePattern::parse(prefix);
        self.routes
            .extend(group.routes.into_iter().map(|route| Route {
                pattern: route.pattern.prefixed(&prefix),
                ..route
            }));
        self
    }

    /// Registered routes in match order
    pub fn iter(&self) -> impl Iterator<Item = (&Method, &RoutePattern)> {
        self.routes.iter().map(|route| (&route.method, &route.pattern))
    }

    /// Find the first route matching method and path
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        self.routes
            .iter()
            .filter(|route| route.method == *method)
            .find_map(|route| {
                route.pattern.matches(path).map(|params| RouteMatch {
                    handler: &route.handler,
                    pattern: &route.pattern,
                    params,
                })
            })
    }
}
