//! Custom path-pattern router.
//!
//! Routes are registered as `"/"`-delimited patterns whose segments are
//! either literals or `{name}` placeholders. Matching compares segment
//! counts, requires literal equality, and captures placeholder values into
//! an explicit [`PathParams`] that is passed straight into the handler
//! signature. Routes are kept in registration order: the first registered
//! pattern that structurally matches wins. A structural match without a
//! method match answers 405; no structural match answers 404.

use axum::body::Body;
use axum::http::{Method, StatusCode};
use axum::response::Response;
use bytes::Bytes;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

pub type Handler =
    Box<dyn Fn(Bytes, PathParams) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// Path parameters captured by the router for one request.
#[derive(Debug, Default, Clone)]
pub struct PathParams {
    values: HashMap<String, String>,
}

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn insert(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

fn parse_pattern(pattern: &str) -> Vec<Segment> {
    pattern
        .split('/')
        .map(|part| match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(part.to_string()),
        })
        .collect()
}

struct Route {
    pattern: String,
    segments: Vec<Segment>,
    methods: Vec<(Method, Handler)>,
}

impl Route {
    fn matches(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::default();
        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => params.insert(name, part),
            }
        }
        Some(params)
    }
}

#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Router {
        Router::default()
    }

    /// Registers a handler for a method on a path pattern. Patterns are
    /// matched in first-registered order.
    pub fn route(&mut self, method: Method, pattern: &str, handler: Handler) {
        match self.routes.iter_mut().find(|r| r.pattern == pattern) {
            Some(route) => route.methods.push((method, handler)),
            None => self.routes.push(Route {
                pattern: pattern.to_string(),
                segments: parse_pattern(pattern),
                methods: vec![(method, handler)],
            }),
        }
    }

    /// Dispatches one request to the first structurally-matching route.
    pub async fn dispatch(&self, method: &Method, path: &str, body: Bytes) -> Response {
        for route in &self.routes {
            if let Some(params) = route.matches(path) {
                return match route.methods.iter().find(|(m, _)| m == method) {
                    Some((_, handler)) => handler(body, params).await,
                    None => plain(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
                };
            }
        }
        plain(StatusCode::NOT_FOUND, "Not Found")
    }
}

fn plain(status: StatusCode, message: &str) -> Response {
    Response::builder()
        .status(status)
        .body(Body::from(message.to_string()))
        .unwrap_or_default()
}
