//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`], plus one
//! method-independent tree for [`Router::any`] routes. That tree is consulted
//! when the method's own tree misses, so it also catches extension methods
//! such as `PURGE`. A path registered under some method but requested with
//! another answers `405`; a path registered nowhere answers `404`.

use std::collections::HashMap;
use std::fmt::Display;

use http_body_util::BodyExt;
use hyper::body::Body;
use matchit::Router as MatchitRouter;
use tracing::warn;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::{Response, internal_error};
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each registration returns `self` so calls chain naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    any: MatchitRouter<BoxedHandler>,
}

/// Outcome of matching a method + path against the routing table.
pub(crate) enum Route {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed,
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), any: MatchitRouter::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and catch-alls `{*name}`;
    /// `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use appointy::{Method, Request, Response, Router};
    /// # async fn list_users(_: Request) -> Response { Response::text("") }
    /// # async fn get_user(_: Request) -> Response { Response::text("") }
    /// Router::new()
    ///     .on(Method::Get, "/users",      list_users)
    ///     .on(Method::Get, "/users/{id}", get_user);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`. Routes are static, so this surfaces at startup.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.insert(method, path, handler.into_boxed_handler());
        self
    }

    /// Register one handler for every method on `path`, extension methods
    /// included. A route registered with [`on`](Router::on) for the same path
    /// and method takes precedence.
    pub fn any(mut self, path: &str, handler: impl Handler) -> Self {
        self.any
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `* {path}`: {e}"));
        self
    }

    fn insert(&mut self, method: Method, path: &str, handler: BoxedHandler) {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler)
            .unwrap_or_else(|e| panic!("invalid route `{method} {path}`: {e}"));
    }

    pub(crate) fn lookup(&self, method: &http::Method, path: &str) -> Route {
        let tree = Method::from_http(method).and_then(|m| self.routes.get(&m));
        let matched = tree
            .and_then(|tree| tree.at(path).ok())
            .or_else(|| self.any.at(path).ok());
        if let Some(matched) = matched {
            let params = matched.params.iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Route::Found(matched.value.clone(), params);
        }

        if self.routes.values().any(|tree| tree.at(path).is_ok()) {
            Route::MethodNotAllowed
        } else {
            Route::NotFound
        }
    }

    /// Routes one request and produces one response.
    ///
    /// The body is read in full only once a handler matched. A body-read
    /// failure answers `500` with the error text.
    pub(crate) async fn respond<B>(&self, req: http::Request<B>) -> Response
    where
        B: Body + Send,
        B::Data: Send,
        B::Error: Display,
    {
        let (parts, body) = req.into_parts();

        match self.lookup(&parts.method, parts.uri.path()) {
            Route::Found(handler, params) => match body.collect().await {
                Ok(collected) => {
                    handler.call(Request::new(parts, collected.to_bytes(), params)).await
                }
                Err(e) => {
                    warn!(path = %parts.uri.path(), error = %e, "failed to read request body");
                    internal_error(e)
                }
            },
            Route::MethodNotAllowed => Response::builder()
                .status(Status::MethodNotAllowed)
                .text("method not allowed"),
            Route::NotFound => Response::status(Status::NotFound),
        }
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http_body_util::Full;

    use super::*;

    async fn hello(_req: Request) -> &'static str {
        "hello"
    }

    async fn echo_param(req: Request) -> String {
        req.param("id").unwrap_or("none").to_owned()
    }

    fn app() -> Router {
        Router::new()
            .on(Method::Get, "/hello", hello)
            .on(Method::Get, "/items/{id}", echo_param)
            .any("/anything", |req: Request| async move { req.method().to_string() })
    }

    async fn send(router: &Router, method: &str, uri: &str) -> Response {
        let req = http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Full::new(Bytes::new()))
            .unwrap();
        router.respond(req).await
    }

    #[tokio::test]
    async fn dispatches_to_registered_handler() {
        let res = send(&app(), "GET", "/hello").await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"hello");
    }

    #[tokio::test]
    async fn extracts_path_params() {
        let res = send(&app(), "GET", "/items/42").await;
        assert_eq!(res.body(), b"42");
    }

    #[tokio::test]
    async fn known_path_wrong_method_is_405() {
        let res = send(&app(), "DELETE", "/hello").await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.body(), b"method not allowed");
    }

    #[tokio::test]
    async fn extension_method_on_known_path_is_405() {
        let res = send(&app(), "PURGE", "/hello").await;
        assert_eq!(res.status_code(), 405);
    }

    #[tokio::test]
    async fn unknown_path_is_404() {
        let res = send(&app(), "GET", "/nope").await;
        assert_eq!(res.status_code(), 404);
        assert!(res.body().is_empty());
    }

    #[tokio::test]
    async fn any_registers_every_method() {
        let router = app();
        for method in Method::ALL {
            let res = send(&router, method.as_str(), "/anything").await;
            assert_eq!(res.body(), method.as_str().as_bytes());
        }
    }

    #[tokio::test]
    async fn any_matches_extension_methods() {
        let res = send(&app(), "PURGE", "/anything").await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"PURGE");
    }

    #[tokio::test]
    async fn method_route_wins_over_any() {
        let router = Router::new()
            .on(Method::Get, "/both", hello)
            .any("/both", |_req: Request| async { "fallback" });
        assert_eq!(send(&router, "GET", "/both").await.body(), b"hello");
        assert_eq!(send(&router, "PUT", "/both").await.body(), b"fallback");
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_route_panics() {
        let _ = Router::new()
            .on(Method::Get, "/hello", hello)
            .on(Method::Get, "/hello", hello);
    }
}
