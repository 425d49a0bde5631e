//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// An incoming HTTP request with its body fully read.
///
/// The router reads the body before the handler runs, so handlers see plain
/// bytes and never deal with streaming or body-read failures.
pub struct Request {
    method: http::Method,
    path: String,
    query: Option<String>,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        parts: http::request::Parts,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self {
            path: parts.uri.path().to_owned(),
            query: parts.uri.query().map(str::to_owned),
            method: parts.method,
            body,
            params,
        }
    }

    pub fn method(&self) -> &http::Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn query(&self) -> Option<&str> { self.query.as_deref() }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Deserializes the body as JSON into a fresh value.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(uri: &str, body: &'static [u8]) -> Request {
        let (parts, ()) = http::Request::builder()
            .uri(uri)
            .body(())
            .unwrap()
            .into_parts();
        let params = HashMap::from([("id".to_owned(), "7".to_owned())]);
        Request::new(parts, Bytes::from_static(body), params)
    }

    #[test]
    fn splits_path_and_query() {
        let req = request("/users/7?verbose=1", b"");
        assert_eq!(req.path(), "/users/7");
        assert_eq!(req.query(), Some("verbose=1"));
        assert_eq!(req.param("id"), Some("7"));
        assert_eq!(req.param("name"), None);
    }

    #[test]
    fn json_reports_parser_errors() {
        let req = request("/", b"{\"Name\":");
        assert!(req.json::<serde_json::Value>().is_err());
    }
}
