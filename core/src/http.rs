//! HTTP request and response types, described as plain data.
//!
//! # Design
//! A `RequestDescriptor` is what a convenience operation asks for: a resource
//! path, a verb and an optional query. The client turns it into an
//! `HttpRequest` by adding headers, the full URL and the timeout, then hands
//! it to a `Transport`. The transport answers with an `HttpResponse` that the
//! client validates and parses. None of these types perform I/O.

use std::time::Duration;

use serde::Serialize;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A scalar query-string value. Encoding is left to the transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Number(f64),
    Text(String),
    Bool(bool),
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

/// Query parameters in insertion order. A `None` value is an argument the
/// caller left out; it is kept here and dropped by the transport's encoder.
pub type Query = Vec<(String, Option<QueryValue>)>;

/// A partial request: what to call, before auth and URL are filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub resource: String,
    pub method: HttpMethod,
    pub query: Option<Query>,
}

impl RequestDescriptor {
    pub fn get(resource: &str) -> Self {
        Self {
            resource: resource.to_string(),
            method: HttpMethod::Get,
            query: None,
        }
    }

    /// Append a query entry, creating the query on first use.
    pub fn with_query(mut self, key: &str, value: Option<QueryValue>) -> Self {
        self.query
            .get_or_insert_with(Vec::new)
            .push((key.to_string(), value));
        self
    }
}

/// A fully specified outbound request.
///
/// Built by `HailoClient::build_request`. `url` is the configured endpoint
/// followed by the descriptor's resource.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub query: Option<Query>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
