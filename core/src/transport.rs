//! The HTTP transport seam.
//!
//! `HailoClient` never touches the network itself. It hands a finished
//! `HttpRequest` to a `Transport` and gets an `HttpResponse` back, whatever
//! its status. Bring your own implementation to run the client over a
//! different HTTP stack, or use the bundled `ReqwestTransport`.

use async_trait::async_trait;
use tracing::trace;

use crate::error::{HailoError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Async HTTP capability the client delegates I/O to.
///
/// Implementations must return every response as data, including non-2xx
/// statuses; only a missing response (connect failure, timeout) is an error,
/// reported as `HailoError::Transport`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// `Transport` backed by a pooled `reqwest::Client`.
///
/// Redirects are not followed: a 3xx reaches the client as-is and is
/// rejected like any other non-200 status.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        Self::with_builder(reqwest::Client::builder())
    }

    /// Build from a caller-configured builder (proxy, TLS, pool settings).
    /// Any redirect policy on `builder` is replaced with `Policy::none()`.
    pub fn with_builder(builder: reqwest::ClientBuilder) -> Result<Self> {
        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // serde_urlencoded drops `None` entries
        if let Some(query) = &request.query {
            builder = builder.query(query);
        }

        let response = builder.send().await.map_err(HailoError::from)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response.text().await.map_err(HailoError::from)?;
        trace!(status, len = body.len(), "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
