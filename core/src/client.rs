//! Authenticated client for the Hailo API.
//!
//! # Design
//! `HailoClient` owns a configuration snapshot and a `Transport`. Every
//! operation is split the same way: a descriptor says what to call,
//! `build_request` fills in auth, user agent, URL and timeout from one
//! snapshot, the transport performs the round trip, and `parse_response`
//! validates the status and decodes the body. Only the round trip suspends.
//!
//! Setters replace the snapshot wholesale. A request racing a setter sees
//! either the old or the new configuration, never a mix of both; which one
//! it sees is unspecified.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use crate::config::{Config, ConfigValue};
use crate::error::{HailoError, Result};
use crate::http::{HttpRequest, HttpResponse, RequestDescriptor};
use crate::transport::{ReqwestTransport, Transport};

/// Async client for the Hailo API.
///
/// Cheap to share behind an `Arc`; concurrent requests do not block each
/// other.
pub struct HailoClient<T = ReqwestTransport> {
    config: RwLock<Arc<Config>>,
    transport: T,
}

impl HailoClient<ReqwestTransport> {
    /// Create a client over the bundled reqwest transport.
    ///
    /// Fails with `InvalidCredential` if `api_key` is empty.
    pub fn new(api_key: &str) -> Result<Self> {
        let config = validated(api_key)?;
        Ok(Self::from_parts(config, ReqwestTransport::new()?))
    }
}

impl<T: Transport> HailoClient<T> {
    /// Create a client over a caller-supplied transport.
    pub fn with_transport(api_key: &str, transport: T) -> Result<Self> {
        let config = validated(api_key)?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: Config, transport: T) -> Self {
        Self {
            config: RwLock::new(Arc::new(config)),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // -----------------------------------------------------------------------
    // Convenience operations
    // -----------------------------------------------------------------------

    /// `GET /status/up`. The live API answers with an empty array.
    pub async fn status_up(&self) -> Result<Option<Value>> {
        self.request(RequestDescriptor::status_up()).await
    }

    /// `GET /drivers/eta?latitude=..&longitude=..`.
    ///
    /// Coordinates are not range-checked; `None` leaves the parameter out.
    pub async fn drivers_eta(
        &self,
        latitude: impl Into<Option<f64>>,
        longitude: impl Into<Option<f64>>,
    ) -> Result<Option<Value>> {
        self.request(RequestDescriptor::drivers_eta(latitude, longitude)).await
    }

    /// `GET /drivers/near?latitude=..&longitude=..`.
    pub async fn drivers_near(
        &self,
        latitude: impl Into<Option<f64>>,
        longitude: impl Into<Option<f64>>,
    ) -> Result<Option<Value>> {
        self.request(RequestDescriptor::drivers_near(latitude, longitude)).await
    }

    // -----------------------------------------------------------------------
    // Generic request
    // -----------------------------------------------------------------------

    /// Authenticate `descriptor`, send it, and parse the JSON reply.
    ///
    /// Returns `Ok(None)` for an empty 200 body.
    #[instrument(skip_all, fields(resource = %descriptor.resource))]
    pub async fn request(&self, descriptor: RequestDescriptor) -> Result<Option<Value>> {
        let request = self.build_request(descriptor);
        debug!(method = request.method.as_str(), url = %request.url, "sending request");

        let response = self.transport.send(request).await.inspect_err(|e| {
            warn!(error = %e, "transport returned no response");
        })?;
        parse_response(response)
    }

    /// Turn a descriptor into a complete request using the current
    /// configuration snapshot.
    pub fn build_request(&self, descriptor: RequestDescriptor) -> HttpRequest {
        let config = self.config();
        HttpRequest {
            method: descriptor.method,
            url: format!("{}{}", config.end_point, descriptor.resource),
            headers: vec![
                ("User-Agent".to_string(), config.user_agent.clone()),
                ("Authorization".to_string(), format!("token {}", config.api_key)),
            ],
            query: descriptor.query,
            timeout: config.timeout,
        }
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// The current configuration snapshot.
    pub fn config(&self) -> Arc<Config> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Named lookup, e.g. `get_config("apiKey")`. Unknown names return `None`.
    pub fn get_config(&self, name: &str) -> Option<ConfigValue> {
        self.config().get(name)
    }

    pub fn api_key(&self) -> String {
        self.config().api_key.clone()
    }

    pub fn end_point(&self) -> String {
        self.config().end_point.clone()
    }

    pub fn timeout(&self) -> Duration {
        self.config().timeout
    }

    pub fn user_agent(&self) -> String {
        self.config().user_agent.clone()
    }

    /// Install a new API key. An empty key is rejected and the current one
    /// stays in place.
    pub fn set_api_key(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(HailoError::InvalidCredential);
        }
        self.update(|c| c.api_key = key.to_string());
        Ok(())
    }

    /// Point the client at another base URL. An empty URL is ignored.
    pub fn set_end_point(&self, url: &str) {
        if !url.is_empty() {
            self.update(|c| c.end_point = url.to_string());
        }
    }

    /// Change the per-request timeout. A zero duration is ignored.
    pub fn set_timeout(&self, timeout: Duration) {
        if !timeout.is_zero() {
            self.update(|c| c.timeout = timeout);
        }
    }

    fn update(&self, apply: impl FnOnce(&mut Config)) {
        let mut current = self
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let mut next = Config::clone(&current);
        apply(&mut next);
        *current = Arc::new(next);
    }
}

impl<T> fmt::Debug for HailoClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        f.debug_struct("HailoClient")
            .field("end_point", &config.end_point)
            .field("timeout", &config.timeout)
            .finish_non_exhaustive()
    }
}

fn validated(api_key: &str) -> Result<Config> {
    if api_key.is_empty() {
        return Err(HailoError::InvalidCredential);
    }
    Ok(Config::with_api_key(api_key.to_string()))
}

/// Descriptors for the API's resources.
impl RequestDescriptor {
    pub fn status_up() -> Self {
        Self::get("/status/up")
    }

    pub fn drivers_eta(latitude: impl Into<Option<f64>>, longitude: impl Into<Option<f64>>) -> Self {
        Self::get("/drivers/eta").with_coordinates(latitude.into(), longitude.into())
    }

    pub fn drivers_near(latitude: impl Into<Option<f64>>, longitude: impl Into<Option<f64>>) -> Self {
        Self::get("/drivers/near").with_coordinates(latitude.into(), longitude.into())
    }

    fn with_coordinates(self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.with_query("latitude", latitude.map(Into::into))
            .with_query("longitude", longitude.map(Into::into))
    }
}

/// Validate a transport response and decode its body.
///
/// Only status 200 is accepted. An empty body is `None`; anything else must
/// be JSON.
pub fn parse_response(response: HttpResponse) -> Result<Option<Value>> {
    check_status(&response)?;
    if response.body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(HailoError::from)
}

fn check_status(response: &HttpResponse) -> Result<()> {
    if response.status == 200 {
        return Ok(());
    }
    warn!(status = response.status, "unexpected status");
    Err(HailoError::Http {
        status: response.status,
        body: response.body.clone(),
    })
}
