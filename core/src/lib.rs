//! Async client for the Hailo taxi-dispatch API.
//!
//! # Overview
//! `HailoClient` holds an API key, a base URL, a timeout and a user agent,
//! and exposes one generic `request` plus the `status_up`, `drivers_eta` and
//! `drivers_near` operations. Replies come back as `serde_json::Value`.
//!
//! # Design
//! - Requests are described as plain data (`RequestDescriptor`,
//!   `HttpRequest`, `HttpResponse`); network I/O lives behind the
//!   `Transport` trait, with `ReqwestTransport` bundled.
//! - Only status 200 is success. Empty bodies yield `None`.
//! - Configuration is an immutable snapshot swapped on every setter.
//! - No retries, caching or rate limiting.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{parse_response, HailoClient};
pub use config::{Config, ConfigValue, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, USER_AGENT};
pub use error::{HailoError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Query, QueryValue, RequestDescriptor};
pub use transport::{ReqwestTransport, Transport};
pub use types::{ApiFailure, DriverEtas, Eta, NearbyDriver, NearbyDrivers};
