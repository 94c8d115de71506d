//! In-process stand-in for the Hailo API.
//!
//! Serves the three read-only resources the client knows about with the
//! bodies the live service was observed to return. Authentication failures
//! come back with status 200 and an error envelope, as the real API does.

use std::collections::HashMap;

use axum::{
    extract::Query,
    http::{header::AUTHORIZATION, HeaderMap},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// The only key the mock accepts.
pub const MOCK_API_KEY: &str = "MyAPIKeyForTheMockServer";

/// Latitude for which `/drivers/eta` reports drivers.
pub const KNOWN_LATITUDE: f64 = 51.510761;

/// Raw query parameters; nothing is rejected before the auth check.
pub type Params = HashMap<String, String>;

/// Read a coordinate leniently: missing or non-numeric values are `None`.
pub fn coordinate(params: &Params, name: &str) -> Option<f64> {
    params.get(name).and_then(|s| s.parse::<f64>().ok())
}

pub fn app() -> Router {
    Router::new()
        .route("/status/up", get(status_up))
        .route("/drivers/eta", get(drivers_eta))
        .route("/drivers/near", get(drivers_near))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn authorized(headers: &HeaderMap) -> bool {
    let expected = format!("token {MOCK_API_KEY}");
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected)
}

pub fn auth_failure() -> Value {
    json!({
        "status": false,
        "payload": "Must be signed in to call this endpoint[endpoint=near, service=com.hailocab.api.drivers, from=com.hailocab.hailo-2-api]",
        "code": 201,
        "dotted_code": "com.hailocab.kernel.auth.badrole",
        "context": []
    })
}

pub fn known_etas() -> Value {
    json!({
        "etas": [
            { "eta": 6, "count": 3, "service_type": "regular" },
            { "eta": 6, "count": 3, "service_type": "executive" }
        ]
    })
}

pub fn nearby_drivers() -> Value {
    json!({
        "drivers": [
            { "latitude": 51.50808, "longitude": -0.116408, "service_type": "regular" },
            { "latitude": 51.504695, "longitude": -0.113202, "service_type": "regular" },
            { "latitude": 51.51135, "longitude": -0.127148, "service_type": "regular" },
            { "latitude": 51.511745, "longitude": -0.117742, "service_type": "regular" },
            { "latitude": 51.509996, "longitude": -0.118696, "service_type": "regular" }
        ]
    })
}

async fn status_up() -> Json<Value> {
    Json(json!([]))
}

async fn drivers_eta(headers: HeaderMap, Query(params): Query<Params>) -> Json<Value> {
    debug!(?params, "drivers eta");
    if !authorized(&headers) {
        return Json(auth_failure());
    }
    if coordinate(&params, "latitude") == Some(KNOWN_LATITUDE) {
        Json(known_etas())
    } else {
        Json(json!({}))
    }
}

async fn drivers_near(headers: HeaderMap, Query(params): Query<Params>) -> Json<Value> {
    debug!(?params, "drivers near");
    if !authorized(&headers) {
        return Json(auth_failure());
    }
    Json(nearby_drivers())
}
