//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port and drives every client
//! operation over real HTTP through the bundled reqwest transport.

use hailo_core::{ApiFailure, DriverEtas, HailoClient, HailoError, NearbyDrivers};
use serde_json::json;

const MOCK_KEY: &str = mock_server::MOCK_API_KEY;

/// Spawn the mock server on a random port and return its base URL.
async fn start_mock_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    format!("http://{addr}")
}

async fn client(key: &str) -> HailoClient {
    let client = HailoClient::new(key).unwrap();
    client.set_end_point(&start_mock_server().await);
    client
}

#[tokio::test]
async fn status_up_is_empty_array() {
    let client = client(MOCK_KEY).await;
    let value = client.status_up().await.unwrap();
    assert_eq!(value, Some(json!([])));
}

#[tokio::test]
async fn drivers_eta_by_lat_long() {
    let client = client(MOCK_KEY).await;
    let value = client.drivers_eta(51.510761, 0.1174437).await.unwrap();
    assert_eq!(
        value,
        Some(json!({
            "etas": [
                { "eta": 6, "count": 3, "service_type": "regular" },
                { "eta": 6, "count": 3, "service_type": "executive" }
            ]
        }))
    );

    let etas: DriverEtas = serde_json::from_value(value.unwrap()).unwrap();
    assert_eq!(etas.etas.len(), 2);
    assert_eq!(etas.etas[1].service_type, "executive");
}

#[tokio::test]
async fn drivers_eta_by_different_lat_long() {
    let client = client(MOCK_KEY).await;
    let value = client.drivers_eta(52.510761, 0.1174437).await.unwrap();
    assert_eq!(value, Some(json!({})));
}

#[tokio::test]
async fn drivers_eta_requires_auth() {
    let client = client(MOCK_KEY).await;
    client.set_api_key("123456789").unwrap();

    let value = client.drivers_eta(None, None).await.unwrap().unwrap();
    let failure: ApiFailure = serde_json::from_value(value).unwrap();
    assert!(!failure.status);
    assert_eq!(failure.code, 201);
    assert_eq!(failure.dotted_code, "com.hailocab.kernel.auth.badrole");
    assert!(failure.context.is_empty());
}

#[tokio::test]
async fn drivers_near_without_coordinates() {
    let client = client(MOCK_KEY).await;
    let value = client.drivers_near(None, None).await.unwrap().unwrap();

    let near: NearbyDrivers = serde_json::from_value(value).unwrap();
    assert_eq!(near.drivers.len(), 5);
    assert_eq!(near.drivers[0].latitude, 51.50808);
    assert_eq!(near.drivers[0].longitude, -0.116408);
    assert!(near.drivers.iter().all(|d| d.service_type == "regular"));
}

#[tokio::test]
async fn key_rotation_applies_to_next_request() {
    let client = client("wrong").await;
    let value = client.drivers_near(None, None).await.unwrap().unwrap();
    assert_eq!(value["status"], false);

    client.set_api_key(MOCK_KEY).unwrap();
    let value = client.drivers_near(None, None).await.unwrap().unwrap();
    assert!(value["drivers"].is_array());
}

#[tokio::test]
async fn unknown_resource_is_http_error() {
    let client = client(MOCK_KEY).await;
    let err = client
        .request(hailo_core::RequestDescriptor::get("/drivers/far"))
        .await
        .unwrap_err();
    assert!(matches!(err, HailoError::Http { status: 404, .. }));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HailoClient::new(MOCK_KEY).unwrap();
    client.set_end_point(&format!("http://{addr}"));
    let err = client.status_up().await.unwrap_err();
    assert!(matches!(err, HailoError::Transport(_)));
}
