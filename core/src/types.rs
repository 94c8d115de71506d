//! Typed views of the API's JSON replies.
//!
//! # Design
//! The client returns `serde_json::Value` because a 200 reply may carry
//! either a success payload or an `ApiFailure`. These DTOs let callers
//! convert a value once they know which shape they expect:
//!
//! ```
//! # use hailo_core::DriverEtas;
//! let value = serde_json::json!({"etas": [{"eta": 6, "count": 3, "service_type": "regular"}]});
//! let etas: DriverEtas = serde_json::from_value(value).unwrap();
//! assert_eq!(etas.etas[0].eta, 6);
//! ```

use serde::{Deserialize, Serialize};

/// One ETA estimate for a service type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Eta {
    /// Minutes until pickup.
    pub eta: u32,
    /// Drivers contributing to the estimate.
    pub count: u32,
    pub service_type: String,
}

/// Reply of `GET /drivers/eta`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DriverEtas {
    #[serde(default)]
    pub etas: Vec<Eta>,
}

/// A driver position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyDriver {
    pub latitude: f64,
    pub longitude: f64,
    pub service_type: String,
}

/// Reply of `GET /drivers/near`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct NearbyDrivers {
    #[serde(default)]
    pub drivers: Vec<NearbyDriver>,
}

/// Error envelope the API sends with a 200 status, e.g. for a bad key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiFailure {
    pub status: bool,
    pub payload: String,
    pub code: u32,
    pub dotted_code: String,
    #[serde(default)]
    pub context: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_no_etas() {
        let etas: DriverEtas = serde_json::from_str("{}").unwrap();
        assert!(etas.etas.is_empty());
    }

    #[test]
    fn auth_failure_envelope_parses() {
        let failure: ApiFailure = serde_json::from_str(
            r#"{"status":false,"payload":"Must be signed in","code":201,"dotted_code":"com.hailocab.kernel.auth.badrole","context":[]}"#,
        )
        .unwrap();
        assert!(!failure.status);
        assert_eq!(failure.code, 201);
        assert_eq!(failure.dotted_code, "com.hailocab.kernel.auth.badrole");
    }

    #[test]
    fn success_body_is_not_a_failure() {
        let result: Result<ApiFailure, _> = serde_json::from_str(r#"{"etas":[]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn nearby_driver_keeps_negative_longitude() {
        let drivers: NearbyDrivers = serde_json::from_str(
            r#"{"drivers":[{"latitude":51.50808,"longitude":-0.116408,"service_type":"regular"}]}"#,
        )
        .unwrap();
        assert_eq!(drivers.drivers[0].longitude, -0.116408);
    }
}
