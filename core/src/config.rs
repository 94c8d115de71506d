//! Client configuration.
//!
//! # Design
//! `Config` is an immutable value. Setters on `HailoClient` build a modified
//! copy and swap it in whole, so a request that took a snapshot sees a
//! consistent key, endpoint and timeout even if a setter runs meanwhile.

use std::sync::LazyLock;
use std::time::Duration;

/// Production base URL of the Hailo API.
pub const DEFAULT_ENDPOINT: &str = "https://api.hailoapp.com";

/// Default per-request timeout: the two minute idle timeout of a stock
/// HTTP server socket.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Serialized user agent, computed once per process.
pub static USER_AGENT: LazyLock<String> = LazyLock::new(|| {
    serde_json::json!({
        "module": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "lang": "rust",
        "lang_version": env!("CARGO_PKG_RUST_VERSION"),
        "platform": std::env::consts::OS,
    })
    .to_string()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub end_point: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Config {
    /// Defaults for everything but the key. The key is not validated here.
    pub(crate) fn with_api_key(api_key: String) -> Self {
        Self {
            api_key,
            end_point: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: USER_AGENT.clone(),
        }
    }

    /// Look up a field by name, accepting camelCase and snake_case.
    pub fn get(&self, name: &str) -> Option<ConfigValue> {
        match name {
            "apiKey" | "api_key" => Some(ConfigValue::Text(self.api_key.clone())),
            "endPoint" | "end_point" => Some(ConfigValue::Text(self.end_point.clone())),
            "userAgent" | "user_agent" => Some(ConfigValue::Text(self.user_agent.clone())),
            "timeout" => Some(ConfigValue::Duration(self.timeout)),
            _ => None,
        }
    }
}

/// A configuration value returned by `HailoClient::get_config`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Duration(Duration),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(s) => Some(s),
            ConfigValue::Duration(_) => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            ConfigValue::Duration(d) => Some(*d),
            ConfigValue::Text(_) => None,
        }
    }
}
