//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Placeholder baked into white-label builds before an admin id is
/// assigned. A compiled-in default equal to this value is ignored by
/// tenant resolution.
pub const PLACEHOLDER_ADMIN_ID: &str = "YOUR_ADMIN_ID";

/// Configuration for connecting to the admin catalog backend.
///
/// Timing knobs carry the production defaults; tests shrink them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g. "https://api.example.com")
    pub api_base: String,

    /// Compiled-in default admin id; ignored while it equals
    /// [`PLACEHOLDER_ADMIN_ID`].
    pub default_admin_id: String,

    /// Directory for durable local state (the `admin_id` entry).
    pub data_dir: PathBuf,

    /// Timeout for snapshot and discovery requests.
    pub request_timeout: Duration,

    /// Timeout per update-channel connect attempt.
    pub connect_timeout: Duration,

    /// Delay between update-channel connect attempts.
    pub reconnect_delay: Duration,

    /// Connect attempts per cycle before giving up.
    pub max_connect_attempts: u32,

    /// Fallback snapshot reload cadence covering missed push events.
    pub refresh_interval: Duration,
}

impl ClientConfig {
    /// Create a configuration with production defaults.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            default_admin_id: PLACEHOLDER_ADMIN_ID.to_string(),
            data_dir: PathBuf::from(".limpet"),
            request_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            reconnect_delay: Duration::from_millis(1000),
            max_connect_attempts: 5,
            refresh_interval: Duration::from_secs(300),
        }
    }

    /// Load configuration from the environment (`.env` supported).
    ///
    /// * `LIMPET_API_BASE` — backend base URL
    /// * `LIMPET_ADMIN_ID` — compiled-in/deployed default admin id
    /// * `LIMPET_DATA_DIR` — durable state directory
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        let api_base =
            std::env::var("LIMPET_API_BASE").unwrap_or_else(|_| "http://localhost:8080".to_string());
        let mut config = Self::new(api_base);

        if let Ok(admin_id) = std::env::var("LIMPET_ADMIN_ID") {
            config.default_admin_id = admin_id;
        }
        if let Ok(dir) = std::env::var("LIMPET_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        config
    }

    /// Set the compiled-in default admin id
    pub fn with_default_admin_id(mut self, admin_id: impl Into<String>) -> Self {
        self.default_admin_id = admin_id.into();
        self
    }

    /// Set the durable state directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    /// Set the snapshot/discovery request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the per-attempt connect timeout
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the delay between connect attempts
    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Set the number of connect attempts per cycle
    pub fn with_max_connect_attempts(mut self, attempts: u32) -> Self {
        self.max_connect_attempts = attempts;
        self
    }

    /// Set the fallback reload cadence
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// URL of the real-time update channel for this backend.
    pub fn updates_url(&self) -> String {
        let ws_base = self
            .api_base
            .replace("https://", "wss://")
            .replace("http://", "ws://");
        format!("{}/real-time-updates", ws_base.trim_end_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8080")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_updates_url_scheme_rewrite() {
        assert_eq!(
            ClientConfig::new("https://api.example.com").updates_url(),
            "wss://api.example.com/real-time-updates"
        );
        assert_eq!(
            ClientConfig::new("http://localhost:8080/").updates_url(),
            "ws://localhost:8080/real-time-updates"
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.max_connect_attempts, 5);
        assert_eq!(config.reconnect_delay, Duration::from_millis(1000));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.default_admin_id, PLACEHOLDER_ADMIN_ID);
    }
}
