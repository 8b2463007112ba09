//! Server Configuration

use serde::Deserialize;

/// Runtime configuration, sourced from `QUAKE_*` environment variables
/// with static defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Listen address
    pub bind_addr: String,
    /// Default suppression window (seconds) when none is set in the cache
    pub suppress_window_secs: u64,
    /// Age at which an open alert is autoclosed (seconds)
    pub autoclose_timeout_secs: u64,
    /// Cadence of the background autoclose sweep (seconds)
    pub sweep_interval_secs: u64,
    /// WebSocket keep-alive ping interval (seconds)
    pub ping_interval_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            suppress_window_secs: 600,
            autoclose_timeout_secs: 3600,
            sweep_interval_secs: 60,
            ping_interval_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Load configuration, letting `QUAKE_*` environment variables
    /// override the defaults (e.g. `QUAKE_BIND_ADDR`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = ApiConfig::default();
        config::Config::builder()
            .set_default("bind_addr", defaults.bind_addr)?
            .set_default("suppress_window_secs", defaults.suppress_window_secs)?
            .set_default("autoclose_timeout_secs", defaults.autoclose_timeout_secs)?
            .set_default("sweep_interval_secs", defaults.sweep_interval_secs)?
            .set_default("ping_interval_secs", defaults.ping_interval_secs)?
            .add_source(config::Environment::with_prefix("QUAKE"))
            .build()?
            .try_deserialize()
    }
}
