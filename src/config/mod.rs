use serde::Deserialize;

// Re-export the config type that lives beside its subsystem
pub use crate::snapshot::config::SnapshotConfig;

/// Complete Paddock configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaddockConfig {
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Feed polling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Feed endpoint returning the JSON event batch
    #[serde(default = "default_feed_url")]
    pub url: String,

    /// Seconds between reconciliation passes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,

    /// Request timeout for one fetch
    #[serde(default = "default_feed_timeout")]
    pub timeout_seconds: u64,
}

fn default_feed_url() -> String {
    "http://localhost:9000/feed".to_string()
}

fn default_poll_interval() -> u64 {
    60
}

fn default_feed_timeout() -> u64 {
    10
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            poll_interval_seconds: default_poll_interval(),
            timeout_seconds: default_feed_timeout(),
        }
    }
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address for the API server
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

/// Load configuration from TOML file
pub fn load_config(path: &str) -> Result<PaddockConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let config: PaddockConfig = toml::from_str(&contents)?;
    Ok(config)
}
