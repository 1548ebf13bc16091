use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the account service used by the client
    #[serde(default = "default_auth_service_url")]
    pub auth_service_url: String,

    /// How long the welcome banner stays up after login, in milliseconds
    #[serde(default = "default_welcome_banner_ms")]
    pub welcome_banner_ms: u64,

    /// Idle time after which a browsing session is dropped, in seconds
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_auth_service_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_welcome_banner_ms() -> u64 {
    3000
}

fn default_session_ttl_secs() -> u64 {
    60 * 60 * 24
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            auth_service_url: default_auth_service_url(),
            welcome_banner_ms: default_welcome_banner_ms(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }

    pub fn welcome_banner(&self) -> Duration {
        Duration::from_millis(self.welcome_banner_ms)
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        i64::try_from(self.session_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}
