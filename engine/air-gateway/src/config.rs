//! Configuration for the gateway binary.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use reading_store::StoreConfig;
use simulation_clock::PusherConfig;

/// Top-level service configuration: HTTP bind address plus the embedded
/// store and pusher sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Interface the HTTP API binds to
    pub host: String,

    /// Port the HTTP API binds to
    pub port: u16,

    /// Static artifact locations
    pub store: StoreConfig,

    /// Clock, tolerance and cadence settings
    pub pusher: PusherConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            store: StoreConfig::default(),
            pusher: PusherConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: GatewayConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the path named by `AIRWATCH_CONFIG`, or the
    /// defaults when the variable is unset.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var("AIRWATCH_CONFIG") {
            Ok(path) => Self::from_file(&path)
                .map_err(|e| anyhow::anyhow!("failed to load config from {path}: {e}")),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}
