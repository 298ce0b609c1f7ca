use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// HTTP settings shared by every provider call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Per-call timeout, covering connect through body read
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl NetworkConfig {
    pub fn new() -> Self {
        let timeout_seconds = env::var("DEEPTRANS_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        let user_agent = env::var("DEEPTRANS_USER_AGENT")
            .unwrap_or_else(|_| format!("deeptrans/{}", env!("CARGO_PKG_VERSION")));

        Self {
            timeout_seconds,
            user_agent,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: format!("deeptrans/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}
