use std::env;
use std::path::PathBuf;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use self::network::NetworkConfig;
use self::translator::TranslatorConfig;

pub mod network;
pub mod provider;
pub mod translator;

pub use provider::{Provider, ProviderKind, WireFormat};
pub use translator::AnthropicVersionHeader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub network: NetworkConfig,
    pub translator: TranslatorConfig,

    /// Max translations kept in history, oldest evicted first
    pub history_limit: usize,
    /// Age after which a provider's cached model list is refetched
    pub model_cache_days: i64,
    /// Directory holding the profile file
    pub home_dir: PathBuf,
}

impl Config {
    pub fn new() -> Self {
        let history_limit = env::var("DEEPTRANS_HISTORY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|v| *v > 0)
            .unwrap_or(100); // matches the app's history cap

        let model_cache_days = env::var("DEEPTRANS_MODEL_CACHE_DAYS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3);

        let home_dir = env::var("DEEPTRANS_HOME")
            .map(PathBuf::from)
            .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".deeptrans")))
            .unwrap_or_else(|_| PathBuf::from(".deeptrans"));

        Config {
            network: NetworkConfig::new(),
            translator: TranslatorConfig::default(),

            history_limit,
            model_cache_days,
            home_dir,
        }
    }

    pub fn model_cache_max_age(&self) -> TimeDelta {
        TimeDelta::days(self.model_cache_days)
    }

    pub fn profile_path(&self) -> PathBuf {
        self.home_dir.join("profile.json")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            translator: TranslatorConfig::default(),
            history_limit: 100,
            model_cache_days: 3,
            home_dir: PathBuf::from(".deeptrans"),
        }
    }
}
