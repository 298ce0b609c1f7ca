use std::fs;
use std::path::Path;

use anyhow::Context;
use deeptrans_config::Config;
use deeptrans_config::translator::TranslatorConfig;
use deeptrans_core::{AppState, ProviderStore, TranslationHistory, TranslationService};
use deeptrans_types::TranslationResult;
use serde::{Deserialize, Serialize};

/// Everything persisted between runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub providers: ProviderStore,
    #[serde(default)]
    pub translator: TranslatorConfig,
    /// Newest first
    #[serde(default)]
    pub history: Vec<TranslationResult>,
}

/// Load the profile, or the stock one when the file does not exist yet
pub fn load_profile(path: &Path) -> anyhow::Result<Profile> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no profile yet, using defaults");
        return Ok(Profile::default());
    }

    let data = fs::read_to_string(path).with_context(|| format!("reading profile {}", path.display()))?;
    let profile = serde_json::from_str(&data).with_context(|| format!("parsing profile {}", path.display()))?;
    Ok(profile)
}

/// Write the profile through a temp file so a crash never leaves it half written
pub fn save_profile(path: &Path, profile: &Profile) -> anyhow::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, serde_json::to_string_pretty(profile)?).with_context(|| format!("writing {}", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| format!("replacing {}", path.display()))?;

    tracing::debug!(path = %path.display(), "profile saved");
    Ok(())
}

/// Build the runtime state from env config plus the stored profile
pub fn build_state(mut config: Config, profile: Profile) -> anyhow::Result<AppState> {
    config.translator = profile.translator;
    let service = TranslationService::from_config(&config).context("building HTTP client")?;
    let history = TranslationHistory::with_entries(profile.history, config.history_limit);
    Ok(AppState::new(config, service, profile.providers, history))
}

/// Capture the state back into a profile for saving
pub async fn snapshot(state: &AppState) -> Profile {
    Profile {
        providers: state.providers.read().await.clone(),
        translator: state.config.translator.clone(),
        history: state.history.read().await.entries().to_vec(),
    }
}
