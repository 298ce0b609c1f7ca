use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEEPSEEK_BASE_URL: &str = "https://api.deepseek.com";
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Vendor behind a configured provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "OpenAI")]
    OpenAi,
    DeepSeek,
    Anthropic,
    Gemini,
    Mistral,
    Custom,
}

/// Request/response schema family a vendor speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    OpenAiCompatible,
    Anthropic,
    Gemini,
    /// OpenAI-shaped request with a plain-text response fallback
    Custom,
}

impl ProviderKind {
    pub const ALL: &'static [Self] = &[
        Self::OpenAi,
        Self::DeepSeek,
        Self::Anthropic,
        Self::Gemini,
        Self::Mistral,
        Self::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::DeepSeek => "deepseek",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
            Self::Mistral => "mistral",
            Self::Custom => "custom",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::DeepSeek => "DeepSeek",
            Self::Anthropic => "Anthropic",
            Self::Gemini => "Gemini",
            Self::Mistral => "Mistral",
            Self::Custom => "Custom",
        }
    }

    pub fn wire_format(self) -> WireFormat {
        match self {
            Self::OpenAi | Self::DeepSeek | Self::Mistral => WireFormat::OpenAiCompatible,
            Self::Anthropic => WireFormat::Anthropic,
            Self::Gemini => WireFormat::Gemini,
            Self::Custom => WireFormat::Custom,
        }
    }

    /// Custom backends may be keyless (local model servers)
    pub fn requires_api_key(self) -> bool {
        self != Self::Custom
    }

    /// Model id suggested when a provider of this kind is created
    pub fn default_model(self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o",
            Self::DeepSeek => "deepseek-chat",
            Self::Anthropic => "claude-3-sonnet",
            Self::Gemini => "gemini-pro",
            Self::Mistral => "mistral-large",
            Self::Custom => "",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider kind: {0}")]
pub struct UnknownProviderKind(pub String);

impl FromStr for ProviderKind {
    type Err = UnknownProviderKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "deepseek" => Ok(Self::DeepSeek),
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "gemini" | "google" => Ok(Self::Gemini),
            "mistral" => Ok(Self::Mistral),
            "custom" => Ok(Self::Custom),
            _ => Err(UnknownProviderKind(s.to_string())),
        }
    }
}

/// A configured translation backend
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: Uuid,
    pub name: String,
    pub kind: ProviderKind,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    /// Full chat endpoint, only meaningful for [`ProviderKind::Custom`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_models: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub models_fetched_at: Option<DateTime<Utc>>,
}

impl Provider {
    pub fn new(
        name: impl Into<String>,
        kind: ProviderKind,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: None,
            cached_models: None,
            models_fetched_at: None,
        }
    }

    pub fn custom(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: Some(endpoint.into()),
            ..Self::new(name, ProviderKind::Custom, api_key, model)
        }
    }

    /// Stock roster, OpenAI first
    pub fn defaults() -> Vec<Provider> {
        [
            ProviderKind::OpenAi,
            ProviderKind::DeepSeek,
            ProviderKind::Anthropic,
            ProviderKind::Gemini,
            ProviderKind::Mistral,
        ]
        .into_iter()
        .map(|kind| Provider::new(kind.display_name(), kind, "", kind.default_model()))
        .collect()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Chat endpoint for this provider; `None` when a custom endpoint is unset
    pub fn chat_endpoint(&self) -> Option<String> {
        match self.kind {
            ProviderKind::OpenAi => Some(format!("{OPENAI_BASE_URL}/chat/completions")),
            ProviderKind::DeepSeek => Some(format!("{DEEPSEEK_BASE_URL}/v1/chat/completions")),
            ProviderKind::Mistral => Some(format!("{MISTRAL_BASE_URL}/chat/completions")),
            ProviderKind::Anthropic => Some(format!("{ANTHROPIC_BASE_URL}/messages")),
            ProviderKind::Gemini => Some(format!(
                "{GEMINI_BASE_URL}/models/{}:generateContent",
                self.model.trim()
            )),
            ProviderKind::Custom => self
                .endpoint
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        }
    }

    /// Whether the cached model list needs a refetch
    pub fn models_stale(&self, now: DateTime<Utc>, max_age: TimeDelta) -> bool {
        match (&self.cached_models, self.models_fetched_at) {
            (Some(models), Some(at)) if !models.is_empty() => now - at > max_age,
            _ => true,
        }
    }

    pub fn set_cached_models(&mut self, models: Vec<String>, fetched_at: DateTime<Utc>) {
        if models.is_empty() {
            self.cached_models = None;
            self.models_fetched_at = None;
        } else {
            self.cached_models = Some(models);
            self.models_fetched_at = Some(fetched_at);
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("api_key", &if self.has_api_key() { "<redacted>" } else { "" })
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("cached_models", &self.cached_models.as_ref().map(Vec::len))
            .field("models_fetched_at", &self.models_fetched_at)
            .finish()
    }
}
