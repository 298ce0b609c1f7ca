use serde::{Deserialize, Serialize};

use crate::provider::ProviderKind;

/// How the Anthropic API version is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnthropicVersionHeader {
    /// `x-api-version: 2023-06-01`, what the shipped app has always sent
    #[default]
    Observed,
    /// `anthropic-version: 2023-06-01`, as the vendor documents it
    Documented,
}

fn default_temperature() -> f64 {
    0.1
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_from_lang() -> String {
    "auto".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

fn default_omit_system_message() -> Vec<ProviderKind> {
    vec![ProviderKind::DeepSeek]
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// `max_tokens` for the Anthropic messages API
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default)]
    pub anthropic_version_header: AnthropicVersionHeader,
    /// Vendors whose request carries no translator system message
    #[serde(default = "default_omit_system_message")]
    pub omit_system_message: Vec<ProviderKind>,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            anthropic_version_header: AnthropicVersionHeader::default(),
            omit_system_message: default_omit_system_message(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
        }
    }
}

impl TranslatorConfig {
    pub fn includes_system_message(&self, kind: ProviderKind) -> bool {
        !self.omit_system_message.contains(&kind)
    }
}
