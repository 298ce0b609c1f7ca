use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

/// A completed translation, as kept in history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub id: Uuid,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: Language,
    pub target_language: Language,
    /// Display name of the provider that produced the translation
    pub provider: String,
    pub timestamp: DateTime<Utc>,
}

impl TranslationResult {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        source_language: Language,
        target_language: Language,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            source_language,
            target_language,
            provider: provider.into(),
            timestamp: Utc::now(),
        }
    }

    /// Single-line preview of the source text
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.source_text.replace(['\n', '\r'], " ");
        if flat.chars().count() > max_chars {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{cut}...")
        } else {
            flat
        }
    }
}
