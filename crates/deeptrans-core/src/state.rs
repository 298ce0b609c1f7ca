use deeptrans_config::Config;
use deeptrans_translator::TranslateError;
use deeptrans_types::{Language, TranslationResult};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::history::TranslationHistory;
use crate::language::{LanguageDetector, ScriptDetector, resolve_languages};
use crate::providers::ProviderStore;
use crate::service::TranslationService;

pub struct AppState {
    pub config: Config,
    pub providers: RwLock<ProviderStore>,
    pub history: RwLock<TranslationHistory>,
    pub service: TranslationService,
    detector: Box<dyn LanguageDetector>,
}

impl AppState {
    pub fn new(
        config: Config,
        service: TranslationService,
        providers: ProviderStore,
        history: TranslationHistory,
    ) -> Self {
        Self {
            config,
            providers: RwLock::new(providers),
            history: RwLock::new(history),
            service,
            detector: Box::new(ScriptDetector),
        }
    }

    pub fn with_detector(mut self, detector: Box<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Translate with the provider at `provider_index` (the active one when
    /// `None`) and record the result in history.
    ///
    /// An `auto` source is detected, and text already in the target language
    /// swaps the pair. Returns `None` for blank input only. The stores are
    /// not locked while the request is in flight.
    pub async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
        provider_index: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<Option<TranslationResult>, TranslateError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let provider = {
            let store = self.providers.read().await;
            match provider_index {
                Some(index) => store.get(index).cloned().ok_or_else(|| {
                    TranslateError::InvalidConfiguration(format!("no provider at index {index}"))
                })?,
                None => store.active().clone(),
            }
        };

        let (source, target) = resolve_languages(source, target, text, self.detector.as_ref()).ok_or_else(|| {
            TranslateError::InvalidConfiguration("could not detect the source language, choose it explicitly".into())
        })?;

        let translated = self
            .service
            .translate_with_cancel(text, &source, &target, &provider, cancel)
            .await?;

        let result = TranslationResult::new(text, translated, source, target, provider.name.clone());
        self.history.write().await.push(result.clone());
        Ok(Some(result))
    }
}
