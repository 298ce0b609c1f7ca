use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{TimeDelta, Utc};
use deeptrans_config::Config;
use deeptrans_config::Provider;
use deeptrans_config::translator::TranslatorConfig;
use deeptrans_translator::{
    HttpTransport, ReqwestTransport, TranslateError, TranslationRequest, TransportError, adapter_for, fetch_models,
    send_translation,
};
use deeptrans_types::Language;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::in_flight::InFlight;

/// Entry point for translations.
///
/// Validates the request, picks the adapter for the provider's wire format
/// and runs exactly one exchange, bounded by a timeout and a cancel token.
pub struct TranslationService {
    transport: Arc<dyn HttpTransport>,
    translator: TranslatorConfig,
    timeout: Duration,
    in_flight: InFlight,
}

impl TranslationService {
    pub fn new(transport: Arc<dyn HttpTransport>, translator: TranslatorConfig, timeout: Duration) -> Self {
        Self {
            transport,
            translator,
            timeout,
            in_flight: InFlight::new(),
        }
    }

    /// Service backed by a real HTTP client
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(&config.network)?;
        Ok(Self::new(
            Arc::new(transport),
            config.translator.clone(),
            config.network.timeout(),
        ))
    }

    pub fn is_translating(&self) -> bool {
        self.in_flight.is_active()
    }

    pub fn watch_in_flight(&self) -> watch::Receiver<usize> {
        self.in_flight.subscribe()
    }

    pub async fn translate(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
        provider: &Provider,
    ) -> Result<String, TranslateError> {
        self.translate_with_cancel(text, source, target, provider, &CancellationToken::new())
            .await
    }

    pub async fn translate_with_cancel(
        &self,
        text: &str,
        source: &Language,
        target: &Language,
        provider: &Provider,
        cancel: &CancellationToken,
    ) -> Result<String, TranslateError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        validate(source, target, provider)?;

        let _guard = self.in_flight.enter();
        let adapter = adapter_for(provider.kind, &self.translator);
        let request = TranslationRequest::new(text, source, target, provider);
        let started = Instant::now();

        let exchange = tokio::time::timeout(
            self.timeout,
            send_translation(self.transport.as_ref(), adapter.as_ref(), &request),
        );

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(TranslateError::Cancelled),
            outcome = exchange => match outcome {
                Ok(result) => result,
                Err(_) => Err(TranslateError::transport(
                    &provider.name,
                    TransportError::Timeout(self.timeout),
                )),
            },
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(translated) => tracing::info!(
                provider = %provider.name,
                format = adapter.format_name(),
                from = %source.code,
                to = %target.code,
                chars = translated.chars().count(),
                elapsed_ms,
                "translation finished"
            ),
            Err(TranslateError::Cancelled) => {
                tracing::info!(provider = %provider.name, elapsed_ms, "translation cancelled")
            }
            Err(e) => tracing::warn!(provider = %provider.name, elapsed_ms, "translation failed: {e}"),
        }

        result
    }

    /// Model list for a provider, refetched when the cache is older than
    /// `max_age` or `force` is set. Failures keep the previous cache.
    pub async fn refresh_models(
        &self,
        provider: &mut Provider,
        max_age: TimeDelta,
        force: bool,
    ) -> Result<Vec<String>, TranslateError> {
        let now = Utc::now();
        if !force && !provider.models_stale(now, max_age) {
            return Ok(provider.cached_models.clone().unwrap_or_default());
        }

        let fetched = tokio::time::timeout(self.timeout, fetch_models(self.transport.as_ref(), provider))
            .await
            .map_err(|_| TranslateError::transport(&provider.name, TransportError::Timeout(self.timeout)))??;

        if !fetched.is_empty() {
            provider.set_cached_models(fetched.clone(), now);
        }
        Ok(fetched)
    }
}

fn validate(source: &Language, target: &Language, provider: &Provider) -> Result<(), TranslateError> {
    if provider.kind.requires_api_key() && !provider.has_api_key() {
        return Err(TranslateError::MissingCredential {
            provider: provider.name.clone(),
        });
    }

    if provider.model.trim().is_empty() {
        return Err(TranslateError::InvalidConfiguration(format!(
            "{} has no model selected",
            provider.name
        )));
    }

    if target.is_auto() {
        return Err(TranslateError::InvalidConfiguration(
            "target language cannot be auto".into(),
        ));
    }

    if source.is_auto() {
        return Err(TranslateError::InvalidConfiguration(
            "source language must be resolved before translating".into(),
        ));
    }

    Ok(())
}
