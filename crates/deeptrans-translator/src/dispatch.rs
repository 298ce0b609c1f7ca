use std::time::Instant;

use deeptrans_config::translator::TranslatorConfig;
use deeptrans_config::{ProviderKind, WireFormat};

use crate::adapter::{AnthropicAdapter, CustomAdapter, GeminiAdapter, OpenAiAdapter, WireAdapter};
use crate::error::TranslateError;
use crate::request::TranslationRequest;
use crate::transport::HttpTransport;

/// Pick the adapter for a provider kind
pub fn adapter_for(kind: ProviderKind, config: &TranslatorConfig) -> Box<dyn WireAdapter> {
    let system_message = config.includes_system_message(kind);

    match kind.wire_format() {
        WireFormat::OpenAiCompatible => Box::new(OpenAiAdapter::new(config.temperature, system_message)),
        WireFormat::Anthropic => Box::new(AnthropicAdapter::new(
            config.temperature,
            config.max_tokens,
            config.anthropic_version_header,
        )),
        WireFormat::Gemini => Box::new(GeminiAdapter::new(config.temperature)),
        WireFormat::Custom => Box::new(CustomAdapter::new(config.temperature, system_message)),
    }
}

/// Build, send once, parse. No validation, retry or timeout here.
pub async fn send_translation(
    transport: &dyn HttpTransport,
    adapter: &dyn WireAdapter,
    request: &TranslationRequest<'_>,
) -> Result<String, TranslateError> {
    let provider = request.provider;
    let http = adapter.build_request(request)?;

    tracing::debug!(
        provider = %provider.name,
        format = adapter.format_name(),
        method = %http.method,
        host = http.url.host_str().unwrap_or_default(),
        "sending translation request"
    );

    let started = Instant::now();
    let response = transport
        .send(http)
        .await
        .map_err(|e| TranslateError::transport(&provider.name, e))?;

    tracing::debug!(
        provider = %provider.name,
        status = response.status,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "translation response received"
    );

    adapter.handle_response(provider, response)
}
