//! Vendor wire formats.
//!
//! An adapter is pure: it turns a [`TranslationRequest`] into an
//! [`HttpRequest`] and a response body back into text. The network call
//! itself happens in [`crate::dispatch`].

use deeptrans_config::Provider;
use reqwest::Url;

use crate::error::TranslateError;
use crate::request::TranslationRequest;
use crate::transport::{HttpRequest, HttpResponse};

pub mod anthropic;
pub mod custom;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicAdapter;
pub use custom::CustomAdapter;
pub use gemini::GeminiAdapter;
pub use openai::OpenAiAdapter;

pub trait WireAdapter: Send + Sync {
    /// Short name of the schema family, for logs
    fn format_name(&self) -> &'static str;

    fn build_request(&self, request: &TranslationRequest<'_>) -> Result<HttpRequest, TranslateError>;

    /// Extract the translated text from a 2xx body
    fn parse_response(&self, provider: &Provider, body: &str) -> Result<String, TranslateError>;

    /// Status check, then parse
    fn handle_response(
        &self,
        provider: &Provider,
        response: HttpResponse,
    ) -> Result<String, TranslateError> {
        if !response.is_success() {
            return Err(TranslateError::HttpStatus {
                provider: provider.name.clone(),
                status: response.status,
                body: response.body,
            });
        }

        self.parse_response(provider, &response.body)
    }
}

/// Resolve and validate the provider's chat endpoint
pub(crate) fn chat_url(provider: &Provider) -> Result<Url, TranslateError> {
    let raw = provider.chat_endpoint().ok_or_else(|| {
        TranslateError::InvalidConfiguration(format!("{} has no endpoint set", provider.name))
    })?;

    parse_http_url(&provider.name, &raw)
}

pub(crate) fn parse_http_url(provider: &str, raw: &str) -> Result<Url, TranslateError> {
    let url = Url::parse(raw).map_err(|e| {
        TranslateError::InvalidConfiguration(format!("{provider} endpoint '{raw}' is not a valid URL: {e}"))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(TranslateError::InvalidConfiguration(format!(
            "{provider} endpoint must use http or https, got '{scheme}'"
        ))),
    }
}

pub(crate) fn bearer(api_key: &str) -> String {
    format!("Bearer {}", api_key.trim())
}

/// Body excerpt for error details
pub(crate) fn excerpt(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let cut: String = body.chars().take(MAX).collect();
        format!("{cut}...")
    } else {
        body.to_string()
    }
}
