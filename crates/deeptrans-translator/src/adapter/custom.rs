use deeptrans_config::Provider;

use super::openai::{chat_body, parse_chat_completion};
use super::{WireAdapter, bearer, chat_url};
use crate::error::TranslateError;
use crate::request::TranslationRequest;
use crate::transport::HttpRequest;

/// User-supplied endpoint.
///
/// Speaks the OpenAI schema. Many self-hosted servers answer with plain
/// text instead, so any body that is not a JSON object or array is taken
/// as the translation.
#[derive(Debug, Clone)]
pub struct CustomAdapter {
    temperature: f64,
    system_message: bool,
}

impl CustomAdapter {
    pub fn new(temperature: f64, system_message: bool) -> Self {
        Self {
            temperature,
            system_message,
        }
    }
}

impl WireAdapter for CustomAdapter {
    fn format_name(&self) -> &'static str {
        "custom"
    }

    fn build_request(&self, request: &TranslationRequest<'_>) -> Result<HttpRequest, TranslateError> {
        let url = chat_url(request.provider)?;
        let body = chat_body(request, self.system_message, self.temperature);
        let http = HttpRequest::post_json(url, body);

        if request.provider.has_api_key() {
            Ok(http.with_header("Authorization", bearer(&request.provider.api_key)))
        } else {
            Ok(http)
        }
    }

    fn parse_response(&self, provider: &Provider, body: &str) -> Result<String, TranslateError> {
        let err = match parse_chat_completion(provider, body) {
            Ok(text) => return Ok(text),
            Err(err) => err,
        };

        match serde_json::from_str::<serde_json::Value>(body) {
            // a bare JSON string is still plain text
            Ok(serde_json::Value::String(text)) => Ok(text.trim().to_string()),
            // structured, but not a chat completion
            Ok(serde_json::Value::Object(_) | serde_json::Value::Array(_)) => Err(err),
            // scalars such as `42` or `true` are valid translations
            Ok(_) | Err(_) => {
                let text = body.trim();
                if text.is_empty() {
                    return Err(TranslateError::unparseable(&provider.name, "empty response body"));
                }
                tracing::warn!(
                    provider = %provider.name,
                    "custom endpoint did not return a chat completion, using raw body as text"
                );
                Ok(text.to_string())
            }
        }
    }
}
