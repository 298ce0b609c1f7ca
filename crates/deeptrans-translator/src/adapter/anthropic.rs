use deeptrans_config::{AnthropicVersionHeader, Provider};
use serde::Deserialize;
use serde_json::json;

use super::{WireAdapter, bearer, chat_url, excerpt};
use crate::error::TranslateError;
use crate::prompt::build_prompt;
use crate::request::TranslationRequest;
use crate::transport::HttpRequest;

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages API
#[derive(Debug, Clone)]
pub struct AnthropicAdapter {
    temperature: f64,
    max_tokens: u32,
    version_header: AnthropicVersionHeader,
}

impl AnthropicAdapter {
    pub fn new(temperature: f64, max_tokens: u32, version_header: AnthropicVersionHeader) -> Self {
        Self {
            temperature,
            max_tokens,
            version_header,
        }
    }
}

impl WireAdapter for AnthropicAdapter {
    fn format_name(&self) -> &'static str {
        "anthropic"
    }

    fn build_request(&self, request: &TranslationRequest<'_>) -> Result<HttpRequest, TranslateError> {
        let url = chat_url(request.provider)?;
        let prompt = build_prompt(request.text, request.source, request.target);

        let body = json!({
            "model": request.provider.model.trim(),
            "messages": [{ "role": "user", "content": prompt }],
            "max_tokens": self.max_tokens,
            "temperature": self.temperature,
        });

        let api_key = &request.provider.api_key;
        let http = HttpRequest::post_json(url, body).with_header("Authorization", bearer(api_key));

        Ok(match self.version_header {
            AnthropicVersionHeader::Observed => http.with_header("x-api-version", ANTHROPIC_VERSION),
            AnthropicVersionHeader::Documented => http
                .with_header("anthropic-version", ANTHROPIC_VERSION)
                .with_header("x-api-key", api_key.trim()),
        })
    }

    fn parse_response(&self, provider: &Provider, body: &str) -> Result<String, TranslateError> {
        let message: MessagesResponse = serde_json::from_str(body).map_err(|e| {
            TranslateError::unparseable(&provider.name, format!("{e}; body: {}", excerpt(body)))
        })?;

        let block = message
            .content
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::unparseable(&provider.name, "response has no content blocks"))?;

        block
            .text
            .map(|t| t.trim().to_string())
            .ok_or_else(|| TranslateError::unparseable(&provider.name, "first content block has no text"))
    }
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use deeptrans_config::ProviderKind;
    use deeptrans_types::Language;
    use pretty_assertions::assert_eq;

    fn provider() -> Provider {
        Provider::new("Anthropic", ProviderKind::Anthropic, "sk-ant", "claude-3-sonnet")
    }

    fn build(header: AnthropicVersionHeader) -> HttpRequest {
        let provider = provider();
        let en = Language::find("en").unwrap();
        let ja = Language::find("ja").unwrap();
        let request = TranslationRequest::new("Good morning", &en, &ja, &provider);
        AnthropicAdapter::new(0.1, 1000, header)
            .build_request(&request)
            .unwrap()
    }

    // The shipped app sends the version under `x-api-version`, which is not
    // the header Anthropic documents. Both modes are pinned here.
    #[test]
    fn observed_mode_sends_x_api_version() {
        let http = build(AnthropicVersionHeader::Observed);

        assert_eq!(http.url.as_str(), "https://api.anthropic.com/v1/messages");
        assert_eq!(http.header("x-api-version"), Some(ANTHROPIC_VERSION));
        assert_eq!(http.header("anthropic-version"), None);
        assert_eq!(http.header("Authorization"), Some("Bearer sk-ant"));
    }

    #[test]
    fn documented_mode_sends_anthropic_version() {
        let http = build(AnthropicVersionHeader::Documented);

        assert_eq!(http.header("anthropic-version"), Some(ANTHROPIC_VERSION));
        assert_eq!(http.header("x-api-key"), Some("sk-ant"));
        assert_eq!(http.header("x-api-version"), None);
    }

    #[test]
    fn body_has_single_user_turn_and_token_cap() {
        let body = build(AnthropicVersionHeader::Observed).body.unwrap();

        assert_eq!(body["model"], "claude-3-sonnet");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["temperature"], 0.1);
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        assert!(messages[0]["content"].as_str().unwrap().contains("Good morning"));
    }

    #[test]
    fn parses_first_text_block() {
        let adapter = AnthropicAdapter::new(0.1, 1000, AnthropicVersionHeader::Observed);
        let body = r#"{"id":"msg_1","type":"message","content":[{"type":"text","text":"\nおはようございます "}]}"#;
        assert_eq!(adapter.parse_response(&provider(), body).unwrap(), "おはようございます");
    }

    #[test]
    fn empty_content_is_unparseable() {
        let adapter = AnthropicAdapter::new(0.1, 1000, AnthropicVersionHeader::Observed);
        let err = adapter
            .parse_response(&provider(), r#"{"content":[]}"#)
            .unwrap_err();
        assert!(matches!(err, TranslateError::UnparseableResponse { .. }));

        let text = adapter
            .parse_response(&provider(), r#"{"content":[{"type":"text","text":""}]}"#)
            .unwrap();
        assert_eq!(text, "");
    }
}
