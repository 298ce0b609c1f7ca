//! Model list discovery, used to populate pickers.

use deeptrans_config::provider::{DEEPSEEK_BASE_URL, GEMINI_BASE_URL, MISTRAL_BASE_URL, OPENAI_BASE_URL};
use deeptrans_config::{Provider, ProviderKind};
use serde::Deserialize;

use crate::adapter::{bearer, excerpt, parse_http_url};
use crate::error::TranslateError;
use crate::transport::{HttpRequest, HttpTransport};

/// Substrings of model ids that are not chat models
const EXCLUDED_KEYWORDS: &[&str] = &[
    "dall-e",
    "tts",
    "whisper",
    "embedding",
    "embed",
    "moderation",
    "davinci",
    "babbage",
    "curie",
    "ada",
    "image",
    "audio",
    "video",
    "vision",
    "coder",
    "code-",
];

/// Drop non-chat models, then sort
pub fn filter_chat_models(models: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut kept: Vec<String> = models
        .into_iter()
        .filter(|model| {
            let lowered = model.to_lowercase();
            !EXCLUDED_KEYWORDS.iter().any(|kw| lowered.contains(kw))
        })
        .collect();

    kept.sort();
    kept.dedup();
    kept
}

/// Models endpoint derived from a custom chat endpoint.
///
/// `None` means the endpoint does not look OpenAI-compatible.
pub fn custom_models_url(endpoint: &str) -> Option<String> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return None;
    }

    if let Some(base) = endpoint.strip_suffix("/chat/completions") {
        Some(format!("{base}/models"))
    } else if endpoint.ends_with("/messages") {
        None
    } else if endpoint.ends_with('/') {
        Some(format!("{endpoint}models"))
    } else {
        Some(format!("{endpoint}/models"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListShape {
    OpenAi,
    Gemini,
}

/// `None` when the vendor has no usable list endpoint
fn models_request(provider: &Provider) -> Result<Option<(HttpRequest, ListShape)>, TranslateError> {
    let key = provider.api_key.trim();

    let (raw, shape, auth) = match provider.kind {
        ProviderKind::Anthropic => return Ok(None),
        ProviderKind::OpenAi => (format!("{OPENAI_BASE_URL}/models"), ListShape::OpenAi, true),
        ProviderKind::DeepSeek => (format!("{DEEPSEEK_BASE_URL}/models"), ListShape::OpenAi, true),
        ProviderKind::Mistral => (format!("{MISTRAL_BASE_URL}/models"), ListShape::OpenAi, true),
        ProviderKind::Gemini => (format!("{GEMINI_BASE_URL}/models"), ListShape::Gemini, false),
        ProviderKind::Custom => {
            let Some(raw) = provider.endpoint.as_deref().and_then(custom_models_url) else {
                return Ok(None);
            };
            (raw, ListShape::OpenAi, !key.is_empty())
        }
    };

    let mut url = match parse_http_url(&provider.name, &raw) {
        Ok(url) => url,
        // a custom endpoint we cannot list is not an error
        Err(_) if provider.kind == ProviderKind::Custom => return Ok(None),
        Err(e) => return Err(e),
    };

    if shape == ListShape::Gemini {
        url.query_pairs_mut().append_pair("key", key);
    }

    let request = HttpRequest::get(url);
    let request = if auth {
        request.with_header("Authorization", bearer(key))
    } else {
        request
    };

    Ok(Some((request, shape)))
}

#[derive(Deserialize)]
struct OpenAiModelList {
    data: Vec<OpenAiModel>,
}

#[derive(Deserialize)]
struct OpenAiModel {
    id: String,
}

#[derive(Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Deserialize)]
struct GeminiModel {
    name: String,
}

/// Fetch, filter and sort the chat models a provider offers
pub async fn fetch_models(
    transport: &dyn HttpTransport,
    provider: &Provider,
) -> Result<Vec<String>, TranslateError> {
    if provider.kind.requires_api_key() && !provider.has_api_key() {
        return Ok(Vec::new());
    }

    let Some((request, shape)) = models_request(provider)? else {
        tracing::debug!(provider = %provider.name, "provider has no model list endpoint");
        return Ok(Vec::new());
    };

    let response = transport
        .send(request)
        .await
        .map_err(|e| TranslateError::transport(&provider.name, e))?;

    if !response.is_success() {
        return Err(TranslateError::HttpStatus {
            provider: provider.name.clone(),
            status: response.status,
            body: response.body,
        });
    }

    let unparseable = |e: serde_json::Error| {
        TranslateError::unparseable(&provider.name, format!("{e}; body: {}", excerpt(&response.body)))
    };

    let ids: Vec<String> = match shape {
        ListShape::OpenAi => serde_json::from_str::<OpenAiModelList>(&response.body)
            .map_err(unparseable)?
            .data
            .into_iter()
            .map(|m| m.id)
            .collect(),
        ListShape::Gemini => serde_json::from_str::<GeminiModelList>(&response.body)
            .map_err(unparseable)?
            .models
            .into_iter()
            .map(|m| m.name.strip_prefix("models/").map(str::to_string).unwrap_or(m.name))
            .collect(),
    };

    let total = ids.len();
    let models = filter_chat_models(ids);
    tracing::info!(provider = %provider.name, total, kept = models.len(), "fetched model list");

    Ok(models)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::fake::FakeTransport;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filter_drops_non_chat_models_and_sorts() {
        let models = strings(&["gpt-4o", "dall-e-3", "whisper-1", "text-embedding-3-small", "gpt-4o-mini"]);
        assert_eq!(filter_chat_models(models), strings(&["gpt-4o", "gpt-4o-mini"]));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let models = strings(&["Mistral-Large", "Codestral-Embed", "TTS-1-HD", "deepseek-coder"]);
        assert_eq!(filter_chat_models(models), strings(&["Mistral-Large"]));
    }

    #[test]
    fn custom_models_url_rewrites() {
        assert_eq!(
            custom_models_url("http://localhost:1234/v1/chat/completions").as_deref(),
            Some("http://localhost:1234/v1/models")
        );
        assert_eq!(
            custom_models_url("http://localhost:1234/v1/").as_deref(),
            Some("http://localhost:1234/v1/models")
        );
        assert_eq!(
            custom_models_url("http://localhost:1234/v1").as_deref(),
            Some("http://localhost:1234/v1/models")
        );
        assert_eq!(custom_models_url("https://proxy.example/v1/messages"), None);
        assert_eq!(custom_models_url(""), None);
    }

    #[tokio::test]
    async fn anthropic_never_calls_out() {
        let transport = FakeTransport::new();
        let provider = Provider::new("Anthropic", ProviderKind::Anthropic, "k", "claude-3-sonnet");

        let models = fetch_models(&transport, &provider).await.unwrap();

        assert!(models.is_empty());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn missing_key_skips_fetch() {
        let transport = FakeTransport::new();
        let provider = Provider::new("OpenAI", ProviderKind::OpenAi, "", "gpt-4o");

        assert!(fetch_models(&transport, &provider).await.unwrap().is_empty());
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn openai_list_uses_bearer_and_filters() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"object":"list","data":[{"id":"gpt-4o-mini"},{"id":"tts-1"},{"id":"gpt-4o"}]}"#,
        );
        let provider = Provider::new("OpenAI", ProviderKind::OpenAi, "sk-1", "gpt-4o");

        let models = fetch_models(&transport, &provider).await.unwrap();
        assert_eq!(models, strings(&["gpt-4o", "gpt-4o-mini"]));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, reqwest::Method::GET);
        assert_eq!(sent.url.as_str(), "https://api.openai.com/v1/models");
        assert_eq!(sent.header("Authorization"), Some("Bearer sk-1"));
    }

    #[tokio::test]
    async fn gemini_list_strips_prefix_and_uses_query_key() {
        let transport = FakeTransport::new().respond(
            200,
            r#"{"models":[{"name":"models/gemini-1.5-pro","displayName":"Gemini 1.5 Pro"},{"name":"models/text-embedding-004"},{"name":"models/gemini-1.5-flash"}]}"#,
        );
        let provider = Provider::new("Gemini", ProviderKind::Gemini, "AIza", "gemini-pro");

        let models = fetch_models(&transport, &provider).await.unwrap();
        assert_eq!(models, strings(&["gemini-1.5-flash", "gemini-1.5-pro"]));

        let sent = transport.last_request().unwrap();
        assert_eq!(
            sent.url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models?key=AIza"
        );
        assert_eq!(sent.header("Authorization"), None);
    }

    #[tokio::test]
    async fn keyless_custom_lists_without_auth() {
        let transport = FakeTransport::new().respond(200, r#"{"data":[{"id":"llama3"}]}"#);
        let provider = Provider::custom("Ollama", "http://localhost:11434/v1/chat/completions", "llama3", "");

        let models = fetch_models(&transport, &provider).await.unwrap();
        assert_eq!(models, strings(&["llama3"]));

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.url.as_str(), "http://localhost:11434/v1/models");
        assert_eq!(sent.header("Authorization"), None);
    }

    #[tokio::test]
    async fn list_failure_surfaces_status() {
        let transport = FakeTransport::new().respond(401, "invalid key");
        let provider = Provider::new("DeepSeek", ProviderKind::DeepSeek, "bad", "deepseek-chat");

        let err = fetch_models(&transport, &provider).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(
            transport.last_request().map(|r| r.url.to_string()),
            Some("https://api.deepseek.com/models".to_string())
        );
    }
}
