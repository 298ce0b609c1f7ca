use deeptrans_config::Provider;
use serde::Deserialize;
use serde_json::json;

use super::{WireAdapter, chat_url, excerpt};
use crate::error::TranslateError;
use crate::prompt::build_prompt;
use crate::request::TranslationRequest;
use crate::transport::HttpRequest;

/// Gemini `generateContent`. The key travels in the query string.
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    temperature: f64,
}

impl GeminiAdapter {
    pub fn new(temperature: f64) -> Self {
        Self { temperature }
    }
}

impl WireAdapter for GeminiAdapter {
    fn format_name(&self) -> &'static str {
        "gemini"
    }

    fn build_request(&self, request: &TranslationRequest<'_>) -> Result<HttpRequest, TranslateError> {
        let mut url = chat_url(request.provider)?;
        url.query_pairs_mut()
            .append_pair("key", request.provider.api_key.trim());

        let prompt = build_prompt(request.text, request.source, request.target);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": self.temperature },
        });

        Ok(HttpRequest::post_json(url, body))
    }

    fn parse_response(&self, provider: &Provider, body: &str) -> Result<String, TranslateError> {
        let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
            TranslateError::unparseable(&provider.name, format!("{e}; body: {}", excerpt(body)))
        })?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| TranslateError::unparseable(&provider.name, "response has no candidates"))?;

        candidate
            .content
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .ok_or_else(|| TranslateError::unparseable(&provider.name, "first candidate has no text part"))
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}
