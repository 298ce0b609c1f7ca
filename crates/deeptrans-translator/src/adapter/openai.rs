use deeptrans_config::Provider;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{WireAdapter, bearer, chat_url, excerpt};
use crate::error::TranslateError;
use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::request::TranslationRequest;
use crate::transport::HttpRequest;

/// OpenAI chat completions, also spoken by DeepSeek and Mistral
#[derive(Debug, Clone)]
pub struct OpenAiAdapter {
    temperature: f64,
    system_message: bool,
}

impl OpenAiAdapter {
    pub fn new(temperature: f64, system_message: bool) -> Self {
        Self {
            temperature,
            system_message,
        }
    }
}

impl WireAdapter for OpenAiAdapter {
    fn format_name(&self) -> &'static str {
        "openai"
    }

    fn build_request(&self, request: &TranslationRequest<'_>) -> Result<HttpRequest, TranslateError> {
        let url = chat_url(request.provider)?;
        let body = chat_body(request, self.system_message, self.temperature);

        Ok(HttpRequest::post_json(url, body)
            .with_header("Authorization", bearer(&request.provider.api_key)))
    }

    fn parse_response(&self, provider: &Provider, body: &str) -> Result<String, TranslateError> {
        parse_chat_completion(provider, body)
    }
}

pub(crate) fn chat_body(request: &TranslationRequest<'_>, system_message: bool, temperature: f64) -> Value {
    let prompt = build_prompt(request.text, request.source, request.target);

    let mut messages = Vec::with_capacity(2);
    if system_message {
        messages.push(json!({ "role": "system", "content": SYSTEM_PROMPT }));
    }
    messages.push(json!({ "role": "user", "content": prompt }));

    json!({
        "model": request.provider.model.trim(),
        "messages": messages,
        "temperature": temperature,
    })
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// `choices[0].message.content`, trimmed
pub(crate) fn parse_chat_completion(provider: &Provider, body: &str) -> Result<String, TranslateError> {
    let completion: ChatCompletion = serde_json::from_str(body).map_err(|e| {
        TranslateError::unparseable(&provider.name, format!("{e}; body: {}", excerpt(body)))
    })?;

    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| TranslateError::unparseable(&provider.name, "response has no choices"))?;

    choice
        .message
        .content
        .map(|c| c.trim().to_string())
        .ok_or_else(|| TranslateError::unparseable(&provider.name, "first choice has no content"))
}
