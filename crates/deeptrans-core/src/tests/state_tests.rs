use std::sync::Arc;
use std::time::Duration;

use deeptrans_config::translator::TranslatorConfig;
use deeptrans_config::{Config, Provider, ProviderKind};
use deeptrans_translator::TranslateError;
use deeptrans_translator::transport::fake::FakeTransport;
use deeptrans_types::Language;
use tokio_util::sync::CancellationToken;

use crate::history::TranslationHistory;
use crate::language::LanguageDetector;
use crate::providers::ProviderStore;
use crate::service::TranslationService;
use crate::state::AppState;

const CHAT_OK: &str = r#"{"choices":[{"message":{"content":"Good morning"}}]}"#;

struct Fixed(&'static str);

impl LanguageDetector for Fixed {
    fn detect(&self, _text: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

fn state(transport: Arc<FakeTransport>, providers: ProviderStore) -> AppState {
    let service = TranslationService::new(transport, TranslatorConfig::default(), Duration::from_secs(5));
    AppState::new(Config::default(), service, providers, TranslationHistory::new(3))
}

fn keyed_store() -> ProviderStore {
    ProviderStore::new(
        vec![
            Provider::new("OpenAI", ProviderKind::OpenAi, "sk-1", "gpt-4o"),
            Provider::new("Mistral", ProviderKind::Mistral, "m-1", "mistral-large"),
        ],
        0,
    )
}

#[tokio::test]
async fn test_translation_is_recorded_with_detected_source() {
    let transport = Arc::new(FakeTransport::new().respond(200, CHAT_OK));
    let state = state(transport.clone(), keyed_store());
    let en = Language::find("en").unwrap();

    let result = state
        .translate("Bonjour", &Language::auto(), &en, None, &CancellationToken::new())
        .await
        .unwrap()
        .expect("non-empty translation");

    assert_eq!(result.translated_text, "Good morning");
    assert_eq!(result.source_language.code, "fr");
    assert_eq!(result.provider, "OpenAI");

    let history = state.history.read().await;
    assert_eq!(history.len(), 1);
    assert_eq!(history.latest().map(|e| e.id), Some(result.id));
}

#[tokio::test]
async fn test_custom_detector_and_explicit_provider() {
    let transport = Arc::new(FakeTransport::new().respond(200, CHAT_OK));
    let state = state(transport.clone(), keyed_store()).with_detector(Box::new(Fixed("fr")));
    let en = Language::find("en").unwrap();

    let result = state
        .translate("Bonjour", &Language::auto(), &en, Some(1), &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.source_language.code, "fr");
    assert_eq!(result.provider, "Mistral");
    assert_eq!(
        transport.last_request().map(|r| r.url.to_string()),
        Some("https://api.mistral.ai/v1/chat/completions".to_string())
    );
}

#[tokio::test]
async fn test_blank_input_is_not_recorded() {
    let transport = Arc::new(FakeTransport::new());
    let state = state(transport.clone(), keyed_store());
    let en = Language::find("en").unwrap();

    let result = state
        .translate("  ", &Language::auto(), &en, None, &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(state.history.read().await.is_empty());
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_auto_spanish_source_names_spanish_in_prompt() {
    let transport = Arc::new(FakeTransport::new().respond(200, CHAT_OK));
    let state = state(transport.clone(), keyed_store());
    let en = Language::find("en").unwrap();

    let result = state
        .translate("Hola mundo, ¿cómo estás?", &Language::auto(), &en, None, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.source_language.code, "es");
    assert_eq!(result.target_language.code, "en");

    let body = transport.last_request().and_then(|r| r.body).unwrap();
    let prompt = body["messages"][1]["content"].as_str().unwrap();
    assert!(prompt.starts_with("Please translate the following Español text to English:"));
}

#[tokio::test]
async fn test_text_in_target_language_swaps_pair() {
    let transport = Arc::new(FakeTransport::new().respond(200, CHAT_OK));
    let state = state(transport.clone(), keyed_store()).with_detector(Box::new(Fixed("en")));
    let (fr, en) = (Language::find("fr").unwrap(), Language::find("en").unwrap());

    let result = state
        .translate("Good morning", &fr, &en, None, &CancellationToken::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.source_language.code, "en");
    assert_eq!(result.target_language.code, "fr");
}

#[tokio::test]
async fn test_undetectable_auto_source_makes_no_call() {
    let transport = Arc::new(FakeTransport::new());
    let state = state(transport.clone(), keyed_store());
    let en = Language::find("en").unwrap();

    let err = state
        .translate("12345", &Language::auto(), &en, None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::InvalidConfiguration(_)));
    assert_eq!(transport.calls(), 0);
    assert!(state.history.read().await.is_empty());
}

#[tokio::test]
async fn test_empty_provider_answer_is_still_a_result() {
    let transport = Arc::new(FakeTransport::new().respond(200, r#"{"choices":[{"message":{"content":"  "}}]}"#));
    let state = state(transport.clone(), keyed_store());
    let (fr, en) = (Language::find("fr").unwrap(), Language::find("en").unwrap());

    let result = state
        .translate("Bonjour", &fr, &en, None, &CancellationToken::new())
        .await
        .unwrap()
        .expect("a provider answer is recorded even when empty");

    assert_eq!(result.translated_text, "");
    assert_eq!(transport.calls(), 1);
    assert_eq!(state.history.read().await.len(), 1);
}

#[tokio::test]
async fn test_failure_is_not_recorded() {
    let transport = Arc::new(FakeTransport::new());
    let state = state(transport.clone(), ProviderStore::default());
    let en = Language::find("en").unwrap();

    let err = state
        .translate("Hola", &Language::auto(), &en, None, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::MissingCredential { .. }));
    assert!(state.history.read().await.is_empty());
}

#[tokio::test]
async fn test_history_cap_applies_to_recorded_translations() {
    let transport = Arc::new(
        FakeTransport::new()
            .respond(200, CHAT_OK)
            .respond(200, CHAT_OK)
            .respond(200, CHAT_OK)
            .respond(200, CHAT_OK),
    );
    let state = state(transport, keyed_store());
    let (fr, en) = (Language::find("fr").unwrap(), Language::find("en").unwrap());

    for text in ["un", "deux", "trois", "quatre"] {
        state
            .translate(text, &fr, &en, None, &CancellationToken::new())
            .await
            .unwrap();
    }

    let history = state.history.read().await;
    let sources: Vec<_> = history.iter().map(|e| e.source_text.as_str()).collect();
    assert_eq!(sources, vec!["quatre", "trois", "deux"]);
}

#[tokio::test]
async fn test_unknown_provider_index_is_rejected() {
    let transport = Arc::new(FakeTransport::new());
    let state = state(transport.clone(), keyed_store());
    let en = Language::find("en").unwrap();

    let err = state
        .translate("Hola", &Language::auto(), &en, Some(9), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TranslateError::InvalidConfiguration(_)));
    assert_eq!(transport.calls(), 0);
}
