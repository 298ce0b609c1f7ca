use std::time::Duration;

use deeptrans_config::Provider;
use deeptrans_config::network::NetworkConfig;
use deeptrans_config::translator::TranslatorConfig;
use deeptrans_translator::{ReqwestTransport, TranslateError, TranslationRequest, adapter_for, send_translation};
use deeptrans_types::Language;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(timeout_seconds: u64) -> ReqwestTransport {
    let network = NetworkConfig {
        timeout_seconds,
        ..NetworkConfig::default()
    };
    ReqwestTransport::new(&network).expect("client builds")
}

async fn translate(server: &MockServer, key: &str, transport: &ReqwestTransport) -> Result<String, TranslateError> {
    let provider = Provider::custom(
        "Local",
        format!("{}/v1/chat/completions", server.uri()),
        "qwen2.5",
        key,
    );
    let en = Language::find("en").unwrap();
    let fr = Language::find("fr").unwrap();
    let request = TranslationRequest::new("Good night", &en, &fr, &provider);
    let adapter = adapter_for(provider.kind, &TranslatorConfig::default());

    send_translation(transport, adapter.as_ref(), &request).await
}

#[tokio::test]
async fn posts_openai_shape_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .and(header("content-type", "application/json"))
        .and(body_partial_json(json!({ "model": "qwen2.5", "temperature": 0.1 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": " Bonne nuit " } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let text = translate(&server, "secret", &transport(5)).await.unwrap();
    assert_eq!(text, "Bonne nuit");
}

#[tokio::test]
async fn plain_text_server_is_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Bonne nuit\n"))
        .expect(1)
        .mount(&server)
        .await;

    let text = translate(&server, "", &transport(5)).await.unwrap();
    assert_eq!(text, "Bonne nuit");
}

#[tokio::test]
async fn error_status_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = translate(&server, "k", &transport(5)).await.unwrap_err();
    match err {
        TranslateError::HttpStatus { status, body, .. } => {
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_server_times_out_as_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let err = translate(&server, "k", &transport(1)).await.unwrap_err();
    match err {
        TranslateError::Transport { source, .. } => assert!(source.is_timeout()),
        other => panic!("unexpected error: {other:?}"),
    }
}
