use std::time::Duration;

use deeni_qa::Language;
use deeni_qa::api::{AnswerResult, ClientError, HttpQueryClient, Question, QueryClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn question(text: &str, language: Language) -> Question {
    Question::new(text, language).unwrap()
}

/// Base address the way users type it: with a trailing slash.
fn base_of(server: &MockServer) -> String {
    format!("{}/", server.uri())
}

async fn mount_ask(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Ask
// ============================================================================

#[tokio::test]
async fn test_ask_success_with_source() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"answer": "42", "source": "bookX"})),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("meaning?", Language::English), &base_of(&server))
        .await;

    assert_eq!(
        result,
        AnswerResult::Success {
            answer: "42".to_string(),
            source: Some("bookX".to_string()),
        }
    );
}

#[tokio::test]
async fn test_ask_success_without_source() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "42"})),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("meaning?", Language::English), &base_of(&server))
        .await;

    assert_eq!(
        result,
        AnswerResult::Success {
            answer: "42".to_string(),
            source: None,
        }
    );
}

#[tokio::test]
async fn test_ask_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(header("content-type", "application/json"))
        .and(body_json(serde_json::json!({
            "question": "وضو کیسے کریں؟",
            "language": "urdu"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("  وضو کیسے کریں؟ ", Language::Urdu), &base_of(&server))
        .await;

    assert!(matches!(result, AnswerResult::Success { .. }));
}

#[tokio::test]
async fn test_ask_without_trailing_slash_hits_same_endpoint() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"answer": "yes"})),
    )
    .await;

    let client = HttpQueryClient::default();
    // MockServer::uri() has no trailing slash
    let result = client
        .ask(&question("q", Language::English), &server.uri())
        .await;

    assert!(matches!(result, AnswerResult::Success { answer, .. } if answer == "yes"));
}

#[tokio::test]
async fn test_ask_server_error_is_http_failure() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    assert_eq!(result, AnswerResult::HttpFailure { status_code: 500 });
    assert_eq!(result.answer_text(), "Server error: 500");
}

#[tokio::test]
async fn test_ask_service_unavailable_body_is_ignored() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "detail": {"message": "QA engine not initialized."}
        })),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::Urdu), &base_of(&server))
        .await;

    assert_eq!(result, AnswerResult::HttpFailure { status_code: 503 });
}

#[tokio::test]
async fn test_ask_non_200_success_status_is_http_failure() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(201).set_body_json(serde_json::json!({"answer": "42"})),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    assert_eq!(result, AnswerResult::HttpFailure { status_code: 201 });
}

#[tokio::test]
async fn test_ask_missing_answer_is_malformed() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"source": "bookX"})),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    match result {
        AnswerResult::TransportFailure { message } => {
            assert!(message.starts_with("malformed response"), "{message}");
            assert!(message.contains("answer"), "{message}");
        }
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ask_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"),
    )
    .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    assert!(matches!(
        result,
        AnswerResult::TransportFailure { ref message } if message.starts_with("malformed response")
    ));
}

#[tokio::test]
async fn test_ask_timeout_is_transport_failure() {
    let server = MockServer::start().await;
    mount_ask(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"answer": "too late"}))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let client = HttpQueryClient::new(Duration::from_millis(200));
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    assert_eq!(
        result,
        AnswerResult::TransportFailure {
            message: "timeout".to_string()
        }
    );
    assert_eq!(result.answer_text(), "Network error: timeout");
}

#[tokio::test]
async fn test_ask_connection_refused_is_transport_failure() {
    // Grab a free port, then close it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = HttpQueryClient::default();
    let result = client
        .ask(
            &question("q", Language::English),
            &format!("http://127.0.0.1:{port}/"),
        )
        .await;

    match result {
        AnswerResult::TransportFailure { message } => assert!(!message.is_empty()),
        other => panic!("expected TransportFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ask_does_not_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpQueryClient::default();
    let result = client
        .ask(&question("q", Language::English), &base_of(&server))
        .await;

    assert_eq!(result, AnswerResult::HttpFailure { status_code: 502 });
    // `expect(1)` is verified when the server drops
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_reports_server_description() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "app": "Deeni Q&A (Taleem-ul-Islam)",
            "pdf_present": true,
            "index_present": true,
            "index_dir": "storage/faiss",
            "pdf_path": "data/book.pdf"
        })))
        .mount(&server)
        .await;

    let client = HttpQueryClient::default();
    let status = client.status(&server.uri()).await.unwrap();

    assert_eq!(status.app, "Deeni Q&A (Taleem-ul-Islam)");
    assert!(status.index_present);
    assert_eq!(status.summary(), "Connected: Deeni Q&A (Taleem-ul-Islam)");
}

#[tokio::test]
async fn test_status_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = HttpQueryClient::default();
    let status = client.status(&base_of(&server)).await;

    assert_eq!(status, Err(ClientError::Api { status: 404 }));
}
