//! Contract tests for `InferenceClient` against the inference service wire
//! shape: OpenAI-style chat completions, plain and SSE-streamed, plus the
//! allow-list and error-taxonomy guarantees.

use tribune_core::ModelAllowList;
use tribune_tee_client::{InferenceError, TeeClient, TeeClientConfig};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zeroize::Zeroizing;

const MODEL: &str = "llama-3.3-70b";

fn test_client(inference: &MockServer) -> TeeClient {
    let config = TeeClientConfig {
        inference_url: inference.uri().parse().unwrap(),
        attestation_url: "http://127.0.0.1:19001".parse().unwrap(),
        api_token: Zeroizing::new("test-token".into()),
        allow_list: ModelAllowList::new([MODEL, "deepseek-r1"]),
        timeout_secs: 5,
    };
    TeeClient::new(config).unwrap()
}

#[tokio::test]
async fn chat_sends_model_and_messages_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(serde_json::json!({
            "model": MODEL,
            "stream": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chat-42",
            "choices": [{"message": {"content": "{\"resolution\":\"Client\"}"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .inference()
        .chat(MODEL, "anonymized dispute block", "round 1 prompt")
        .await
        .unwrap();
    assert_eq!(resp.chat_id, "chat-42");
    assert_eq!(resp.content, "{\"resolution\":\"Client\"}");
}

#[tokio::test]
async fn chat_assembles_sse_stream_and_extracts_chat_id() {
    let server = MockServer::start().await;

    let sse_body = concat!(
        "data: {\"id\":\"chat-9\",\"choices\":[{\"delta\":{\"content\":\"{\\\"resolution\\\":\"}}]}\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"\\\"Freelancer\\\"}\"}}]}\n",
        "data: [DONE]\n",
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client.inference().chat(MODEL, "ctx", "prompt").await.unwrap();
    assert_eq!(resp.chat_id, "chat-9");
    assert_eq!(resp.content, "{\"resolution\":\"Freelancer\"}");
}

#[tokio::test]
async fn disallowed_model_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    // No mock mounted: if the client issued a request it would surface as
    // a 404 Service error, not the Validation error asserted below.
    let client = test_client(&server);

    let err = client
        .inference()
        .chat("gpt-x", "ctx", "prompt")
        .await
        .unwrap_err();
    assert!(matches!(err, InferenceError::Validation(_)));
    assert_eq!(server.received_requests().await.unwrap().len(), 0);
}

#[tokio::test]
async fn non_2xx_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.inference().chat(MODEL, "ctx", "prompt").await.unwrap_err();
    match err {
        InferenceError::Service { status, body, .. } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected Service error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_stream_is_an_empty_response_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string("data: [DONE]\n"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = client.inference().chat(MODEL, "ctx", "prompt").await.unwrap_err();
    assert!(matches!(err, InferenceError::EmptyResponse { .. }));
}
