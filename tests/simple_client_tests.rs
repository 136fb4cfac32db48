//! Integration tests for `SimpleClient` and its throw-on-error policy.

mod common;

use brex_axios::clients::HttpError;
use brex_axios::{RequestOptions, SimpleClient};
use common::ScriptedTransport;
use serde_json::{json, Value};

// ============================================================================
// throw_on_error = false
// ============================================================================

#[tokio::test]
async fn test_failed_call_resolves_with_none_when_not_throwing() {
    let transport = ScriptedTransport::new().fail(500, "boom");
    let client = SimpleClient::with_transport(transport, false);

    let content: Option<Value> = client.get("/x", None).await.unwrap();
    assert!(content.is_none());
}

#[tokio::test]
async fn test_transport_failure_still_errors_when_not_throwing() {
    let transport = ScriptedTransport::new().throw("socket closed");
    let client = SimpleClient::with_transport(transport, false);

    let error = client.get::<Value>("/x", None).await.unwrap_err();
    assert_eq!(error.to_string(), "socket closed");
}

// ============================================================================
// throw_on_error = true
// ============================================================================

#[tokio::test]
async fn test_failed_call_rejects_with_message_when_throwing() {
    let transport = ScriptedTransport::new().fail(500, "boom");
    let client = SimpleClient::with_transport(transport, true);

    let error = client.get::<Value>("/x", None).await.unwrap_err();
    assert_eq!(error.to_string(), "boom");
    assert!(matches!(error, HttpError::Upstream(e) if e.status == 500));
}

#[tokio::test]
async fn test_successful_call_returns_content() {
    let transport = ScriptedTransport::new()
        .ok(201, json!({"id": 101}))
        .ok(200, json!({"id": 1, "title": "updated"}));
    let recorded = transport.recorded();
    let client = SimpleClient::with_transport(transport, true);

    let created: Option<Value> = client
        .post("/posts", Some(json!({"title": "t"})), None)
        .await
        .unwrap();
    assert_eq!(created, Some(json!({"id": 101})));

    let updated: Option<Value> = client
        .put("/posts/1", Some(json!({"title": "updated"})), None)
        .await
        .unwrap();
    assert_eq!(updated, Some(json!({"id": 1, "title": "updated"})));

    let sent = recorded.all();
    assert_eq!(sent[0].body, Some(json!({"title": "t"})));
    assert_eq!(sent[1].body, Some(json!({"title": "updated"})));
}

#[tokio::test]
async fn test_options_are_forwarded() {
    let transport = ScriptedTransport::new();
    let recorded = transport.recorded();
    let client = SimpleClient::with_transport(transport, true);
    assert!(client.throw_on_error());

    let options = RequestOptions::builder()
        .header("Authorization", "Bearer t")
        .param("q", "a b")
        .build();
    let _: Option<Value> = client.patch("/search", None, Some(options)).await.unwrap();

    let sent = recorded.last();
    assert_eq!(sent.url, "/search?q=a+b");
    assert_eq!(
        sent.headers.get("Authorization"),
        Some(&"Bearer t".to_string())
    );
    assert!(sent.body.is_none());
}

#[tokio::test]
async fn test_delete_with_empty_content() {
    let transport = ScriptedTransport::new().empty(204);
    let client = SimpleClient::with_transport(transport, true);

    let content: Option<Value> = client.delete("/posts/1", None).await.unwrap();
    assert!(content.is_none());
}
