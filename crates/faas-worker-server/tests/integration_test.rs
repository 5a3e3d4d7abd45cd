//! End-to-end tests for the worker HTTP API.
//!
//! Tests exercise the full stack: HTTP request -> axum router -> dispatcher
//! -> resolved handler -> HTTP response. Requests are sent with
//! `tower::ServiceExt::oneshot` directly to the router without starting a
//! network server.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use faas_worker_core::{async_handler, sync_handler, HandlerError, HandlerRegistry};
use serde_json::{json, Value};
use tower::ServiceExt;

use faas_worker_server::router::build_router;
use faas_worker_server::state::AppState;

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Bundled handlers plus a few that misbehave on purpose.
fn test_registry() -> HandlerRegistry {
    let mut registry = faas_worker_functions::registry().expect("bundled registry");
    registry
        .register(
            "tests.failing.always_fails",
            sync_handler(|payload: &str| -> Result<Value, HandlerError> {
                Err(HandlerError::msg(format!("cannot process '{}'", payload)))
            }),
        )
        .unwrap();
    registry
        .register(
            "tests.failing.panics",
            sync_handler(|_: &str| -> Result<Value, HandlerError> {
                panic!("handler blew up");
            }),
        )
        .unwrap();
    registry
        .register(
            "tests.slow.sleep_then_echo",
            async_handler(|payload: String| async move {
                tokio::time::sleep(std::time::Duration::from_millis(5)).await;
                Ok::<_, HandlerError>(json!({ "echo": payload }))
            }),
        )
        .unwrap();
    registry
}

/// Creates a router serving the handler registered under `identifier`.
fn test_app(identifier: &str) -> Router {
    let state = AppState::resolve(&test_registry(), identifier)
        .unwrap_or_else(|err| panic!("failed to resolve {}: {}", identifier, err));
    build_router(state)
}

/// Creates a router whose handler failed to resolve.
fn unresolved_app(identifier: &str) -> Router {
    let err = AppState::resolve(&test_registry(), identifier)
        .err()
        .expect("identifier should not resolve");
    build_router(AppState::from_resolution_error(&err))
}

/// Sends a POST request with a raw body and returns (status, json).
async fn post_raw(
    app: &Router,
    path: &str,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header("content-type", content_type);
    }
    let response = app
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

/// Sends a POST request with a JSON body and returns (status, json).
async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(
        app,
        path,
        Some("application/json"),
        serde_json::to_vec(&body).unwrap(),
    )
    .await
}

/// Sends a GET request and returns (status, json).
async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap_or(json!(null));
    (status, json)
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_reports_ok_with_timestamp() {
    let app = test_app("function.handler.handle");
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let timestamp = body["timestamp"].as_str().expect("timestamp string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok(), "{}", timestamp);
}

#[tokio::test]
async fn health_check_ignores_handler_state() {
    let app = unresolved_app("non.existent.handler");
    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// ---------------------------------------------------------------------------
// Default handler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn default_handler_decodes_json_payload() {
    let app = test_app("function.handler.handle");
    let (status, body) = post_json(&app, "/", json!({ "payload": "{\"key\":\"value\"}" })).await;

    assert_eq!(status, StatusCode::OK, "{:?}", body);
    assert_eq!(
        body,
        json!({
            "result": {
                "handler": "default",
                "processed_data": { "key": "value" },
                "status": "processed_as_json"
            }
        })
    );
}

#[tokio::test]
async fn default_handler_echoes_plain_string() {
    let app = test_app("function.handler.handle");
    let (status, body) = post_json(&app, "/", json!({ "payload": "hello world" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["handler"], "default");
    assert_eq!(body["result"]["status"], "processed_as_string");
    assert_eq!(body["result"]["original_data"], "hello world");
}

#[tokio::test]
async fn async_default_handler_is_awaited() {
    let app = test_app("function.handler.handle_async");
    let (status, body) = post_json(&app, "/", json!({ "payload": "[1,2]" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "processed_as_json");
    assert_eq!(body["result"]["processed_data"], json!([1, 2]));
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

#[tokio::test]
async fn decoder_type_a_decodes_reading() {
    let app = test_app("decoders.decode_type_a");
    let (status, body) =
        post_json(&app, "/", json!({ "payload": "device-123,55.5,1678886400" })).await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["result"];
    assert_eq!(result["handler"], "decoder_type_a");
    assert_eq!(result["device_id"], "device-123");
    assert_eq!(result["metric_value"], 55.5);
    assert_eq!(result["timestamp"], 1678886400);
}

#[tokio::test]
async fn decoder_type_a_reports_malformed_input_in_result() {
    let app = test_app("decoders.decode_type_a");
    let (status, body) = post_json(&app, "/", json!({ "payload": "bad" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["status"], "decoding_failed");
    assert_eq!(body["result"]["original_data"], "bad");
}

#[tokio::test]
async fn strict_decoder_failure_is_a_400() {
    let app = test_app("decoders.decode_type_a_strict");
    let (status, body) = post_json(&app, "/", json!({ "payload": "bad" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "HANDLER_EXECUTION_FAILED");
    assert_eq!(
        body["error"]["message"],
        "Error executing handler function: Invalid data format. Expected 'id,value,timestamp'."
    );
}

#[tokio::test]
async fn decoder_type_b_reverses_payload() {
    let app = test_app("decoders.decode_type_b");
    let (status, body) = post_json(&app, "/", json!({ "payload": "hello" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["handler"], "decoder_type_b");
    assert_eq!(body["result"]["reversed_data"], "olleh");
}

#[tokio::test]
async fn decoder_type_a_rejects_non_finite_metric() {
    let app = test_app("decoders.decode_type_a");
    for payload in ["dev,nan,1", "dev,inf,1"] {
        let (status, body) = post_json(&app, "/", json!({ "payload": payload })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["status"], "decoding_failed");
        assert_eq!(body["result"]["original_data"], payload);
    }
}

#[tokio::test]
async fn payloads_larger_than_two_megabytes_are_accepted() {
    let app = test_app("decoders.decode_type_b");
    let payload = "ab".repeat(3 * 512 * 1024);
    let (status, body) = post_json(&app, "/", json!({ "payload": payload })).await;

    assert_eq!(status, StatusCode::OK);
    let reversed = body["result"]["reversed_data"].as_str().unwrap();
    assert_eq!(reversed.len(), 3 * 1024 * 1024);
    assert!(reversed.starts_with("ba"));
}

// ---------------------------------------------------------------------------
// Handler failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn handler_error_maps_to_400_with_message() {
    let app = test_app("tests.failing.always_fails");
    let (status, body) = post_json(&app, "/", json!({ "payload": "x" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"]["message"],
        "Error executing handler function: cannot process 'x'"
    );
}

#[tokio::test]
async fn handler_panic_maps_to_400_and_server_keeps_serving() {
    let app = test_app("tests.failing.panics");

    for _ in 0..2 {
        let (status, body) = post_json(&app, "/", json!({ "payload": "x" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"]["message"],
            "Error executing handler function: handler panicked: handler blew up"
        );
    }

    let (status, _) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_requests_are_served_independently() {
    let app = test_app("tests.slow.sleep_then_echo");

    let requests = (0..8).map(|i| {
        let app = app.clone();
        async move { post_json(&app, "/", json!({ "payload": format!("req-{}", i) })).await }
    });
    let responses = spawn_all(requests).await;

    for (i, (status, body)) in responses.into_iter().enumerate() {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["echo"], format!("req-{}", i));
    }
}

async fn spawn_all<F>(futures: impl Iterator<Item = F>) -> Vec<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut outputs = Vec::with_capacity(handles.len());
    for handle in handles {
        outputs.push(handle.await.unwrap());
    }
    outputs
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_payload_is_a_422() {
    let app = test_app("function.handler.handle");
    let (status, body) = post_json(&app, "/", json!({ "data": "x" })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn non_string_payload_is_a_422() {
    let app = test_app("function.handler.handle");
    let (status, _) = post_json(&app, "/", json!({ "payload": 42 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn malformed_json_body_is_a_422() {
    let app = test_app("function.handler.handle");
    let (status, _) = post_raw(&app, "/", Some("application/json"), b"{not json".to_vec()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn missing_content_type_is_a_422() {
    let app = test_app("function.handler.handle");
    let (status, _) = post_raw(&app, "/", None, b"{\"payload\":\"x\"}".to_vec()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn extra_fields_are_ignored() {
    let app = test_app("decoders.decode_type_b");
    let (status, body) = post_json(&app, "/", json!({ "payload": "ab", "extra": true })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["reversed_data"], "ba");
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unresolved_handler_answers_500() {
    let app = unresolved_app("non.existent.handler");
    let (status, body) = post_json(&app, "/", json!({ "payload": "x" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "HANDLER_UNAVAILABLE");
    assert_eq!(
        body["error"]["message"],
        "Handler function not loaded. Check server logs for configuration errors."
    );
}

#[tokio::test]
async fn unresolved_handler_is_checked_before_validation() {
    let app = unresolved_app("malformed");
    let (status, _) = post_json(&app, "/", json!({ "wrong": 1 })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn invalid_identifiers_fail_resolution() {
    let registry = test_registry();
    for identifier in ["handle", "non.existent.handler", "function.handler.missing", "function."] {
        let err = AppState::resolve(&registry, identifier)
            .err()
            .unwrap_or_else(|| panic!("{} should not resolve", identifier));
        assert!(
            err.to_string()
                .starts_with(&format!("failed to load handler function from '{}'", identifier)),
            "{}",
            err
        );
    }
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = test_app("function.handler.handle");
    let (status, _) = get_json(&app, "/missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
