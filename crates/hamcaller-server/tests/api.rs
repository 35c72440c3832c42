//! Router tests for the HamCaller HTTP API
//!
//! The model runtime is replaced by in-process stubs; requests go through the
//! full router with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use hamcaller_classifiers::{CommandRuntime, LlmClassifier, ModelRuntime, OutputParser};
use hamcaller_core::{Error, Result};
use hamcaller_server::{build_app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

/// Answers every prompt with a fixed string, optionally after a delay
struct StubRuntime {
    answer: String,
    delay: Option<Duration>,
    healthy: bool,
}

impl StubRuntime {
    fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            delay: None,
            healthy: true,
        }
    }
}

#[async_trait]
impl ModelRuntime for StubRuntime {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.answer.clone())
    }

    async fn probe(&self) -> Result<()> {
        if self.healthy {
            Ok(())
        } else {
            Err(Error::unavailable("stub is down"))
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn app_with(runtime: Arc<dyn ModelRuntime>, timeout: Duration) -> Router {
    let classifier = LlmClassifier::new(runtime, OutputParser::with_defaults().unwrap())
        .with_timeout(timeout);
    let state = AppState::new(Arc::new(classifier), "Ollama (stub)");
    build_app(state, &["*".to_string()])
}

fn app_answering(answer: &str) -> Router {
    app_with(
        Arc::new(StubRuntime::answering(answer)),
        Duration::from_secs(30),
    )
}

fn detect_request(path: &str, body: Value) -> Request<Body> {
    Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_body(resp: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn read_body_string(resp: axum::http::Response<Body>) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

// ── POST /detect ────────────────────────────────────────────────

#[tokio::test]
async fn warranty_call_is_spam() {
    let resp = app_answering("SPAM")
        .oneshot(detect_request(
            "/detect",
            json!({ "transcript": "Your warranty is expiring. Press 1." }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["is_spam"], true);
    assert_eq!(body["label"], "SPAM");
    assert_eq!(body["raw_output"], "SPAM");
}

#[tokio::test]
async fn family_call_is_legitimate() {
    let resp = app_answering("LEGITIMATE")
        .oneshot(detect_request(
            "/detect",
            json!({ "transcript": "Hi mom, checking in" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["is_spam"], false);
    assert_eq!(body["label"], "LEGITIMATE");
    assert_eq!(body["low_confidence"], false);
}

#[tokio::test]
async fn mixed_case_spam_answer() {
    let resp = app_answering("  Spam.\n")
        .oneshot(detect_request(
            "/api/classify",
            json!({ "transcript": "IRS calling about an arrest warrant" }),
        ))
        .await
        .unwrap();

    let body = read_body(resp).await;
    assert_eq!(body["is_spam"], true);
    assert_eq!(body["raw_output"], "  Spam.\n");
}

#[tokio::test]
async fn ambiguous_answer_is_low_confidence_legitimate() {
    let resp = app_answering("")
        .oneshot(detect_request(
            "/detect",
            json!({ "transcript": "Delivery driver, can't find your apartment" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["label"], "LEGITIMATE");
    assert_eq!(body["low_confidence"], true);
}

#[tokio::test]
async fn short_transcript_skips_model() {
    let resp = app_answering("SPAM")
        .oneshot(detect_request("/detect", json!({ "transcript": "hey" })))
        .await
        .unwrap();

    let body = read_body(resp).await;
    assert_eq!(body["label"], "LEGITIMATE");
    assert_eq!(body["reasoning"], "Too short to analyze");
}

#[tokio::test]
async fn missing_transcript_is_rejected() {
    let resp = app_answering("SPAM")
        .oneshot(detect_request("/detect", json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "invalid_request");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("transcript"));
}

#[tokio::test]
async fn invalid_json_body_uses_error_shape() {
    let req = Request::post("/detect")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let resp = app_answering("SPAM").oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn missing_content_type_uses_error_shape() {
    let req = Request::post("/detect")
        .body(Body::from(r#"{"transcript": "Hi mom, checking in"}"#))
        .unwrap();
    let resp = app_answering("SPAM").oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "invalid_request");
}

#[tokio::test]
async fn slow_runtime_returns_gateway_timeout_within_bound() {
    let runtime = StubRuntime {
        delay: Some(Duration::from_secs(60)),
        ..StubRuntime::answering("SPAM")
    };
    let app = app_with(Arc::new(runtime), Duration::from_millis(200));

    let start = Instant::now();
    let resp = app
        .oneshot(detect_request(
            "/detect",
            json!({ "transcript": "You won a prize, pay the processing fee" }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    assert!(start.elapsed() < Duration::from_secs(5));
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "runtime_timeout");
}

#[tokio::test]
async fn missing_runtime_returns_service_unavailable() {
    let runtime = CommandRuntime::new("/nonexistent/hamcaller/ollama");
    let app = app_with(Arc::new(runtime), Duration::from_secs(5));

    let resp = app
        .clone()
        .oneshot(detect_request(
            "/detect",
            json!({ "transcript": "Your warranty is expiring. Press 1." }),
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "runtime_unavailable");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .starts_with("Detection failed"));

    // The server keeps serving after a failed classification
    let resp = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// ── Health / metrics / page ─────────────────────────────────────

#[tokio::test]
async fn health_names_model_and_backend() {
    let resp = app_answering("SPAM")
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "hamcaller via Ollama (stub)");
    assert!(body.get("runtime").is_none());
}

#[tokio::test]
async fn health_probe_reports_down_runtime() {
    let runtime = StubRuntime {
        healthy: false,
        ..StubRuntime::answering("SPAM")
    };
    let resp = app_with(Arc::new(runtime), Duration::from_secs(30))
        .oneshot(
            Request::get("/health?probe=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_body(resp).await;
    assert_eq!(body["runtime"], "down");
}

#[tokio::test]
async fn metrics_disabled_without_recorder() {
    let resp = app_answering("SPAM")
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn root_serves_page() {
    let resp = app_answering("SPAM")
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = read_body_string(resp).await;
    assert!(html.contains("HamCaller"));
    assert!(html.contains("/detect"));
}

#[tokio::test]
async fn unknown_api_route_is_json_404() {
    let resp = app_answering("SPAM")
        .oneshot(Request::get("/api/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_body(resp).await;
    assert_eq!(body["error"]["type"], "not_found");
}
