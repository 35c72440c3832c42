use crate::server::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use hamcaller_core::{ClassificationRequest, ClassificationResult};
use serde::Deserialize;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info_span, warn, Instrument};
use uuid::Uuid;

// ============================================================================
// Classification
// ============================================================================

/// Classify one transcript.
///
/// Runtime failures map to 503/504/502 through [`ApiError`]; nothing is retried.
/// Body rejections keep axum's status but use the same error shape.
pub async fn detect(
    State(state): State<AppState>,
    payload: Result<Json<ClassificationRequest>, JsonRejection>,
) -> Result<Json<ClassificationResult>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected request body");
        ApiError::from(rejection)
    })?;

    let request_id = Uuid::new_v4();
    let span = info_span!("detect", %request_id);

    async move {
        metrics::counter!("hamcaller_requests_total").increment(1);
        debug!(chars = req.transcript.chars().count(), "Received transcript");

        let start = Instant::now();
        let outcome = state.classifier.classify(&req.transcript).await;
        metrics::histogram!("hamcaller_detect_latency_ms")
            .record(start.elapsed().as_secs_f64() * 1000.0);

        match outcome {
            Ok(result) => {
                metrics::counter!("hamcaller_verdicts_total", "label" => result.label.as_str())
                    .increment(1);
                Ok(Json(result))
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "Classification failed");
                metrics::counter!("hamcaller_errors_total", "kind" => err.kind()).increment(1);
                Err(ApiError::from(err))
            }
        }
    }
    .instrument(span)
    .await
}

// ============================================================================
// Health endpoints
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct HealthQuery {
    /// Also check the model runtime
    #[serde(default)]
    pub probe: bool,
}

pub async fn health(
    State(state): State<AppState>,
    Query(query): Query<HealthQuery>,
) -> impl IntoResponse {
    let mut body = json!({
        "status": "ok",
        "model": format!("{} via {}", state.classifier.name(), state.backend),
    });

    if query.probe {
        let runtime = match state.classifier.probe().await {
            Ok(()) => "up",
            Err(err) => {
                warn!(error = %err, "Model runtime probe failed");
                "down"
            }
        };
        body["runtime"] = json!(runtime);
    }

    Json(body)
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics_handle {
        Some(handle) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            handle.render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics are disabled").into_response(),
    }
}
