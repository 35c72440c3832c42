//! Error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hamcaller_core::Error;
use serde_json::json;

/// A failed request on its way to the client.
///
/// Every variant renders as `{"error": {"message", "type"}}`.
#[derive(Debug)]
pub enum ApiError {
    /// The classifier or its runtime failed
    Classification(Error),

    /// The request body was rejected before classification
    InvalidRequest { status: StatusCode, message: String },
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self::Classification(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Classification(Error::RuntimeUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Classification(Error::RuntimeTimeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            Self::Classification(Error::MalformedResponse(_)) => StatusCode::BAD_GATEWAY,
            Self::Classification(Error::Config(_) | Error::Io(_) | Error::Serialization(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvalidRequest { status, .. } => *status,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Classification(err) => err.kind(),
            Self::InvalidRequest { .. } => "invalid_request",
        }
    }

    fn message(&self) -> String {
        match self {
            Self::Classification(err) => format!("Detection failed: {}", err),
            Self::InvalidRequest { message, .. } => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "message": self.message(),
                "type": self.kind(),
            }
        });

        (self.status(), Json(body)).into_response()
    }
}
