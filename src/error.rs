use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    MethodNotAllowed,
    NotConfigured,
    Validation(String),
    /// Beehiiv answered with a non-success status. Carries the upstream
    /// status and raw body for diagnostics.
    Delivery { status: u16, body: String },
    Transport(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MethodNotAllowed => write!(f, "Method not allowed"),
            ApiError::NotConfigured => write!(f, "Server not configured"),
            ApiError::Validation(msg) => write!(f, "Validation: {msg}"),
            ApiError::Delivery { status, body } => {
                write!(f, "Delivery failed: upstream {status}: {body}")
            }
            ApiError::Transport(msg) => write!(f, "Transport: {msg}"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                axum::Json(json!({ "error": "Method not allowed" })),
            )
                .into_response(),
            ApiError::NotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                axum::Json(json!({ "error": "Server not configured" })),
            )
                .into_response(),
            ApiError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Delivery { status, body } => {
                tracing::error!("Beehiiv error: {status} {body}");
                // Mirror the upstream status; the raw body goes out as
                // `detail` for debugging, the message stays generic.
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (
                    status,
                    axum::Json(json!({
                        "error": "Failed to subscribe",
                        "detail": body,
                    })),
                )
                    .into_response()
            }
            ApiError::Transport(msg) => {
                tracing::error!("Beehiiv request failed: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({ "error": "Subscription service unavailable" })),
                )
                    .into_response()
            }
        }
    }
}
