use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::beehiiv::OutboundPayload;
use crate::error::ApiError;
use crate::state::SharedState;
use crate::submission::{fields, record};

/// POST /api/subscribe: forward one signup to Beehiiv.
pub async fn create(State(state): State<SharedState>, body: Bytes) -> Result<Response, ApiError> {
    // Checked before any request work: an unconfigured server answers 500
    // for every body, valid or not, and never calls out.
    let credentials = state
        .config
        .beehiiv
        .credentials
        .as_ref()
        .ok_or(ApiError::NotConfigured)?;

    let submission = record::parse(&body)?;

    let payload = OutboundPayload::new(
        submission.email.clone(),
        state.config.utm_source.clone(),
        fields::custom_fields(&submission),
    );

    let data = state
        .beehiiv
        .create_subscription(credentials, &payload)
        .await?;

    tracing::info!("Subscription forwarded to Beehiiv");

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "data": data })),
    )
        .into_response())
}

/// Any non-POST method on the subscribe route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
