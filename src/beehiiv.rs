use serde::Serialize;
use serde_json::{json, Value};

use crate::config::BeehiivCredentials;
use crate::error::ApiError;

/// One named string attribute on a Beehiiv subscriber. The v2 API takes
/// custom fields as an array of these pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct OutboundPayload {
    pub email: String,
    pub reactivate_existing: bool,
    pub send_welcome_email: bool,
    pub utm_source: String,
    pub custom_fields: Vec<CustomField>,
}

impl OutboundPayload {
    pub fn new(email: String, utm_source: String, custom_fields: Vec<CustomField>) -> Self {
        Self {
            email,
            // Resubscribe previously unsubscribed addresses instead of
            // rejecting them, and let Beehiiv send its welcome email.
            reactivate_existing: true,
            send_welcome_email: true,
            utm_source,
            custom_fields,
        }
    }
}

pub struct BeehiivClient {
    client: reqwest::Client,
    api_base: String,
}

impl BeehiivClient {
    pub fn new(api_base: &str) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build reqwest client"),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    /// Create (or reactivate) a subscription. Returns the upstream response
    /// body, decoded best-effort.
    pub async fn create_subscription(
        &self,
        credentials: &BeehiivCredentials,
        payload: &OutboundPayload,
    ) -> Result<Value, ApiError> {
        let url = format!(
            "{}/v2/publications/{}/subscriptions",
            self.api_base, credentials.publication_id
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&credentials.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| ApiError::Transport(format!("Beehiiv request failed: {e}")))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| ApiError::Transport(format!("Beehiiv response read failed: {e}")))?;

        // 409 means "already subscribed"; with reactivate_existing set the
        // resubmission is idempotent, so treat it as success.
        if (200..300).contains(&status) || status == 409 {
            Ok(serde_json::from_str(&body).unwrap_or_else(|_| json!({ "raw": body })))
        } else {
            Err(ApiError::Delivery { status, body })
        }
    }
}
