use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Router;
use reqwest::Client;
use serde_json::{json, Value};

use subrelay::config::{BeehiivConfig, BeehiivCredentials, Config};

/// A running subrelay instance pointed at a stub upstream.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

impl TestApp {
    pub async fn spawn(beehiiv_base: &str, with_credentials: bool) -> Self {
        let config = Config {
            host: [127, 0, 0, 1].into(),
            port: 0,
            max_body_size: 65536,
            log_level: "info".to_string(),
            utm_source: "asap-jobs-landing".to_string(),
            beehiiv: BeehiivConfig {
                api_base: beehiiv_base.to_string(),
                credentials: with_credentials.then(|| BeehiivCredentials {
                    api_key: "test-key".to_string(),
                    publication_id: "pub_test".to_string(),
                }),
            },
        };

        let app = subrelay::build_app(config);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server failed");
        });

        Self {
            addr,
            client: Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to /api/subscribe, return (body, status).
    pub async fn subscribe(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/subscribe"))
            .json(data)
            .send()
            .await
            .expect("subscribe request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// A stand-in for the Beehiiv API: records every subscription payload it
/// receives and answers with a fixed status and body.
pub struct StubBeehiiv {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

struct StubState {
    received: Arc<Mutex<Vec<Value>>>,
    status: u16,
    body: String,
}

impl StubBeehiiv {
    pub async fn spawn(status: u16, body: &str) -> Self {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(StubState {
            received: received.clone(),
            status,
            body: body.to_string(),
        });

        let app = Router::new()
            .route(
                "/v2/publications/{publication_id}/subscriptions",
                axum::routing::post(record_subscription),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });

        Self { addr, received }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Payloads received so far, oldest first.
    pub fn requests(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn record_subscription(
    State(state): State<Arc<StubState>>,
    Path(_publication_id): Path<String>,
    body: String,
) -> impl IntoResponse {
    let payload: Value = serde_json::from_str(&body).unwrap_or(json!(null));
    state.received.lock().unwrap().push(payload);
    (
        StatusCode::from_u16(state.status).unwrap(),
        state.body.clone(),
    )
}
