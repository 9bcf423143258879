pub mod beehiiv;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod submission;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::beehiiv::BeehiivClient;
use crate::config::Config;
use crate::state::{AppState, SharedState};

pub fn build_app(config: Config) -> Router {
    let beehiiv = BeehiivClient::new(&config.beehiiv.api_base);

    if config.beehiiv.credentials.is_none() {
        tracing::warn!("Beehiiv credentials missing; subscribe requests will be rejected");
    }

    let max_body_size = config.max_body_size;
    let state: SharedState = Arc::new(AppState { config, beehiiv });

    Router::new()
        .merge(routes::api_routes())
        .route("/health", axum::routing::get(health))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("referrer-policy"),
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
