pub mod subscribe;

use axum::routing::post;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new().route(
        "/api/subscribe",
        post(subscribe::create).fallback(subscribe::method_not_allowed),
    )
}
