pub mod health;
pub mod webhook;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

// The webhook contract is unauthenticated; callers are trusted network peers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health::health_handler))
        .route("/webhook/upwork-jobs", post(webhook::handle_webhook))
        .with_state(state)
}
