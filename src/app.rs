use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/healthz", get(handlers::healthz))
        .route("/ui/snapshot", get(handlers::snapshot))
        .route("/ui/events", post(handlers::event))
        .with_state(state)
}
