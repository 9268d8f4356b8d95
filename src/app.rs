use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/crime-trend", get(handlers::get_trend))
        .route("/api/options", get(handlers::get_options))
        .with_state(state)
}
