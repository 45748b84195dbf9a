use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::AppState;
use crate::handlers::rates::{get_cross_rate, get_rate, health};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/rates/:code/:year/:month/:day", get(get_rate))
        .route("/rates/:from/:to/:year/:month/:day", get(get_cross_rate))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
