use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::middleware::{canonical, request_log, session};
use crate::routes;
use crate::state::AppState;

/// Builds the application router: pages, APIs, static assets, and the
/// session/logging/canonical-host middleware stack.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.settings.static_dir.clone();

    Router::new()
        .route("/", get(routes::pages::index))
        .route("/blog", get(routes::pages::blog))
        .route("/favicon.ico", get(routes::pages::favicon))
        .route("/health", get(routes::pages::health))
        .route("/chat", post(routes::chat::chat))
        .route("/feedback", post(routes::feedback::feedback))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(axum_mw::from_fn(session::session_cookie))
        .layer(axum_mw::from_fn_with_state(
            state.clone(),
            canonical::canonical_host,
        ))
        .layer(axum_mw::from_fn(request_log::request_log))
        .with_state(state)
}
