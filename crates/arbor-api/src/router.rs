//! Route definitions for the Arbor HTTP API.
//!
//! All routes are mounted under `/api`. Destructive operations are
//! registered for POST only, so any other method gets `405`.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_request_body_bytes as usize;

    let api_routes = Router::new()
        .merge(folder_routes())
        .merge(file_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Folder browsing, creation, move, delete
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/folders",
            get(handlers::folder::list_root).post(handlers::folder::create_folder),
        )
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}/move", post(handlers::folder::move_folder))
        .route("/folders/{id}/delete", post(handlers::folder::delete_folder))
}

/// File upload, metadata, download, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::upload_files))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}/content", get(handlers::file::download_file))
        .route("/files/{id}/delete", post(handlers::file::delete_file))
}

/// Health
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
