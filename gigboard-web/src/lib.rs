//! gigboard-web library - booking directory HTTP service
//!
//! Request handlers for browsing venues, artists and shows, substring
//! search, and create/edit/delete through HTML forms.

use axum::routing::{get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::pages::home))
        .route("/venues", get(api::venues::list))
        .route("/venues/search", post(api::venues::search))
        .route(
            "/venues/create",
            get(api::venues::create_form).post(api::venues::create_submit),
        )
        .route(
            "/venues/:id",
            get(api::venues::detail).delete(api::venues::delete),
        )
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_form).post(api::venues::edit_submit),
        )
        .route("/artists", get(api::artists::list))
        .route("/artists/search", post(api::artists::search))
        .route(
            "/artists/create",
            get(api::artists::create_form).post(api::artists::create_submit),
        )
        .route("/artists/:id", get(api::artists::detail))
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_form).post(api::artists::edit_submit),
        )
        .route("/shows", get(api::shows::list))
        .route(
            "/shows/create",
            get(api::shows::create_form).post(api::shows::create_submit),
        )
        .merge(api::health::health_routes())
        .fallback(api::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
