//! # api-adapters
//!
//! The web routing and orchestration layer for Pinwall.

#[cfg(feature = "web-axum")]
mod error;
#[cfg(feature = "web-axum")]
mod extract;
#[cfg(feature = "web-axum")]
mod handlers;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use extract::{AdminSecret, ClientAddr, ADMIN_PASSWORD_HEADER};

#[cfg(feature = "web-axum")]
use std::path::Path;

#[cfg(feature = "web-axum")]
use axum::routing::{delete, get};
#[cfg(feature = "web-axum")]
use axum::Router;
#[cfg(feature = "web-axum")]
use tower_http::services::{ServeDir, ServeFile};
#[cfg(feature = "web-axum")]
use tower_http::trace::TraceLayer;

use auth_adapters::AdminGuard;
use services::{NoteService, RateLimiter};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub notes: NoteService,
    pub limiter: RateLimiter,
    pub admin: AdminGuard,
}

/// The JSON API under `/api`.
#[cfg(feature = "web-axum")]
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/notes",
            get(handlers::list_notes).post(handlers::create_note),
        )
        .route("/api/admin/notes", get(handlers::admin_list_notes))
        .route("/api/admin/notes/{id}", delete(handlers::admin_delete_note))
        .route("/api/admin/clear", delete(handlers::admin_clear_notes))
        .with_state(state)
}

/// The full application: the API plus the static front-end.
///
/// `/admin` serves the admin page directly; everything else unmatched falls
/// through to the public directory, which serves `index.html` at `/`.
#[cfg(feature = "web-axum")]
pub fn app_router(state: AppState, public_dir: &Path) -> Router {
    api_router(state)
        .route_service("/admin", ServeFile::new(public_dir.join("admin.html")))
        .fallback_service(ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
}
