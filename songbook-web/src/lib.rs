//! songbook-web library - router, handlers and pages
//!
//! Exposed as a library so the router can be driven from integration tests.

use std::sync::Arc;

use axum::Router;
use songbook_common::config::AppConfig;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod pages;

pub use error::{WebError, WebResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Resolved configuration (session lifetime is read per login)
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Build application router
///
/// `/login`, `/health` and static assets are public; everything else sits
/// behind the session middleware.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Protected routes (require a session)
    let protected = Router::new()
        .route("/", get(api::index))
        .route("/logout", get(api::logout))
        .route("/add", post(api::add_song))
        .route("/delete/:id", get(api::delete_song))
        .route("/clear_all", get(api::clear_all))
        .route("/create_playlist", post(api::create_playlist))
        .route("/my_collections", get(api::my_collections))
        .route("/add_to_playlist", post(api::add_to_playlist))
        .route("/playlist/:id", get(api::view_playlist))
        .route("/remove_item/:id", get(api::remove_item))
        .route("/delete_playlist/:id", get(api::delete_playlist))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_session,
        ));

    // Public routes (no session)
    let public = Router::new()
        .route("/login", get(api::login_page).post(api::login_submit))
        .route("/static/songbook.css", get(api::serve_songbook_css))
        .merge(api::health_routes());

    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
