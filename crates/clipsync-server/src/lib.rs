//! Clipsync Server
//!
//! HTTP service storing per-user clipboard history. Credentials are kept in a
//! flat JSON document, entries in an embedded SQLite table.

pub mod config;
pub mod error;
pub mod handlers;
pub mod services;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub use config::Config;
pub use error::{ClipError, ErrorKind};

use services::{AuthService, ClipboardService};
use storage::{Database, UserFile};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub clipboard_service: Arc<ClipboardService>,
}

impl AppState {
    /// Open both stores named by the config and wire up the services
    pub async fn open(config: &Config) -> Result<Self> {
        let users = Arc::new(UserFile::new(&config.users_path));
        info!("Credential file: {}", users.path().display());

        let db = Arc::new(
            Database::new(&config.database_path)
                .await
                .context("Failed to initialize database")?,
        );

        let auth_service = Arc::new(AuthService::new(users));
        let clipboard_service = Arc::new(ClipboardService::new(db, auth_service.clone()));

        Ok(Self {
            auth_service,
            clipboard_service,
        })
    }
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/login", post(handlers::auth::login))
        .route("/update_user", post(handlers::auth::update_user))
        .route("/upload", post(handlers::clipboard::upload))
        .route("/get", get(handlers::clipboard::history))
        .route("/clear", post(handlers::clipboard::clear))
        .route("/size", get(handlers::clipboard::size))
        .route("/delete_entry", post(handlers::clipboard::delete_entry))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
