//! # Klaw Console Host
//!
//! Serves the Klaw console UI bundle (built from `ui/` with trunk) together
//! with the runtime configuration the UI reads on startup.
//!
//! ## Endpoints
//!
//! - `GET /health`: liveness and build version
//! - `GET /console/config`: resolved feature flags
//! - everything else: embedded UI asset, or `index.html` for client-side routes
//!
//! The Klaw API itself (`/api/...`) is served by Klaw, not by this host.
//!
//! ```rust,no_run
//! use klaw_console::config::Settings;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Arc::new(Settings::default());
//!     let app = klaw_console::create_app(settings);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;

use crate::adapters::{console_config_handler, health_handler, ui_handler::UIHandler};
use crate::config::Settings;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Creates the Axum application router with all endpoints configured.
pub fn create_app(settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/health", get(health_handler::health))
        .route(
            "/console/config",
            get(console_config_handler::get_console_config),
        )
        .with_state(settings)
        // UI endpoint (catch-all for SPA)
        .fallback(UIHandler::serve)
        .layer(TraceLayer::new_for_http())
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}
