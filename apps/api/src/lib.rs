//! # Storefront API
//!
//! REST server for the storefront catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Routes                                     │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────┐  ┌─────────────────────────┐  │
//! │  │  /api/users    │  │  /api/category   │  │  /api/products          │  │
//! │  │                │  │                  │  │                         │  │
//! │  │ • create, list │  │ • create         │  │ • list (?keyword,limit) │  │
//! │  │ • get, update  │  │ • rename, delete │  │ • create (multipart)    │  │
//! │  │ • delete       │  │ • categories     │  │ • get, update, delete   │  │
//! │  └────────────────┘  └──────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  ┌────────────────┐  ┌──────────────────┐  ┌─────────────────────────┐  │
//! │  │  /api/upload   │  │  /uploads/*      │  │  /health                │  │
//! │  │  image → file  │  │  static files    │  │  "OK"                   │  │
//! │  └────────────────┘  └──────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  Layers: TraceLayer • CorsLayer • DefaultBodyLimit                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `PORT` - HTTP port (default: 5000)
//! - `BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `DATABASE_PATH` - SQLite file (default: ./storefront.db)
//! - `UPLOADS_DIR` - Uploaded images (default: ./uploads)
//! - `MAX_UPLOAD_BYTES` - Body limit (default: 5 MiB)
//! - `CORS_ORIGIN` - Allowed origin (default: any)

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{HeaderValue, StatusCode};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

// Re-exports
pub use config::ServerConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Builds the application router.
pub fn app(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads_dir());
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);
    let cors = cors_layer(state.config.cors_origin.as_deref());

    Router::new()
        .merge(routes::users::router())
        .merge(routes::categories::router())
        .merge(routes::products::router())
        .merge(routes::upload::router())
        .route("/health", get(health_handler))
        .nest_service("/uploads", uploads)
        .layer(body_limit)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let Some(origin) = origin else {
        return CorsLayer::permissive();
    };

    match origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            warn!(origin, "Unusable CORS_ORIGIN, allowing any origin");
            CorsLayer::permissive()
        }
    }
}

async fn health_handler(State(state): State<AppState>) -> (StatusCode, &'static str) {
    if state.db.health_check().await {
        (StatusCode::OK, "OK")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable")
    }
}
