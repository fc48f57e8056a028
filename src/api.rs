//! Unified API router for StringLens
//!
//! Merges the module routers into a single axum `Router` with CORS, request
//! tracing, a JSON 404 fallback, and root-level endpoints.
//!
//! ## Endpoint Map
//!
//! | Route                                     | Module  | Description                  |
//! |-------------------------------------------|---------|------------------------------|
//! | `GET /`                                   | api     | Service index                |
//! | `GET /health`                             | api     | Health check                 |
//! | `POST /strings`                           | strings | Analyze and store a value    |
//! | `GET /strings`                            | strings | List with filters            |
//! | `GET /strings/filter-by-natural-language` | strings | List with a free-text query  |
//! | `GET /strings/:value`                     | strings | Fetch by value               |
//! | `DELETE /strings/:value`                  | strings | Delete by value              |

use crate::config::ServerConfig;
use crate::error::Result;
use crate::query::QueryParser;
use crate::strings::types::ApiError;
use crate::strings::{strings_router, StringStore, StringsState};
use axum::{
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the complete StringLens HTTP application
pub fn build_app(strings_state: StringsState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(strings_router(strings_state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(cors_origins))
}

/// Fresh state: an empty store and a compiled query parser
pub fn default_state() -> Result<StringsState> {
    Ok(StringsState {
        store: Arc::new(StringStore::new()),
        parser: Arc::new(QueryParser::new()?),
    })
}

/// Bind and serve until Ctrl+C
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let app = build_app(default_state()?, &config.cors_origins);
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %listener.local_addr()?, "StringLens API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down...");
        })
        .await?;

    Ok(())
}

// =============================================================================
// Root handlers
// =============================================================================

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "StringLens API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /strings": "Create and analyze a string",
            "GET /strings/:value": "Get a specific string",
            "GET /strings": "Get all strings with filters",
            "GET /strings/filter-by-natural-language": "Filter using natural language",
            "DELETE /strings/:value": "Delete a string",
        },
    }))
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ApiError::not_found(format!(
            "Cannot {} {}",
            method,
            uri.path()
        ))),
    )
}

// =============================================================================
// CORS
// =============================================================================

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let parsed: Vec<_> = origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(parsed)
    }
}
