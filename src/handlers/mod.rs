// handlers/mod.rs - HTTP surface of the documentation server
//
// The documentation routes live under the configured prefix (docs.rs);
// the service root and health probe are mounted beside them.

pub mod docs;

pub use docs::{docs_router, DocsState};

use axum::{extract::State, http::Uri, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;

/// Full application router.
pub fn app(state: DocsState, enable_cors: bool) -> Router {
    let mut service_routes = Router::new().route("/health", get(health));
    // An empty prefix puts the test console at the root
    if !state.options().normalized_prefix().is_empty() {
        service_routes = service_routes.route("/", get(root));
    }

    let router = service_routes
        .with_state(state.clone())
        .merge(docs_router(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

async fn root(State(state): State<DocsState>) -> Json<Value> {
    let options = state.options();
    let prefix = options.normalized_prefix();

    Json(json!({
        "success": true,
        "data": {
            "name": "Hub Docs",
            "version": env!("CARGO_PKG_VERSION"),
            "description": options.description,
            "endpoints": {
                "docs": format!("{}/ (test console)", prefix),
                "api": options.api_json_url(),
                "swagger": format!("{}/swagger.json", prefix),
                "health": "/health",
            }
        }
    }))
}

async fn health(State(state): State<DocsState>) -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "cached_hubs": state.inspector().cached_hub_count(),
        }
    }))
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
