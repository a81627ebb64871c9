use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::providers::{LlmProvider, MetadataProvider},
};

pub mod discovery;
pub mod moods;
pub mod recommendations;
pub mod search;
pub mod titles;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub metadata: Arc<dyn MetadataProvider>,
    pub llm: Arc<dyn LlmProvider>,
}

impl AppState {
    pub fn new(metadata: Arc<dyn MetadataProvider>, llm: Arc<dyn LlmProvider>) -> Self {
        Self { metadata, llm }
    }
}

/// Creates the application router with all routes
///
/// The request-id layer sits outside tracing so every request span carries
/// its ID. CORS is open: the rendering frontend is served from a different
/// origin.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search::search))
        .route("/recommendations", post(recommendations::recommend))
        .route("/trending", get(discovery::trending))
        .route("/picks", get(discovery::picks))
        .route("/daily", get(discovery::daily))
        .route("/titles/:kind/:id", get(titles::details))
        .route("/moods", get(moods::list))
        .route("/moods/suggest", get(moods::suggest))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
