use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    routes::AppState,
    services::search::{self, SearchOutcome},
};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    q: String,
}

/// Handler for the search endpoint
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchOutcome>> {
    tracing::info!(
        request_id = %request_id,
        query = %params.q,
        "Processing search request"
    );

    let outcome = search::handle_search(state.metadata.clone(), state.llm.clone(), &params.q).await?;

    tracing::info!(
        request_id = %request_id,
        mode = ?outcome.mode,
        results = outcome.results.len(),
        "Search completed"
    );

    Ok(Json(outcome))
}
