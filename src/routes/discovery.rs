use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    middleware::request_id::RequestId,
    models::DisplayItem,
    routes::AppState,
    services::discovery::{self, DailyPicks},
};

#[derive(Debug, Deserialize)]
pub struct PicksParams {
    #[serde(default = "default_count")]
    count: usize,
}

fn default_count() -> usize {
    discovery::DEFAULT_PICK_COUNT
}

/// Handler for the trending movies list
pub async fn trending(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<Vec<DisplayItem>> {
    let items = discovery::trending(state.metadata.clone()).await;
    tracing::info!(request_id = %request_id, results = items.len(), "Trending served");
    Json(items)
}

/// Handler for random picks from the popular page
pub async fn picks(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<PicksParams>,
) -> Json<Vec<DisplayItem>> {
    let items = discovery::random_picks(state.metadata.clone(), params.count).await;
    tracing::info!(
        request_id = %request_id,
        count = params.count,
        results = items.len(),
        "Random picks served"
    );
    Json(items)
}

/// Handler for the daily recommendation panel
pub async fn daily(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<DailyPicks> {
    let picks = discovery::daily_picks(state.metadata.clone()).await;
    tracing::info!(request_id = %request_id, "Daily picks served");
    Json(picks)
}
