use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::Mood,
    routes::AppState,
    services::{
        moods,
        recommendations::{self, RecommendationSet},
    },
};

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub input: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub mood: Mood,
    #[serde(flatten)]
    pub recommendations: RecommendationSet,
}

/// Handler for the recommendations endpoint
///
/// Resolves the free-text input to a mood first (exact labels skip the
/// language model entirely), then aggregates the three category lists.
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let input = request.input.trim();
    if input.is_empty() {
        return Err(AppError::InvalidInput(
            "Mood input cannot be empty".to_string(),
        ));
    }

    tracing::info!(
        request_id = %request_id,
        input = %input,
        "Processing recommendation request"
    );

    let mood = moods::resolve_mood(state.llm.clone(), input).await;
    let recommendations =
        recommendations::fetch_recommendations(state.metadata.clone(), Some(mood.genre())).await?;

    tracing::info!(
        request_id = %request_id,
        mood = %mood,
        movies = recommendations.movies.len(),
        series = recommendations.series.len(),
        anime = recommendations.anime.len(),
        "Recommendations aggregated"
    );

    Ok(Json(RecommendationResponse {
        mood,
        recommendations,
    }))
}
