use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::{
    middleware::request_id::RequestId,
    models::{GenreId, Mood},
    routes::AppState,
    services::moods,
};

/// Catalog entry pairing a mood with its genre
#[derive(Debug, Serialize)]
pub struct MoodEntry {
    pub mood: Mood,
    pub genre: GenreId,
}

/// Handler listing the mood catalog
pub async fn list() -> Json<Vec<MoodEntry>> {
    let catalog = Mood::ALL
        .iter()
        .map(|mood| MoodEntry {
            mood: *mood,
            genre: mood.genre(),
        })
        .collect();
    Json(catalog)
}

#[derive(Debug, Serialize)]
pub struct SuggestedMood {
    pub mood: Mood,
}

/// Handler suggesting a mood for tonight
pub async fn suggest(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<SuggestedMood> {
    let mood = moods::suggest_mood(state.llm.clone()).await;
    tracing::info!(request_id = %request_id, mood = %mood, "Mood suggested");
    Json(SuggestedMood { mood })
}
