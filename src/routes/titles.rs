use axum::{
    extract::{Path, State},
    Extension, Json,
};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MediaKind, TitleDetails},
    routes::AppState,
};

/// Handler for the title detail endpoint
///
/// `kind` is the TMDB path form ("movie" or "tv"); anything else is a
/// client error, not a lookup miss.
pub async fn details(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path((kind, id)): Path<(String, u64)>,
) -> AppResult<Json<TitleDetails>> {
    let kind = MediaKind::parse(&kind)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown media kind: {}", kind)))?;

    tracing::info!(
        request_id = %request_id,
        kind = %kind,
        id = id,
        "Fetching title details"
    );

    let raw = state.metadata.title_details(kind, id).await?;
    let details = TitleDetails::from_api(raw, kind);

    tracing::info!(
        request_id = %request_id,
        title = %details.title,
        has_trailer = details.trailer_url.is_some(),
        similar = details.similar.len(),
        "Title details served"
    );

    Ok(Json(details))
}
