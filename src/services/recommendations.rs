use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::AppResult,
    models::{to_display_list, DisplayItem, GenreId, MediaKind},
    services::providers::{DiscoverFilter, MetadataProvider},
};

/// Recommendation lists for each category
#[derive(Debug, Serialize)]
pub struct RecommendationSet {
    pub movies: Vec<DisplayItem>,
    pub series: Vec<DisplayItem>,
    pub anime: Vec<DisplayItem>,
}

/// Fetches all three recommendation categories concurrently
///
/// Movies and series share the genre filter; anime always uses the fixed
/// anime proxy. All three queries must succeed: one failure fails the
/// whole set, partial results are never delivered. Within each list the
/// provider's popularity order is preserved.
pub async fn fetch_recommendations(
    metadata: Arc<dyn MetadataProvider>,
    genre: Option<GenreId>,
) -> AppResult<RecommendationSet> {
    let (movies, series, anime) = tokio::try_join!(
        metadata.discover(MediaKind::Movie, DiscoverFilter::by_genre(genre)),
        metadata.discover(MediaKind::Tv, DiscoverFilter::by_genre(genre)),
        metadata.discover(MediaKind::Tv, DiscoverFilter::anime()),
    )?;

    Ok(RecommendationSet {
        movies: to_display_list(movies, MediaKind::Movie),
        series: to_display_list(series, MediaKind::Tv),
        anime: to_display_list(anime, MediaKind::Tv),
    })
}
