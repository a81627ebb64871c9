use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::{
    models::{to_display_list, DisplayItem, MediaKind},
    services::providers::{DiscoverFilter, MetadataProvider},
};

/// Default number of random picks on the home page
pub const DEFAULT_PICK_COUNT: usize = 6;

/// One random pick per category for the daily panel
///
/// A `None` entry means that category could not be filled today; the
/// client renders a placeholder card for it.
#[derive(Debug, Serialize)]
pub struct DailyPicks {
    pub movie: Option<DisplayItem>,
    pub series: Option<DisplayItem>,
    pub anime: Option<DisplayItem>,
}

/// Draws up to `count` distinct elements from `pool`, uniformly at random
///
/// Indices are drawn until `min(count, pool.len())` distinct ones are
/// collected, and the picks come back in draw order. An empty pool yields
/// an empty draw.
pub fn pick_distinct<T: Clone, R: Rng + ?Sized>(pool: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let target = count.min(pool.len());
    let mut indices: Vec<usize> = Vec::with_capacity(target);

    while indices.len() < target {
        let index = rng.gen_range(0..pool.len());
        if !indices.contains(&index) {
            indices.push(index);
        }
    }

    indices.into_iter().map(|index| pool[index].clone()).collect()
}

/// Trending movies of the week; a fetch failure yields an empty list
pub async fn trending(metadata: Arc<dyn MetadataProvider>) -> Vec<DisplayItem> {
    match metadata.trending_movies().await {
        Ok(items) => to_display_list(items, MediaKind::Movie),
        Err(e) => {
            tracing::error!(error = %e, "Trending fetch failed");
            Vec::new()
        }
    }
}

/// Distinct random picks from the popular movies page
pub async fn random_picks(metadata: Arc<dyn MetadataProvider>, count: usize) -> Vec<DisplayItem> {
    match metadata.popular_movies().await {
        Ok(items) => {
            let pool = to_display_list(items, MediaKind::Movie);
            pick_distinct(&pool, count, &mut rand::thread_rng())
        }
        Err(e) => {
            tracing::error!(error = %e, "Popular movies fetch failed");
            Vec::new()
        }
    }
}

/// The daily recommendation panel: one random title per category
///
/// The three discover queries run concurrently. Failures and empty pages
/// are absorbed per category, so the panel itself always materializes.
pub async fn daily_picks(metadata: Arc<dyn MetadataProvider>) -> DailyPicks {
    let (movie, series, anime) = tokio::join!(
        random_single(metadata.clone(), MediaKind::Movie, DiscoverFilter::default()),
        random_single(metadata.clone(), MediaKind::Tv, DiscoverFilter::default()),
        random_single(metadata.clone(), MediaKind::Tv, DiscoverFilter::anime()),
    );

    DailyPicks {
        movie,
        series,
        anime,
    }
}

async fn random_single(
    metadata: Arc<dyn MetadataProvider>,
    kind: MediaKind,
    filter: DiscoverFilter,
) -> Option<DisplayItem> {
    match metadata.discover(kind, filter).await {
        Ok(items) => {
            let mut pool = to_display_list(items, kind);
            if pool.is_empty() {
                tracing::warn!(kind = %kind, "No results for daily pick");
                return None;
            }
            let index = rand::thread_rng().gen_range(0..pool.len());
            Some(pool.swap_remove(index))
        }
        Err(e) => {
            tracing::error!(error = %e, kind = %kind, "Daily pick fetch failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::ApiListItem;
    use crate::services::providers::MockMetadataProvider;
    use rand::{rngs::StdRng, SeedableRng};

    fn raw_item(id: u64, title: &str) -> ApiListItem {
        ApiListItem {
            id,
            title: Some(title.to_string()),
            name: None,
            poster_path: None,
            media_type: None,
        }
    }

    #[test]
    fn test_pick_distinct_draws_requested_count() {
        let pool: Vec<u32> = (0..20).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let picks = pick_distinct(&pool, 6, &mut rng);
        assert_eq!(picks.len(), 6);

        let unique: std::collections::HashSet<u32> = picks.iter().copied().collect();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_pick_distinct_caps_at_pool_size() {
        let pool = vec![10, 20, 30];
        let mut rng = StdRng::seed_from_u64(2);

        let mut picks = pick_distinct(&pool, 6, &mut rng);
        picks.sort_unstable();
        assert_eq!(picks, vec![10, 20, 30]);
    }

    #[test]
    fn test_pick_distinct_empty_pool() {
        let pool: Vec<u32> = Vec::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(pick_distinct(&pool, 6, &mut rng).is_empty());
    }

    #[test]
    fn test_pick_distinct_is_deterministic_for_seed() {
        let pool: Vec<u32> = (0..50).collect();
        let a = pick_distinct(&pool, 10, &mut StdRng::seed_from_u64(9));
        let b = pick_distinct(&pool, 10, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_trending_absorbs_failure() {
        let mut metadata = MockMetadataProvider::new();
        metadata
            .expect_trending_movies()
            .times(1)
            .returning(|| Err(AppError::ExternalApi("down".to_string())));

        let items = trending(Arc::new(metadata)).await;
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_random_picks_are_distinct() {
        let mut metadata = MockMetadataProvider::new();
        metadata.expect_popular_movies().times(1).returning(|| {
            Ok((1..=10)
                .map(|id| raw_item(id, &format!("Popular {}", id)))
                .collect())
        });

        let picks = random_picks(Arc::new(metadata), 6).await;
        assert_eq!(picks.len(), 6);

        let unique: std::collections::HashSet<u64> = picks.iter().map(|p| p.id).collect();
        assert_eq!(unique.len(), 6);
    }

    #[tokio::test]
    async fn test_daily_picks_absorb_per_category_failures() {
        let mut metadata = MockMetadataProvider::new();

        metadata
            .expect_discover()
            .withf(|kind, _| *kind == MediaKind::Movie)
            .times(1)
            .returning(|_, _| Ok(vec![raw_item(1, "Daily Movie")]));
        metadata
            .expect_discover()
            .withf(|kind, filter| *kind == MediaKind::Tv && *filter != DiscoverFilter::anime())
            .times(1)
            .returning(|_, _| Err(AppError::ExternalApi("down".to_string())));
        metadata
            .expect_discover()
            .withf(|_, filter| *filter == DiscoverFilter::anime())
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let picks = daily_picks(Arc::new(metadata)).await;
        assert_eq!(picks.movie.unwrap().title, "Daily Movie");
        assert!(picks.series.is_none());
        assert!(picks.anime.is_none());
    }
}
