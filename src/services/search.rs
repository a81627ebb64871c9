use std::sync::Arc;

use serde::Serialize;

use crate::{
    error::{AppError, AppResult},
    models::{to_display_list, DisplayItem, MediaKind},
    services::providers::{LlmProvider, MetadataProvider},
};

/// How a query was routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Title,
    Mood,
}

/// A search result set, tagged with the mode that produced it
#[derive(Debug, Serialize)]
pub struct SearchOutcome {
    pub mode: SearchMode,
    pub results: Vec<DisplayItem>,
}

/// Classifies a query as mood-flavored or title-flavored
///
/// A query containing "feel" or "like" (case-insensitive, substring) is
/// treated as a mood description. Deliberately simple; titles like
/// "Life of Pi" do trip it, and callers get the mode back so clients can
/// tell which path ran.
pub fn classify_query(query: &str) -> SearchMode {
    let lowered = query.to_lowercase();
    if lowered.contains("feel") || lowered.contains("like") {
        SearchMode::Mood
    } else {
        SearchMode::Title
    }
}

/// Dispatches a search query to the title or mood path
pub async fn handle_search(
    metadata: Arc<dyn MetadataProvider>,
    llm: Arc<dyn LlmProvider>,
    query: &str,
) -> AppResult<SearchOutcome> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "Search query cannot be empty".to_string(),
        ));
    }

    match classify_query(query) {
        SearchMode::Title => search_by_title(metadata, query).await,
        SearchMode::Mood => Ok(search_by_mood(metadata, llm, query).await),
    }
}

/// One multi-type search, normalized; non-title records are dropped
async fn search_by_title(
    metadata: Arc<dyn MetadataProvider>,
    query: &str,
) -> AppResult<SearchOutcome> {
    let items = metadata.search_multi(query).await?;

    Ok(SearchOutcome {
        mode: SearchMode::Title,
        results: to_display_list(items, MediaKind::Movie),
    })
}

/// Mood path: the model suggests titles, each is looked up as a movie
///
/// Lookups run sequentially in suggestion order. A suggestion with no
/// match is skipped, as is one whose lookup fails; a failed or malformed
/// suggestion round yields an empty result set. This path never errors.
async fn search_by_mood(
    metadata: Arc<dyn MetadataProvider>,
    llm: Arc<dyn LlmProvider>,
    query: &str,
) -> SearchOutcome {
    let titles = match llm.suggest_titles(query).await {
        Ok(titles) => titles,
        Err(e) => {
            tracing::warn!(error = %e, query = %query, "Title suggestions unavailable");
            Vec::new()
        }
    };

    let mut results = Vec::new();
    for title in &titles {
        match metadata.search_movies(title).await {
            Ok(items) => match items.into_iter().next() {
                Some(first) => {
                    if let Some(display) = first.into_display(MediaKind::Movie) {
                        results.push(display);
                    }
                }
                None => {
                    tracing::debug!(title = %title, "No match for suggested title");
                }
            },
            Err(e) => {
                tracing::warn!(error = %e, title = %title, "Suggested title lookup failed");
            }
        }
    }

    SearchOutcome {
        mode: SearchMode::Mood,
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ApiListItem;
    use crate::services::providers::{MockLlmProvider, MockMetadataProvider};

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
    fn test_classify_title_queries() {
        assert_eq!(classify_query("Inception"), SearchMode::Title);
        assert_eq!(classify_query("The Godfather"), SearchMode::Title);
    }

    #[test]
    fn test_classify_mood_queries() {
        assert_eq!(classify_query("I feel adventurous"), SearchMode::Mood);
        assert_eq!(
            classify_query("something like a thriller"),
            SearchMode::Mood
        );
        assert_eq!(classify_query("FEELING LUCKY"), SearchMode::Mood);
    }

    #[test]
    fn test_classify_substring_false_positive() {
        // Known quirk of the heuristic: title words containing the
        // triggers still route to the mood path.
        assert_eq!(classify_query("Life of Pi, I like it"), SearchMode::Mood);
    }

    #[tokio::test]
    async fn test_empty_query_is_invalid() {
        let metadata = MockMetadataProvider::new();
        let llm = MockLlmProvider::new();

        let result = handle_search(Arc::new(metadata), Arc::new(llm), "   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_title_path_uses_multi_search() {
        let mut metadata = MockMetadataProvider::new();
        metadata
            .expect_search_multi()
            .withf(|query| query == "Inception")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    ApiListItem {
                        media_type: Some("movie".to_string()),
                        ..raw_item(27205, "Inception")
                    },
                    ApiListItem {
                        media_type: Some("person".to_string()),
                        ..raw_item(525, "Christopher Nolan")
                    },
                ])
            });

        let llm = MockLlmProvider::new();
        let outcome = handle_search(Arc::new(metadata), Arc::new(llm), "Inception")
            .await
            .unwrap();

        assert_eq!(outcome.mode, SearchMode::Title);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].title, "Inception");
    }

    #[tokio::test]
    async fn test_mood_path_keeps_first_match_and_skips_misses() {
        let mut llm = MockLlmProvider::new();
        llm.expect_suggest_titles()
            .withf(|feeling| feeling == "I feel excited")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    "Mad Max".to_string(),
                    "Unknown Film".to_string(),
                    "Flaky Film".to_string(),
                ])
            });

        let mut metadata = MockMetadataProvider::new();
        metadata
            .expect_search_movies()
            .withf(|title| title == "Mad Max")
            .times(1)
            .returning(|_| Ok(vec![raw_item(76341, "Mad Max: Fury Road"), raw_item(9659, "Mad Max")]));
        metadata
            .expect_search_movies()
            .withf(|title| title == "Unknown Film")
            .times(1)
            .returning(|_| Ok(vec![]));
        metadata
            .expect_search_movies()
            .withf(|title| title == "Flaky Film")
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("lookup failed".to_string())));

        let outcome = handle_search(Arc::new(metadata), Arc::new(llm), "I feel excited")
            .await
            .unwrap();

        assert_eq!(outcome.mode, SearchMode::Mood);
        assert_eq!(outcome.results.len(), 1);
        assert_eq!(outcome.results[0].title, "Mad Max: Fury Road");
    }

    #[tokio::test]
    async fn test_mood_path_absorbs_suggestion_failure() {
        let mut llm = MockLlmProvider::new();
        llm.expect_suggest_titles()
            .times(1)
            .returning(|_| Err(AppError::ExternalApi("llm down".to_string())));

        let metadata = MockMetadataProvider::new();
        let outcome = handle_search(Arc::new(metadata), Arc::new(llm), "I feel sad")
            .await
            .unwrap();

        assert_eq!(outcome.mode, SearchMode::Mood);
        assert!(outcome.results.is_empty());
    }
}
