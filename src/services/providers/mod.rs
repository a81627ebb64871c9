/// Upstream provider abstractions
///
/// The workflow depends on two remote services: a metadata catalog (TMDB)
/// for titles and a language model (OpenAI) for mood interpretation. Each
/// sits behind a trait so the services can be exercised against mocks.
use crate::{
    error::AppResult,
    models::{ApiListItem, ApiTitleDetails, GenreId, MediaKind},
};

pub mod openai;
pub mod tmdb;

/// Filter parameters for a discover query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoverFilter {
    pub genre: Option<GenreId>,
    pub original_language: Option<String>,
}

impl DiscoverFilter {
    /// Filter by genre only; `None` yields generic popularity results
    pub fn by_genre(genre: Option<GenreId>) -> Self {
        Self {
            genre,
            ..Self::default()
        }
    }

    /// The fixed anime proxy: Animation genre with Japanese original language
    pub fn anime() -> Self {
        Self {
            genre: Some(GenreId(16)),
            original_language: Some("ja".to_string()),
        }
    }
}

/// Trait for the title metadata catalog
///
/// All list methods return raw entries; normalization into display records
/// happens in the services so each call site can supply the right default
/// media kind.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Multi-type search across movies, TV and people
    async fn search_multi(&self, query: &str) -> AppResult<Vec<ApiListItem>>;

    /// Movie-only title search
    async fn search_movies(&self, query: &str) -> AppResult<Vec<ApiListItem>>;

    /// Popularity-sorted discover query for one media kind
    async fn discover(&self, kind: MediaKind, filter: DiscoverFilter)
        -> AppResult<Vec<ApiListItem>>;

    /// Trending movies of the week
    async fn trending_movies(&self) -> AppResult<Vec<ApiListItem>>;

    /// Current popular movies
    async fn popular_movies(&self) -> AppResult<Vec<ApiListItem>>;

    /// Full detail payload with videos and similar titles attached
    async fn title_details(&self, kind: MediaKind, id: u64) -> AppResult<ApiTitleDetails>;
}

/// Trait for the language model
///
/// Methods mirror the prompts the application sends. Replies are free text
/// as the model produced them (trimmed); validating them against the mood
/// catalog is the caller's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LlmProvider: Send + Sync {
    /// Extract a single mood word from free-form input
    async fn extract_mood(&self, input: &str) -> AppResult<String>;

    /// Pick the catalog mood closest to an unrecognized candidate
    async fn closest_mood(&self, candidate: &str) -> AppResult<String>;

    /// Suggest popular movie titles for a feeling
    ///
    /// The model is asked for a JSON array; replies that fail to parse as
    /// one yield an empty list rather than an error.
    async fn suggest_titles(&self, feeling: &str) -> AppResult<Vec<String>>;

    /// Suggest a random mood for a movie night
    async fn suggest_mood(&self) -> AppResult<String>;
}
