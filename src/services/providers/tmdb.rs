/// TMDB metadata provider
///
/// One thin client over the TMDB v3 REST API. Authentication is an
/// `api_key` query parameter resolved through [`Credentials`], so the
/// first request may trigger the one-time key fetch.
use std::sync::Arc;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    credentials::Credentials,
    error::{AppError, AppResult},
    models::{ApiListItem, ApiListPage, ApiTitleDetails, MediaKind},
    services::providers::{DiscoverFilter, MetadataProvider},
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    credentials: Arc<Credentials>,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(credentials: Arc<Credentials>, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            credentials,
            api_url,
        }
    }

    /// Issues a GET with the API key attached and decodes the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let keys = self.credentials.get().await?;
        let url = format!("{}{}", self.api_url, path);

        let mut query: Vec<(&str, String)> = vec![("api_key", keys.tmdb_api_key.clone())];
        query.extend_from_slice(params);

        let response = self.http_client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }
}

/// Query parameters for a discover request
fn discover_params(filter: &DiscoverFilter) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("language", "en-US".to_string()),
        ("sort_by", "popularity.desc".to_string()),
    ];

    if let Some(genre) = filter.genre {
        params.push(("with_genres", genre.to_string()));
    }
    if let Some(language) = &filter.original_language {
        params.push(("with_original_language", language.clone()));
    }

    params
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_multi(&self, query: &str) -> AppResult<Vec<ApiListItem>> {
        let page: ApiListPage = self
            .get_json("/search/multi", &[("query", query.to_string())])
            .await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            provider = "tmdb",
            "Multi search completed"
        );

        Ok(page.results)
    }

    async fn search_movies(&self, query: &str) -> AppResult<Vec<ApiListItem>> {
        let page: ApiListPage = self
            .get_json("/search/movie", &[("query", query.to_string())])
            .await?;

        tracing::info!(
            query = %query,
            results = page.results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(page.results)
    }

    async fn discover(
        &self,
        kind: MediaKind,
        filter: DiscoverFilter,
    ) -> AppResult<Vec<ApiListItem>> {
        let path = format!("/discover/{}", kind.as_str());
        let page: ApiListPage = self.get_json(&path, &discover_params(&filter)).await?;

        tracing::info!(
            kind = %kind,
            genre = ?filter.genre,
            results = page.results.len(),
            provider = "tmdb",
            "Discover completed"
        );

        Ok(page.results)
    }

    async fn trending_movies(&self) -> AppResult<Vec<ApiListItem>> {
        let page: ApiListPage = self.get_json("/trending/movie/week", &[]).await?;

        tracing::info!(
            results = page.results.len(),
            provider = "tmdb",
            "Trending fetched"
        );

        Ok(page.results)
    }

    async fn popular_movies(&self) -> AppResult<Vec<ApiListItem>> {
        let page: ApiListPage = self
            .get_json(
                "/movie/popular",
                &[
                    ("language", "en-US".to_string()),
                    ("page", "1".to_string()),
                ],
            )
            .await?;

        tracing::info!(
            results = page.results.len(),
            provider = "tmdb",
            "Popular movies fetched"
        );

        Ok(page.results)
    }

    async fn title_details(&self, kind: MediaKind, id: u64) -> AppResult<ApiTitleDetails> {
        let path = format!("/{}/{}", kind.as_str(), id);
        let details: ApiTitleDetails = self
            .get_json(
                &path,
                &[("append_to_response", "videos,similar".to_string())],
            )
            .await?;

        tracing::info!(
            kind = %kind,
            id = id,
            provider = "tmdb",
            "Title details fetched"
        );

        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GenreId;

    #[test]
    fn test_discover_params_without_genre() {
        let params = discover_params(&DiscoverFilter::by_genre(None));
        assert_eq!(
            params,
            vec![
                ("language", "en-US".to_string()),
                ("sort_by", "popularity.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_discover_params_with_genre() {
        let params = discover_params(&DiscoverFilter::by_genre(Some(GenreId(28))));
        assert!(params.contains(&("with_genres", "28".to_string())));
        assert!(!params.iter().any(|(name, _)| *name == "with_original_language"));
    }

    #[test]
    fn test_discover_params_anime_proxy() {
        let params = discover_params(&DiscoverFilter::anime());
        assert!(params.contains(&("with_genres", "16".to_string())));
        assert!(params.contains(&("with_original_language", "ja".to_string())));
        assert!(params.contains(&("sort_by", "popularity.desc".to_string())));
    }
}
