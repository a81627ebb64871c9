use reqwest::Client as HttpClient;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::{
    config::Config,
    error::{AppError, AppResult},
};

/// API keys for the two upstream services
///
/// The remote keys endpoint serves them under uppercase names.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeys {
    #[serde(rename = "TMDB_API_KEY")]
    pub tmdb_api_key: String,
    #[serde(rename = "OPENAI_API_KEY")]
    pub openai_api_key: String,
}

enum KeySource {
    Inline(ApiKeys),
    Remote {
        http_client: HttpClient,
        keys_url: String,
    },
}

/// Lazily resolved upstream credentials
///
/// Keys come either inline from configuration or from a remote keys
/// endpoint. Remote keys are fetched on first use and memoized; concurrent
/// callers share a single in-flight fetch, and a failed fetch is retried
/// on the next call instead of poisoning the cell.
pub struct Credentials {
    source: KeySource,
    keys: OnceCell<ApiKeys>,
}

impl Credentials {
    /// Builds credentials with keys supplied directly
    pub fn inline(keys: ApiKeys) -> Self {
        Self {
            source: KeySource::Inline(keys),
            keys: OnceCell::new(),
        }
    }

    /// Builds credentials backed by a remote keys endpoint
    pub fn remote(keys_url: String) -> Self {
        Self {
            source: KeySource::Remote {
                http_client: HttpClient::new(),
                keys_url,
            },
            keys: OnceCell::new(),
        }
    }

    /// Chooses the key source from configuration
    ///
    /// Inline keys win when both are present; otherwise a keys URL is
    /// required.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match (&config.tmdb_api_key, &config.openai_api_key) {
            (Some(tmdb), Some(openai)) => Ok(Self::inline(ApiKeys {
                tmdb_api_key: tmdb.clone(),
                openai_api_key: openai.clone(),
            })),
            _ => match &config.keys_url {
                Some(url) => Ok(Self::remote(url.clone())),
                None => Err(anyhow::anyhow!(
                    "Set TMDB_API_KEY and OPENAI_API_KEY, or KEYS_URL"
                )),
            },
        }
    }

    /// Returns the keys, fetching and memoizing them on first use
    pub async fn get(&self) -> AppResult<&ApiKeys> {
        self.keys
            .get_or_try_init(|| async {
                match &self.source {
                    KeySource::Inline(keys) => Ok(keys.clone()),
                    KeySource::Remote {
                        http_client,
                        keys_url,
                    } => fetch_keys(http_client, keys_url).await,
                }
            })
            .await
    }
}

async fn fetch_keys(http_client: &HttpClient, keys_url: &str) -> AppResult<ApiKeys> {
    let response = http_client.get(keys_url).send().await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalApi(format!(
            "Keys endpoint returned status {}: {}",
            status, body
        )));
    }

    let keys: ApiKeys = response.json().await?;
    tracing::info!(keys_url = %keys_url, "API keys loaded");
    Ok(keys)
}
