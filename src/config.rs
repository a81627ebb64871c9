use serde::Deserialize;

/// Application configuration loaded from environment variables
///
/// API keys may be supplied inline (`TMDB_API_KEY` / `OPENAI_API_KEY`) or
/// deferred to a remote keys endpoint (`KEYS_URL`). See [`crate::credentials`].
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key (inline)
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// OpenAI API key (inline)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// Remote endpoint serving both keys as JSON
    #[serde(default)]
    pub keys_url: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// OpenAI API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for mood and title suggestions
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_openai_model() -> String {
    "gpt-4-turbo".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
