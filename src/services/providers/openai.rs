/// OpenAI chat-completions provider
///
/// Every prompt is a single user message. The mood prompts pin the sampling
/// temperature so replies stay close to the catalog labels; the title
/// suggestion prompt asks for a JSON array and tolerates models that wrap
/// it in a Markdown code fence.
use std::sync::Arc;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    credentials::Credentials,
    error::{AppError, AppResult},
    models::Mood,
    services::providers::LlmProvider,
};

const MOOD_TEMPERATURE: f32 = 0.7;

#[derive(Clone)]
pub struct OpenAiProvider {
    http_client: HttpClient,
    credentials: Arc<Credentials>,
    api_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiProvider {
    pub fn new(credentials: Arc<Credentials>, api_url: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            credentials,
            api_url,
            model,
        }
    }

    /// Sends one user message and returns the first choice's text, trimmed
    async fn complete(&self, prompt: &str, temperature: Option<f32>) -> AppResult<String> {
        let keys = self.credentials.get().await?;
        let url = format!("{}/v1/chat/completions", self.api_url);

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&keys.openai_api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatResponse = response.json().await?;
        completion
            .choices
            .first()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| AppError::ExternalApi("OpenAI response contained no choices".to_string()))
    }
}

/// Strips an optional Markdown code fence around a reply
fn strip_code_fences(reply: &str) -> &str {
    reply
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

/// Parses a reply as a JSON array of titles, `None` if it is anything else
fn parse_title_array(reply: &str) -> Option<Vec<String>> {
    serde_json::from_str(strip_code_fences(reply)).ok()
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    async fn extract_mood(&self, input: &str) -> AppResult<String> {
        let prompt = format!(
            "Extract the mood from this input: \"{}\". Return only a single mood word.",
            input
        );
        self.complete(&prompt, Some(MOOD_TEMPERATURE)).await
    }

    async fn closest_mood(&self, candidate: &str) -> AppResult<String> {
        let labels = Mood::ALL.map(|mood| mood.label()).join(", ");
        let prompt = format!(
            "Given the available moods: {}. Which one is the closest match to \"{}\"? Return only the best matching mood.",
            labels, candidate
        );
        self.complete(&prompt, Some(MOOD_TEMPERATURE)).await
    }

    async fn suggest_titles(&self, feeling: &str) -> AppResult<Vec<String>> {
        let prompt = format!(
            "Suggest five popular movies for someone feeling \"{}\". Return as a JSON array.",
            feeling
        );
        let reply = self.complete(&prompt, None).await?;

        match parse_title_array(&reply) {
            Some(titles) => {
                tracing::info!(
                    feeling = %feeling,
                    titles = titles.len(),
                    provider = "openai",
                    "Title suggestions parsed"
                );
                Ok(titles)
            }
            None => {
                tracing::warn!(
                    reply = %reply,
                    provider = "openai",
                    "Title suggestions were not a JSON string array"
                );
                Ok(Vec::new())
            }
        }
    }

    async fn suggest_mood(&self) -> AppResult<String> {
        self.complete(
            "Suggest a random mood for a movie night.",
            Some(MOOD_TEMPERATURE),
        )
        .await
    }
}
