use std::sync::Arc;

use crate::{models::Mood, services::providers::LlmProvider};

/// Resolves free-form input to a mood
///
/// Total: every input resolves to some catalog mood. Exact label input
/// costs no remote calls; otherwise the language model extracts a
/// candidate, an unrecognized candidate gets one closest-match round, and
/// anything that still fails lands on a uniformly random mood. At most two
/// LLM requests per resolution, no retries.
pub async fn resolve_mood(llm: Arc<dyn LlmProvider>, input: &str) -> Mood {
    let input = input.trim();

    if let Some(mood) = Mood::from_label(input) {
        return mood;
    }

    match resolve_via_llm(llm, input).await {
        Some(mood) => mood,
        None => {
            let mood = Mood::random(&mut rand::thread_rng());
            tracing::warn!(input = %input, fallback = %mood, "Mood resolution fell back to random");
            mood
        }
    }
}

async fn resolve_via_llm(llm: Arc<dyn LlmProvider>, input: &str) -> Option<Mood> {
    let candidate = match llm.extract_mood(input).await {
        Ok(candidate) => candidate,
        Err(e) => {
            tracing::warn!(error = %e, "Mood extraction failed");
            return None;
        }
    };

    if let Some(mood) = Mood::from_label(candidate.trim()) {
        return Some(mood);
    }

    match llm.closest_mood(candidate.trim()).await {
        Ok(best) => Mood::from_label(best.trim()),
        Err(e) => {
            tracing::warn!(error = %e, "Closest-mood lookup failed");
            None
        }
    }
}

/// Asks the model to suggest a mood, falling back to random
///
/// Unknown labels and transport failures both fall back, so the suggestion
/// is always a valid catalog mood.
pub async fn suggest_mood(llm: Arc<dyn LlmProvider>) -> Mood {
    match llm.suggest_mood().await {
        Ok(reply) => match Mood::from_label(reply.trim()) {
            Some(mood) => mood,
            None => {
                tracing::warn!(reply = %reply, "Suggested mood not in catalog, using random");
                Mood::random(&mut rand::thread_rng())
            }
        },
        Err(e) => {
            tracing::warn!(error = %e, "Mood suggestion failed, using random");
            Mood::random(&mut rand::thread_rng())
        }
    }
}
