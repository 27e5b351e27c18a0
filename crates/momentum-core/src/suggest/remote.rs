//! Remote model-backed suggester.
//!
//! Calls an OpenAI-compatible chat-completions endpoint and maps the JSON
//! reply onto tracker categories. Any failure here is recoverable: the
//! engine falls back to the heuristic.

use indoc::formatdoc;
use reqwest::Client;
use serde::Deserialize;

use super::{SuggestionContext, SuggestionKind, Suggester, TaskSuggestion};
use crate::error::SuggestError;
use crate::storage::SuggestionsConfig;

const SYSTEM_PROMPT: &str = "You are a productivity assistant that suggests personalized \
    tasks and goals. Respond in JSON format with an array of suggestions, each containing \
    title, category (matching existing categories), type (action/goal), and optional \
    target/deadline.";

/// Chat-completions client.
pub struct RemoteSuggester {
    http: Client,
    api_base: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Raw suggestion as the model emits it: category by display name.
#[derive(Debug, Deserialize)]
struct RawSuggestion {
    title: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(rename = "type")]
    kind: SuggestionKind,
    #[serde(default)]
    target: Option<u32>,
    #[serde(default)]
    deadline: Option<chrono::DateTime<chrono::Utc>>,
}

impl RemoteSuggester {
    pub fn new(api_base: &str, api_key: &str, model: &str) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Build from configuration; None without an API key.
    pub fn from_config(config: &SuggestionsConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(&config.api_base, key, &config.model))
    }

    fn prompt(ctx: &SuggestionContext<'_>) -> String {
        let categories = ctx
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let recent = ctx
            .recent_actions
            .iter()
            .take(5)
            .map(|a| a.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let goals = ctx
            .goals
            .iter()
            .map(|g| g.title.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        formatdoc! {"
            Analyze these recent activities and goals to suggest 3 new personalized tasks or goals.

            Current categories: {categories}
            Recent actions: {recent}
            Current goals: {goals}
            Time of day: {time}

            Consider:
            1. Time of day appropriateness
            2. User's activity patterns
            3. Balance between categories
            4. Progressive difficulty
            5. Realistic deadlines",
            time = ctx.now.format("%H:%M"),
        }
    }

    fn block_on<F: std::future::Future>(fut: F) -> Result<F::Output, SuggestError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SuggestError::Runtime)?;
        Ok(rt.block_on(fut))
    }

    async fn complete(&self, ctx: &SuggestionContext<'_>) -> Result<Vec<TaskSuggestion>, SuggestError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": Self::prompt(ctx) },
            ],
            "temperature": 0.7,
            "max_tokens": 500,
        });

        let resp = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatReply = resp.json().await?;
        let content = reply
            .choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .unwrap_or("[]");

        let raw: Vec<RawSuggestion> = serde_json::from_str(content)
            .map_err(|e| SuggestError::MalformedReply(e.to_string()))?;

        Ok(raw
            .into_iter()
            .map(|s| resolve_category(s, ctx))
            .collect())
    }
}

/// Map the model's category name back onto a known category id; unknown
/// names land in the first category.
fn resolve_category(raw: RawSuggestion, ctx: &SuggestionContext<'_>) -> TaskSuggestion {
    let category = raw
        .category
        .as_deref()
        .and_then(|name| {
            ctx.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(name))
        })
        .or_else(|| ctx.categories.first())
        .map(|c| c.id.clone())
        .unwrap_or_default();

    TaskSuggestion {
        title: raw.title,
        category,
        kind: raw.kind,
        target: raw.target,
        deadline: raw.deadline,
    }
}

impl Suggester for RemoteSuggester {
    fn suggest(&self, ctx: &SuggestionContext<'_>) -> Result<Vec<TaskSuggestion>, SuggestError> {
        Self::block_on(self.complete(ctx))?
    }
}
