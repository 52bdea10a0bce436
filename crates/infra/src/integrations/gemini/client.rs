/// Gemini API client implementing the assistant's AI gateway
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use healthprod_core::AiGateway;
use healthprod_domain::constants::{DEFAULT_AI_API_URL, DEFAULT_AI_MODEL};
use healthprod_domain::{
    Activity, AiConfig, AiPersonality, ChatMessage, ChatRole, DailyReport, KnowledgeCard,
    MealImage, PrioritizedTask, Result, TaskDraft,
};
use reqwest::header::RETRY_AFTER;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::prompts;
use super::types::{
    Content, ErrorEnvelope, GeminiError, GenerateContentRequest, GenerateContentResponse, Part,
};
use crate::http::HttpClient;

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Gemini `generateContent` client
pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    api_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self {
            http_client,
            api_key,
            model: DEFAULT_AI_MODEL.to_string(),
            api_url: DEFAULT_AI_API_URL.to_string(),
        }
    }

    /// Build a client from the `[ai]` configuration section.
    ///
    /// # Errors
    /// `MissingApiKey` when no non-blank key is configured.
    pub fn from_config(config: &AiConfig) -> std::result::Result<Self, GeminiError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(GeminiError::MissingApiKey)?;

        let http_client = HttpClient::from_ai_config(config)
            .map_err(|err| GeminiError::Network(err.to_string()))?;

        Ok(Self::new(api_key.to_string(), http_client)
            .with_model(config.model.clone())
            .with_api_url(config.api_url.clone()))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Point at a different API root (proxies, tests).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.api_url, self.model)
    }

    /// Markdown coaching notes over the given activities.
    pub async fn lifestyle_insights(
        &self,
        activities: &[Activity],
    ) -> std::result::Result<String, GeminiError> {
        info!(activity_count = activities.len(), "Requesting lifestyle insights");
        self.generate(GenerateContentRequest::prompt(prompts::insights(activities))).await
    }

    pub async fn end_of_day_report(
        &self,
        activities: &[Activity],
    ) -> std::result::Result<DailyReport, GeminiError> {
        info!(activity_count = activities.len(), "Requesting daily report");
        self.generate_json(prompts::daily_report(activities), prompts::daily_report_schema())
            .await
    }

    pub async fn assign_priorities(
        &self,
        tasks: &[TaskDraft],
    ) -> std::result::Result<Vec<PrioritizedTask>, GeminiError> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        info!(task_count = tasks.len(), "Requesting task prioritization");
        self.generate_json(prompts::prioritize(tasks), prompts::prioritize_schema()).await
    }

    pub async fn knowledge_card(&self) -> std::result::Result<KnowledgeCard, GeminiError> {
        debug!("Requesting knowledge card");
        self.generate_json(prompts::KNOWLEDGE_CARD_PROMPT, prompts::knowledge_card_schema()).await
    }

    /// Send the photo inline, followed by the analysis prompt.
    pub async fn meal_analysis(
        &self,
        image: &MealImage,
    ) -> std::result::Result<String, GeminiError> {
        info!(mime_type = %image.mime_type, bytes = image.bytes.len(), "Requesting meal analysis");
        let parts = vec![
            Part::inline(image.mime_type.clone(), BASE64.encode(&image.bytes)),
            Part::text(prompts::MEAL_PROMPT),
        ];
        self.generate(GenerateContentRequest {
            contents: vec![Content::user(parts)],
            system_instruction: None,
            generation_config: None,
        })
        .await
    }

    /// Continue a conversation.
    ///
    /// Leading model turns (the local greeting) are not sent; the API expects
    /// the history to open with a user turn.
    pub async fn reply(
        &self,
        personality: AiPersonality,
        history: &[ChatMessage],
        message: &str,
    ) -> std::result::Result<String, GeminiError> {
        let mut contents: Vec<Content> = history
            .iter()
            .skip_while(|m| m.role == ChatRole::Model)
            .map(|m| match m.role {
                ChatRole::User => Content::user(vec![Part::text(m.text.clone())]),
                ChatRole::Model => Content::model(vec![Part::text(m.text.clone())]),
            })
            .collect();
        contents.push(Content::user(vec![Part::text(message)]));

        debug!(personality = %personality, turns = contents.len(), "Sending chat message");
        self.generate(GenerateContentRequest {
            contents,
            system_instruction: Some(Content::instruction(personality.system_instruction())),
            generation_config: None,
        })
        .await
    }

    async fn generate_json<T: DeserializeOwned>(
        &self,
        prompt: impl Into<String>,
        schema: Value,
    ) -> std::result::Result<T, GeminiError> {
        let text =
            self.generate(GenerateContentRequest::prompt(prompt).with_json_schema(schema)).await?;
        let cleaned = strip_json_fence(&text);
        serde_json::from_str(cleaned).map_err(|e| {
            GeminiError::InvalidSchema(format!(
                "Failed to parse model output: {e}. Content: {cleaned}"
            ))
        })
    }

    /// Call `generateContent` and return the first candidate's text.
    async fn generate(
        &self,
        request: GenerateContentRequest,
    ) -> std::result::Result<String, GeminiError> {
        let builder = self
            .http_client
            .request(Method::POST, self.endpoint())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request);

        let response = self
            .http_client
            .send(builder)
            .await
            .map_err(|err| GeminiError::Network(err.to_string()))?;

        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "Received Gemini response");

        if !status.is_success() {
            return Err(handle_error_status(response).await);
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidSchema(format!("Failed to parse response: {e}")))?;

        body.text().ok_or_else(|| {
            let reason = body
                .candidates
                .first()
                .and_then(|c| c.finish_reason.clone())
                .unwrap_or_else(|| "no candidates".to_string());
            warn!(%reason, "Gemini returned no text");
            GeminiError::InvalidSchema(format!("Response contained no text ({reason})"))
        })
    }
}

async fn handle_error_status(response: reqwest::Response) -> GeminiError {
    let status = response.status().as_u16();
    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let raw = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
    let message = match serde_json::from_str::<ErrorEnvelope>(&raw) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => raw,
    };

    match status {
        401 | 403 => GeminiError::Authentication(format!("Invalid API key ({status})")),
        429 => GeminiError::RateLimit(retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS)),
        _ => GeminiError::Api { status, message },
    }
}

/// Remove a surrounding ```` ```json ```` fence, if present.
pub fn strip_json_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[async_trait]
impl AiGateway for GeminiClient {
    async fn generate_insights(&self, activities: &[Activity]) -> Result<String> {
        Ok(self.lifestyle_insights(activities).await?)
    }

    async fn generate_daily_report(&self, activities: &[Activity]) -> Result<DailyReport> {
        Ok(self.end_of_day_report(activities).await?)
    }

    async fn prioritize_tasks(&self, tasks: &[TaskDraft]) -> Result<Vec<PrioritizedTask>> {
        Ok(self.assign_priorities(tasks).await?)
    }

    async fn daily_knowledge_card(&self) -> Result<KnowledgeCard> {
        Ok(self.knowledge_card().await?)
    }

    async fn analyze_meal(&self, image: &MealImage) -> Result<String> {
        Ok(self.meal_analysis(image).await?)
    }

    async fn chat(
        &self,
        personality: AiPersonality,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String> {
        Ok(self.reply(personality, history, message).await?)
    }
}
