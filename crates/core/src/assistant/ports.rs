//! Port interface for the generative-AI gateway
//!
//! Implementations build prompts and parse responses; they report failures
//! as errors and leave fallback values to [`super::AssistantService`].

use async_trait::async_trait;
use healthprod_domain::{
    Activity, AiPersonality, ChatMessage, DailyReport, KnowledgeCard, MealImage, PrioritizedTask,
    Result, TaskDraft,
};

/// Trait for the hosted AI model
#[async_trait]
pub trait AiGateway: Send + Sync {
    /// Markdown coaching insights over the given activities
    async fn generate_insights(&self, activities: &[Activity]) -> Result<String>;

    /// Structured end-of-day report
    async fn generate_daily_report(&self, activities: &[Activity]) -> Result<DailyReport>;

    /// Assign a priority to every task
    async fn prioritize_tasks(&self, tasks: &[TaskDraft]) -> Result<Vec<PrioritizedTask>>;

    /// A fresh knowledge card
    async fn daily_knowledge_card(&self) -> Result<KnowledgeCard>;

    /// Calorie and macro estimate for a meal photo
    async fn analyze_meal(&self, image: &MealImage) -> Result<String>;

    /// Next assistant reply in a conversation
    async fn chat(
        &self,
        personality: AiPersonality,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String>;
}
