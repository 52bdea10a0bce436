//! Gateway used when no AI credentials are configured.

use async_trait::async_trait;
use healthprod_core::AiGateway;
use healthprod_domain::{
    Activity, AiPersonality, ChatMessage, DailyReport, HealthProdError, KnowledgeCard, MealImage,
    PrioritizedTask, Result, TaskDraft,
};

/// Fails every request, so the assistant's fallbacks apply.
#[derive(Debug, Clone)]
pub struct UnconfiguredGateway {
    reason: String,
}

impl UnconfiguredGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    fn refuse<T>(&self) -> Result<T> {
        Err(HealthProdError::Config(self.reason.clone()))
    }
}

#[async_trait]
impl AiGateway for UnconfiguredGateway {
    async fn generate_insights(&self, _activities: &[Activity]) -> Result<String> {
        self.refuse()
    }

    async fn generate_daily_report(&self, _activities: &[Activity]) -> Result<DailyReport> {
        self.refuse()
    }

    async fn prioritize_tasks(&self, _tasks: &[TaskDraft]) -> Result<Vec<PrioritizedTask>> {
        self.refuse()
    }

    async fn daily_knowledge_card(&self) -> Result<KnowledgeCard> {
        self.refuse()
    }

    async fn analyze_meal(&self, _image: &MealImage) -> Result<String> {
        self.refuse()
    }

    async fn chat(
        &self,
        _personality: AiPersonality,
        _history: &[ChatMessage],
        _message: &str,
    ) -> Result<String> {
        self.refuse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn refuses_with_config_error() {
        let gateway = UnconfiguredGateway::new("GEMINI_API_KEY is not set");
        let err = gateway.daily_knowledge_card().await.unwrap_err();
        assert_eq!(err, HealthProdError::Config("GEMINI_API_KEY is not set".into()));
    }
}
