//! Stub AI gateway

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use healthprod_core::assistant::AiGateway;
use healthprod_domain::{
    Activity, AiPersonality, ChatMessage, DailyReport, HealthProdError, KnowledgeCard, MealImage,
    PrioritizedTask, Result as DomainResult, TaskDraft,
};

/// Gateway answering knowledge-card requests with a fixed card (or an
/// error) and failing everything else.
#[derive(Default, Clone)]
pub struct StubGateway {
    card: Option<KnowledgeCard>,
    calls: Arc<AtomicUsize>,
}

impl StubGateway {
    pub fn with_card(card: KnowledgeCard) -> Self {
        Self { card: Some(card), ..Self::default() }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn unstubbed<T>(&self) -> DomainResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(HealthProdError::Ai("not stubbed".into()))
    }
}

#[async_trait]
impl AiGateway for StubGateway {
    async fn generate_insights(&self, _activities: &[Activity]) -> DomainResult<String> {
        self.unstubbed()
    }

    async fn generate_daily_report(&self, _activities: &[Activity]) -> DomainResult<DailyReport> {
        self.unstubbed()
    }

    async fn prioritize_tasks(&self, _tasks: &[TaskDraft]) -> DomainResult<Vec<PrioritizedTask>> {
        self.unstubbed()
    }

    async fn daily_knowledge_card(&self) -> DomainResult<KnowledgeCard> {
        match &self.card {
            Some(card) => {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Ok(card.clone())
            }
            None => self.unstubbed(),
        }
    }

    async fn analyze_meal(&self, _image: &MealImage) -> DomainResult<String> {
        self.unstubbed()
    }

    async fn chat(
        &self,
        _personality: AiPersonality,
        _history: &[ChatMessage],
        _message: &str,
    ) -> DomainResult<String> {
        self.unstubbed()
    }
}
