//! Assistant service - converts every gateway failure into a safe value

use std::sync::Arc;

use healthprod_domain::{
    Activity, AiPersonality, ChatMessage, DailyReport, KnowledgeCard, MealImage, Task,
    TaskDraft, TaskPriority,
};
use tracing::{debug, warn};

use super::ports::AiGateway;

pub const INSIGHTS_EMPTY: &str = "Log some activities to get your first personalized insights!";
pub const INSIGHTS_FALLBACK: &str =
    "Sorry, I couldn't analyze your habits right now. Please try again later.";
pub const MEAL_FALLBACK: &str =
    "Sorry, I couldn't analyze your meal image. Please ensure it's a clear photo and try again.";
pub const CHAT_FALLBACK: &str =
    "I'm having a little trouble connecting right now. Let's try again in a moment.";

/// Front door to the AI gateway. None of its operations fail.
#[derive(Clone)]
pub struct AssistantService {
    gateway: Arc<dyn AiGateway>,
}

impl AssistantService {
    pub fn new(gateway: Arc<dyn AiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn insights(&self, activities: &[Activity]) -> String {
        if activities.is_empty() {
            return INSIGHTS_EMPTY.to_string();
        }
        match self.gateway.generate_insights(activities).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, "Insights generation failed, using fallback");
                INSIGHTS_FALLBACK.to_string()
            }
        }
    }

    /// End-of-day report. An empty day yields a placeholder without a call.
    pub async fn daily_report(&self, activities: &[Activity]) -> DailyReport {
        if activities.is_empty() {
            debug!("No activities to report on");
            return DailyReport::empty_day();
        }
        match self.gateway.generate_daily_report(activities).await {
            Ok(report) => report,
            Err(err) => {
                warn!(error = %err, "Daily report generation failed, using fallback");
                DailyReport::unavailable()
            }
        }
    }

    /// Reprioritize open tasks; completed tasks are kept after them untouched.
    ///
    /// Every open task survives with its id. Its priority comes from the
    /// gateway entry with the same description, or Medium when the gateway
    /// omitted it or failed.
    pub async fn prioritize(&self, tasks: &[Task]) -> Vec<Task> {
        let (open, completed): (Vec<&Task>, Vec<&Task>) = tasks.iter().partition(|t| !t.completed);
        if open.is_empty() {
            return tasks.to_vec();
        }

        let drafts: Vec<TaskDraft> = open.iter().map(|t| t.draft()).collect();
        let ranked = match self.gateway.prioritize_tasks(&drafts).await {
            Ok(ranked) => ranked,
            Err(err) => {
                warn!(
                    error = %err,
                    tasks = open.len(),
                    "Task prioritization failed, defaulting to Medium"
                );
                Vec::new()
            }
        };

        let mut result: Vec<Task> = open
            .into_iter()
            .map(|task| {
                let priority = ranked
                    .iter()
                    .find(|p| p.description.trim().eq_ignore_ascii_case(task.description.trim()))
                    .map_or(TaskPriority::Medium, |p| p.priority);
                Task { priority, completed: false, ..task.clone() }
            })
            .collect();
        result.extend(completed.into_iter().cloned());
        result
    }

    pub async fn knowledge_card(&self) -> KnowledgeCard {
        match self.gateway.daily_knowledge_card().await {
            Ok(card) => card,
            Err(err) => {
                warn!(error = %err, "Knowledge card generation failed, using fallback");
                KnowledgeCard::fallback()
            }
        }
    }

    pub async fn analyze_meal(&self, image: &MealImage) -> String {
        match self.gateway.analyze_meal(image).await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, mime_type = %image.mime_type, "Meal analysis failed");
                MEAL_FALLBACK.to_string()
            }
        }
    }

    pub async fn chat(
        &self,
        personality: AiPersonality,
        history: &[ChatMessage],
        message: &str,
    ) -> String {
        match self.gateway.chat(personality, history, message).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(error = %err, personality = %personality, "Chat request failed");
                CHAT_FALLBACK.to_string()
            }
        }
    }
}
