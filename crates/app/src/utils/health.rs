//! Health reporting for AppContext components
//!
//! Each component reports healthy/unhealthy; the overall status is the share
//! of healthy components against an 80% threshold.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Share of healthy components required for an overall healthy status.
pub const HEALTHY_THRESHOLD: f64 = 0.8;

/// Overall health status of the application
///
/// # Example
/// ```
/// use healthprod_app::utils::health::{ComponentHealth, HealthStatus};
///
/// let mut status = HealthStatus::new()
///     .add_component(ComponentHealth::healthy("storage"))
///     .add_component(ComponentHealth::unhealthy("ai_gateway", "no API key"));
/// status.calculate_score();
///
/// assert_eq!(status.score, 0.5);
/// assert!(!status.is_healthy);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub is_healthy: bool,

    /// 0.0 (nothing healthy) to 1.0 (everything healthy)
    pub score: f64,

    pub message: Option<String>,

    pub components: Vec<ComponentHealth>,

    /// Unix timestamp of the check
    pub timestamp: i64,
}

impl HealthStatus {
    /// Healthy with score 1.0 and no components
    pub fn new() -> Self {
        Self {
            is_healthy: true,
            score: 1.0,
            message: None,
            components: Vec::new(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn add_component(mut self, component: ComponentHealth) -> Self {
        self.components.push(component);
        self
    }

    /// Recompute `score` and `is_healthy` from the components.
    ///
    /// Should be called after all components have been added.
    pub fn calculate_score(&mut self) {
        if self.components.is_empty() {
            return;
        }

        let healthy_count = self.components.iter().filter(|c| c.is_healthy).count();

        self.score = healthy_count as f64 / self.components.len() as f64;
        self.is_healthy = self.score >= HEALTHY_THRESHOLD;
        if !self.is_healthy {
            let failing: Vec<&str> = self
                .components
                .iter()
                .filter(|c| !c.is_healthy)
                .map(|c| c.name.as_str())
                .collect();
            self.message = Some(format!("Degraded: {}", failing.join(", ")));
        }
    }

    /// One line per component, for the terminal.
    pub fn render(&self) -> String {
        let mut out = format!(
            "{} (score {:.2})",
            if self.is_healthy { "healthy" } else { "degraded" },
            self.score
        );
        for component in &self.components {
            out.push_str(&format!(
                "\n  {:<16} {}",
                component.name,
                match (component.is_healthy, &component.message) {
                    (true, _) => "ok".to_string(),
                    (false, Some(message)) => format!("FAIL: {message}"),
                    (false, None) => "FAIL".to_string(),
                }
            ));
        }
        out
    }
}

impl Default for HealthStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Health status of an individual component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentHealth {
    /// Component identifier (e.g., "storage", "reminder_scheduler")
    pub name: String,

    pub is_healthy: bool,

    /// Optional message describing health state or error
    pub message: Option<String>,
}

impl ComponentHealth {
    pub fn healthy(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: None }
    }

    /// Healthy, with a note (e.g. a feature disabled by configuration).
    pub fn healthy_with(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: true, message: Some(message.into()) }
    }

    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self { name: name.into(), is_healthy: false, message: Some(message.into()) }
    }
}
