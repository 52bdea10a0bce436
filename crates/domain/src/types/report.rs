//! AI-generated content: daily reports and knowledge cards

use serde::{Deserialize, Deserializer, Serialize};

use crate::impl_label_conversions;

/// End-of-day report produced by the AI gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    /// 0-100; out-of-range values from the gateway are clamped.
    #[serde(deserialize_with = "deserialize_score")]
    pub productivity_score: u8,
    pub summary: String,
    pub recommendations: String,
    pub next_day_todo_list: Vec<String>,
}

impl DailyReport {
    /// Placeholder returned when there is nothing to report on.
    pub fn empty_day() -> Self {
        Self {
            productivity_score: 0,
            summary: "No activities logged for today.".to_string(),
            recommendations: "Log some activities to get a report.".to_string(),
            next_day_todo_list: vec!["Log your first activity!".to_string()],
        }
    }

    /// Placeholder returned when the gateway call failed.
    pub fn unavailable() -> Self {
        Self {
            productivity_score: 0,
            summary: "Could not generate report.".to_string(),
            recommendations: "There was an error communicating with the AI. Please check your \
                              connection and try again."
                .to_string(),
            next_day_todo_list: vec!["Try generating the report again later.".to_string()],
        }
    }
}

/// The gateway returns a JSON number which may be fractional or out of range.
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() {
        return Err(serde::de::Error::custom("productivity score must be finite"));
    }
    Ok(raw.round().clamp(0.0, 100.0) as u8)
}

/// Knowledge feed category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnowledgeCategory {
    #[serde(rename = "Productivity Hack")]
    ProductivityHack,
    #[serde(rename = "Fun Fact")]
    FunFact,
    Quote,
    Challenge,
}

impl_label_conversions!(KnowledgeCategory {
    ProductivityHack => "Productivity Hack",
    FunFact => "Fun Fact",
    Quote => "Quote",
    Challenge => "Challenge",
});

/// A bite-sized daily tip, fact, quote or challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeCard {
    pub title: String,
    pub content: String,
    pub category: KnowledgeCategory,
}

impl KnowledgeCard {
    /// Card shown when the gateway could not produce one.
    pub fn fallback() -> Self {
        Self {
            title: "Quick Tip".to_string(),
            content: "Stay hydrated! Drinking enough water can significantly boost your focus \
                      and energy levels throughout the day."
                .to_string(),
            category: KnowledgeCategory::ProductivityHack,
        }
    }
}
