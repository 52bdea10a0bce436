//! To-do tasks and AI prioritization payloads

use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Priority levels, most pressing first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskPriority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort rank: lower is more pressing.
    pub fn rank(&self) -> u8 {
        match self {
            Self::Urgent => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
        }
    }
}

impl_label_conversions!(TaskPriority {
    Urgent => "Urgent",
    High => "High",
    Medium => "Medium",
    Low => "Low",
});

/// A to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub priority: TaskPriority,
    pub completed: bool,
}

impl Task {
    /// The fields sent to the AI gateway for prioritization.
    pub fn draft(&self) -> TaskDraft {
        TaskDraft { description: self.description.clone(), deadline: self.deadline.clone() }
    }
}

/// Task fields without id, priority or completion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
}

/// One entry of the AI gateway's prioritization answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrioritizedTask {
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    pub priority: TaskPriority,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_priority_is_medium() {
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
    }

    #[test]
    fn ranks_follow_urgency() {
        assert!(TaskPriority::Urgent.rank() < TaskPriority::High.rank());
        assert!(TaskPriority::High.rank() < TaskPriority::Medium.rank());
        assert!(TaskPriority::Medium.rank() < TaskPriority::Low.rank());
    }

    #[test]
    fn prioritized_task_accepts_missing_deadline() {
        let parsed: PrioritizedTask =
            serde_json::from_str(r#"{"description":"Write report","priority":"Urgent"}"#).unwrap();
        assert_eq!(parsed.priority, TaskPriority::Urgent);
        assert_eq!(parsed.deadline, None);
    }
}
