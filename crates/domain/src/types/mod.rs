//! Domain data types

pub mod activity;
pub mod app;
pub mod chat;
pub mod reminder;
pub mod report;
pub mod rewards;
pub mod task;

pub use activity::{Activity, ActivityType, Attachment, NewActivity};
pub use app::{Capabilities, NotificationPermission, Page};
pub use chat::{AiPersonality, ChatMessage, ChatRole, MealImage};
pub use reminder::{Reminder, TimeOfDay};
pub use report::{DailyReport, KnowledgeCard, KnowledgeCategory};
pub use rewards::{
    starter_challenges, starter_friends, starter_rewards, Challenge, Friend, LeaderboardEntry,
    Reward, RewardKind,
};
pub use task::{PrioritizedTask, Task, TaskDraft, TaskPriority};
