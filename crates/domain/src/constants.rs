//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Voice control
pub const WAKE_PHRASE: &str = "hey ai";

// Analytics
pub const MAX_STREAK_DAYS: u32 = 365;
pub const WEEK_DAYS: usize = 7;

// Rewards economy
pub const STARTING_COINS: u32 = 150;
pub const COINS_PER_ACTIVITY: u32 = 10;

// Reminders
pub const REMINDER_POLL_INTERVAL_SECS: u64 = 30;
pub const REMINDER_NOTIFICATION_TITLE: &str = "HealthProd Reminder";

// Focus timer
pub const FOCUS_SESSION_SECS: u32 = 25 * 60;
pub const BREAK_SESSION_SECS: u32 = 5 * 60;
pub const FOCUS_NOTIFICATION_TITLE: &str = "HealthProd Focus Timer";

// Knowledge card cache keys
pub const KNOWLEDGE_CARD_KEY: &str = "healthprod-daily-card";
pub const KNOWLEDGE_CARD_DATE_KEY: &str = "healthprod-card-date";
pub const CARD_DATE_FORMAT: &str = "%Y-%m-%d";

// AI gateway
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AI_API_URL: &str = "https://generativelanguage.googleapis.com";
