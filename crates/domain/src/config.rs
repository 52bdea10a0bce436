//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    COINS_PER_ACTIVITY, DEFAULT_AI_API_URL, DEFAULT_AI_MODEL, REMINDER_POLL_INTERVAL_SECS,
    STARTING_COINS, WAKE_PHRASE,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ai: AiConfig,
    pub storage: StorageConfig,
    pub reminders: ReminderConfig,
    pub voice: VoiceConfig,
    pub rewards: RewardsConfig,
}

/// AI gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// When false every AI-backed operation short-circuits.
    pub online: bool,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_AI_MODEL.to_string(),
            api_url: DEFAULT_AI_API_URL.to_string(),
            timeout_secs: 30,
            max_retries: 2,
            online: true,
        }
    }
}

/// Key-value store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: "healthprod.db".to_string(), pool_size: 4 }
    }
}

/// Reminder polling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderConfig {
    pub poll_interval_secs: u64,
    pub enabled: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self { poll_interval_secs: REMINDER_POLL_INTERVAL_SECS, enabled: true }
    }
}

/// Voice control configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub wake_phrase: String,
    pub enabled: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self { wake_phrase: WAKE_PHRASE.to_string(), enabled: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardsConfig {
    pub starting_coins: u32,
    pub coins_per_activity: u32,
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self { starting_coins: STARTING_COINS, coins_per_activity: COINS_PER_ACTIVITY }
    }
}
