//! # HealthProd Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - Gemini client implementing the AI gateway
//! - HTTP client with retry and backoff
//! - SQLite key-value store for the knowledge card cache
//! - Configuration loading (environment, JSON, TOML)
//! - Reminder scheduler
//!
//! ## Architecture
//! - Implements traits defined in `healthprod-core`
//! - Contains all "impure" code (network, disk, timers)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;
pub mod scheduling;

// Re-export commonly used items
pub use database::{DbManager, SqliteKeyValueStore};
pub use errors::InfraError;
pub use http::HttpClient;
pub use integrations::gemini::{GeminiClient, GeminiError};
pub use scheduling::{ReminderScheduler, SchedulerError};
