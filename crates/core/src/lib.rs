//! # HealthProd Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Application state and its invariants
//! - Dashboard analytics (streak, weekly chart, day detail)
//! - Voice command dispatch and the listening loop
//! - AI assistant fallback policy, knowledge card cache, reminders, focus timer
//! - Port interfaces (traits) implemented by `healthprod-infra`
//!
//! ## Architecture Principles
//! - Only depends on `healthprod-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod analytics;
pub mod assistant;
pub mod capabilities;
pub mod focus;
pub mod knowledge;
pub mod reminders;
pub mod state;
pub mod voice;

// Re-export specific items to avoid ambiguity
pub use analytics::{calculate_streak, day_detail, today_total_hours, weekly_buckets, DaySelection};
pub use assistant::{AiGateway, AssistantService, ChatSession};
pub use capabilities::{negotiate_capabilities, CapabilityProbe};
pub use focus::{FocusPhase, FocusTimer, PhaseCompleted};
pub use knowledge::{KeyValueStore, KnowledgeCardCache};
pub use reminders::{Notifier, ReminderMonitor};
pub use state::AppState;
pub use voice::{
    DispatchOutcome, RecognitionEvent, ShellActions, SilentSynthesizer, SpeechRecognizer,
    SpeechSynthesizer, VoiceCommand, VoiceDispatcher, VoiceListener,
};
