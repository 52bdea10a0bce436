//! Background schedulers
//!
//! Each scheduler owns its task handle and a cancellation token; `stop`
//! cancels and awaits the task with a timeout.

pub mod error;
pub mod reminder_scheduler;

pub use error::{SchedulerError, SchedulerResult};
pub use reminder_scheduler::{
    Clock, ReminderScheduler, ReminderSchedulerConfig, ReminderSource,
};
