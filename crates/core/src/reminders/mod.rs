//! Time-of-day reminders

pub mod monitor;
pub mod ports;

pub use monitor::ReminderMonitor;
pub use ports::Notifier;
