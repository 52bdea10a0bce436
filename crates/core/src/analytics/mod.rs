//! Dashboard analytics
//!
//! Pure functions over an activity slice and a reference "now". Calendar
//! days are always taken in the time zone of `now`.

pub mod streak;
pub mod weekly;

pub use streak::calculate_streak;
pub use weekly::{day_detail, today_total_hours, weekly_buckets, DayBucket, DayDetail, DaySelection};
