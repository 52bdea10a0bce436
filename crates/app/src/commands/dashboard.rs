//! Dashboard commands: activity logging, streak and the weekly chart

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Days, Local, LocalResult, NaiveDate, TimeZone, Utc};
use healthprod_core::{calculate_streak, today_total_hours, weekly_buckets};
use healthprod_domain::{
    ActivityType, Attachment, HealthProdError, NewActivity, Result, TimeOfDay,
};

use super::assistant::read_image;
use crate::context::AppContext;

fn resolve_local<Tz: TimeZone>(date: NaiveDate, time: TimeOfDay, tz: &Tz) -> Result<DateTime<Utc>> {
    let naive = date
        .and_hms_opt(u32::from(time.hour()), u32::from(time.minute()), 0)
        .ok_or_else(|| HealthProdError::Validation(format!("Invalid time {time}")))?;
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Ok(at.with_timezone(&Utc)),
        LocalResult::None => {
            Err(HealthProdError::Validation(format!("{time} does not exist on {date}")))
        }
    }
}

/// Interval for an activity ending on `today`.
///
/// An end before the start means the activity began the previous day
/// (e.g. last night's sleep).
pub(crate) fn activity_interval<Tz: TimeZone>(
    today: NaiveDate,
    start: TimeOfDay,
    end: TimeOfDay,
    tz: &Tz,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start_date = if end < start {
        today
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| HealthProdError::Validation("Date out of range".into()))?
    } else {
        today
    };
    Ok((resolve_local(start_date, start, tz)?, resolve_local(today, end, tz)?))
}

/// Encode an image file as an activity attachment.
async fn load_attachment(path: &Path) -> Result<Attachment> {
    let image = read_image(path).await?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let data_url = format!("data:{};base64,{}", image.mime_type, STANDARD.encode(&image.bytes));
    Ok(Attachment { name, mime_type: image.mime_type, data_url })
}

pub async fn log_activity(
    ctx: &AppContext,
    category: ActivityType,
    start: TimeOfDay,
    end: TimeOfDay,
    notes: Option<String>,
    image: Option<&Path>,
) -> Result<String> {
    let (start_time, end_time) = activity_interval(Local::now().date_naive(), start, end, &Local)?;
    let mut new = NewActivity::new(category, start_time, end_time);
    if let Some(notes) = notes {
        new = new.with_notes(notes);
    }
    if let Some(path) = image {
        new = new.with_attachment(load_attachment(path).await?);
    }

    let mut state = ctx.state.write();
    let activity = state.add_activity(new)?;
    let hours = activity.duration_hours();
    let id = activity.id.clone();
    Ok(format!(
        "Logged {category} {start}-{end} ({hours:.1}h, id {id}). Coins: {}",
        state.coins()
    ))
}

pub fn streak(ctx: &AppContext) -> String {
    let days = calculate_streak(ctx.state.read().activities(), &Local::now());
    match days {
        0 => "No streak yet. Log an activity today to start one!".to_string(),
        1 => "1 day streak".to_string(),
        n => format!("{n} day streak"),
    }
}

pub fn week(ctx: &AppContext) -> String {
    let now = Local::now();
    let state = ctx.state.read();
    let buckets = weekly_buckets(state.activities(), &now);

    let mut out = String::from("Last 7 days:");
    for (index, bucket) in buckets.iter().enumerate() {
        out.push_str(&format!("\n  [{index}] {:<7} {:>5.1}h", bucket.label, bucket.total_hours()));
        for category in ActivityType::ALL {
            let hours = bucket.hours(category);
            if hours > 0.0 {
                out.push_str(&format!("  {category} {hours:.1}"));
            }
        }
    }
    out.push_str(&format!(
        "\nToday: {:.1}h logged",
        today_total_hours(state.activities(), &now)
    ));
    out
}

/// Toggle the detail view for the chart bar at `index` (0 = oldest).
pub fn day(ctx: &AppContext, index: usize) -> String {
    let activities = ctx.state.read().activities().to_vec();
    let buckets = weekly_buckets(&activities, &Local::now());

    let mut selection = ctx.day_selection.lock();
    let Some(detail) = selection.toggle(&activities, &buckets, index, &Local) else {
        return "Day detail closed.".to_string();
    };

    let mut out = detail.title.clone();
    for activity in &detail.activities {
        out.push_str(&format!(
            "\n  {}-{} {}",
            activity.start_time.with_timezone(&Local).format("%H:%M"),
            activity.end_time.with_timezone(&Local).format("%H:%M"),
            activity.category
        ));
        if let Some(notes) = &activity.notes {
            out.push_str(&format!(" ({notes})"));
        }
    }
    for entry in &detail.summary {
        out.push_str(&format!("\n  {:<9} {:.1}h", entry.category.label(), entry.hours));
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Timelike;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(h: u8, m: u8) -> TimeOfDay {
        TimeOfDay::new(h, m).unwrap()
    }

    #[test]
    fn same_day_interval() {
        let (start, end) =
            activity_interval(date(2026, 10, 16), at(9, 0), at(10, 30), &Utc).unwrap();
        assert_eq!(start.date_naive(), date(2026, 10, 16));
        assert_eq!((start.hour(), end.hour(), end.minute()), (9, 10, 30));
    }

    #[test]
    fn overnight_interval_starts_the_day_before() {
        let (start, end) =
            activity_interval(date(2026, 10, 16), at(23, 0), at(7, 0), &Utc).unwrap();
        assert_eq!(start.date_naive(), date(2026, 10, 15));
        assert_eq!(end.date_naive(), date(2026, 10, 16));
        assert_eq!((end - start).num_hours(), 8);
    }

    #[test]
    fn equal_times_stay_on_one_day() {
        let (start, end) = activity_interval(date(2026, 10, 16), at(8, 0), at(8, 0), &Utc).unwrap();
        assert_eq!(start, end);
    }
}
