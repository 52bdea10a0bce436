//! Seven-day activity chart and per-day detail

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, TimeZone};
use healthprod_domain::constants::WEEK_DAYS;
use healthprod_domain::{Activity, ActivityType};
use serde::Serialize;

/// Hours per category for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Chart label, e.g. `Oct 16`.
    pub label: String,
    pub totals: BTreeMap<ActivityType, f64>,
}

impl DayBucket {
    pub fn hours(&self, category: ActivityType) -> f64 {
        self.totals.get(&category).copied().unwrap_or(0.0)
    }

    pub fn total_hours(&self) -> f64 {
        self.totals.values().sum()
    }
}

/// Hours spent on one category during the selected day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryHours {
    pub category: ActivityType,
    pub hours: f64,
}

/// Timeline shown when a chart bar is selected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub title: String,
    pub date: NaiveDate,
    /// Start time ascending.
    pub activities: Vec<Activity>,
    /// Hours descending.
    pub summary: Vec<CategoryHours>,
}

fn local_date<Tz: TimeZone>(activity: &Activity, tz: &Tz) -> NaiveDate {
    activity.start_time.with_timezone(tz).date_naive()
}

/// Bucket activities into the last seven calendar days, oldest first.
///
/// The last bucket is today. An activity counts towards the day its start
/// time falls on, even when it runs past midnight.
pub fn weekly_buckets<Tz: TimeZone>(activities: &[Activity], now: &DateTime<Tz>) -> Vec<DayBucket> {
    let tz = now.timezone();
    let today = now.date_naive();

    (0..WEEK_DAYS as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| {
            let mut totals = BTreeMap::new();
            for activity in activities.iter().filter(|a| local_date(a, &tz) == date) {
                *totals.entry(activity.category).or_insert(0.0) += activity.duration_hours();
            }
            DayBucket { date, label: date.format("%b %-d").to_string(), totals }
        })
        .collect()
}

/// Total hours logged for activities starting today.
pub fn today_total_hours<Tz: TimeZone>(activities: &[Activity], now: &DateTime<Tz>) -> f64 {
    let tz = now.timezone();
    let today = now.date_naive();
    activities.iter().filter(|a| local_date(a, &tz) == today).map(Activity::duration_hours).sum()
}

/// Chronological timeline for one day, or `None` when nothing was logged.
pub fn day_detail<Tz: TimeZone>(
    activities: &[Activity],
    date: NaiveDate,
    label: &str,
    tz: &Tz,
) -> Option<DayDetail> {
    let mut day: Vec<Activity> =
        activities.iter().filter(|a| local_date(a, tz) == date).cloned().collect();
    if day.is_empty() {
        return None;
    }
    day.sort_by_key(|a| a.start_time);

    let mut totals: BTreeMap<ActivityType, f64> = BTreeMap::new();
    for activity in &day {
        *totals.entry(activity.category).or_insert(0.0) += activity.duration_hours();
    }
    let mut summary: Vec<CategoryHours> =
        totals.into_iter().map(|(category, hours)| CategoryHours { category, hours }).collect();
    summary.sort_by(|a, b| b.hours.total_cmp(&a.hours));

    Some(DayDetail {
        title: format!("Activity Timeline for {label}"),
        date,
        activities: day,
        summary,
    })
}

/// Currently opened day detail, toggled by selecting chart bars.
#[derive(Debug, Clone, Default)]
pub struct DaySelection {
    current: Option<DayDetail>,
}

impl DaySelection {
    pub fn current(&self) -> Option<&DayDetail> {
        self.current.as_ref()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Select the bucket at `index`.
    ///
    /// Selecting the open day again closes it; selecting an empty day or an
    /// index outside `buckets` clears the selection.
    pub fn toggle<Tz: TimeZone>(
        &mut self,
        activities: &[Activity],
        buckets: &[DayBucket],
        index: usize,
        tz: &Tz,
    ) -> Option<&DayDetail> {
        let Some(bucket) = buckets.get(index) else {
            self.current = None;
            return None;
        };

        let title = format!("Activity Timeline for {}", bucket.label);
        if self.current.as_ref().is_some_and(|open| open.title == title) {
            self.current = None;
            return None;
        }

        self.current = day_detail(activities, bucket.date, &bucket.label, tz);
        self.current.as_ref()
    }
}
