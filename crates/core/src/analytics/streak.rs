//! Consecutive-day activity streak

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, TimeZone};
use healthprod_domain::constants::MAX_STREAK_DAYS;
use healthprod_domain::Activity;

/// Count consecutive calendar days with at least one logged activity.
///
/// The run ends today, or yesterday when nothing has been logged today yet,
/// so an unfinished day does not reset the streak. A single missing day
/// breaks the run. The result never exceeds [`MAX_STREAK_DAYS`].
pub fn calculate_streak<Tz: TimeZone>(activities: &[Activity], now: &DateTime<Tz>) -> u32 {
    if activities.is_empty() {
        return 0;
    }

    let tz = now.timezone();
    let days: HashSet<NaiveDate> =
        activities.iter().map(|a| a.start_time.with_timezone(&tz).date_naive()).collect();

    let today = now.date_naive();
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    while streak < MAX_STREAK_DAYS && days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, Utc};
    use healthprod_domain::{ActivityType, NewActivity};

    use super::*;

    fn activity_at(start: DateTime<Utc>) -> Activity {
        NewActivity::new(ActivityType::Work, start, start + Duration::hours(1))
            .into_activity()
            .unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
    }

    fn days_ago(n: i64) -> DateTime<Utc> {
        now() - Duration::days(n) - Duration::hours(8)
    }

    #[test]
    fn empty_collection_has_no_streak() {
        assert_eq!(calculate_streak(&[], &now()), 0);
    }

    #[test]
    fn counts_run_ending_today() {
        let activities: Vec<Activity> = [0, 1, 2].map(|d| activity_at(days_ago(d))).into();
        assert_eq!(calculate_streak(&activities, &now()), 3);
    }

    #[test]
    fn gap_before_today_breaks_run() {
        let activities = vec![
            activity_at(days_ago(0)),
            activity_at(days_ago(1)),
            activity_at(days_ago(2)),
            activity_at(days_ago(4)),
        ];
        assert_eq!(calculate_streak(&activities, &now()), 3);
    }

    #[test]
    fn starts_from_yesterday_when_today_is_empty() {
        let activities: Vec<Activity> = [1, 2, 4].map(|d| activity_at(days_ago(d))).into();
        assert_eq!(calculate_streak(&activities, &now()), 2);
    }

    #[test]
    fn stale_activity_gives_zero() {
        let activities = vec![activity_at(days_ago(3))];
        assert_eq!(calculate_streak(&activities, &now()), 0);
    }

    #[test]
    fn order_and_duplicates_do_not_matter() {
        let activities = vec![
            activity_at(days_ago(1)),
            activity_at(days_ago(0)),
            activity_at(days_ago(1)),
            activity_at(days_ago(0)),
        ];
        assert_eq!(calculate_streak(&activities, &now()), 2);
    }

    #[test]
    fn bounded_to_a_year() {
        let activities: Vec<Activity> = (0..400).map(|n| activity_at(days_ago(n))).collect();
        assert_eq!(calculate_streak(&activities, &now()), MAX_STREAK_DAYS);
    }

    #[test]
    fn uses_calendar_day_of_now_time_zone() {
        // 23:30 UTC on the 15th is already the 16th in UTC+2.
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = tz.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2026, 10, 15, 23, 30, 0).unwrap();
        assert_eq!(calculate_streak(&[activity_at(late)], &local_now), 1);
        let two_days_later = Utc.with_ymd_and_hms(2026, 10, 17, 9, 0, 0).unwrap();
        assert_eq!(calculate_streak(&[activity_at(late)], &two_days_later), 0);
    }
}
