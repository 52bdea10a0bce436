//! Reminder due-check

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone};
use healthprod_domain::constants::REMINDER_NOTIFICATION_TITLE;
use healthprod_domain::{Reminder, TimeOfDay};
use tracing::{info, warn};

use super::ports::Notifier;

/// Tracks which reminders already fired so that several polls inside the
/// same minute notify only once.
#[derive(Debug, Default)]
pub struct ReminderMonitor {
    fired: HashMap<String, (NaiveDate, TimeOfDay)>,
}

impl ReminderMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reminders whose time equals the wall-clock minute of `now` and which
    /// have not fired in that minute yet. Marks them as fired.
    pub fn due<'a, Tz: TimeZone>(
        &mut self,
        reminders: &'a [Reminder],
        now: &DateTime<Tz>,
    ) -> Vec<&'a Reminder> {
        let local = now.naive_local();
        let slot = (local.date(), TimeOfDay::from_time(local.time()));

        // Forget deleted reminders.
        self.fired.retain(|id, _| reminders.iter().any(|r| &r.id == id));

        reminders
            .iter()
            .filter(|r| r.time == slot.1)
            .filter(|r| self.fired.insert(r.id.clone(), slot) != Some(slot))
            .collect()
    }

    /// Notify every due reminder. Returns how many notifications were posted.
    pub fn fire_due<Tz: TimeZone>(
        &mut self,
        reminders: &[Reminder],
        now: &DateTime<Tz>,
        notifier: &dyn Notifier,
    ) -> usize {
        let mut posted = 0;
        for reminder in self.due(reminders, now) {
            match notifier.notify(REMINDER_NOTIFICATION_TITLE, &reminder.title) {
                Ok(()) => {
                    info!(reminder_id = %reminder.id, time = %reminder.time, "Reminder fired");
                    posted += 1;
                }
                Err(err) => {
                    warn!(
                        reminder_id = %reminder.id,
                        error = %err,
                        "Failed to post reminder notification"
                    );
                }
            }
        }
        posted
    }
}
