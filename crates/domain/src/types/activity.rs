//! Logged activities
//!
//! An [`Activity`] is a closed, categorised time interval. Activities are
//! append-only: once created they are never edited, and creation goes through
//! [`NewActivity::into_activity`] so the interval invariant is checked in one
//! place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{impl_label_conversions, HealthProdError, Result};

/// What the user was doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Sleep,
    Meal,
    Study,
    Work,
    Exercise,
}

impl ActivityType {
    /// All categories in display order.
    pub const ALL: [Self; 5] = [Self::Sleep, Self::Meal, Self::Study, Self::Work, Self::Exercise];
}

impl_label_conversions!(ActivityType {
    Sleep => "Sleep",
    Meal => "Meal",
    Study => "Study",
    Work => "Work",
    Exercise => "Exercise",
});

/// Single image attached to an activity (e.g. a meal photo).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    /// `data:` URL with the encoded payload.
    pub data_url: String,
}

/// A logged activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub category: ActivityType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Activity {
    /// Length of the interval in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        let millis = (self.end_time - self.start_time).num_milliseconds();
        millis as f64 / 3_600_000.0
    }
}

/// User input for a new activity, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewActivity {
    pub category: ActivityType,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub attachment: Option<Attachment>,
}

impl NewActivity {
    /// Create a new activity draft without notes or attachment.
    pub fn new(category: ActivityType, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Self {
        Self { category, start_time, end_time, notes: None, attachment: None }
    }

    /// Attach free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Attach a single image.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// Check the interval invariant: end strictly after start.
    pub fn validate(&self) -> Result<()> {
        if self.end_time <= self.start_time {
            return Err(HealthProdError::Validation(
                "End time must be after start time".to_string(),
            ));
        }
        Ok(())
    }

    /// Validate and assign a fresh id.
    pub fn into_activity(self) -> Result<Activity> {
        self.validate()?;
        let notes = self.notes.filter(|n| !n.trim().is_empty());
        Ok(Activity {
            id: Uuid::new_v4().to_string(),
            category: self.category,
            start_time: self.start_time,
            end_time: self.end_time,
            notes,
            attachment: self.attachment,
        })
    }
}
