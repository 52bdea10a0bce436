//! Shell-level types: navigation targets and negotiated capabilities

use serde::{Deserialize, Serialize};

use crate::impl_label_conversions;

/// Top-level views the shell can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Dashboard,
    Tasks,
    Challenges,
    Rewards,
    Focus,
    Scanner,
    Chat,
}

impl_label_conversions!(Page {
    Dashboard => "dashboard",
    Tasks => "tasks",
    Challenges => "challenges",
    Rewards => "rewards",
    Focus => "focus",
    Scanner => "scanner",
    Chat => "chat",
});

/// Notification permission as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPermission {
    Granted,
    Denied,
    /// Not asked yet.
    #[default]
    Default,
}

/// Optional host facilities, negotiated once at startup.
///
/// Consumers branch on this record instead of probing the host themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Capabilities {
    pub speech_recognition: bool,
    pub speech_synthesis: bool,
    pub notifications: NotificationPermission,
}

impl Capabilities {
    pub fn notifications_granted(&self) -> bool {
        self.notifications == NotificationPermission::Granted
    }
}
