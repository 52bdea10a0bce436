//! Gamification: rewards, friends and challenges

use serde::{Deserialize, Serialize};

/// What a reward unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardKind {
    Wallpaper,
    Audio,
}

/// Item purchasable with coins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: u32,
    pub kind: RewardKind,
    pub unlocked: bool,
    pub asset_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub friend_id: String,
    pub name: String,
    pub avatar: String,
    /// Days completed in the challenge.
    pub progress: u32,
}

impl LeaderboardEntry {
    /// Fraction of the challenge completed, clamped to `[0, 1]`.
    pub fn completion_ratio(&self, duration_days: u32) -> f64 {
        if duration_days == 0 {
            return 0.0;
        }
        (f64::from(self.progress) / f64::from(duration_days)).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    pub duration_days: u32,
    /// Sorted by progress, highest first.
    pub leaderboard: Vec<LeaderboardEntry>,
}

impl Challenge {
    /// Build a challenge, ordering the leaderboard by progress.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        duration_days: u32,
        mut leaderboard: Vec<LeaderboardEntry>,
    ) -> Self {
        leaderboard.sort_by(|a, b| b.progress.cmp(&a.progress));
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            duration_days,
            leaderboard,
        }
    }
}

/// Rewards available on first launch.
pub fn starter_rewards() -> Vec<Reward> {
    vec![
        Reward {
            id: "r1".into(),
            name: "Zen Wallpaper Pack".into(),
            description: "Exclusive set of 3 calming wallpapers for your devices.".into(),
            cost: 100,
            kind: RewardKind::Wallpaper,
            unlocked: false,
            asset_url: "https://source.unsplash.com/random/1920x1080?nature".into(),
        },
        Reward {
            id: "r2".into(),
            name: "Focus Meditation Audio".into(),
            description: "A 10-minute guided meditation track for deep focus.".into(),
            cost: 250,
            kind: RewardKind::Audio,
            unlocked: false,
            asset_url: "https://soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3".into(),
        },
        Reward {
            id: "r3".into(),
            name: "Productivity Wallpaper".into(),
            description: "A motivational wallpaper to keep you on track.".into(),
            cost: 100,
            kind: RewardKind::Wallpaper,
            unlocked: false,
            asset_url: "https://source.unsplash.com/random/1920x1080?work".into(),
        },
    ]
}

pub fn starter_friends() -> Vec<Friend> {
    [("f1", "Alex", "A"), ("f2", "Ben", "B"), ("f3", "Chloe", "C"), ("f4", "You", "Y")]
        .into_iter()
        .map(|(id, name, avatar)| Friend {
            id: id.into(),
            name: name.into(),
            avatar: avatar.into(),
        })
        .collect()
}

pub fn starter_challenges() -> Vec<Challenge> {
    let entry = |friend_id: &str, name: &str, avatar: &str, progress| LeaderboardEntry {
        friend_id: friend_id.into(),
        name: name.into(),
        avatar: avatar.into(),
        progress,
    };

    vec![Challenge::new(
        "c1",
        "7-Day Early Wake-up Challenge",
        "Wake up before 7 AM for 7 days straight to build a healthy morning routine.",
        7,
        vec![
            entry("f4", "You", "Y", 5),
            entry("f1", "Alex", "A", 6),
            entry("f3", "Chloe", "C", 4),
            entry("f2", "Ben", "B", 3),
        ],
    )]
}
