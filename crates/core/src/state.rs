//! Authoritative application state
//!
//! One [`AppState`] owns activities, reminders, tasks and the rewards
//! economy. Mutations go through its methods so invariants hold in one
//! place; consumers read through the accessors or a cloned snapshot.

use chrono::{NaiveDate, TimeZone};
use healthprod_domain::{
    starter_challenges, starter_friends, starter_rewards, Activity, ActivityType, Challenge,
    Friend, HealthProdError, NewActivity, Page, Reminder, Result, Reward, RewardsConfig, Task,
    TaskPriority, TimeOfDay,
};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct AppState {
    /// Most recent start first.
    activities: Vec<Activity>,
    /// Sorted by time of day.
    reminders: Vec<Reminder>,
    tasks: Vec<Task>,
    coins: u32,
    coins_per_activity: u32,
    rewards: Vec<Reward>,
    challenges: Vec<Challenge>,
    friends: Vec<Friend>,
    online: bool,
    current_page: Page,
    focus_auto_start: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&RewardsConfig::default())
    }
}

impl AppState {
    /// Fresh state with the starter rewards, challenge and friends.
    pub fn new(rewards: &RewardsConfig) -> Self {
        Self {
            activities: Vec::new(),
            reminders: Vec::new(),
            tasks: Vec::new(),
            coins: rewards.starting_coins,
            coins_per_activity: rewards.coins_per_activity,
            rewards: starter_rewards(),
            challenges: starter_challenges(),
            friends: starter_friends(),
            online: true,
            current_page: Page::Dashboard,
            focus_auto_start: false,
        }
    }

    // Activities

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Activities starting on `date` in time zone `tz`.
    pub fn activities_on<Tz: TimeZone>(&self, date: NaiveDate, tz: &Tz) -> Vec<Activity> {
        self.activities
            .iter()
            .filter(|a| a.start_time.with_timezone(tz).date_naive() == date)
            .cloned()
            .collect()
    }

    /// Validate and log an activity, awarding coins.
    pub fn add_activity(&mut self, new: NewActivity) -> Result<&Activity> {
        let activity = new.into_activity()?;
        let index = self.activities.partition_point(|a| a.start_time > activity.start_time);
        info!(id = %activity.id, category = %activity.category, "Activity logged");
        self.activities.insert(index, activity);
        self.coins = self.coins.saturating_add(self.coins_per_activity);
        Ok(&self.activities[index])
    }

    // Reminders

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn add_reminder(
        &mut self,
        title: &str,
        time: TimeOfDay,
        category: ActivityType,
    ) -> Result<&Reminder> {
        let title = title.trim();
        if title.is_empty() {
            return Err(HealthProdError::Validation("Reminder title must not be empty".into()));
        }
        let reminder =
            Reminder { id: Uuid::new_v4().to_string(), title: title.to_string(), time, category };
        let index = self.reminders.partition_point(|r| r.time <= reminder.time);
        debug!(id = %reminder.id, time = %reminder.time, "Reminder added");
        self.reminders.insert(index, reminder);
        Ok(&self.reminders[index])
    }

    pub fn delete_reminder(&mut self, id: &str) -> Result<Reminder> {
        let index = self
            .reminders
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| HealthProdError::NotFound(format!("Reminder {id}")))?;
        Ok(self.reminders.remove(index))
    }

    // Tasks

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Display order: open tasks first, then by priority rank. Stable.
    pub fn sorted_tasks(&self) -> Vec<Task> {
        let mut tasks = self.tasks.clone();
        tasks.sort_by_key(|t| (t.completed, t.priority.rank()));
        tasks
    }

    /// New tasks go to the front with Medium priority.
    pub fn add_task(&mut self, description: &str, deadline: Option<String>) -> Result<&Task> {
        let description = description.trim();
        if description.is_empty() {
            return Err(HealthProdError::Validation("Task description must not be empty".into()));
        }
        let task = Task {
            id: Uuid::new_v4().to_string(),
            description: description.to_string(),
            deadline: deadline.filter(|d| !d.trim().is_empty()),
            priority: TaskPriority::Medium,
            completed: false,
        };
        self.tasks.insert(0, task);
        Ok(&self.tasks[0])
    }

    /// Flip completion. Returns the new value.
    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| HealthProdError::NotFound(format!("Task {id}")))?;
        task.completed = !task.completed;
        Ok(task.completed)
    }

    /// Replace the task list, e.g. with a prioritized one.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    // Rewards economy

    pub fn coins(&self) -> u32 {
        self.coins
    }

    pub fn rewards(&self) -> &[Reward] {
        &self.rewards
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    /// Spend coins on a reward. State is untouched on any error.
    pub fn unlock_reward(&mut self, id: &str) -> Result<&Reward> {
        let coins = self.coins;
        let reward = self
            .rewards
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| HealthProdError::NotFound(format!("Reward {id}")))?;
        if reward.unlocked {
            return Err(HealthProdError::Validation(format!("{} is already unlocked", reward.name)));
        }
        if coins < reward.cost {
            return Err(HealthProdError::Validation(format!(
                "Not enough coins: {} needed, {coins} available",
                reward.cost
            )));
        }
        reward.unlocked = true;
        self.coins = coins - reward.cost;
        info!(reward = %reward.name, coins = self.coins, "Reward unlocked");
        Ok(reward)
    }

    // Shell flags

    pub fn is_online(&self) -> bool {
        self.online
    }

    pub fn set_online(&mut self, online: bool) {
        if self.online != online {
            info!(online, "Connectivity changed");
        }
        self.online = online;
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn navigate(&mut self, page: Page) {
        self.current_page = page;
    }

    pub fn focus_auto_start(&self) -> bool {
        self.focus_auto_start
    }

    pub fn set_focus_auto_start(&mut self, enabled: bool) {
        self.focus_auto_start = enabled;
    }

    /// Read and clear the auto-start flag.
    pub fn take_focus_auto_start(&mut self) -> bool {
        std::mem::take(&mut self.focus_auto_start)
    }
}
