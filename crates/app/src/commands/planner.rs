//! Planner commands: tasks, AI prioritization and reminders

use healthprod_domain::{ActivityType, Result, Task, TimeOfDay};
use tracing::info;

use crate::context::AppContext;

fn render_task(task: &Task) -> String {
    let mut line = format!(
        "[{}] {:<6} {}",
        if task.completed { "x" } else { " " },
        task.priority.label(),
        task.description
    );
    if let Some(deadline) = &task.deadline {
        line.push_str(&format!(" (due {deadline})"));
    }
    line.push_str(&format!("  #{}", task.id));
    line
}

fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Add one with `task add <description>`.".to_string();
    }
    tasks.iter().map(render_task).collect::<Vec<_>>().join("\n")
}

pub fn list_tasks(ctx: &AppContext) -> String {
    render_tasks(&ctx.state.read().sorted_tasks())
}

pub fn add_task(ctx: &AppContext, description: &str, deadline: Option<String>) -> Result<String> {
    let mut state = ctx.state.write();
    let task = state.add_task(description, deadline)?;
    Ok(format!("Added: {}", render_task(task)))
}

pub fn toggle_task(ctx: &AppContext, id: &str) -> Result<String> {
    let completed = ctx.state.write().toggle_task(id)?;
    Ok(if completed { "Task completed." } else { "Task reopened." }.to_string())
}

/// Ask the assistant to reprioritize. Offline leaves tasks unchanged.
pub async fn prioritize(ctx: &AppContext) -> String {
    let tasks = {
        let state = ctx.state.read();
        if !state.is_online() {
            return "You're offline, tasks left unchanged.".to_string();
        }
        state.tasks().to_vec()
    };
    if tasks.is_empty() {
        return render_tasks(&tasks);
    }

    let prioritized = ctx.assistant.prioritize(&tasks).await;
    info!(tasks = prioritized.len(), "Tasks reprioritized");

    let mut state = ctx.state.write();
    state.replace_tasks(prioritized);
    render_tasks(&state.sorted_tasks())
}

pub fn list_reminders(ctx: &AppContext) -> String {
    let state = ctx.state.read();
    if state.reminders().is_empty() {
        return "No reminders set.".to_string();
    }
    state
        .reminders()
        .iter()
        .map(|r| format!("{} {:<8} {}  #{}", r.time, r.category.label(), r.title, r.id))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn add_reminder(
    ctx: &AppContext,
    title: &str,
    time: TimeOfDay,
    category: ActivityType,
) -> Result<String> {
    let mut state = ctx.state.write();
    let reminder = state.add_reminder(title, time, category)?;
    Ok(format!("Reminder set for {} daily: {} (#{})", reminder.time, reminder.title, reminder.id))
}

pub fn delete_reminder(ctx: &AppContext, id: &str) -> Result<String> {
    let removed = ctx.state.write().delete_reminder(id)?;
    Ok(format!("Deleted reminder: {}", removed.title))
}
