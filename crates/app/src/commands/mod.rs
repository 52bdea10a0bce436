//! Shell commands
//!
//! One line of terminal input parses into a [`Command`]; [`execute`] runs it
//! against the [`AppContext`] and returns the text to print. Every command
//! runs through [`execute_logged`] so its duration and outcome are logged.

pub mod assistant;
pub mod dashboard;
pub mod focus;
pub mod planner;
pub mod rewards;
pub mod system;
pub mod voice;

use std::path::PathBuf;
use std::str::FromStr;

use healthprod_domain::{
    ActivityType, AiPersonality, HealthProdError, Page, Result, TimeOfDay,
};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// Focus timer controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusAction {
    Start,
    Pause,
    Toggle,
    Reset,
    Status,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,

    // Dashboard
    Log {
        category: ActivityType,
        start: TimeOfDay,
        end: TimeOfDay,
        notes: Option<String>,
        image: Option<PathBuf>,
    },
    Streak,
    Week,
    Day { index: usize },

    // Planner
    Tasks,
    AddTask { description: String, deadline: Option<String> },
    ToggleTask { id: String },
    Prioritize,
    Reminders,
    AddReminder { time: TimeOfDay, category: ActivityType, title: String },
    DeleteReminder { id: String },

    // Assistant
    Report,
    Insights,
    Card,
    Chat { message: String },
    Personality { personality: Option<AiPersonality> },
    Meal { path: PathBuf },

    Focus(FocusAction),

    // Rewards
    Rewards,
    Unlock { id: String },
    Challenges,

    // Voice
    Say { transcript: String },
    Hear { utterance: String },
    Listen,

    // System
    Online(bool),
    Go(Page),
    Health,
    Export,
}

pub const HELP: &str = "\
Dashboard:  log <category> <HH:MM> <HH:MM> [notes] [--image <path>]
            streak | week | day <0-6>
Planner:    tasks | task add <description> [--due <deadline>] | task toggle <id>
            prioritize | reminders | remind <HH:MM> <category> <title> | unremind <id>
Assistant:  report | insights | card | chat <message> | personality [name] | meal <image>
Focus:      focus start|pause|toggle|reset|status
Rewards:    rewards | unlock <id> | challenges
Voice:      say <transcript> | hear <utterance> | listen
System:     online on|off | go <page> | health | export | help | quit";

fn invalid(message: impl Into<String>) -> HealthProdError {
    HealthProdError::Validation(message.into())
}

fn required<'a>(value: &'a str, usage: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(format!("usage: {usage}")));
    }
    Ok(value)
}

/// Split off the first whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(invalid("usage: online on|off")),
    }
}

impl FromStr for Command {
    type Err = HealthProdError;

    fn from_str(line: &str) -> Result<Self> {
        let (word, rest) = next_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "" => return Err(invalid("empty command")),
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,

            "log" => {
                const USAGE: &str = "log <category> <HH:MM> <HH:MM> [notes] [--image <path>]";
                let (category, rest) = next_word(rest);
                let (start, rest) = next_word(rest);
                let (end, rest) = next_word(rest);
                let (notes, image) = match rest.split_once("--image") {
                    Some((notes, image)) => (notes, Some(PathBuf::from(required(image, USAGE)?))),
                    None => (rest, None),
                };
                Self::Log {
                    category: required(category, USAGE)?.parse()?,
                    start: required(start, USAGE)?.parse()?,
                    end: required(end, USAGE)?.parse()?,
                    notes: Some(notes.trim().to_string()).filter(|n| !n.is_empty()),
                    image,
                }
            }
            "streak" => Self::Streak,
            "week" => Self::Week,
            "day" => {
                let index = required(rest, "day <0-6>")?;
                Self::Day {
                    index: index
                        .parse()
                        .map_err(|_| invalid(format!("Invalid day index: {index}")))?,
                }
            }

            "tasks" => Self::Tasks,
            "task" => {
                let (action, rest) = next_word(rest);
                match action.to_ascii_lowercase().as_str() {
                    "add" => {
                        let usage = "task add <description> [--due <deadline>]";
                        let (description, deadline) = match rest.split_once("--due") {
                            Some((description, deadline)) => {
                                (description, Some(required(deadline, usage)?.to_string()))
                            }
                            None => (rest, None),
                        };
                        Self::AddTask {
                            description: required(description, usage)?.to_string(),
                            deadline,
                        }
                    }
                    "toggle" | "done" => {
                        Self::ToggleTask { id: required(rest, "task toggle <id>")?.to_string() }
                    }
                    _ => return Err(invalid("usage: task add|toggle ...")),
                }
            }
            "prioritize" => Self::Prioritize,
            "reminders" => Self::Reminders,
            "remind" => {
                const USAGE: &str = "remind <HH:MM> <category> <title>";
                let (time, rest) = next_word(rest);
                let (category, title) = next_word(rest);
                Self::AddReminder {
                    time: required(time, USAGE)?.parse()?,
                    category: required(category, USAGE)?.parse()?,
                    title: required(title, USAGE)?.to_string(),
                }
            }
            "unremind" => Self::DeleteReminder { id: required(rest, "unremind <id>")?.to_string() },

            "report" => Self::Report,
            "insights" => Self::Insights,
            "card" => Self::Card,
            "chat" => Self::Chat { message: required(rest, "chat <message>")?.to_string() },
            "personality" => Self::Personality {
                personality: match rest.trim() {
                    "" => None,
                    name => Some(name.parse()?),
                },
            },
            "meal" => Self::Meal { path: PathBuf::from(required(rest, "meal <image>")?) },

            "focus" => Self::Focus(match rest.trim().to_ascii_lowercase().as_str() {
                "" | "status" => FocusAction::Status,
                "start" => FocusAction::Start,
                "pause" => FocusAction::Pause,
                "toggle" => FocusAction::Toggle,
                "reset" => FocusAction::Reset,
                other => return Err(invalid(format!("Unknown focus action: {other}"))),
            }),

            "rewards" => Self::Rewards,
            "unlock" => Self::Unlock { id: required(rest, "unlock <id>")?.to_string() },
            "challenges" => Self::Challenges,

            "say" => Self::Say { transcript: required(rest, "say <transcript>")?.to_string() },
            "hear" => Self::Hear { utterance: required(rest, "hear <utterance>")?.to_string() },
            "listen" => Self::Listen,

            "online" => Self::Online(parse_switch(rest)?),
            "go" => Self::Go(required(rest, "go <page>")?.parse()?),
            "health" => Self::Health,
            "export" => Self::Export,

            other => return Err(invalid(format!("Unknown command: {other} (try `help`)"))),
        };
        Ok(command)
    }
}

impl Command {
    /// Stable identifier used in command execution logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Help => "system::help",
            Self::Quit => "system::quit",
            Self::Log { .. } => "dashboard::log_activity",
            Self::Streak => "dashboard::streak",
            Self::Week => "dashboard::week",
            Self::Day { .. } => "dashboard::day_detail",
            Self::Tasks => "planner::tasks",
            Self::AddTask { .. } => "planner::add_task",
            Self::ToggleTask { .. } => "planner::toggle_task",
            Self::Prioritize => "planner::prioritize",
            Self::Reminders => "planner::reminders",
            Self::AddReminder { .. } => "planner::add_reminder",
            Self::DeleteReminder { .. } => "planner::delete_reminder",
            Self::Report => "assistant::daily_report",
            Self::Insights => "assistant::insights",
            Self::Card => "assistant::knowledge_card",
            Self::Chat { .. } => "assistant::chat",
            Self::Personality { .. } => "assistant::personality",
            Self::Meal { .. } => "assistant::analyze_meal",
            Self::Focus(_) => "focus::control",
            Self::Rewards => "rewards::list",
            Self::Unlock { .. } => "rewards::unlock",
            Self::Challenges => "rewards::challenges",
            Self::Say { .. } => "voice::say",
            Self::Hear { .. } => "voice::hear",
            Self::Listen => "voice::listen",
            Self::Online(_) => "system::online",
            Self::Go(_) => "system::navigate",
            Self::Health => "system::health",
            Self::Export => "system::export",
        }
    }
}

/// Run a command and return the text to show.
pub async fn execute(ctx: &AppContext, command: Command) -> Result<String> {
    let name = command.name();
    execute_logged(name, || async move {
        match command {
            Command::Help => Ok(HELP.to_string()),
            Command::Quit => Ok("Goodbye.".to_string()),

            Command::Log { category, start, end, notes, image } => {
                dashboard::log_activity(ctx, category, start, end, notes, image.as_deref()).await
            }
            Command::Streak => Ok(dashboard::streak(ctx)),
            Command::Week => Ok(dashboard::week(ctx)),
            Command::Day { index } => Ok(dashboard::day(ctx, index)),

            Command::Tasks => Ok(planner::list_tasks(ctx)),
            Command::AddTask { description, deadline } => {
                planner::add_task(ctx, &description, deadline)
            }
            Command::ToggleTask { id } => planner::toggle_task(ctx, &id),
            Command::Prioritize => Ok(planner::prioritize(ctx).await),
            Command::Reminders => Ok(planner::list_reminders(ctx)),
            Command::AddReminder { time, category, title } => {
                planner::add_reminder(ctx, &title, time, category)
            }
            Command::DeleteReminder { id } => planner::delete_reminder(ctx, &id),

            Command::Report => Ok(assistant::daily_report(ctx).await),
            Command::Insights => Ok(assistant::insights(ctx).await),
            Command::Card => Ok(assistant::knowledge_card(ctx).await),
            Command::Chat { message } => Ok(assistant::chat(ctx, &message).await),
            Command::Personality { personality } => {
                Ok(assistant::personality(ctx, personality).await)
            }
            Command::Meal { path } => assistant::analyze_meal(ctx, &path).await,

            Command::Focus(action) => Ok(focus::control(ctx, action)),

            Command::Rewards => Ok(rewards::list(ctx)),
            Command::Unlock { id } => rewards::unlock(ctx, &id),
            Command::Challenges => Ok(rewards::challenges(ctx)),

            Command::Say { transcript } => Ok(voice::say(ctx, &transcript).await),
            Command::Hear { utterance } => voice::hear(ctx, &utterance),
            Command::Listen => voice::toggle_listening(ctx).await,

            Command::Online(online) => Ok(system::set_online(ctx, online)),
            Command::Go(page) => Ok(system::navigate(ctx, page)),
            Command::Health => Ok(system::health(ctx).await),
            Command::Export => system::export(ctx),
        }
    })
    .await
}
