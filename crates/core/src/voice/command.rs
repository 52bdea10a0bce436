//! Wake-phrase gating and intent matching

/// Strip the wake phrase from a transcript.
///
/// Returns the lower-cased command text, or `None` when the transcript does
/// not start with the wake phrase or nothing follows it.
pub fn extract_command(raw: &str, wake_phrase: &str) -> Option<String> {
    let transcript = raw.trim().to_lowercase();
    let wake_phrase = wake_phrase.trim().to_lowercase();

    let command = transcript.strip_prefix(wake_phrase.as_str())?.trim();
    if command.is_empty() {
        None
    } else {
        Some(command.to_string())
    }
}

/// Intents reachable by voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceCommand {
    AddTask,
    StartFocusTimer,
    DailyReport,
}

/// Trigger phrases in match order; the first contained phrase wins.
const TRIGGERS: &[(&str, VoiceCommand)] = &[
    ("add new task", VoiceCommand::AddTask),
    ("add task", VoiceCommand::AddTask),
    ("start focus timer", VoiceCommand::StartFocusTimer),
    ("start my focus timer", VoiceCommand::StartFocusTimer),
    ("today's report", VoiceCommand::DailyReport),
    ("progress report", VoiceCommand::DailyReport),
];

impl VoiceCommand {
    /// Match command text (already lower-cased) against the trigger phrases.
    pub fn match_command(command: &str) -> Option<Self> {
        TRIGGERS.iter().find(|(phrase, _)| command.contains(phrase)).map(|(_, intent)| *intent)
    }
}
