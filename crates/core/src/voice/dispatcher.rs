//! Voice command dispatcher

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use healthprod_domain::constants::WAKE_PHRASE;
use healthprod_domain::Page;
use tracing::{debug, info, warn};

use super::command::{extract_command, VoiceCommand};
use super::ports::{ShellActions, SpeechSynthesizer};

/// What a transcript led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No wake phrase, or nothing after it.
    Ignored,
    /// Wake phrase present but no trigger matched.
    Unrecognized,
    Navigated(Page),
    FocusStarted,
    ReportSpoken { score: u8 },
    ReportUnavailable,
    /// A report request was already running; this one was dropped.
    ReportAlreadyInFlight,
}

/// Maps finalized transcripts to shell actions and spoken confirmations.
pub struct VoiceDispatcher {
    wake_phrase: String,
    shell: Arc<dyn ShellActions>,
    speech: Arc<dyn SpeechSynthesizer>,
    report_in_flight: AtomicBool,
}

/// Clears the in-flight flag when the report request finishes.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl VoiceDispatcher {
    pub fn new(shell: Arc<dyn ShellActions>, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            wake_phrase: WAKE_PHRASE.to_string(),
            shell,
            speech,
            report_in_flight: AtomicBool::new(false),
        }
    }

    pub fn with_wake_phrase(mut self, wake_phrase: impl Into<String>) -> Self {
        self.wake_phrase = wake_phrase.into();
        self
    }

    pub fn wake_phrase(&self) -> &str {
        &self.wake_phrase
    }

    pub fn report_in_flight(&self) -> bool {
        self.report_in_flight.load(Ordering::Acquire)
    }

    /// Handle one finalized transcript.
    pub async fn handle_transcript(&self, raw: &str) -> DispatchOutcome {
        let Some(command) = extract_command(raw, &self.wake_phrase) else {
            return DispatchOutcome::Ignored;
        };

        let Some(intent) = VoiceCommand::match_command(&command) else {
            debug!(command = %command, "No voice intent matched");
            return DispatchOutcome::Unrecognized;
        };

        info!(intent = ?intent, "Dispatching voice command");
        match intent {
            VoiceCommand::AddTask => {
                self.speech.speak("Navigating to tasks.");
                self.shell.navigate(Page::Tasks);
                DispatchOutcome::Navigated(Page::Tasks)
            }
            VoiceCommand::StartFocusTimer => {
                self.speech.speak("Starting your focus session.");
                self.shell.set_focus_auto_start(true);
                self.shell.navigate(Page::Focus);
                DispatchOutcome::FocusStarted
            }
            VoiceCommand::DailyReport => self.speak_report().await,
        }
    }

    async fn speak_report(&self) -> DispatchOutcome {
        if self
            .report_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Report already being generated, ignoring voice request");
            return DispatchOutcome::ReportAlreadyInFlight;
        }
        let _guard = InFlight(&self.report_in_flight);

        self.speech.speak("Generating your daily report now.");
        match self.shell.generate_report().await {
            Some(report) => {
                self.speech.speak(&format!(
                    "Report generated. Your productivity score is {}. Here is your summary: {}",
                    report.productivity_score, report.summary
                ));
                DispatchOutcome::ReportSpoken { score: report.productivity_score }
            }
            None => {
                self.speech.speak("Sorry, I couldn't generate the report right now.");
                DispatchOutcome::ReportUnavailable
            }
        }
    }
}
