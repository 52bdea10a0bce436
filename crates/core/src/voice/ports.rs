//! Port interfaces for voice control
//!
//! The host provides speech recognition and synthesis; the shell exposes the
//! side effects a voice command can trigger.

use async_trait::async_trait;
use healthprod_domain::{DailyReport, Page, Result};

/// Event delivered by a speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Finalized utterance.
    Final(String),
    /// Partial hypothesis, superseded by a later `Final`.
    Interim(String),
    /// Recognition session ended, e.g. after a silence timeout.
    Ended,
    Error(String),
}

/// Trait for a continuous speech recognizer
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin (or resume) a recognition session
    async fn start(&self) -> Result<()>;

    /// End the current session; an `Ended` event may follow
    async fn stop(&self) -> Result<()>;

    /// Wait for the next event. `None` once the recognizer is gone for good.
    async fn next_event(&self) -> Option<RecognitionEvent>;
}

/// Trait for text-to-speech output
///
/// Fire-and-forget: implementations handle their own failures.
pub trait SpeechSynthesizer: Send + Sync {
    fn speak(&self, text: &str);
}

/// Synthesizer used when the host cannot speak.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSynthesizer;

impl SpeechSynthesizer for SilentSynthesizer {
    fn speak(&self, text: &str) {
        tracing::trace!(text, "Speech synthesis unavailable, dropping utterance");
    }
}

/// Actions the application shell exposes to voice commands
#[async_trait]
pub trait ShellActions: Send + Sync {
    fn navigate(&self, page: Page);

    /// Make the focus view start its timer on next open
    fn set_focus_auto_start(&self, enabled: bool);

    /// Generate today's report; `None` when it cannot be produced
    async fn generate_report(&self) -> Option<DailyReport>;
}
