//! Terminal host: typed lines stand in for speech, stdout for the speaker
//! and the notification centre.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use healthprod_core::{
    CapabilityProbe, Notifier, RecognitionEvent, SpeechRecognizer, SpeechSynthesizer,
};
use healthprod_domain::{Config, NotificationPermission, Result};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

const MICROPHONE_BUFFER: usize = 32;

/// Speech recognizer fed with typed utterances.
///
/// Utterances fed while no session is active are dropped, like speech the
/// microphone never heard.
pub struct LineRecognizer {
    sender: mpsc::Sender<RecognitionEvent>,
    receiver: Mutex<mpsc::Receiver<RecognitionEvent>>,
    active: AtomicBool,
}

impl LineRecognizer {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(MICROPHONE_BUFFER);
        Self { sender, receiver: Mutex::new(receiver), active: AtomicBool::new(false) }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Deliver an utterance as a final transcript. Returns whether it was heard.
    pub fn feed(&self, utterance: &str) -> bool {
        if !self.is_active() {
            return false;
        }
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return false;
        }
        self.sender.try_send(RecognitionEvent::Final(utterance.to_string())).is_ok()
    }

    /// Simulate the platform closing the session, e.g. after silence.
    pub fn end_session(&self) {
        if self.active.swap(false, Ordering::AcqRel) {
            let _ = self.sender.try_send(RecognitionEvent::Ended);
        }
    }
}

impl Default for LineRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechRecognizer for LineRecognizer {
    async fn start(&self) -> Result<()> {
        self.active.store(true, Ordering::Release);
        debug!("Microphone session started");
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.end_session();
        debug!("Microphone session stopped");
        Ok(())
    }

    async fn next_event(&self) -> Option<RecognitionEvent> {
        self.receiver.lock().await.recv().await
    }
}

/// Prints utterances to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str) {
        info!(text, "Speaking");
        println!("[voice] {text}");
    }
}

/// Prints notifications to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, title: &str, body: &str) -> Result<()> {
        info!(title, body, "Notification posted");
        println!("[{title}] {body}");
        Ok(())
    }
}

/// Capabilities of an interactive terminal, switched by configuration.
#[derive(Debug, Clone, Copy)]
pub struct TerminalProbe {
    voice: bool,
    notifications: bool,
}

impl TerminalProbe {
    pub fn new(voice: bool, notifications: bool) -> Self {
        Self { voice, notifications }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.voice.enabled, config.reminders.enabled)
    }
}

impl CapabilityProbe for TerminalProbe {
    fn speech_recognition(&self) -> bool {
        self.voice
    }

    fn speech_synthesis(&self) -> bool {
        self.voice
    }

    fn notification_permission(&self) -> NotificationPermission {
        if self.notifications {
            NotificationPermission::Granted
        } else {
            NotificationPermission::Denied
        }
    }
}
