//! Mock voice ports

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use healthprod_core::voice::{RecognitionEvent, ShellActions, SpeechRecognizer, SpeechSynthesizer};
use healthprod_domain::{DailyReport, HealthProdError, Page, Result as DomainResult};
use tokio::sync::{mpsc, Notify};

/// Records everything spoken.
#[derive(Default, Clone)]
pub struct RecordingSynthesizer {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSynthesizer {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}

/// Shell that records navigation and returns a canned report.
///
/// With a gate installed, `generate_report` waits for the gate to be
/// notified before answering.
#[derive(Default, Clone)]
pub struct MockShell {
    pages: Arc<Mutex<Vec<Page>>>,
    focus_auto_start: Arc<Mutex<Option<bool>>>,
    report: Option<DailyReport>,
    report_calls: Arc<AtomicUsize>,
    gate: Option<Arc<Notify>>,
}

impl MockShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, report: DailyReport) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_gate(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn pages(&self) -> Vec<Page> {
        self.pages.lock().unwrap().clone()
    }

    pub fn focus_auto_start(&self) -> Option<bool> {
        *self.focus_auto_start.lock().unwrap()
    }

    pub fn report_calls(&self) -> usize {
        self.report_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ShellActions for MockShell {
    fn navigate(&self, page: Page) {
        self.pages.lock().unwrap().push(page);
    }

    fn set_focus_auto_start(&self, enabled: bool) {
        *self.focus_auto_start.lock().unwrap() = Some(enabled);
    }

    async fn generate_report(&self) -> Option<DailyReport> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.report.clone()
    }
}

/// Recognizer fed from a channel held by the test.
pub struct ScriptedRecognizer {
    events: tokio::sync::Mutex<mpsc::UnboundedReceiver<RecognitionEvent>>,
    starts: AtomicUsize,
    stops: AtomicUsize,
    start_limit: Option<usize>,
}

impl ScriptedRecognizer {
    pub fn new() -> (Self, mpsc::UnboundedSender<RecognitionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let recognizer = Self {
            events: tokio::sync::Mutex::new(rx),
            starts: AtomicUsize::new(0),
            stops: AtomicUsize::new(0),
            start_limit: None,
        };
        (recognizer, tx)
    }

    /// Fail every `start` after the first `limit` calls.
    pub fn with_start_limit(mut self, limit: usize) -> Self {
        self.start_limit = Some(limit);
        self
    }

    pub fn starts(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn start(&self) -> DomainResult<()> {
        let previous = self.starts.fetch_add(1, Ordering::SeqCst);
        match self.start_limit {
            Some(limit) if previous >= limit => {
                Err(HealthProdError::Unsupported("microphone unavailable".into()))
            }
            _ => Ok(()),
        }
    }

    async fn stop(&self) -> DomainResult<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn next_event(&self) -> Option<RecognitionEvent> {
        self.events.lock().await.recv().await
    }
}
