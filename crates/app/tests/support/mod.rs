//! Shared test helpers for `healthprod-app` integration tests.
//!
//! A scripted AI gateway and recording host ports, plus a context builder
//! backed by a temporary SQLite file.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use healthprod_app::{AppContext, HostPorts};
use healthprod_core::{AiGateway, CapabilityProbe, Notifier, SpeechSynthesizer};
use healthprod_domain::{
    Activity, AiPersonality, ChatMessage, Config, DailyReport, HealthProdError, KnowledgeCard,
    MealImage, NotificationPermission, PrioritizedTask, Result as DomainResult, TaskDraft,
};
use tempfile::TempDir;

/// Gateway with canned answers. Unscripted operations fail.
#[derive(Default, Clone)]
pub struct ScriptedGateway {
    pub report: Option<DailyReport>,
    pub priorities: Option<Vec<PrioritizedTask>>,
    pub card: Option<KnowledgeCard>,
    pub reply: Option<String>,
    pub calls: Arc<AtomicUsize>,
}

impl ScriptedGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer<T: Clone>(&self, value: &Option<T>) -> DomainResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        value.clone().ok_or_else(|| HealthProdError::Ai("not scripted".into()))
    }
}

#[async_trait]
impl AiGateway for ScriptedGateway {
    async fn generate_insights(&self, _activities: &[Activity]) -> DomainResult<String> {
        self.answer(&None)
    }

    async fn generate_daily_report(&self, _activities: &[Activity]) -> DomainResult<DailyReport> {
        self.answer(&self.report)
    }

    async fn prioritize_tasks(&self, _tasks: &[TaskDraft]) -> DomainResult<Vec<PrioritizedTask>> {
        self.answer(&self.priorities)
    }

    async fn daily_knowledge_card(&self) -> DomainResult<KnowledgeCard> {
        self.answer(&self.card)
    }

    async fn analyze_meal(&self, _image: &MealImage) -> DomainResult<String> {
        self.answer(&None)
    }

    async fn chat(
        &self,
        _personality: AiPersonality,
        _history: &[ChatMessage],
        _message: &str,
    ) -> DomainResult<String> {
        self.answer(&self.reply)
    }
}

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

#[derive(Default, Clone)]
pub struct RecordingNotifier {
    posted: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    pub fn posted(&self) -> Vec<(String, String)> {
        self.posted.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, title: &str, body: &str) -> DomainResult<()> {
        self.posted.lock().unwrap().push((title.to_string(), body.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedProbe {
    pub speech: bool,
    pub notifications: NotificationPermission,
}

impl CapabilityProbe for FixedProbe {
    fn speech_recognition(&self) -> bool {
        self.speech
    }

    fn speech_synthesis(&self) -> bool {
        self.speech
    }

    fn notification_permission(&self) -> NotificationPermission {
        self.notifications
    }
}

pub struct TestApp {
    pub ctx: AppContext,
    pub gateway: ScriptedGateway,
    pub speech: RecordingSynthesizer,
    pub notifier: RecordingNotifier,
    _temp_dir: TempDir,
}

/// Build a context over a fresh database with the given probe answers.
pub fn build(gateway: ScriptedGateway, probe: FixedProbe) -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir should be created");
    let mut config = Config::default();
    config.storage.path = temp_dir.path().join("healthprod.db").to_string_lossy().into_owned();
    config.storage.pool_size = 2;

    let speech = RecordingSynthesizer::default();
    let notifier = RecordingNotifier::default();
    let ports = HostPorts {
        probe: Arc::new(probe),
        synthesizer: Arc::new(speech.clone()),
        notifier: Arc::new(notifier.clone()),
        microphone: Some(Arc::new(healthprod_app::adapters::LineRecognizer::new())),
        gateway: Some(Arc::new(gateway.clone())),
    };

    let ctx = AppContext::new(config, ports).expect("context should build");
    TestApp { ctx, gateway, speech, notifier, _temp_dir: temp_dir }
}

/// Voice and notifications both available.
pub fn full_host() -> FixedProbe {
    FixedProbe { speech: true, notifications: NotificationPermission::Granted }
}

/// Neither voice nor notifications.
pub fn headless_host() -> FixedProbe {
    FixedProbe { speech: false, notifications: NotificationPermission::Denied }
}
