//! Application context - dependency injection container

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use healthprod_core::{
    negotiate_capabilities, AiGateway, AppState, AssistantService, CapabilityProbe, ChatSession,
    DaySelection, FocusTimer, KnowledgeCardCache, Notifier, PhaseCompleted, SilentSynthesizer,
    SpeechSynthesizer, VoiceDispatcher, VoiceListener,
};
use healthprod_domain::constants::FOCUS_NOTIFICATION_TITLE;
use healthprod_domain::{AiPersonality, Capabilities, Config, HealthProdError, Page, Result};
use healthprod_infra::scheduling::ReminderSource;
use healthprod_infra::{
    DbManager, GeminiClient, ReminderScheduler, SchedulerError, SqliteKeyValueStore,
};
use parking_lot::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::adapters::{
    ConsoleNotifier, ConsoleSynthesizer, LineRecognizer, StateShell, TerminalProbe,
    UnconfiguredGateway,
};
use crate::utils::health::{ComponentHealth, HealthStatus};

const FOCUS_TICK: Duration = Duration::from_secs(1);
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

/// Host facilities injected into the context.
pub struct HostPorts {
    pub probe: Arc<dyn CapabilityProbe>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub notifier: Arc<dyn Notifier>,
    /// Only used when speech recognition is negotiated.
    pub microphone: Option<Arc<LineRecognizer>>,
    /// Overrides the gateway built from `config.ai`.
    pub gateway: Option<Arc<dyn AiGateway>>,
}

impl HostPorts {
    /// Interactive terminal: stdout for speech and notifications.
    pub fn terminal(config: &Config) -> Self {
        Self {
            probe: Arc::new(TerminalProbe::from_config(config)),
            synthesizer: Arc::new(ConsoleSynthesizer),
            notifier: Arc::new(ConsoleNotifier),
            microphone: Some(Arc::new(LineRecognizer::new())),
            gateway: None,
        }
    }
}

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub capabilities: Capabilities,

    // Shared state; critical sections never await
    pub state: Arc<RwLock<AppState>>,
    pub focus_timer: Arc<Mutex<FocusTimer>>,
    pub day_selection: Mutex<DaySelection>,
    pub chat: tokio::sync::Mutex<ChatSession>,

    // Services
    pub db: Arc<DbManager>,
    pub assistant: AssistantService,
    pub knowledge: KnowledgeCardCache,
    pub shell: Arc<StateShell>,
    pub notifier: Arc<dyn Notifier>,
    pub dispatcher: Arc<VoiceDispatcher>,
    pub microphone: Option<Arc<LineRecognizer>>,
    pub listener: Option<Arc<VoiceListener>>,

    // Schedulers
    pub reminder_scheduler: tokio::sync::Mutex<ReminderScheduler>,

    gateway_configured: bool,
    started: AtomicBool,
    cancellation: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

fn build_gateway(config: &Config) -> (Arc<dyn AiGateway>, bool) {
    match GeminiClient::from_config(&config.ai) {
        Ok(client) => {
            info!(model = client.model(), "AI gateway configured");
            (Arc::new(client), true)
        }
        Err(err) => {
            warn!(error = %err, "AI gateway unavailable, assistant will use fallbacks");
            (Arc::new(UnconfiguredGateway::new(err.to_string())), false)
        }
    }
}

impl AppContext {
    /// Wire up every service. Opens (and migrates) the database but starts
    /// no background work; see [`AppContext::start`].
    pub fn new(config: Config, ports: HostPorts) -> Result<Self> {
        let capabilities = negotiate_capabilities(ports.probe.as_ref());

        let db = Arc::new(DbManager::new(&config.storage.path, config.storage.pool_size)?);
        db.run_migrations()?;

        let (gateway, gateway_configured) = match ports.gateway {
            Some(gateway) => (gateway, true),
            None => build_gateway(&config),
        };
        let assistant = AssistantService::new(gateway);
        let knowledge =
            KnowledgeCardCache::new(Arc::new(SqliteKeyValueStore::new(Arc::clone(&db))));

        let mut initial = AppState::new(&config.rewards);
        initial.set_online(config.ai.online);
        let state = Arc::new(RwLock::new(initial));

        let shell = Arc::new(StateShell::new(Arc::clone(&state), assistant.clone()));
        let synthesizer: Arc<dyn SpeechSynthesizer> = if capabilities.speech_synthesis {
            ports.synthesizer
        } else {
            Arc::new(SilentSynthesizer)
        };
        let dispatcher = Arc::new(
            VoiceDispatcher::new(shell.clone(), synthesizer)
                .with_wake_phrase(config.voice.wake_phrase.clone()),
        );

        let microphone = ports.microphone.filter(|_| capabilities.speech_recognition);
        let listener = microphone.as_ref().map(|mic| {
            Arc::new(VoiceListener::new(mic.clone(), Arc::clone(&dispatcher)))
        });

        let source: Arc<dyn ReminderSource> = state.clone();
        let reminder_scheduler = ReminderScheduler::new(
            source,
            Arc::clone(&ports.notifier),
            capabilities,
            &config.reminders,
        );

        info!(
            db_path = %db.path().display(),
            voice = listener.is_some(),
            online = config.ai.online,
            "Application context initialised"
        );

        Ok(Self {
            config,
            capabilities,
            state,
            focus_timer: Arc::new(Mutex::new(FocusTimer::new())),
            day_selection: Mutex::new(DaySelection::default()),
            chat: tokio::sync::Mutex::new(ChatSession::new(AiPersonality::default())),
            db,
            assistant,
            knowledge,
            shell,
            notifier: ports.notifier,
            dispatcher,
            microphone,
            listener,
            reminder_scheduler: tokio::sync::Mutex::new(reminder_scheduler),
            gateway_configured,
            started: AtomicBool::new(false),
            cancellation: CancellationToken::new(),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Start background work: reminder polling, the focus ticker and the
    /// voice listening loop. A second call is a no-op.
    pub async fn start(&self) -> Result<()> {
        if self.started.swap(true, Ordering::AcqRel) {
            return Ok(());
        }

        if self.config.reminders.enabled {
            match self.reminder_scheduler.lock().await.start().await {
                Ok(()) => {}
                Err(SchedulerError::NotificationsDisabled) => {
                    info!("Notification permission not granted, reminders disabled");
                }
                Err(err) => return Err(err.into()),
            }
        }

        let mut tasks = self.tasks.lock();
        tasks.push(tokio::spawn(run_focus_ticker(
            Arc::clone(&self.state),
            Arc::clone(&self.focus_timer),
            Arc::clone(&self.notifier),
            self.capabilities,
            self.cancellation.child_token(),
        )));

        if let Some(listener) = &self.listener {
            let listener = Arc::clone(listener);
            let cancel = self.cancellation.child_token();
            tasks.push(tokio::spawn(async move { listener.run(cancel).await }));
        }

        info!(background_tasks = tasks.len(), "Background tasks started");
        Ok(())
    }

    pub fn is_online(&self) -> bool {
        self.state.read().is_online()
    }

    pub fn gateway_configured(&self) -> bool {
        self.gateway_configured
    }

    /// Perform a health check on all critical components
    pub async fn health_check(&self) -> HealthStatus {
        let mut status = HealthStatus::new();

        status = status.add_component(self.check_storage_health().await);

        status = status.add_component(if self.gateway_configured {
            ComponentHealth::healthy("ai_gateway")
        } else {
            ComponentHealth::unhealthy("ai_gateway", "not configured, using fallbacks")
        });

        let reminders = if !self.config.reminders.enabled {
            ComponentHealth::healthy_with("reminders", "disabled")
        } else if !self.capabilities.notifications_granted() {
            ComponentHealth::healthy_with("reminders", "notification permission not granted")
        } else if self.reminder_scheduler.lock().await.is_running() {
            ComponentHealth::healthy("reminders")
        } else {
            ComponentHealth::unhealthy("reminders", "scheduler not running")
        };
        status = status.add_component(reminders);

        status = status.add_component(match &self.listener {
            Some(_) => ComponentHealth::healthy("voice"),
            None => ComponentHealth::healthy_with("voice", "speech recognition unavailable"),
        });

        // Stateless, always healthy
        status = status.add_component(ComponentHealth::healthy("focus_timer"));

        status.calculate_score();
        status
    }

    /// Check storage health by running a trivial query off the async runtime.
    async fn check_storage_health(&self) -> ComponentHealth {
        let db = Arc::clone(&self.db);
        match tokio::task::spawn_blocking(move || db.health_check()).await {
            Ok(Ok(())) => ComponentHealth::healthy("storage"),
            Ok(Err(err)) => ComponentHealth::unhealthy("storage", err.to_string()),
            Err(err) => {
                ComponentHealth::unhealthy("storage", format!("health check panicked: {err}"))
            }
        }
    }

    /// Stop background work and wait for it to finish.
    ///
    /// Idempotent. Failures are logged; only a task that outlives
    /// the shutdown timeout is reported as an error.
    pub async fn shutdown(&self) -> Result<()> {
        info!("shutdown called on AppContext");

        self.cancellation.cancel();

        if let Some(listener) = &self.listener {
            if let Err(err) = listener.stop().await {
                warn!(error = %err, "Failed to stop voice listener");
            }
        }

        {
            let mut scheduler = self.reminder_scheduler.lock().await;
            if scheduler.is_running() {
                if let Err(err) = scheduler.stop().await {
                    warn!(error = %err, "Failed to stop reminder scheduler");
                }
            }
        }

        let handles: Vec<JoinHandle<()>> = std::mem::take(&mut *self.tasks.lock());
        if handles.is_empty() {
            return Ok(());
        }

        let results = tokio::time::timeout(SHUTDOWN_TIMEOUT, futures::future::join_all(handles))
            .await
            .map_err(|_| {
                error!(timeout_secs = SHUTDOWN_TIMEOUT.as_secs(), "Background tasks did not stop");
                HealthProdError::Internal("background tasks did not stop in time".into())
            })?;

        for result in results {
            if let Err(err) = result {
                warn!(error = %err, "Background task ended abnormally");
            }
        }

        info!("AppContext shut down");
        Ok(())
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}

/// Advance the focus timer by one second.
///
/// A pending auto-start request is consumed only while the focus page is
/// open.
pub(crate) fn focus_step(
    state: &RwLock<AppState>,
    timer: &Mutex<FocusTimer>,
) -> Option<PhaseCompleted> {
    let auto_start = {
        let mut state = state.write();
        state.current_page() == Page::Focus && state.take_focus_auto_start()
    };

    let mut timer = timer.lock();
    if timer.apply_auto_start(auto_start) {
        debug!("Focus timer auto-started");
    }
    timer.tick()
}

async fn run_focus_ticker(
    state: Arc<RwLock<AppState>>,
    timer: Arc<Mutex<FocusTimer>>,
    notifier: Arc<dyn Notifier>,
    capabilities: Capabilities,
    cancel: CancellationToken,
) {
    let mut interval = tokio::time::interval(FOCUS_TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        let Some(completed) = focus_step(&state, &timer) else {
            continue;
        };
        info!(finished = ?completed.finished, next = ?completed.next, "Focus phase completed");

        if !capabilities.notifications_granted() {
            continue;
        }
        if let Err(err) = notifier.notify(FOCUS_NOTIFICATION_TITLE, completed.notification_body()) {
            warn!(error = %err, "Failed to post focus notification");
        }
    }

    debug!("Focus ticker stopped");
}
