//! Periodic reminder notifications.
//!
//! Polls the reminder list on a fixed interval and posts a notification for
//! every reminder whose HH:MM matches the current local minute. De-duplication
//! within a minute is delegated to [`ReminderMonitor`], so the poll interval
//! only needs to be shorter than a minute.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use healthprod_core::{AppState, Notifier};
//! use healthprod_domain::{Capabilities, ReminderConfig};
//! use healthprod_infra::scheduling::{ReminderScheduler, SchedulerResult};
//! use parking_lot::RwLock;
//!
//! # async fn example(
//! #     notifier: Arc<dyn Notifier>,
//! #     capabilities: Capabilities,
//! # ) -> SchedulerResult<()> {
//! let state = Arc::new(RwLock::new(AppState::default()));
//! let mut scheduler =
//!     ReminderScheduler::new(state, notifier, capabilities, &ReminderConfig::default());
//!
//! scheduler.start().await?;
//! // ... application runs ...
//! scheduler.stop().await?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use healthprod_core::{AppState, Notifier, ReminderMonitor};
use healthprod_domain::{Capabilities, Reminder, ReminderConfig};
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::error::{SchedulerError, SchedulerResult};

/// Where the scheduler reads the current reminder list from.
pub trait ReminderSource: Send + Sync {
    fn reminders(&self) -> Vec<Reminder>;
}

impl ReminderSource for RwLock<AppState> {
    fn reminders(&self) -> Vec<Reminder> {
        self.read().reminders().to_vec()
    }
}

/// Wall clock used for the minute comparison.
pub type Clock = Arc<dyn Fn() -> DateTime<Local> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct ReminderSchedulerConfig {
    pub poll_interval: Duration,
    /// How long `stop` waits for the polling task to exit.
    pub join_timeout: Duration,
}

impl Default for ReminderSchedulerConfig {
    fn default() -> Self {
        Self::from(&ReminderConfig::default())
    }
}

impl From<&ReminderConfig> for ReminderSchedulerConfig {
    fn from(config: &ReminderConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(1)),
            join_timeout: Duration::from_secs(5),
        }
    }
}

pub struct ReminderScheduler {
    source: Arc<dyn ReminderSource>,
    notifier: Arc<dyn Notifier>,
    capabilities: Capabilities,
    config: ReminderSchedulerConfig,
    clock: Clock,
    cancellation: CancellationToken,
    task_handle: Option<JoinHandle<()>>,
}

impl ReminderScheduler {
    pub fn new(
        source: Arc<dyn ReminderSource>,
        notifier: Arc<dyn Notifier>,
        capabilities: Capabilities,
        config: &ReminderConfig,
    ) -> Self {
        Self::with_config(source, notifier, capabilities, ReminderSchedulerConfig::from(config))
    }

    pub fn with_config(
        source: Arc<dyn ReminderSource>,
        notifier: Arc<dyn Notifier>,
        capabilities: Capabilities,
        config: ReminderSchedulerConfig,
    ) -> Self {
        Self {
            source,
            notifier,
            capabilities,
            config,
            clock: Arc::new(Local::now),
            cancellation: CancellationToken::new(),
            task_handle: None,
        }
    }

    /// Replace the wall clock.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Spawn the polling task.
    ///
    /// # Errors
    /// `NotificationsDisabled` unless notification permission was granted,
    /// `AlreadyRunning` on a second call without `stop`.
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> SchedulerResult<()> {
        if !self.capabilities.notifications_granted() {
            return Err(SchedulerError::NotificationsDisabled);
        }
        if self.is_running() {
            return Err(SchedulerError::AlreadyRunning);
        }

        self.cancellation = CancellationToken::new();

        let source = Arc::clone(&self.source);
        let notifier = Arc::clone(&self.notifier);
        let clock = Arc::clone(&self.clock);
        let interval = self.config.poll_interval;
        let cancel = self.cancellation.clone();

        self.task_handle = Some(tokio::spawn(async move {
            Self::poll_loop(source, notifier, clock, interval, cancel).await;
        }));

        info!(poll_interval_secs = interval.as_secs(), "Reminder scheduler started");
        Ok(())
    }

    /// Cancel the polling task and wait for it to exit.
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> SchedulerResult<()> {
        let handle = match self.task_handle.take() {
            Some(handle) if !handle.is_finished() => handle,
            _ => return Err(SchedulerError::NotRunning),
        };

        self.cancellation.cancel();

        let join_timeout = self.config.join_timeout;
        tokio::time::timeout(join_timeout, handle)
            .await
            .map_err(|_| SchedulerError::Timeout { duration: join_timeout })??;

        info!("Reminder scheduler stopped");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.task_handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    async fn poll_loop(
        source: Arc<dyn ReminderSource>,
        notifier: Arc<dyn Notifier>,
        clock: Clock,
        interval: Duration,
        cancel: CancellationToken,
    ) {
        let mut monitor = ReminderMonitor::new();
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Reminder loop cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    let reminders = source.reminders();
                    let now = clock();
                    let posted = monitor.fire_due(&reminders, &now, notifier.as_ref());
                    debug!(reminders = reminders.len(), posted, "Reminder poll complete");
                }
            }
        }
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.cancellation.cancel();
    }
}
