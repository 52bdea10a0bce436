use std::sync::Arc;

use async_trait::async_trait;
use chrono::Local;
use healthprod_core::{AppState, AssistantService, ShellActions};
use healthprod_domain::{DailyReport, Page};
use parking_lot::RwLock;
use tracing::debug;

/// [`ShellActions`] over the shared application state.
pub struct StateShell {
    state: Arc<RwLock<AppState>>,
    assistant: AssistantService,
}

impl StateShell {
    pub fn new(state: Arc<RwLock<AppState>>, assistant: AssistantService) -> Self {
        Self { state, assistant }
    }
}

#[async_trait]
impl ShellActions for StateShell {
    fn navigate(&self, page: Page) {
        debug!(page = %page, "Navigating");
        self.state.write().navigate(page);
    }

    fn set_focus_auto_start(&self, enabled: bool) {
        self.state.write().set_focus_auto_start(enabled);
    }

    /// Report over today's activities in local time. `None` while offline.
    async fn generate_report(&self) -> Option<DailyReport> {
        let today = {
            let state = self.state.read();
            if !state.is_online() {
                debug!("Offline, skipping daily report");
                return None;
            }
            state.activities_on(Local::now().date_naive(), &Local)
        };
        Some(self.assistant.daily_report(&today).await)
    }
}
