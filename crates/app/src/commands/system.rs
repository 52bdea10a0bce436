//! Connectivity, navigation and health

use healthprod_domain::{HealthProdError, Page, Result};

use crate::context::AppContext;

pub fn set_online(ctx: &AppContext, online: bool) -> String {
    ctx.state.write().set_online(online);
    if online {
        "Back online.".to_string()
    } else {
        "Offline mode: AI features will use cached data only.".to_string()
    }
}

pub fn navigate(ctx: &AppContext, page: Page) -> String {
    ctx.state.write().navigate(page);
    format!("Now on {page}.")
}

pub async fn health(ctx: &AppContext) -> String {
    ctx.health_check().await.render()
}

/// Snapshot of the whole application state as pretty JSON.
pub fn export(ctx: &AppContext) -> Result<String> {
    let snapshot = ctx.state.read().clone();
    serde_json::to_string_pretty(&snapshot)
        .map_err(|e| HealthProdError::Internal(format!("failed to serialize state: {e}")))
}
