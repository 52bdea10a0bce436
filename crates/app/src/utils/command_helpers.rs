//! Command execution helpers
//!
//! Provides the timing and logging wrapper every shell command runs through.

use std::future::Future;
use std::time::Instant;

use healthprod_domain::Result as DomainResult;

use crate::utils::logging::{error_label, log_command_execution};

/// Execute a command with automatic timing and logging
///
/// # Example
///
/// ```rust,ignore
/// execute_logged("rewards::unlock", || async {
///     ctx.state.write().unlock_reward(&id).map(|r| r.name.clone())
/// })
/// .await
/// ```
pub async fn execute_logged<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    let elapsed = start.elapsed();
    let success = result.is_ok();
    let error_type = result.as_ref().err().map(error_label);

    log_command_execution(command_name, elapsed, success, error_type);

    result
}
