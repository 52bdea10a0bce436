use std::time::Duration;

use healthprod_domain::HealthProdError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Set to any non-empty value (other than `0`/`false`) for JSON log lines.
pub const LOG_JSON_VAR: &str = "HEALTHPROD_LOG_JSON";

/// Install the global tracing subscriber.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Safe to call more
/// than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json_requested(std::env::var(LOG_JSON_VAR).ok().as_deref()) {
        tracing_subscriber::fmt().with_env_filter(filter).json().with_target(true).try_init()
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init()
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

fn json_requested(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") => false,
        Some(v) => !(v == "0" || v.eq_ignore_ascii_case("false")),
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// # Parameters
/// * `command` - Logical command identifier (e.g. `"planner::prioritize"`).
/// * `elapsed` - Duration the command execution took.
/// * `success` - Whether the command completed successfully.
/// * `error_type` - Stable error label on failure, see [`error_label`].
///
/// Callers must avoid forwarding user input in `command`.
#[inline]
pub fn log_command_execution(
    command: &str,
    elapsed: Duration,
    success: bool,
    error_type: Option<&str>,
) {
    let duration_ms = elapsed.as_millis() as u64;

    if success {
        info!(command, duration_ms, "command_execution_success");
    } else {
        warn!(
            command,
            duration_ms,
            error_type = error_type.unwrap_or("unknown"),
            "command_execution_failure"
        );
    }
}

/// Convert a `HealthProdError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &HealthProdError) -> &'static str {
    error.label()
}
