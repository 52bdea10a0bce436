//! Shell utilities: logging bootstrap, command helpers and health checks

pub mod command_helpers;
pub mod health;
pub mod logging;
