//! # HealthProd App
//!
//! Application layer - composition root and terminal shell.
//!
//! This crate contains:
//! - Application context (dependency injection, background task lifecycle)
//! - Shell commands (terminal input → core services)
//! - Terminal adapters for speech, notifications and capability probing
//! - Logging bootstrap and health reporting
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Owns the single authoritative `AppState`

pub mod adapters;
pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::{execute, Command};
pub use context::{AppContext, HostPorts};
