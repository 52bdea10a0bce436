//! Adapters binding core ports to the terminal host and the shared state.
//!
//! The shell owns the single [`AppState`](healthprod_core::AppState); voice
//! commands reach it through [`StateShell`]. The terminal adapters stand in
//! for a microphone, a speaker and the system notification centre.

pub mod gateway;
pub mod shell;
pub mod terminal;

pub use gateway::UnconfiguredGateway;
pub use shell::StateShell;
pub use terminal::{ConsoleNotifier, ConsoleSynthesizer, LineRecognizer, TerminalProbe};
