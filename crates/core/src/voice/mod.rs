//! Voice control
//!
//! Transcripts gated by a wake phrase are mapped onto a small set of
//! intents. See [`VoiceDispatcher::handle_transcript`].

pub mod command;
pub mod dispatcher;
pub mod listener;
pub mod ports;

pub use command::{extract_command, VoiceCommand};
pub use dispatcher::{DispatchOutcome, VoiceDispatcher};
pub use listener::VoiceListener;
pub use ports::{
    RecognitionEvent, ShellActions, SilentSynthesizer, SpeechRecognizer, SpeechSynthesizer,
};
