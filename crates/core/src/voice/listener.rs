//! Self-healing listening loop
//!
//! Idle ⇄ Listening, toggled by the user. While the logical listening flag
//! is set, a recognizer session that ends on its own is restarted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use healthprod_domain::Result;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::dispatcher::VoiceDispatcher;
use super::ports::{RecognitionEvent, SpeechRecognizer};

pub struct VoiceListener {
    recognizer: Arc<dyn SpeechRecognizer>,
    dispatcher: Arc<VoiceDispatcher>,
    should_listen: AtomicBool,
}

impl VoiceListener {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, dispatcher: Arc<VoiceDispatcher>) -> Self {
        Self { recognizer, dispatcher, should_listen: AtomicBool::new(false) }
    }

    pub fn is_listening(&self) -> bool {
        self.should_listen.load(Ordering::Acquire)
    }

    pub async fn start(&self) -> Result<()> {
        if self.should_listen.swap(true, Ordering::AcqRel) {
            return Ok(());
        }
        info!("Voice listening started");
        if let Err(err) = self.recognizer.start().await {
            self.should_listen.store(false, Ordering::Release);
            return Err(err);
        }
        Ok(())
    }

    /// Stop listening. Suppresses any further automatic restart.
    pub async fn stop(&self) -> Result<()> {
        if !self.should_listen.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        info!("Voice listening stopped");
        self.recognizer.stop().await
    }

    /// Flip between idle and listening. Returns the new state.
    pub async fn toggle(&self) -> Result<bool> {
        if self.is_listening() {
            self.stop().await?;
        } else {
            self.start().await?;
        }
        Ok(self.is_listening())
    }

    /// Consume recognizer events until cancelled or the recognizer closes.
    ///
    /// Transcripts are dispatched concurrently so a slow report does not
    /// block recognition. Dispatches still running at exit are awaited.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut dispatches = JoinSet::new();

        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = self.recognizer.next_event() => event,
            };
            let Some(event) = event else {
                debug!("Speech recognizer closed");
                break;
            };

            match event {
                RecognitionEvent::Final(transcript) => {
                    let dispatcher = Arc::clone(&self.dispatcher);
                    dispatches.spawn(async move {
                        let outcome = dispatcher.handle_transcript(&transcript).await;
                        debug!(outcome = ?outcome, "Voice transcript handled");
                    });
                }
                RecognitionEvent::Interim(_) => {}
                RecognitionEvent::Ended => {
                    if self.is_listening() {
                        debug!("Recognition ended while listening, restarting");
                        if let Err(err) = self.recognizer.start().await {
                            self.should_listen.store(false, Ordering::Release);
                            warn!(error = %err, "Speech recognition restart failed, now idle");
                        }
                    }
                }
                RecognitionEvent::Error(message) => {
                    warn!(error = %message, "Speech recognition error");
                }
            }

            while dispatches.try_join_next().is_some() {}
        }

        while dispatches.join_next().await.is_some() {}
    }
}
