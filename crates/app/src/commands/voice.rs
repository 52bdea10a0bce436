//! Voice commands: direct transcripts and the listening loop

use healthprod_core::DispatchOutcome;
use healthprod_domain::{HealthProdError, Result};

use crate::context::AppContext;

pub(crate) fn describe(outcome: &DispatchOutcome) -> String {
    match outcome {
        DispatchOutcome::Ignored => "No wake phrase heard.".to_string(),
        DispatchOutcome::Unrecognized => "Sorry, I didn't catch a command.".to_string(),
        DispatchOutcome::Navigated(page) => format!("Opened {page}."),
        DispatchOutcome::FocusStarted => "Focus session starting.".to_string(),
        DispatchOutcome::ReportSpoken { score } => format!("Report read out (score {score})."),
        DispatchOutcome::ReportUnavailable => "Report unavailable.".to_string(),
        DispatchOutcome::ReportAlreadyInFlight => "A report is already being prepared.".to_string(),
    }
}

/// Dispatch a transcript as if it had just been recognized.
pub async fn say(ctx: &AppContext, transcript: &str) -> String {
    describe(&ctx.dispatcher.handle_transcript(transcript).await)
}

/// Feed an utterance to the microphone; the listening loop handles it.
pub fn hear(ctx: &AppContext, utterance: &str) -> Result<String> {
    let microphone = ctx
        .microphone
        .as_ref()
        .ok_or_else(|| HealthProdError::Unsupported("speech recognition".into()))?;
    Ok(if microphone.feed(utterance) {
        "Heard.".to_string()
    } else {
        "Not listening. Use `listen` first.".to_string()
    })
}

pub async fn toggle_listening(ctx: &AppContext) -> Result<String> {
    let listener = ctx
        .listener
        .as_ref()
        .ok_or_else(|| HealthProdError::Unsupported("speech recognition".into()))?;
    let listening = listener.toggle().await?;
    Ok(if listening {
        format!("Listening. Start with \"{}\".", ctx.dispatcher.wake_phrase())
    } else {
        "Stopped listening.".to_string()
    })
}
