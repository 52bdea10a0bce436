//! Voice command dispatch against mock shell and synthesizer

mod support;

use std::sync::Arc;

use healthprod_core::voice::{DispatchOutcome, VoiceDispatcher};
use healthprod_domain::{DailyReport, Page};
use support::voice::{MockShell, RecordingSynthesizer};
use tokio::sync::Notify;

fn report(score: u8) -> DailyReport {
    DailyReport {
        productivity_score: score,
        summary: "You balanced deep work with a run.".into(),
        recommendations: "Sleep earlier.".into(),
        next_day_todo_list: vec!["Plan the week".into()],
    }
}

fn dispatcher(shell: &MockShell, speech: &RecordingSynthesizer) -> VoiceDispatcher {
    VoiceDispatcher::new(Arc::new(shell.clone()), Arc::new(speech.clone()))
}

#[tokio::test]
async fn add_task_navigates_without_report() {
    let shell = MockShell::new();
    let speech = RecordingSynthesizer::default();

    let outcome = dispatcher(&shell, &speech).handle_transcript("Hey AI add new task").await;

    assert_eq!(outcome, DispatchOutcome::Navigated(Page::Tasks));
    assert_eq!(shell.pages(), vec![Page::Tasks]);
    assert_eq!(shell.report_calls(), 0);
    assert_eq!(speech.spoken(), vec!["Navigating to tasks."]);
}

#[tokio::test]
async fn focus_command_sets_auto_start_then_navigates() {
    let shell = MockShell::new();
    let speech = RecordingSynthesizer::default();

    let outcome =
        dispatcher(&shell, &speech).handle_transcript("hey ai start my focus timer").await;

    assert_eq!(outcome, DispatchOutcome::FocusStarted);
    assert_eq!(shell.focus_auto_start(), Some(true));
    assert_eq!(shell.pages(), vec![Page::Focus]);
    assert_eq!(speech.spoken(), vec!["Starting your focus session."]);
}

#[tokio::test]
async fn transcript_without_wake_phrase_does_nothing() {
    let shell = MockShell::new();
    let speech = RecordingSynthesizer::default();
    let dispatcher = dispatcher(&shell, &speech);

    assert_eq!(dispatcher.handle_transcript("what's the weather").await, DispatchOutcome::Ignored);
    assert_eq!(dispatcher.handle_transcript("hey ai").await, DispatchOutcome::Ignored);
    assert_eq!(
        dispatcher.handle_transcript("hey ai sing a song").await,
        DispatchOutcome::Unrecognized
    );

    assert!(shell.pages().is_empty());
    assert_eq!(shell.focus_auto_start(), None);
    assert!(speech.spoken().is_empty());
}

#[tokio::test]
async fn report_command_speaks_score_and_summary() {
    let shell = MockShell::new().with_report(report(82));
    let speech = RecordingSynthesizer::default();

    let outcome =
        dispatcher(&shell, &speech).handle_transcript("hey ai give me today's report").await;

    assert_eq!(outcome, DispatchOutcome::ReportSpoken { score: 82 });
    assert_eq!(
        speech.spoken(),
        vec![
            "Generating your daily report now.".to_string(),
            "Report generated. Your productivity score is 82. Here is your summary: You balanced \
             deep work with a run."
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn missing_report_is_apologised_for() {
    let shell = MockShell::new();
    let speech = RecordingSynthesizer::default();

    let outcome = dispatcher(&shell, &speech).handle_transcript("hey ai progress report").await;

    assert_eq!(outcome, DispatchOutcome::ReportUnavailable);
    assert_eq!(speech.spoken().last().unwrap(), "Sorry, I couldn't generate the report right now.");
}

#[tokio::test]
async fn overlapping_report_request_is_ignored() {
    let gate = Arc::new(Notify::new());
    let shell = MockShell::new().with_report(report(64)).with_gate(Arc::clone(&gate));
    let speech = RecordingSynthesizer::default();
    let dispatcher = Arc::new(dispatcher(&shell, &speech));

    let first = tokio::spawn({
        let dispatcher = Arc::clone(&dispatcher);
        async move { dispatcher.handle_transcript("hey ai progress report").await }
    });
    while !dispatcher.report_in_flight() {
        tokio::task::yield_now().await;
    }

    let second = dispatcher.handle_transcript("hey ai today's report").await;
    assert_eq!(second, DispatchOutcome::ReportAlreadyInFlight);

    gate.notify_one();
    assert_eq!(first.await.unwrap(), DispatchOutcome::ReportSpoken { score: 64 });
    assert!(!dispatcher.report_in_flight());
    assert_eq!(shell.report_calls(), 1);

    // A new request is accepted once the first finished.
    gate.notify_one();
    assert_eq!(
        dispatcher.handle_transcript("hey ai today's report").await,
        DispatchOutcome::ReportSpoken { score: 64 }
    );
}

#[tokio::test]
async fn custom_wake_phrase_is_honoured() {
    let shell = MockShell::new();
    let speech = RecordingSynthesizer::default();
    let dispatcher = dispatcher(&shell, &speech).with_wake_phrase("Computer");

    assert_eq!(dispatcher.handle_transcript("hey ai add task").await, DispatchOutcome::Ignored);
    assert_eq!(
        dispatcher.handle_transcript("computer add task").await,
        DispatchOutcome::Navigated(Page::Tasks)
    );
}
