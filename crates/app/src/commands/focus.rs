//! Focus timer controls

use healthprod_core::FocusPhase;

use super::FocusAction;
use crate::context::AppContext;

pub fn control(ctx: &AppContext, action: FocusAction) -> String {
    let mut timer = ctx.focus_timer.lock();
    match action {
        FocusAction::Start => timer.start(),
        FocusAction::Pause => timer.pause(),
        FocusAction::Toggle => {
            timer.toggle();
        }
        FocusAction::Reset => timer.reset(),
        FocusAction::Status => {}
    }

    let phase = match timer.phase() {
        FocusPhase::Focus => "Focus",
        FocusPhase::Break => "Break",
    };
    format!(
        "{phase} {} ({}) - {} sessions completed",
        timer.display(),
        if timer.is_running() { "running" } else { "paused" },
        timer.completed_focus_sessions()
    )
}
