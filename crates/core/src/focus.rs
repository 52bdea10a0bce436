//! Pomodoro-style focus timer
//!
//! Driven by one [`FocusTimer::tick`] per elapsed second. When a phase runs
//! out the timer pauses and flips to the other phase, so every session is
//! started explicitly (or through the voice auto-start flag).

use healthprod_domain::constants::{BREAK_SESSION_SECS, FOCUS_SESSION_SECS};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusPhase {
    Focus,
    Break,
}

impl FocusPhase {
    pub fn next(self) -> Self {
        match self {
            Self::Focus => Self::Break,
            Self::Break => Self::Focus,
        }
    }
}

/// Emitted by [`FocusTimer::tick`] when a phase ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseCompleted {
    pub finished: FocusPhase,
    pub next: FocusPhase,
}

impl PhaseCompleted {
    /// Body of the end-of-phase notification.
    pub fn notification_body(&self) -> &'static str {
        match self.finished {
            FocusPhase::Focus => "Time for a break!",
            FocusPhase::Break => "Time to get back to focus!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusTimer {
    phase: FocusPhase,
    remaining_secs: u32,
    running: bool,
    focus_secs: u32,
    break_secs: u32,
    completed_focus_sessions: u32,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::with_durations(FOCUS_SESSION_SECS, BREAK_SESSION_SECS)
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Custom session lengths; zero is raised to one second.
    pub fn with_durations(focus_secs: u32, break_secs: u32) -> Self {
        let focus_secs = focus_secs.max(1);
        Self {
            phase: FocusPhase::Focus,
            remaining_secs: focus_secs,
            running: false,
            focus_secs,
            break_secs: break_secs.max(1),
            completed_focus_sessions: 0,
        }
    }

    pub fn phase(&self) -> FocusPhase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_focus_sessions(&self) -> u32 {
        self.completed_focus_sessions
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) -> bool {
        self.running = !self.running;
        self.running
    }

    /// Back to a paused, full-length focus phase.
    pub fn reset(&mut self) {
        self.phase = FocusPhase::Focus;
        self.remaining_secs = self.focus_secs;
        self.running = false;
    }

    /// Start the timer if `auto_start` is set. Returns whether it started.
    pub fn apply_auto_start(&mut self, auto_start: bool) -> bool {
        if auto_start {
            self.start();
        }
        auto_start
    }

    /// Advance one second. Does nothing while paused.
    pub fn tick(&mut self) -> Option<PhaseCompleted> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let finished = self.phase;
        if finished == FocusPhase::Focus {
            self.completed_focus_sessions += 1;
        }
        self.phase = finished.next();
        self.remaining_secs = match self.phase {
            FocusPhase::Focus => self.focus_secs,
            FocusPhase::Break => self.break_secs,
        };
        self.running = false;
        Some(PhaseCompleted { finished, next: self.phase })
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_paused_at_full_focus_session() {
        let timer = FocusTimer::new();
        assert_eq!(timer.phase(), FocusPhase::Focus);
        assert_eq!(timer.display(), "25:00");
        assert!(!timer.is_running());
    }

    #[test]
    fn paused_timer_does_not_count_down() {
        let mut timer = FocusTimer::new();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), FOCUS_SESSION_SECS);
    }

    #[test]
    fn cycles_focus_break_focus() {
        let mut timer = FocusTimer::with_durations(3, 2);
        timer.start();
        assert!(timer.tick().is_none());
        assert_eq!(timer.display(), "00:02");
        assert!(timer.tick().is_none());

        let done = timer.tick().unwrap();
        assert_eq!(done, PhaseCompleted { finished: FocusPhase::Focus, next: FocusPhase::Break });
        assert_eq!(done.notification_body(), "Time for a break!");
        assert!(!timer.is_running());
        assert_eq!(timer.remaining_secs(), 2);
        assert_eq!(timer.completed_focus_sessions(), 1);

        timer.start();
        timer.tick();
        let done = timer.tick().unwrap();
        assert_eq!(done.next, FocusPhase::Focus);
        assert_eq!(done.notification_body(), "Time to get back to focus!");
        assert_eq!(timer.remaining_secs(), 3);
    }

    #[test]
    fn reset_returns_to_focus() {
        let mut timer = FocusTimer::with_durations(1, 5);
        timer.start();
        timer.tick();
        assert_eq!(timer.phase(), FocusPhase::Break);

        timer.reset();
        assert_eq!(timer.phase(), FocusPhase::Focus);
        assert_eq!(timer.remaining_secs(), 1);
    }

    #[test]
    fn auto_start_flag_starts_timer() {
        let mut timer = FocusTimer::new();
        assert!(!timer.apply_auto_start(false));
        assert!(!timer.is_running());
        assert!(timer.apply_auto_start(true));
        assert!(timer.is_running());
    }
}
