//! Cursor blink timer.
//!
//! An explicit state machine rather than a recurring closure with a flag:
//! the field is either `Stopped` or running with the cursor hidden/visible,
//! and every transition is driven by a host event (focus, attach, screen
//! state) or a timer fire the host schedules from the deadlines returned
//! here.
//!
//! Cancellation is cooperative. `suspend` cancels the pending toggle; a fire
//! that was already queued when the cancel took effect sees the cancelled
//! flag and does nothing, so the race is harmless.

use std::time::{Duration, Instant};

use tracing::trace;

/// Time between cursor visibility toggles.
pub const BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Where the blink cycle currently stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Not blinking; cursor hidden.
    Stopped,
    /// Blinking, currently in the hidden half of the cycle.
    RunningHidden,
    /// Blinking, currently in the visible half of the cycle.
    RunningVisible,
}

/// Per-field blink state. Created lazily by the field on first need.
#[derive(Debug)]
pub struct BlinkTimer {
    phase: BlinkPhase,
    cancelled: bool,
    deadline: Option<Instant>,
}

impl Default for BlinkTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl BlinkTimer {
    pub fn new() -> Self {
        Self {
            phase: BlinkPhase::Stopped,
            cancelled: false,
            deadline: None,
        }
    }

    pub fn phase(&self) -> BlinkPhase {
        self.phase
    }

    /// Whether the cursor should be painted right now.
    pub fn cursor_visible(&self) -> bool {
        self.phase == BlinkPhase::RunningVisible
    }

    /// (Re)starts the blink cycle.
    ///
    /// Cancels any pending toggle and forces the cursor hidden; the first
    /// visible phase only begins after one full interval. Returns the
    /// deadline the host must schedule a [`BlinkTimer::fire`] for, or `None`
    /// when blinking is not eligible (cursor disabled or field unfocused).
    pub fn make_blink(&mut self, now: Instant, eligible: bool) -> Option<Instant> {
        if !eligible {
            self.stop();
            return None;
        }
        self.cancelled = false;
        self.phase = BlinkPhase::RunningHidden;
        let deadline = now + BLINK_INTERVAL;
        self.deadline = Some(deadline);
        trace!("blink timer started");
        Some(deadline)
    }

    /// Handles one scheduled toggle.
    ///
    /// A fire after cancellation is a no-op. While still eligible, flips
    /// visibility and returns the next deadline; otherwise stops silently.
    pub fn fire(&mut self, now: Instant, eligible: bool) -> Option<Instant> {
        if self.cancelled || self.deadline.is_none() {
            return None;
        }
        if !eligible {
            self.stop();
            return None;
        }
        self.phase = match self.phase {
            BlinkPhase::RunningVisible => BlinkPhase::RunningHidden,
            BlinkPhase::RunningHidden | BlinkPhase::Stopped => BlinkPhase::RunningVisible,
        };
        let deadline = now + BLINK_INTERVAL;
        self.deadline = Some(deadline);
        Some(deadline)
    }

    /// Cancels the pending toggle and forces the cursor hidden.
    ///
    /// Used on window detach and screen-off. The phase stays running-hidden
    /// so a later [`BlinkTimer::resume`] picks the cycle back up.
    pub fn suspend(&mut self) {
        self.cancelled = true;
        self.deadline = None;
        if self.phase != BlinkPhase::Stopped {
            self.phase = BlinkPhase::RunningHidden;
        }
        trace!("blink timer suspended");
    }

    /// Clears the cancellation and restarts blinking if eligible.
    ///
    /// Used on window attach and screen-on.
    pub fn resume(&mut self, now: Instant, eligible: bool) -> Option<Instant> {
        self.cancelled = false;
        self.make_blink(now, eligible)
    }

    fn stop(&mut self) {
        self.phase = BlinkPhase::Stopped;
        self.deadline = None;
    }
}
