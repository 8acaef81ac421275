//! Hover-to-open intent.
//!
//! Dwelling on the trigger opens after a delay; leaving the widget closes
//! after a (longer) delay. Moving onto the floating layer cancels both, so the
//! pointer can travel from trigger to list without the list closing.

use std::time::Duration;

use web_time::Instant;

use crate::config::Timings;
use crate::lifecycle::OpenState;
use crate::scheduler::Scheduler;

/// What a fired hover timer asks the dropdown to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverIntent {
    Open,
    Close,
}

#[derive(Debug, Clone)]
pub struct HoverIntentController {
    enabled: bool,
    open_delay: Duration,
    close_delay: Duration,
    timers: Scheduler<HoverIntent>,
}

impl HoverIntentController {
    pub fn new(enabled: bool, timings: &Timings) -> Self {
        Self {
            enabled,
            open_delay: timings.hover_open(),
            close_delay: timings.hover_close(),
            timers: Scheduler::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn pointer_enter_trigger(&mut self, state: OpenState, now: Instant) {
        if !self.enabled {
            return;
        }
        self.timers.cancel(HoverIntent::Close);
        if state == OpenState::Closed {
            self.timers.schedule(HoverIntent::Open, now, self.open_delay);
        }
    }

    pub fn pointer_enter_overlay(&mut self) {
        self.timers.clear();
    }

    pub fn pointer_leave(&mut self, state: OpenState, now: Instant) {
        if !self.enabled {
            return;
        }
        self.timers.cancel(HoverIntent::Open);
        if state.is_open() {
            self.timers.schedule(HoverIntent::Close, now, self.close_delay);
        }
    }

    /// Intents whose delay elapsed.
    pub fn take_due(&mut self, now: Instant) -> Vec<HoverIntent> {
        self.timers.take_due(now)
    }

    pub fn is_pending(&self, intent: HoverIntent) -> bool {
        self.timers.is_pending(intent)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }
}
