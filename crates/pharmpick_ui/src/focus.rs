//! Focus handling while the dropdown is open.
//!
//! On open, focus moves into the floating layer after a short delay (the
//! search box when there is one, the option list otherwise). While open, a
//! window focus-out is resolved after a zero-delay deferral: if focus ended up
//! outside the trigger and the floating layer, the dropdown closes and counts
//! as blurred.

use std::time::Duration;

use crate::config::Timings;

/// Element that receives focus when the dropdown opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    SearchInput,
    OptionList,
}

impl FocusTarget {
    pub fn for_searchable(searchable: bool) -> Self {
        if searchable {
            FocusTarget::SearchInput
        } else {
            FocusTarget::OptionList
        }
    }

    /// Delay before focusing, giving the layer time to mount.
    pub fn delay(&self, timings: &Timings) -> Duration {
        match self {
            FocusTarget::SearchInput => timings.focus_search(),
            FocusTarget::OptionList => timings.focus_list(),
        }
    }
}

/// How a deferred focus-out check resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Focus is still inside the widget
    Stayed,
    /// Focus left: close, mark touched, run the blur hook
    Left,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FocusCoordinator {
    /// Window listeners attached (only while open)
    attached: bool,
    /// A focus-out is waiting for its deferred check
    check_pending: bool,
    touched: bool,
}

impl FocusCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.check_pending = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Whether the user has left the field at least once.
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// A focus-out reached the window. Returns true if a deferred check
    /// should be scheduled.
    pub fn focus_out(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.check_pending = true;
        true
    }

    /// Resolve the deferred check against where focus is now.
    pub fn resolve(&mut self, focus_within: bool) -> FocusOutcome {
        let pending = std::mem::take(&mut self.check_pending);
        if !pending || !self.attached || focus_within {
            return FocusOutcome::Stayed;
        }
        self.touched = true;
        FocusOutcome::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_and_delay() {
        let timings = Timings::default();
        let search = FocusTarget::for_searchable(true);
        let list = FocusTarget::for_searchable(false);
        assert_eq!(search, FocusTarget::SearchInput);
        assert!(search.delay(&timings) > list.delay(&timings));
    }

    #[test]
    fn test_focus_out_ignored_when_detached() {
        let mut focus = FocusCoordinator::new();
        assert!(!focus.focus_out());
        assert_eq!(focus.resolve(false), FocusOutcome::Stayed);
        assert!(!focus.is_touched());
    }

    #[test]
    fn test_focus_leaving_marks_touched() {
        let mut focus = FocusCoordinator::new();
        focus.attach();
        assert!(focus.focus_out());
        assert_eq!(focus.resolve(false), FocusOutcome::Left);
        assert!(focus.is_touched());
    }

    #[test]
    fn test_focus_moving_inside_stays() {
        let mut focus = FocusCoordinator::new();
        focus.attach();
        focus.focus_out();
        assert_eq!(focus.resolve(true), FocusOutcome::Stayed);
        assert!(!focus.is_touched());
    }

    #[test]
    fn test_detach_drops_pending_check() {
        let mut focus = FocusCoordinator::new();
        focus.attach();
        focus.focus_out();
        focus.detach();
        assert_eq!(focus.resolve(false), FocusOutcome::Stayed);
    }
}
