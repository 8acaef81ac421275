//! Scroll state of the option list.

use crate::constants::SCROLL_EPSILON;

/// Raw scroll metrics of the list container, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_top: f32,
    pub scroll_height: f32,
    pub client_height: f32,
}

impl ScrollMetrics {
    pub const fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }
}

/// Scroll flags plus the once-per-session auto-scroll gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollSync {
    is_scrollable: bool,
    reached_bottom: bool,
    scrolled_from_top: bool,
    has_auto_scrolled: bool,
}

impl ScrollSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the flags. Returns true if any flag changed.
    pub fn update(&mut self, metrics: ScrollMetrics) -> bool {
        let before = (self.is_scrollable, self.reached_bottom, self.scrolled_from_top);

        self.is_scrollable = metrics.scroll_height > metrics.client_height + SCROLL_EPSILON;
        self.reached_bottom = self.is_scrollable
            && metrics.scroll_top + metrics.client_height >= metrics.scroll_height - SCROLL_EPSILON;
        self.scrolled_from_top = metrics.scroll_top > SCROLL_EPSILON;

        before != (self.is_scrollable, self.reached_bottom, self.scrolled_from_top)
    }

    pub fn is_scrollable(&self) -> bool {
        self.is_scrollable
    }

    pub fn reached_bottom(&self) -> bool {
        self.reached_bottom
    }

    pub fn scrolled_from_top(&self) -> bool {
        self.scrolled_from_top
    }

    pub fn has_auto_scrolled(&self) -> bool {
        self.has_auto_scrolled
    }

    /// Claim this session's auto-scroll. Returns false if it was already used.
    pub fn take_auto_scroll(&mut self) -> bool {
        !std::mem::replace(&mut self.has_auto_scrolled, true)
    }

    /// Forget flags and re-arm the auto-scroll for the next session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
