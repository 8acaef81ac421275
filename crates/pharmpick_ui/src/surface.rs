//! Host capabilities the engine needs: geometry queries and a few side effects.
//!
//! A GUI or web binding implements [`Surface`] over its real widgets.
//! [`HeadlessSurface`] is an in-memory implementation whose geometry is set by
//! hand and whose side effects are recorded, for tests and scripted sessions.

use std::cell::RefCell;
use std::rc::Rc;

use crate::focus::FocusTarget;
use crate::layout::{Bounds, Size};
use crate::scroll_sync::ScrollMetrics;

pub trait Surface {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Trigger rectangle in viewport space, `None` if not laid out.
    fn trigger_bounds(&self) -> Option<Bounds>;

    /// Natural height of the floating layer content, `None` if not laid out yet.
    fn overlay_content_height(&self) -> Option<f32>;

    /// Scroll metrics of the option list container.
    fn list_metrics(&self) -> Option<ScrollMetrics>;

    /// Whether focus is inside the trigger or the floating layer.
    fn focus_within(&self) -> bool;

    fn focus(&mut self, target: FocusTarget);

    /// Scroll the row at this filtered index into view without animation.
    fn scroll_option_into_view(&mut self, index: usize);

    /// Lock or unlock page scrolling.
    fn set_scroll_lock(&mut self, locked: bool);
}

#[derive(Debug, Default)]
struct HeadlessState {
    viewport: Size,
    trigger: Option<Bounds>,
    overlay_height: Option<f32>,
    list_metrics: Option<ScrollMetrics>,
    focus_within: bool,
    focused: Vec<FocusTarget>,
    scrolled_into_view: Vec<usize>,
    scroll_locked: bool,
}

/// Deterministic surface. Clones share state, so a test can keep a handle
/// after giving one to a dropdown.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessSurface {
    pub fn new(viewport: Size) -> Self {
        let surface = Self::default();
        surface.state.borrow_mut().viewport = viewport;
        surface
    }

    /// Surface with the trigger and overlay already laid out.
    pub fn laid_out(viewport: Size, trigger: Bounds, overlay_height: f32) -> Self {
        let surface = Self::new(viewport);
        surface.set_trigger(Some(trigger));
        surface.set_overlay_height(Some(overlay_height));
        surface
    }

    pub fn set_viewport(&self, viewport: Size) {
        self.state.borrow_mut().viewport = viewport;
    }

    pub fn set_trigger(&self, trigger: Option<Bounds>) {
        self.state.borrow_mut().trigger = trigger;
    }

    pub fn set_overlay_height(&self, height: Option<f32>) {
        self.state.borrow_mut().overlay_height = height;
    }

    pub fn set_list_metrics(&self, metrics: Option<ScrollMetrics>) {
        self.state.borrow_mut().list_metrics = metrics;
    }

    pub fn set_focus_within(&self, within: bool) {
        self.state.borrow_mut().focus_within = within;
    }

    /// Focus requests received so far.
    pub fn focused(&self) -> Vec<FocusTarget> {
        self.state.borrow().focused.clone()
    }

    /// Scroll-into-view requests received so far.
    pub fn scrolled_into_view(&self) -> Vec<usize> {
        self.state.borrow().scrolled_into_view.clone()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.state.borrow().scroll_locked
    }
}

impl Surface for HeadlessSurface {
    fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    fn trigger_bounds(&self) -> Option<Bounds> {
        self.state.borrow().trigger
    }

    fn overlay_content_height(&self) -> Option<f32> {
        self.state.borrow().overlay_height
    }

    fn list_metrics(&self) -> Option<ScrollMetrics> {
        self.state.borrow().list_metrics
    }

    fn focus_within(&self) -> bool {
        self.state.borrow().focus_within
    }

    fn focus(&mut self, target: FocusTarget) {
        let mut state = self.state.borrow_mut();
        state.focus_within = true;
        state.focused.push(target);
    }

    fn scroll_option_into_view(&mut self, index: usize) {
        self.state.borrow_mut().scrolled_into_view.push(index);
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.state.borrow_mut().scroll_locked = locked;
    }
}
