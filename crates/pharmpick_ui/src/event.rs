//! Input events the host forwards to a dropdown.

use crate::layout::{Point, Size};
use crate::scroll_sync::ScrollMetrics;

/// Events that a dropdown can respond to.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Keyboard key pressed while the widget (trigger, search box or list) has focus.
    KeyPress {
        key: KeyCode,
        modifiers: KeyModifiers,
    },
    /// Pointer moved anywhere over the page.
    MouseMove { position: Point },
    /// Pointer entered the trigger region.
    PointerEnterTrigger,
    /// Pointer entered the floating layer.
    PointerEnterOverlay,
    /// Pointer left the widget with intent to close.
    PointerLeave,
    /// Pointer is over the option row at this filtered index.
    OptionHover { index: usize },
    /// Native scroll on the option list container.
    ListScroll(ScrollMetrics),
    /// Window-level event, only honoured while the window listeners are attached.
    Window(WindowEvent),
}

/// Window-level events the widget listens to while open.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    /// Any scroll in the page (capture phase, so scrollable ancestors count too).
    Scroll,
    /// The viewport changed size.
    Resize(Size),
    /// Focus left some element; the new target is resolved after a deferral.
    FocusOut,
}

/// Keyboard keys (simplified set).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
}

impl KeyCode {
    /// Keys that move the highlight and therefore switch on keyboard mode.
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            KeyCode::Up
                | KeyCode::Down
                | KeyCode::Tab
                | KeyCode::PageUp
                | KeyCode::PageDown
                | KeyCode::Home
                | KeyCode::End
        )
    }
}

/// Keyboard modifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: KeyModifiers = KeyModifiers {
        shift: true,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// True when a command modifier is held (the key is a shortcut, not text).
    pub fn has_command(&self) -> bool {
        self.ctrl || self.alt || self.meta
    }
}

/// Whether the dropdown consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventStatus {
    /// The event was handled; the host should not apply its default action.
    Captured,
    /// The event was not relevant to the dropdown.
    Ignored,
}

impl EventStatus {
    pub fn is_captured(&self) -> bool {
        matches!(self, EventStatus::Captured)
    }
}
