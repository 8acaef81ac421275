//! Keyboard traversal of the filtered option list.
//!
//! The navigator owns the highlight and the keyboard-mode flag. It never
//! touches the option data itself: every call receives the length of the
//! current filtered list, so the highlight stays within `[None, len - 1]`.
//! Timers (keyboard-mode exit debounce, deferred reset) are scheduled by the
//! owning dropdown; the navigator only reports when one is needed.

use crate::constants::MOUSE_MOVE_THRESHOLD;
use crate::event::{KeyCode, KeyModifiers};
use crate::layout::Point;

/// What the list looks like to the navigator for one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavContext {
    /// Length of the filtered list
    pub len: usize,
    /// A search box owns text input (Tab is left to the host)
    pub has_search_box: bool,
    pub page_size: usize,
}

/// Result of a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not a navigation key, or nothing to navigate
    Ignored,
    /// Highlight moved to this filtered index
    Moved(usize),
    /// Commit: select the highlighted index, or fall back to add-new when `None`
    Activate(Option<usize>),
    /// Close the dropdown
    Dismiss,
}

#[derive(Debug, Clone, Default)]
pub struct KeyboardNavigator {
    highlighted: Option<usize>,
    is_keyboard_mode: bool,
    /// A navigation key was used in this open session
    has_navigated: bool,
    /// Pointer position when keyboard mode began
    anchor: Option<Point>,
    last_mouse: Option<Point>,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlight as `-1` (nothing) or an index.
    pub fn highlighted_index(&self) -> isize {
        self.highlighted.map_or(-1, |i| i as isize)
    }

    pub fn is_keyboard_mode(&self) -> bool {
        self.is_keyboard_mode
    }

    pub fn has_navigated(&self) -> bool {
        self.has_navigated
    }

    /// Seed the highlight for a new open session.
    pub fn on_open(&mut self, selected: Option<usize>, len: usize, auto_highlight_first: bool) {
        if self.has_navigated {
            self.clamp(len);
            return;
        }
        self.highlighted = Self::seed(selected, len, auto_highlight_first);
    }

    /// Re-seed after the filtered list changed. A non-empty term highlights
    /// the first result; a cleared term falls back to the selection.
    pub fn on_filter_change(
        &mut self,
        term_active: bool,
        selected: Option<usize>,
        len: usize,
        auto_highlight_first: bool,
    ) {
        self.highlighted = if term_active {
            (len > 0).then_some(0)
        } else {
            Self::seed(selected, len, auto_highlight_first)
        };
    }

    fn seed(selected: Option<usize>, len: usize, auto_highlight_first: bool) -> Option<usize> {
        selected
            .filter(|&i| i < len)
            .or_else(|| (auto_highlight_first && len > 0).then_some(0))
    }

    /// Drop the highlight if it no longer fits the list.
    pub fn clamp(&mut self, len: usize) {
        if self.highlighted.is_some_and(|i| i >= len) {
            self.highlighted = len.checked_sub(1);
        }
    }

    pub fn handle_key(
        &mut self,
        key: KeyCode,
        modifiers: KeyModifiers,
        ctx: NavContext,
    ) -> KeyOutcome {
        match key {
            KeyCode::Escape => return KeyOutcome::Dismiss,
            KeyCode::Enter => {
                return KeyOutcome::Activate(self.highlighted.filter(|&i| i < ctx.len));
            }
            KeyCode::Space if !ctx.has_search_box => {
                return KeyOutcome::Activate(self.highlighted.filter(|&i| i < ctx.len));
            }
            KeyCode::Tab if ctx.has_search_box => return KeyOutcome::Ignored,
            _ => {}
        }

        if !key.is_navigation() {
            return KeyOutcome::Ignored;
        }
        let Some(last) = ctx.len.checked_sub(1) else {
            return KeyOutcome::Ignored;
        };
        let page = ctx.page_size.max(1);
        let current = self.highlighted.filter(|&i| i <= last);
        let forward = |i: Option<usize>| i.map_or(0, |i| if i >= last { 0 } else { i + 1 });
        let backward = |i: Option<usize>| i.map_or(last, |i| if i == 0 { last } else { i - 1 });

        let next = match key {
            KeyCode::Down => forward(current),
            KeyCode::Up => backward(current),
            KeyCode::Tab if modifiers.shift => backward(current),
            KeyCode::Tab => forward(current),
            KeyCode::PageDown => (current.unwrap_or(0) + page).min(last),
            KeyCode::PageUp => current.unwrap_or(0).saturating_sub(page),
            KeyCode::Home => 0,
            KeyCode::End => last,
            _ => return KeyOutcome::Ignored,
        };

        self.highlighted = Some(next);
        self.has_navigated = true;
        if !self.is_keyboard_mode {
            self.is_keyboard_mode = true;
            self.anchor = self.last_mouse;
        }
        KeyOutcome::Moved(next)
    }

    /// Record pointer movement. Returns true when the movement is far enough
    /// from the keyboard-mode anchor to (re)start the exit debounce.
    pub fn mouse_moved(&mut self, position: Point) -> bool {
        self.last_mouse = Some(position);
        if !self.is_keyboard_mode {
            return false;
        }
        match self.anchor {
            None => {
                self.anchor = Some(position);
                false
            }
            Some(anchor) => anchor.distance(position) > MOUSE_MOVE_THRESHOLD,
        }
    }

    pub fn exit_keyboard_mode(&mut self) {
        if self.is_keyboard_mode {
            log::trace!("Leaving keyboard mode");
        }
        self.is_keyboard_mode = false;
        self.anchor = None;
    }

    /// Pointer over the row at `index`. Ignored in keyboard mode.
    pub fn hover(&mut self, index: usize, len: usize) -> bool {
        if self.is_keyboard_mode || index >= len || self.highlighted == Some(index) {
            return false;
        }
        self.highlighted = Some(index);
        true
    }

    /// Forget the session (highlight, keyboard mode, navigation flag).
    pub fn reset(&mut self) {
        self.highlighted = None;
        self.has_navigated = false;
        self.exit_keyboard_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ctx(len: usize) -> NavContext {
        NavContext {
            len,
            has_search_box: true,
            page_size: 5,
        }
    }

    fn press(nav: &mut KeyboardNavigator, key: KeyCode, ctx: NavContext) -> KeyOutcome {
        nav.handle_key(key, KeyModifiers::NONE, ctx)
    }

    #[test]
    fn test_arrows_wrap_both_ends() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 3, true);
        assert_eq!(nav.highlighted(), Some(0));

        assert_eq!(press(&mut nav, KeyCode::Up, ctx(3)), KeyOutcome::Moved(2));
        assert_eq!(press(&mut nav, KeyCode::Down, ctx(3)), KeyOutcome::Moved(0));
        assert_eq!(press(&mut nav, KeyCode::Down, ctx(3)), KeyOutcome::Moved(1));
        assert!(nav.is_keyboard_mode());
    }

    #[test]
    fn test_down_from_nothing_starts_at_first() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 4, false);
        assert_eq!(nav.highlighted_index(), -1);
        assert_eq!(press(&mut nav, KeyCode::Down, ctx(4)), KeyOutcome::Moved(0));
    }

    #[test]
    fn test_page_keys_clamp() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(Some(2), 8, true);
        assert_eq!(press(&mut nav, KeyCode::PageDown, ctx(8)), KeyOutcome::Moved(7));
        assert_eq!(press(&mut nav, KeyCode::PageUp, ctx(8)), KeyOutcome::Moved(2));
        assert_eq!(press(&mut nav, KeyCode::PageUp, ctx(8)), KeyOutcome::Moved(0));
        assert_eq!(press(&mut nav, KeyCode::End, ctx(8)), KeyOutcome::Moved(7));
        assert_eq!(press(&mut nav, KeyCode::Home, ctx(8)), KeyOutcome::Moved(0));
    }

    #[test]
    fn test_tab_only_without_search_box() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 3, true);
        assert_eq!(press(&mut nav, KeyCode::Tab, ctx(3)), KeyOutcome::Ignored);

        let plain = NavContext {
            has_search_box: false,
            ..ctx(3)
        };
        assert_eq!(press(&mut nav, KeyCode::Tab, plain), KeyOutcome::Moved(1));
        assert_eq!(
            nav.handle_key(KeyCode::Tab, KeyModifiers::SHIFT, plain),
            KeyOutcome::Moved(0)
        );
        assert_eq!(
            nav.handle_key(KeyCode::Tab, KeyModifiers::SHIFT, plain),
            KeyOutcome::Moved(2)
        );
    }

    #[test]
    fn test_empty_list_only_commit_keys() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 0, true);
        assert_eq!(press(&mut nav, KeyCode::Down, ctx(0)), KeyOutcome::Ignored);
        assert_eq!(press(&mut nav, KeyCode::End, ctx(0)), KeyOutcome::Ignored);
        assert_eq!(press(&mut nav, KeyCode::Enter, ctx(0)), KeyOutcome::Activate(None));
        assert_eq!(press(&mut nav, KeyCode::Escape, ctx(0)), KeyOutcome::Dismiss);
        assert!(!nav.is_keyboard_mode());
    }

    #[test]
    fn test_enter_activates_highlight() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(Some(1), 3, true);
        assert_eq!(press(&mut nav, KeyCode::Enter, ctx(3)), KeyOutcome::Activate(Some(1)));
    }

    #[test]
    fn test_open_seeds_from_selection() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(Some(1), 2, true);
        assert_eq!(nav.highlighted(), Some(1));

        // Selection outside the list falls back to the first option
        let mut nav = KeyboardNavigator::new();
        nav.on_open(Some(9), 2, true);
        assert_eq!(nav.highlighted(), Some(0));
    }

    #[test]
    fn test_filter_change_reseeds() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(Some(4), 6, true);
        nav.on_filter_change(true, Some(3), 2, true);
        assert_eq!(nav.highlighted(), Some(0));
        nav.on_filter_change(true, None, 0, true);
        assert_eq!(nav.highlighted(), None);
        nav.on_filter_change(false, Some(4), 6, true);
        assert_eq!(nav.highlighted(), Some(4));
    }

    #[test]
    fn test_mouse_threshold_in_keyboard_mode() {
        let mut nav = KeyboardNavigator::new();
        nav.mouse_moved(Point::new(100.0, 100.0));
        nav.on_open(None, 3, true);
        assert!(!nav.mouse_moved(Point::new(103.0, 100.0)));
        press(&mut nav, KeyCode::Down, ctx(3));

        assert!(!nav.mouse_moved(Point::new(103.0, 103.0)));
        assert!(nav.mouse_moved(Point::new(110.0, 100.0)));
        nav.exit_keyboard_mode();
        assert!(!nav.is_keyboard_mode());
    }

    #[test]
    fn test_hover_ignored_in_keyboard_mode() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 3, true);
        assert!(nav.hover(2, 3));
        assert_eq!(nav.highlighted(), Some(2));
        press(&mut nav, KeyCode::Up, ctx(3));
        assert!(!nav.hover(0, 3));
        assert_eq!(nav.highlighted(), Some(1));
        assert!(!nav.hover(7, 3));
    }

    #[test]
    fn test_reset_clears_session() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 3, true);
        press(&mut nav, KeyCode::Down, ctx(3));
        nav.reset();
        assert_eq!(nav.highlighted(), None);
        assert!(!nav.is_keyboard_mode());
        assert!(!nav.has_navigated());
    }

    #[test]
    fn test_reopen_after_navigation_keeps_highlight() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 5, true);
        press(&mut nav, KeyCode::End, ctx(5));
        nav.on_open(Some(0), 3, true);
        assert_eq!(nav.highlighted(), Some(2));
    }

    #[test]
    fn test_typing_keys_leave_highlight_alone() {
        let mut nav = KeyboardNavigator::new();
        nav.on_open(None, 3, true);
        for key in [KeyCode::Char('a'), KeyCode::Backspace, KeyCode::Space] {
            assert_eq!(press(&mut nav, key, ctx(3)), KeyOutcome::Ignored);
        }
        assert_eq!(nav.highlighted(), Some(0));
        assert!(!nav.is_keyboard_mode());
        assert!(!nav.has_navigated());
    }

    #[derive(Debug, Clone)]
    enum Step {
        Key(KeyCode, bool),
        Filter(usize),
    }

    fn arb_step() -> impl Strategy<Value = Step> {
        let key = prop_oneof![
            Just(KeyCode::Up),
            Just(KeyCode::Down),
            Just(KeyCode::Tab),
            Just(KeyCode::PageUp),
            Just(KeyCode::PageDown),
            Just(KeyCode::Home),
            Just(KeyCode::End),
            Just(KeyCode::Enter),
            Just(KeyCode::Space),
            Just(KeyCode::Escape),
            Just(KeyCode::Char('x')),
        ];
        prop_oneof![
            4 => (key, any::<bool>()).prop_map(|(key, shift)| Step::Key(key, shift)),
            1 => (0usize..8).prop_map(Step::Filter),
        ]
    }

    proptest! {
        #[test]
        fn test_highlight_stays_in_range(
            len in 0usize..8,
            has_search_box in any::<bool>(),
            steps in prop::collection::vec(arb_step(), 0..40),
        ) {
            let mut nav = KeyboardNavigator::new();
            nav.on_open(None, len, true);
            let mut ctx = NavContext { len, has_search_box, page_size: 3 };
            for step in steps {
                match step {
                    Step::Key(key, shift) => {
                        let modifiers = if shift {
                            KeyModifiers::SHIFT
                        } else {
                            KeyModifiers::NONE
                        };
                        if let KeyOutcome::Moved(index) = nav.handle_key(key, modifiers, ctx) {
                            prop_assert!(index < ctx.len);
                        }
                    }
                    Step::Filter(len) => {
                        ctx.len = len;
                        nav.on_filter_change(true, None, len, true);
                    }
                }
                let index = nav.highlighted_index();
                prop_assert!(index >= -1 && index < ctx.len as isize);
            }
        }
    }
}
