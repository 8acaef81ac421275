//! Render model produced by [`crate::Dropdown::view`].
//!
//! The host draws from this snapshot and nothing else.

use crate::accessibility::AriaAttributes;
use crate::lifecycle::OpenState;
use crate::position::{Direction, OverlayStyle};
use crate::search::SearchStatus;

#[derive(Debug, Clone, PartialEq)]
pub struct TriggerView {
    /// Text to draw (truncated unless expanded)
    pub label: String,
    /// Full text, for tooltips
    pub full_label: String,
    pub is_placeholder: bool,
    pub is_overflowing: bool,
    pub is_expanded: bool,
    pub aria: AriaAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchView {
    pub term: String,
    pub status: SearchStatus,
    pub aria: AriaAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub code: Option<String>,
    pub description: Option<String>,
    pub highlighted: bool,
    pub selected: bool,
    pub aria: AriaAttributes,
}

/// What to show instead of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyState {
    /// The caller supplied no options at all
    NoOptions,
    /// The term matched nothing
    NoResults,
    /// The term matched nothing; offer to create it
    AddNew { term: String },
}

impl EmptyState {
    /// Pick the empty state, `None` when there are rows to show.
    pub fn resolve(
        option_count: usize,
        filtered_count: usize,
        add_new_term: Option<&str>,
    ) -> Option<EmptyState> {
        if filtered_count > 0 {
            return None;
        }
        match add_new_term {
            Some(term) => Some(EmptyState::AddNew {
                term: term.to_string(),
            }),
            None if option_count == 0 => Some(EmptyState::NoOptions),
            None => Some(EmptyState::NoResults),
        }
    }
}

/// The floating layer, present while mounted (including the exit animation).
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayView {
    pub state: OpenState,
    pub styles_applied: bool,
    pub direction: Direction,
    pub style: OverlayStyle,
    /// Placement computed; hosts keep the layer invisible until then
    pub is_ready: bool,
    pub search: Option<SearchView>,
    pub rows: Vec<RowView>,
    pub empty: Option<EmptyState>,
    pub is_scrollable: bool,
    pub reached_bottom: bool,
    pub scrolled_from_top: bool,
    pub is_keyboard_mode: bool,
    pub aria: AriaAttributes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropdownView {
    pub trigger: TriggerView,
    pub overlay: Option<OverlayView>,
    pub validation_message: Option<String>,
    /// -1 when nothing is highlighted
    pub highlighted_index: isize,
}
