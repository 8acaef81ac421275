//! Centralized constants for pharmpick_ui
//!
//! All magic numbers and repeated constants are defined here for consistency
//! and easy maintenance. Timing values in milliseconds feed [`crate::Timings`].

// =============================================================================
// Lifecycle
// =============================================================================

/// Delay between Opening and Open, lets the floating layer mount before the
/// enter transition is applied
pub const OPEN_SETTLE_MS: u64 = 10;

/// Duration of the exit animation (Closing -> Closed)
pub const CLOSE_ANIMATION_MS: u64 = 200;

/// One rendering frame, used for "retry next frame" deferrals
pub const FRAME_MS: u64 = 16;

// =============================================================================
// Search
// =============================================================================

/// Debounce between the raw and the filtering search term
pub const SEARCH_DEBOUNCE_MS: u64 = 250;

/// Idle time after which a type-ahead buffer is cleared
pub const TYPE_AHEAD_RESET_MS: u64 = 800;

/// Score for a case-insensitive substring match on the option name
pub const SCORE_SUBSTRING: u8 = 3;

/// Score for a subsequence (fuzzy) match on the option name
pub const SCORE_FUZZY: u8 = 1;

// =============================================================================
// Keyboard & pointer
// =============================================================================

/// Number of rows PageUp/PageDown jump
pub const PAGE_SIZE: usize = 5;

/// Pointer travel that counts as real mouse movement (leaves keyboard mode)
pub const MOUSE_MOVE_THRESHOLD: f32 = 5.0;

/// Debounce before real mouse movement clears keyboard mode
pub const KEYBOARD_MODE_EXIT_MS: u64 = 50;

/// Hover dwell before a hover-to-open dropdown opens
pub const HOVER_OPEN_MS: u64 = 150;

/// Delay before a hover-to-open dropdown closes after the pointer leaves
pub const HOVER_CLOSE_MS: u64 = 300;

// =============================================================================
// Focus & scroll
// =============================================================================

/// Delay before focusing the search input (the list has to mount first)
pub const FOCUS_SEARCH_MS: u64 = 50;

/// Delay before focusing the option list container
pub const FOCUS_LIST_MS: u64 = 10;

/// Settle delay before reading list scroll metrics after open / content change
pub const SCROLL_METRICS_MS: u64 = 30;

/// Tolerance when deciding if the list is scrollable or scrolled to the bottom
pub const SCROLL_EPSILON: f32 = 1.0;

// =============================================================================
// Placement
// =============================================================================

/// Margin kept between the floating layer and the viewport top/bottom
pub const VIEWPORT_MARGIN: f32 = 16.0;

/// Inset kept between the floating layer and the viewport left/right edges
pub const EDGE_INSET: f32 = 8.0;

/// Gap between trigger and floating layer
pub const OVERLAY_GAP: f32 = 4.0;

/// Default maximum height of the option list
pub const MAX_LIST_HEIGHT: f32 = 300.0;

// =============================================================================
// Text
// =============================================================================

/// Default font size for trigger labels
pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Approximate character width as a ratio of font size
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Line height as a ratio of font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Appended to truncated labels
pub const ELLIPSIS: &str = "\u{2026}";

// =============================================================================
// Validation
// =============================================================================

/// Time a validation message stays visible after a blur
pub const VALIDATION_AUTO_HIDE_MS: u64 = 3000;

/// Default message for an empty required field
pub const REQUIRED_MESSAGE: &str = "This field is required";

// =============================================================================
// Accessibility ids
// =============================================================================

/// Id of the option list element
pub const OPTIONS_LIST_ID: &str = "dropdown-options-list";

/// Prefix of each option row id (`dropdown-option-<id>`)
pub const OPTION_ID_PREFIX: &str = "dropdown-option-";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timing_relationships() {
        assert!(FOCUS_SEARCH_MS > FOCUS_LIST_MS);
        assert!(HOVER_CLOSE_MS > HOVER_OPEN_MS);
        assert!(CLOSE_ANIMATION_MS > OPEN_SETTLE_MS);
        assert!(SEARCH_DEBOUNCE_MS < TYPE_AHEAD_RESET_MS);
    }

    #[test]
    fn test_constants_are_positive() {
        assert!(PAGE_SIZE > 0);
        assert!(MOUSE_MOVE_THRESHOLD > 0.0);
        assert!(VIEWPORT_MARGIN > 0.0);
        assert!(EDGE_INSET > 0.0);
        assert!(MAX_LIST_HEIGHT > 0.0);
        assert!(DEFAULT_FONT_SIZE > 0.0);
        assert!(SCORE_SUBSTRING > SCORE_FUZZY);
    }
}
