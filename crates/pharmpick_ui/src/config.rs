//! Dropdown configuration.
//!
//! `DropdownConfig` centralizes the caller-facing flags (placeholder, search,
//! selection mode, hover-to-open, validation) and the layout knobs. `Timings`
//! holds every delay the engine schedules; it is serde-friendly so an
//! application can tune it from its settings file.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::DropdownError;
use crate::text_metrics::FontStyle;
use crate::{builder_field, builder_option};

/// How picking an option affects the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Plain single-select; picking closes the dropdown
    #[default]
    Single,
    /// Single-select rendered with radio markers; picking closes the dropdown
    Radio,
    /// Multi-select with checkboxes; picking toggles and keeps the dropdown open
    Checkbox,
}

impl SelectionMode {
    pub fn is_multiple(&self) -> bool {
        matches!(self, SelectionMode::Checkbox)
    }

    /// Whether picking an option closes the dropdown.
    pub fn closes_on_select(&self) -> bool {
        !self.is_multiple()
    }
}

/// Every delay used by the engine, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub open_settle_ms: u64,
    pub close_animation_ms: u64,
    pub frame_ms: u64,
    pub search_debounce_ms: u64,
    pub type_ahead_reset_ms: u64,
    pub keyboard_mode_exit_ms: u64,
    pub hover_open_ms: u64,
    pub hover_close_ms: u64,
    pub focus_search_ms: u64,
    pub focus_list_ms: u64,
    pub scroll_metrics_ms: u64,
    /// 0 keeps the validation message visible until the value becomes valid
    pub validation_auto_hide_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            open_settle_ms: OPEN_SETTLE_MS,
            close_animation_ms: CLOSE_ANIMATION_MS,
            frame_ms: FRAME_MS,
            search_debounce_ms: SEARCH_DEBOUNCE_MS,
            type_ahead_reset_ms: TYPE_AHEAD_RESET_MS,
            keyboard_mode_exit_ms: KEYBOARD_MODE_EXIT_MS,
            hover_open_ms: HOVER_OPEN_MS,
            hover_close_ms: HOVER_CLOSE_MS,
            focus_search_ms: FOCUS_SEARCH_MS,
            focus_list_ms: FOCUS_LIST_MS,
            scroll_metrics_ms: SCROLL_METRICS_MS,
            validation_auto_hide_ms: VALIDATION_AUTO_HIDE_MS,
        }
    }
}

impl Timings {
    pub fn open_settle(&self) -> Duration {
        Duration::from_millis(self.open_settle_ms)
    }

    pub fn close_animation(&self) -> Duration {
        Duration::from_millis(self.close_animation_ms)
    }

    pub fn frame(&self) -> Duration {
        Duration::from_millis(self.frame_ms)
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    pub fn type_ahead_reset(&self) -> Duration {
        Duration::from_millis(self.type_ahead_reset_ms)
    }

    pub fn keyboard_mode_exit(&self) -> Duration {
        Duration::from_millis(self.keyboard_mode_exit_ms)
    }

    pub fn hover_open(&self) -> Duration {
        Duration::from_millis(self.hover_open_ms)
    }

    pub fn hover_close(&self) -> Duration {
        Duration::from_millis(self.hover_close_ms)
    }

    pub fn focus_search(&self) -> Duration {
        Duration::from_millis(self.focus_search_ms)
    }

    pub fn focus_list(&self) -> Duration {
        Duration::from_millis(self.focus_list_ms)
    }

    pub fn scroll_metrics(&self) -> Duration {
        Duration::from_millis(self.scroll_metrics_ms)
    }

    pub fn validation_auto_hide(&self) -> Option<Duration> {
        (self.validation_auto_hide_ms > 0)
            .then(|| Duration::from_millis(self.validation_auto_hide_ms))
    }
}

/// Configuration for one dropdown instance.
#[derive(Debug, Clone)]
pub struct DropdownConfig {
    /// Trigger text when nothing is selected
    pub placeholder: String,
    /// Show a free-text search box in the floating layer
    pub searchable: bool,
    /// Without a search box, typed characters filter the list (type-ahead)
    pub type_ahead: bool,
    pub mode: SelectionMode,
    /// Open on hover dwell, close on leave
    pub hover_to_open: bool,
    /// Empty value is a validation error on blur
    pub required: bool,
    pub required_message: String,
    /// Explicit floating-layer width; defaults to the trigger width
    pub width: Option<f32>,
    pub max_list_height: f32,
    /// Highlight the first option on open when nothing is selected
    pub auto_highlight_first: bool,
    /// Scroll the highlighted/selected option into view once per session
    pub auto_scroll: bool,
    pub page_size: usize,
    /// Horizontal space inside the trigger not available to the label
    pub label_padding: f32,
    pub font: FontStyle,
    pub timings: Timings,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            placeholder: "Select...".to_string(),
            searchable: true,
            type_ahead: false,
            mode: SelectionMode::default(),
            hover_to_open: false,
            required: false,
            required_message: REQUIRED_MESSAGE.to_string(),
            width: None,
            max_list_height: MAX_LIST_HEIGHT,
            auto_highlight_first: true,
            auto_scroll: true,
            page_size: PAGE_SIZE,
            label_padding: 36.0,
            font: FontStyle::default(),
            timings: Timings::default(),
        }
    }
}

impl DropdownConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = message.into();
        self
    }

    builder_field!(searchable, bool);
    builder_field!(type_ahead, bool);
    builder_field!(mode, SelectionMode);
    builder_field!(hover_to_open, bool);
    builder_field!(required, bool);
    builder_option!(width, f32);
    builder_field!(max_list_height, f32);
    builder_field!(auto_highlight_first, bool);
    builder_field!(auto_scroll, bool);
    builder_field!(page_size, usize);
    builder_field!(label_padding, f32);
    builder_field!(font, FontStyle);
    builder_field!(timings, Timings);

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), DropdownError> {
        if self.page_size == 0 {
            return Err(DropdownError::invalid_config("page_size must be at least 1"));
        }
        if !(self.max_list_height.is_finite() && self.max_list_height > 0.0) {
            return Err(DropdownError::invalid_config(format!(
                "max_list_height must be positive, got {}",
                self.max_list_height
            )));
        }
        if self.timings.frame_ms == 0 {
            return Err(DropdownError::invalid_config("timings.frame_ms must be at least 1"));
        }
        if let Some(width) = self.width {
            if !(width.is_finite() && width > 0.0) {
                return Err(DropdownError::invalid_config(format!(
                    "width must be positive, got {}",
                    width
                )));
            }
        }
        if !(self.font.size.is_finite() && self.font.size > 0.0) {
            return Err(DropdownError::invalid_config(format!(
                "font size must be positive, got {}",
                self.font.size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DropdownConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = DropdownConfig::new()
            .placeholder("Pick a supplier")
            .searchable(false)
            .mode(SelectionMode::Checkbox)
            .width(240.0)
            .page_size(10);
        assert_eq!(config.placeholder, "Pick a supplier");
        assert!(!config.searchable);
        assert!(config.mode.is_multiple());
        assert_eq!(config.width, Some(240.0));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DropdownConfig::new().page_size(0).validate().is_err());
        assert!(DropdownConfig::new().max_list_height(0.0).validate().is_err());
        assert!(DropdownConfig::new().width(-5.0).validate().is_err());
        let no_frame = Timings {
            frame_ms: 0,
            ..Timings::default()
        };
        assert!(DropdownConfig::new().timings(no_frame).validate().is_err());
        assert!(DropdownConfig::new()
            .font(FontStyle::new(f32::NAN))
            .validate()
            .is_err());
    }

    #[test]
    fn test_selection_mode_closing() {
        assert!(SelectionMode::Single.closes_on_select());
        assert!(SelectionMode::Radio.closes_on_select());
        assert!(!SelectionMode::Checkbox.closes_on_select());
    }

    #[test]
    fn test_timings_partial_json_uses_defaults() {
        let timings: Timings =
            serde_json::from_str(r#"{"close_animation_ms": 120, "validation_auto_hide_ms": 0}"#)
                .unwrap();
        assert_eq!(timings.close_animation(), Duration::from_millis(120));
        assert_eq!(timings.search_debounce_ms, SEARCH_DEBOUNCE_MS);
        assert_eq!(timings.validation_auto_hide(), None);
    }

    #[test]
    fn test_selection_mode_serde() {
        let mode: SelectionMode = serde_json::from_str(r#""checkbox""#).unwrap();
        assert_eq!(mode, SelectionMode::Checkbox);
    }
}
