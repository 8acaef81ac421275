//! Trigger label overflow: truncation with an ellipsis and expand-on-demand.

use crate::constants::ELLIPSIS;
use crate::text_metrics::{FontStyle, TextMeasurer};

/// Longest prefix of `text` that fits `available_width` once an ellipsis is
/// appended. Returns just the ellipsis if not even one character fits.
pub fn truncate_to_fit(
    measurer: &mut dyn TextMeasurer,
    text: &str,
    font: &FontStyle,
    available_width: f32,
) -> String {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();

    // Binary search over character counts; width grows with the prefix.
    let (mut lo, mut hi) = (0usize, boundaries.len() - 1);
    while lo < hi {
        let mid = (lo + hi).div_ceil(2);
        let candidate = format!("{}{}", text[..boundaries[mid]].trim_end(), ELLIPSIS);
        if measurer.text_width(&candidate, font) <= available_width {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }

    format!("{}{}", text[..boundaries[lo]].trim_end(), ELLIPSIS)
}

/// Overflow state of one label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextOverflowManager {
    full: String,
    truncated: Option<String>,
    is_expanded: bool,
}

impl TextOverflowManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-measure `text` against the width available to it.
    pub fn measure(
        &mut self,
        measurer: &mut dyn TextMeasurer,
        text: &str,
        font: &FontStyle,
        available_width: f32,
    ) {
        let overflowing =
            available_width > 0.0 && measurer.measure_overflow(text, font, available_width);
        self.full = text.to_string();
        self.truncated =
            overflowing.then(|| truncate_to_fit(measurer, text, font, available_width));
        if !overflowing {
            self.is_expanded = false;
        }
    }

    /// Show `text` as-is, without measuring.
    pub fn set_unmeasured(&mut self, text: &str) {
        self.full = text.to_string();
        self.truncated = None;
        self.is_expanded = false;
    }

    pub fn is_overflowing(&self) -> bool {
        self.truncated.is_some()
    }

    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Text to render right now.
    pub fn display_text(&self) -> &str {
        match &self.truncated {
            Some(truncated) if !self.is_expanded => truncated,
            _ => &self.full,
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full
    }

    /// Show the full label. Only takes effect when it overflows.
    pub fn request_expand(&mut self) -> bool {
        if !self.is_overflowing() || self.is_expanded {
            return false;
        }
        self.is_expanded = true;
        true
    }

    pub fn collapse(&mut self) -> bool {
        std::mem::replace(&mut self.is_expanded, false)
    }

    /// Collapse after the selection changed or the dropdown closed.
    pub fn reset(&mut self) {
        self.is_expanded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_metrics::ApproxMeasurer;

    // 1px per character with a 1px font
    fn unit() -> (ApproxMeasurer, FontStyle) {
        (ApproxMeasurer::new(1.0), FontStyle::new(1.0))
    }

    #[test]
    fn test_short_label_does_not_overflow() {
        let (mut m, font) = unit();
        let mut label = TextOverflowManager::new();
        label.measure(&mut m, "Aspirin", &font, 20.0);
        assert!(!label.is_overflowing());
        assert_eq!(label.display_text(), "Aspirin");
        assert!(!label.request_expand());
    }

    #[test]
    fn test_truncates_to_longest_fitting_prefix() {
        let (mut m, font) = unit();
        let mut label = TextOverflowManager::new();
        label.measure(&mut m, "Amoxicillin 500mg", &font, 8.0);
        assert!(label.is_overflowing());
        // 7 chars + ellipsis = 8px
        assert_eq!(label.display_text(), "Amoxici\u{2026}");
    }

    #[test]
    fn test_truncation_trims_trailing_space() {
        let (mut m, font) = unit();
        assert_eq!(truncate_to_fit(&mut m, "Vitamin D3", &font, 9.0), "Vitamin\u{2026}");
    }

    #[test]
    fn test_nothing_fits() {
        let (mut m, font) = unit();
        assert_eq!(truncate_to_fit(&mut m, "Ibuprofen", &font, 0.5), "\u{2026}");
    }

    #[test]
    fn test_expand_and_collapse() {
        let (mut m, font) = unit();
        let mut label = TextOverflowManager::new();
        label.measure(&mut m, "Metformin hydrochloride", &font, 10.0);
        assert!(label.request_expand());
        assert_eq!(label.display_text(), "Metformin hydrochloride");
        assert!(label.collapse());
        assert!(!label.collapse());
        assert!(label.display_text().ends_with('\u{2026}'));
    }

    #[test]
    fn test_remeasure_wider_clears_expansion() {
        let (mut m, font) = unit();
        let mut label = TextOverflowManager::new();
        label.measure(&mut m, "Omeprazole 20mg", &font, 5.0);
        label.request_expand();
        label.measure(&mut m, "Omeprazole 20mg", &font, 100.0);
        assert!(!label.is_expanded());
        assert!(!label.is_overflowing());
    }

    #[test]
    fn test_reset_collapses() {
        let (mut m, font) = unit();
        let mut label = TextOverflowManager::new();
        label.measure(&mut m, "Salbutamol inhaler", &font, 6.0);
        label.request_expand();
        label.reset();
        assert!(!label.is_expanded());
    }
}
