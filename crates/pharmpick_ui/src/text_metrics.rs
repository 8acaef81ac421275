//! Text measurement capability.
//!
//! Overflow detection only needs one answer: how wide does this string render
//! in this font. [`TextMeasurer`] is that capability. [`CosmicMeasurer`]
//! shapes text with real fonts through `cosmic-text`; [`ApproxMeasurer`]
//! estimates from a character-width ratio and is deterministic, which is what
//! tests and font-less environments use.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use serde::{Deserialize, Serialize};

use crate::constants::{CHAR_WIDTH_FACTOR, DEFAULT_FONT_SIZE, LINE_HEIGHT_FACTOR};

/// Font used to render a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    /// Font family name; `None` means the platform sans-serif
    pub family: Option<String>,
    /// Font size in pixels
    pub size: f32,
    /// Line height as a ratio of font size
    pub line_height: f32,
}

impl Default for FontStyle {
    fn default() -> Self {
        Self {
            family: None,
            size: DEFAULT_FONT_SIZE,
            line_height: LINE_HEIGHT_FACTOR,
        }
    }
}

impl FontStyle {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.family = Some(family.into());
        self
    }
}

/// Measures rendered text width.
pub trait TextMeasurer {
    /// Width in pixels of `text` rendered on a single line.
    fn text_width(&mut self, text: &str, font: &FontStyle) -> f32;

    /// Whether `text` is wider than `available_width`.
    fn measure_overflow(&mut self, text: &str, font: &FontStyle, available_width: f32) -> bool {
        self.text_width(text, font) > available_width
    }
}

/// Estimates width from an average character width.
#[derive(Debug, Clone, Copy)]
pub struct ApproxMeasurer {
    /// Average character width as a ratio of font size (typically 0.5-0.6)
    pub char_width_ratio: f32,
}

impl ApproxMeasurer {
    pub fn new(char_width_ratio: f32) -> Self {
        Self { char_width_ratio }
    }
}

impl Default for ApproxMeasurer {
    fn default() -> Self {
        Self::new(CHAR_WIDTH_FACTOR)
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn text_width(&mut self, text: &str, font: &FontStyle) -> f32 {
        text.chars().count() as f32 * font.size * self.char_width_ratio
    }
}

/// Shapes text with real fonts, off-screen.
pub struct CosmicMeasurer {
    font_system: FontSystem,
}

impl CosmicMeasurer {
    /// Create a measurer backed by the system font database.
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
        }
    }

    /// Create a measurer over an existing font system (e.g. with embedded fonts).
    pub fn with_font_system(font_system: FontSystem) -> Self {
        Self { font_system }
    }
}

impl Default for CosmicMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CosmicMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicMeasurer").finish_non_exhaustive()
    }
}

impl TextMeasurer for CosmicMeasurer {
    fn text_width(&mut self, text: &str, font: &FontStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let metrics = Metrics::new(font.size, font.size * font.line_height);
        let mut buffer = Buffer::new(&mut self.font_system, metrics);
        // Unbounded width: no wrapping, one run per line
        buffer.set_size(&mut self.font_system, None, None);

        let attrs = match font.family.as_deref() {
            Some(name) => Attrs::new().family(Family::Name(name)),
            None => Attrs::new().family(Family::SansSerif),
        };
        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced);
        buffer.shape_until_scroll(&mut self.font_system, false);

        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let font = FontStyle::default();
        assert_eq!(font.size, 14.0);
        assert!(font.family.is_none());
    }

    #[test]
    fn test_approx_width() {
        let mut m = ApproxMeasurer::default();
        // 5 chars * 10.0 * 0.6 = 30.0
        assert!((m.text_width("hello", &FontStyle::new(10.0)) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_approx_counts_chars_not_bytes() {
        let mut m = ApproxMeasurer::new(1.0);
        assert_eq!(m.text_width("Ñandú", &FontStyle::new(1.0)), 5.0);
    }

    #[test]
    fn test_measure_overflow() {
        let mut m = ApproxMeasurer::new(1.0);
        let font = FontStyle::new(10.0);
        assert!(!m.measure_overflow("abc", &font, 30.0));
        assert!(m.measure_overflow("abcd", &font, 30.0));
    }

    #[test]
    fn test_cosmic_empty_text_has_no_width() {
        let mut m = CosmicMeasurer::with_font_system(FontSystem::new_with_fonts(Vec::new()));
        assert_eq!(m.text_width("", &FontStyle::default()), 0.0);
    }

    #[test]
    fn test_cosmic_shapes_with_system_fonts() {
        // Shaping needs at least one installed font; hosts without any are skipped.
        let mut m = CosmicMeasurer::new();
        if m.font_system.db().len() == 0 {
            return;
        }
        let font = FontStyle::new(16.0);
        let label = "Paracetamol 500mg";

        let short = m.text_width("Para", &font);
        let long = m.text_width(label, &font);
        assert!(short > 0.0);
        assert!(long > short);

        // Overflow flips exactly at the shaped width
        assert!(!m.measure_overflow(label, &font, long));
        assert!(!m.measure_overflow(label, &font, long + 1.0));
        assert!(m.measure_overflow(label, &font, long - 1.0));
    }

    #[test]
    fn test_cosmic_width_scales_with_font_size() {
        let mut m = CosmicMeasurer::new();
        if m.font_system.db().len() == 0 {
            return;
        }
        let small = m.text_width("Ibuprofen", &FontStyle::new(10.0));
        let large = m.text_width("Ibuprofen", &FontStyle::new(20.0));
        assert!(large > small);
    }
}
