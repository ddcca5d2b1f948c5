//! Text styles and measurement.
//!
//! Shaping is left to the embedder. Layout only needs a [`TextMeasurer`] that
//! turns a string, a style and constraints into metrics. The built-in
//! [`MonospaceMeasurer`] estimates from fixed per-character metrics.

use serde::Deserialize;
use unicode_width::UnicodeWidthStr;

use crate::{config::Config, layout::BoxConstraints, paint::Color};

/// The font size fixed per-character metrics are quoted at.
pub const BASE_FONT_SIZE: f32 = 14.0;

/// Visual attributes of a run of text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyle {
    /// Font size in logical pixels.
    pub font_size: f32,
    /// Font family name, passed through to the canvas.
    pub font_family: Option<String>,
    /// Fill color.
    pub color: Option<Color>,
    /// Absolute line height. Derived from the font size when unset.
    pub line_height: Option<f32>,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: BASE_FONT_SIZE,
            font_family: None,
            color: None,
            line_height: None,
        }
    }
}

impl TextStyle {
    /// True if the two styles differ only in paint attributes.
    pub fn same_metrics(&self, other: &Self) -> bool {
        self.font_size == other.font_size
            && self.font_family == other.font_family
            && self.line_height == other.line_height
    }
}

/// The measured extent of a block of text.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    /// Width of the widest line.
    pub width: f32,
    /// Total height of all lines.
    pub height: f32,
    /// Number of lines after wrapping.
    pub lines: usize,
    /// Distance from the top of a line to its baseline.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of a line.
    pub descent: f32,
}

/// Text measurement oracle.
pub trait TextMeasurer {
    /// Measure `text` in `style`, wrapping against a finite max width.
    fn measure(&self, text: &str, style: &TextStyle, constraints: BoxConstraints) -> TextMetrics;
}

/// Estimates text metrics from a fixed advance per terminal column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance of one column at [`BASE_FONT_SIZE`].
    pub char_width: f32,
    /// Line height at [`BASE_FONT_SIZE`].
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MonospaceMeasurer {
    /// A measurer using the metrics in `config`.
    pub fn from_config(config: &Config) -> Self {
        Self {
            char_width: config.char_width,
            line_height: config.line_height,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle, constraints: BoxConstraints) -> TextMetrics {
        let scale = style.font_size / BASE_FONT_SIZE;
        let advance = self.char_width * scale;
        let line_height = style.line_height.unwrap_or(self.line_height * scale);
        let max_columns = (constraints.max_width.is_finite() && advance > 0.0)
            .then(|| ((constraints.max_width / advance).floor() as usize).max(1));

        let lines = wrap_columns(text, max_columns);
        let widest = lines.iter().copied().max().unwrap_or(0);
        let count = lines.len().max(1);
        TextMetrics {
            width: widest as f32 * advance,
            height: count as f32 * line_height,
            lines: count,
            ascent: line_height * 0.8,
            descent: line_height * 0.2,
        }
    }
}

/// Wrap `text` at `max` columns, or only at explicit newlines when
/// unbounded. Returns the width in columns of each line.
fn wrap_columns(text: &str, max: Option<usize>) -> Vec<usize> {
    textwrap::wrap(text, max.unwrap_or(usize::MAX))
        .iter()
        .map(|line| line.width())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Size;

    #[test]
    fn single_line_unbounded() {
        let m = MonospaceMeasurer::default().measure(
            "hello world",
            &TextStyle::default(),
            BoxConstraints::UNBOUNDED,
        );
        assert_eq!(m.lines, 1);
        assert_eq!(m.width, 11.0 * 8.4);
        assert_eq!(m.height, 18.0);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        let m = MonospaceMeasurer::default().measure(
            "hello world",
            &TextStyle::default(),
            BoxConstraints::loose(Size::new(50.0, 100.0)),
        );
        assert_eq!(m.lines, 2);
        assert_eq!(m.width, 5.0 * 8.4);
        assert_eq!(m.height, 36.0);
    }

    #[test]
    fn font_size_scales_metrics() {
        let style = TextStyle {
            font_size: 28.0,
            ..TextStyle::default()
        };
        let m = MonospaceMeasurer::default().measure("ab", &style, BoxConstraints::UNBOUNDED);
        assert_eq!(m.width, 2.0 * 8.4 * 2.0);
        assert_eq!(m.height, 36.0);
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(wrap_columns("日本", None), vec![4]);
    }

    #[test]
    fn explicit_newlines_and_empty_text() {
        assert_eq!(wrap_columns("a\nbc", None), vec![1, 2]);
        assert_eq!(wrap_columns("", None), vec![0]);
        assert_eq!(wrap_columns("aaa bb c", Some(4)), vec![3, 4]);
        assert_eq!(wrap_columns("aaaaaaaa b", Some(4)), vec![4, 4, 1]);
    }
}
