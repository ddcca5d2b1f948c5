//! Engine configuration.

use serde::Deserialize;

use crate::error::Result;

/// Tunables for a [`Tree`](crate::Tree).
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// How many single-child transparent wrappers a Stack looks through when
    /// deciding whether a child is positioned.
    pub positioned_unwrap_depth: usize,
    /// Advance of one character for the built-in monospace text measurer,
    /// at a font size of 14.
    pub char_width: f32,
    /// Line height for the built-in monospace text measurer, at a font size
    /// of 14.
    pub line_height: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            positioned_unwrap_depth: 8,
            char_width: 8.4,
            line_height: 18.0,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON document.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
