//! Padding and margin normalization.
//!
//! Property records may spell insets as a single number, a
//! `{top, right, bottom, left}` record, or a CSS-style shorthand list of one
//! to four numbers.

use std::result::Result as StdResult;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    error::{Error, Result},
    geom::EdgeInsets,
};

/// Interpret an insets value strictly.
///
/// `null` means "no insets". Shorthand lists follow the CSS convention:
/// `[all]`, `[vertical, horizontal]`, `[top, horizontal, bottom]` and
/// `[top, right, bottom, left]`.
pub fn normalize(value: &Value) -> Result<EdgeInsets> {
    match value {
        Value::Null => Ok(EdgeInsets::ZERO),
        Value::Number(_) => Ok(EdgeInsets::all(number(value)?)),
        Value::Object(map) => {
            let side = |name: &str| map.get(name).map_or(Ok(0.0), number);
            Ok(EdgeInsets::new(
                side("top")?,
                side("right")?,
                side("bottom")?,
                side("left")?,
            ))
        }
        Value::Array(items) => {
            let v = items.iter().map(number).collect::<Result<Vec<_>>>()?;
            match v.as_slice() {
                [all] => Ok(EdgeInsets::all(*all)),
                [vertical, horizontal] => Ok(EdgeInsets::symmetric(*vertical, *horizontal)),
                [top, horizontal, bottom] => {
                    Ok(EdgeInsets::new(*top, *horizontal, *bottom, *horizontal))
                }
                [top, right, bottom, left] => Ok(EdgeInsets::new(*top, *right, *bottom, *left)),
                _ => Err(Error::Config(format!(
                    "insets shorthand takes 1 to 4 values, got {}",
                    v.len()
                ))),
            }
        }
        other => Err(Error::Config(format!("insets must be numeric, got {other}"))),
    }
}

/// Interpret an insets value, substituting zero insets for anything malformed.
///
/// The problem is reported as a warning and layout continues.
pub fn resolve(value: &Value) -> EdgeInsets {
    normalize(value).unwrap_or_else(|e| {
        tracing::warn!(%e, "ignoring malformed insets");
        EdgeInsets::ZERO
    })
}

/// Serde adapter for insets fields in property records.
pub(crate) fn lenient<'de, D>(d: D) -> StdResult<EdgeInsets, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(d)?;
    Ok(resolve(&value))
}

/// Extract a single finite number.
fn number(value: &Value) -> Result<f32> {
    value
        .as_f64()
        .map(|n| n as f32)
        .filter(|n| n.is_finite())
        .ok_or_else(|| Error::Config(format!("insets entry is not a number: {value}")))
}
