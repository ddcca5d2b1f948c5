//! Pass-through wrappers.

use serde::Deserialize;

use super::{BoxConstraints, RenderBox, wrap_children};
use crate::{core::LayoutCx, error::Result, geom::Size};

/// Lays its child out unchanged and caches the painted subtree in its own
/// layer.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RepaintBoundary {}

impl RenderBox for RepaintBoundary {
    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        Ok(wrap_children(constraints, children))
    }
}
