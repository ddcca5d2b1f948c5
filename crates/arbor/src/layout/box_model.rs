//! The shared box model.
//!
//! Container, Padding, SizedBox, Center, Align and ClipRect are all
//! configurations of [`BoxModel`]. Each variant exposes its model through
//! `model()` and delegates its layout hooks to it.

use serde::Deserialize;

use super::{Alignment, BoxConstraints, RenderBox, insets};
use crate::{
    core::LayoutCx,
    error::Result,
    geom::{Axis, EdgeInsets, Point, Size},
    paint::{Color, Paint, PaintCx},
};

/// Sizing and positioning policy shared by the box-model variants.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BoxModel {
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
    /// Lower width bound applied to this node.
    pub min_width: Option<f32>,
    /// Upper width bound applied to this node.
    pub max_width: Option<f32>,
    /// Lower height bound applied to this node.
    pub min_height: Option<f32>,
    /// Upper height bound applied to this node.
    pub max_height: Option<f32>,
    /// Space between the border and the child.
    #[serde(deserialize_with = "insets::lenient")]
    pub padding: EdgeInsets,
    /// Space outside the border.
    #[serde(deserialize_with = "insets::lenient")]
    pub margin: EdgeInsets,
    /// Placement of the child inside the content box. Setting an alignment
    /// loosens the child and makes the node fill its parent.
    pub alignment: Option<Alignment>,
    /// Fill the parent's finite maximum even without an alignment.
    pub expand: bool,
    /// Clip children to this node's bounds.
    pub clip: bool,
}

impl BoxModel {
    /// Padding and margin together.
    fn insets(&self) -> EdgeInsets {
        self.padding.combine(&self.margin)
    }

    /// Explicit extent along `axis`.
    fn explicit(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// This node's own min/max bounds, unconstrained where unset.
    fn own_bounds(&self) -> BoxConstraints {
        BoxConstraints::new(
            self.min_width.unwrap_or(0.0),
            self.max_width.unwrap_or(f32::INFINITY),
            self.min_height.unwrap_or(0.0),
            self.max_height.unwrap_or(f32::INFINITY),
        )
    }

    /// Clamp an extent by own bounds, then by the incoming constraints.
    fn clamp_extent(&self, axis: Axis, value: f32, constraints: &BoxConstraints) -> f32 {
        let own = self.own_bounds();
        let v = value.max(own.min(axis)).min(own.max(axis));
        v.max(constraints.min(axis)).min(constraints.max(axis))
    }

    /// The constraint handed to the child.
    pub fn child_constraints(&self, constraints: BoxConstraints) -> BoxConstraints {
        let insets = self.insets();
        let mut inner = self
            .own_bounds()
            .deflate(&insets)
            .enforce(&constraints.deflate(&insets));
        for axis in [Axis::Horizontal, Axis::Vertical] {
            if let Some(v) = self.explicit(axis) {
                let extent =
                    (self.clamp_extent(axis, v, &constraints) - insets.along(axis)).max(0.0);
                inner = if self.alignment.is_some() {
                    inner.with_range(axis, 0.0, extent)
                } else {
                    inner.tighten_on(axis, extent)
                };
            } else if self.alignment.is_some() {
                inner = inner.loosen_on(axis);
            }
        }
        inner
    }

    /// This node's size given the child sizes.
    pub fn size(&self, constraints: BoxConstraints, children: &[Size]) -> Size {
        let insets = self.insets();
        let fills = self.alignment.is_some() || self.expand;
        let extent = |axis: Axis| {
            let value = if let Some(v) = self.explicit(axis) {
                v
            } else if fills && constraints.is_bounded(axis) {
                constraints.max(axis)
            } else {
                let content = children
                    .iter()
                    .map(|c| c.along(axis))
                    .fold(0.0f32, f32::max);
                content + insets.along(axis)
            };
            self.clamp_extent(axis, value, &constraints)
        };
        Size::new(extent(Axis::Horizontal), extent(Axis::Vertical))
    }

    /// Offset of a child once both sizes are final.
    pub fn child_offset(&self, size: Size, child: Size) -> Point {
        let insets = self.insets();
        let origin = insets.origin();
        match self.alignment {
            Some(alignment) => {
                let content = Size::new(
                    (size.width - insets.horizontal()).max(0.0),
                    (size.height - insets.vertical()).max(0.0),
                );
                origin + alignment.offset(content, child)
            }
            None => origin,
        }
    }
}

/// Implement the layout hooks of a variant by delegating to its `model()`.
macro_rules! box_model_hooks {
    () => {
        fn constraints_for_child(
            &self,
            _cx: &LayoutCx<'_>,
            constraints: BoxConstraints,
            _index: usize,
        ) -> BoxConstraints {
            self.model().child_constraints(constraints)
        }

        fn perform_layout(
            &self,
            _cx: &LayoutCx<'_>,
            constraints: BoxConstraints,
            children: &[Size],
        ) -> Result<Size> {
            Ok(self.model().size(constraints, children))
        }

        fn position_child(&self, _cx: &LayoutCx<'_>, size: Size, _index: usize, child: Size) -> Point {
            self.model().child_offset(size, child)
        }

        fn clips_children(&self) -> bool {
            self.model().clip
        }
    };
}

// ---------------------------------------------------------------------------
// Container

/// A border drawn around a Container.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    /// Stroke width.
    #[serde(default = "Border::default_width")]
    pub width: f32,
    /// Stroke color.
    pub color: Color,
}

impl Border {
    /// Stroke width used when none is given.
    fn default_width() -> f32 {
        1.0
    }
}

/// Paint-only attributes of a Container.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Decoration {
    /// Background fill.
    pub color: Option<Color>,
    /// Border stroke.
    pub border: Option<Border>,
    /// Corner radius.
    pub radius: f32,
    /// Pointer cursor shown over the node. Consumed by the input layer.
    pub cursor: Option<String>,
}

/// The general-purpose box: every box-model field plus a decoration.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Container {
    /// Layout policy.
    #[serde(flatten)]
    pub layout: BoxModel,
    /// Paint-only attributes.
    #[serde(flatten)]
    pub decoration: Decoration,
}

impl Container {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        self.layout.clone()
    }
}

impl RenderBox for Container {
    box_model_hooks!();

    fn paint(&self, cx: &mut PaintCx<'_>, size: Size) -> Result<()> {
        let rect = self.layout.margin.deflate_rect(size.rect());
        let radius = self.decoration.radius;
        if let Some(color) = &self.decoration.color {
            cx.canvas()
                .draw_rect(rect, &Paint::fill(color.clone()).with_radius(radius));
        }
        if let Some(border) = &self.decoration.border {
            cx.canvas().draw_rect(
                rect,
                &Paint::stroke(border.color.clone(), border.width).with_radius(radius),
            );
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Single-purpose variants

/// Insets its child.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Padding {
    /// Space around the child.
    #[serde(deserialize_with = "insets::lenient")]
    pub padding: EdgeInsets,
}

impl Padding {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        BoxModel {
            padding: self.padding,
            ..BoxModel::default()
        }
    }
}

impl RenderBox for Padding {
    box_model_hooks!();
}

/// Forces an explicit size on either axis.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SizedBox {
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
}

impl SizedBox {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        BoxModel {
            width: self.width,
            height: self.height,
            ..BoxModel::default()
        }
    }
}

impl RenderBox for SizedBox {
    box_model_hooks!();
}

/// Centers its child and fills the parent's finite bounds.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Center {}

impl Center {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        BoxModel {
            alignment: Some(Alignment::CENTER),
            ..BoxModel::default()
        }
    }
}

impl RenderBox for Center {
    box_model_hooks!();
}

/// Places its child at a named alignment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Align {
    /// Child placement.
    pub alignment: Alignment,
}

impl Default for Align {
    fn default() -> Self {
        Self {
            alignment: Alignment::CENTER,
        }
    }
}

impl Align {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        BoxModel {
            alignment: Some(self.alignment),
            ..BoxModel::default()
        }
    }
}

impl RenderBox for Align {
    box_model_hooks!();
}

/// Clips its children to its bounds.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ClipRect {}

impl ClipRect {
    /// The box model for this configuration.
    pub fn model(&self) -> BoxModel {
        BoxModel {
            clip: true,
            ..BoxModel::default()
        }
    }
}

impl RenderBox for ClipRect {
    box_model_hooks!();
}
