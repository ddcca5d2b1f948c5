//! The box-constraint layout protocol and its variants.
//!
//! Every node lays out in three phases driven by the engine in
//! `core::layout_pass`:
//!
//! 1. [`RenderBox::layout_children`] sizes each child under a derived constraint.
//! 2. [`RenderBox::perform_layout`] computes the node's own size.
//! 3. [`RenderBox::position_children`] places each child once both sizes are final.
//!
//! Variants only reach their children through a [`LayoutCx`], so a child's
//! size and offset are written by its parent and nobody else.

/// Alignment within a box.
mod align;
/// Box-model variants: Container, Padding, SizedBox, Center, Align, ClipRect.
pub mod box_model;
/// Box constraints.
pub mod constraints;
/// Row, Column and their flexible children.
pub mod flex;
/// Padding and margin normalization.
pub mod insets;
/// Text, Image and CustomPaint leaves.
pub mod leaf;
/// Pass-through wrappers.
pub mod proxy;
/// Stack and Positioned.
pub mod stack;
/// Run-based flow layout.
pub mod wrap;

pub use align::Alignment;
pub use constraints::BoxConstraints;

use crate::{
    core::LayoutCx,
    error::Result,
    geom::{Point, Size},
    paint::PaintCx,
};

/// Sizing and positioning policy for one node variant.
pub trait RenderBox {
    /// Derive the constraint handed to the child at `index`.
    fn constraints_for_child(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        _index: usize,
    ) -> BoxConstraints {
        constraints
    }

    /// Lay out every child and return their sizes, in child order.
    fn layout_children(
        &self,
        cx: &mut LayoutCx<'_>,
        constraints: BoxConstraints,
    ) -> Result<Vec<Size>> {
        let mut sizes = Vec::with_capacity(cx.child_count());
        for index in 0..cx.child_count() {
            let child_constraints = self.constraints_for_child(cx, constraints, index);
            sizes.push(cx.layout_child(index, child_constraints)?);
        }
        Ok(sizes)
    }

    /// Compute this node's size. The engine clamps the result into `constraints`.
    fn perform_layout(
        &self,
        cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size>;

    /// Offset of a single child relative to this node's origin.
    fn position_child(&self, _cx: &LayoutCx<'_>, _size: Size, _index: usize, _child: Size) -> Point {
        Point::ZERO
    }

    /// Offsets for all children. Override when placement depends on siblings.
    fn position_children(&self, cx: &LayoutCx<'_>, size: Size, children: &[Size]) -> Vec<Point> {
        children
            .iter()
            .enumerate()
            .map(|(index, child)| self.position_child(cx, size, index, *child))
            .collect()
    }

    /// False for leaves. Children handed to a leaf are laid out at zero extent.
    fn accepts_children(&self) -> bool {
        true
    }

    /// True if painting of children is clipped to this node's bounds.
    fn clips_children(&self) -> bool {
        false
    }

    /// Paint this node's own content in local coordinates. Children are
    /// painted by the engine afterwards.
    fn paint(&self, _cx: &mut PaintCx<'_>, _size: Size) -> Result<()> {
        Ok(())
    }
}

/// The size of a node that simply wraps its children: the largest child
/// extent on each axis, or the smallest permitted size without children.
pub(crate) fn wrap_children(constraints: BoxConstraints, children: &[Size]) -> Size {
    if children.is_empty() {
        return constraints.smallest();
    }
    children.iter().fold(Size::ZERO, |acc, c| {
        Size::new(acc.width.max(c.width), acc.height.max(c.height))
    })
}
