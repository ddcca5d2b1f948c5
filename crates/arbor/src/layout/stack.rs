//! Stack and Positioned.
//!
//! Non-positioned children size the stack. Positioned children are laid out
//! afterwards against the stack's final size and placed by their edges.

use serde::Deserialize;

use super::{Alignment, BoxConstraints, RenderBox, wrap_children};
use crate::{
    core::LayoutCx,
    error::Result,
    geom::{Axis, Point, Size},
};

/// How non-positioned children of a Stack are constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StackFit {
    /// Children get the incoming constraints with minimums dropped.
    #[default]
    Loose,
    /// Children are forced to the finite maximum.
    Expand,
    /// Children get the incoming constraints unchanged.
    Passthrough,
}

/// Configuration of a Stack.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Stack {
    /// Constraint policy for non-positioned children.
    pub fit: StackFit,
    /// Placement of children that do not pin an axis.
    pub alignment: Alignment,
}

/// Edges and size a Stack reads from a positioned child.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Positioned {
    /// Distance from the stack's left edge.
    pub left: Option<f32>,
    /// Distance from the stack's top edge.
    pub top: Option<f32>,
    /// Distance from the stack's right edge.
    pub right: Option<f32>,
    /// Distance from the stack's bottom edge.
    pub bottom: Option<f32>,
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
}

impl Positioned {
    /// Leading edge, trailing edge and explicit size along `axis`.
    fn axis(&self, axis: Axis) -> (Option<f32>, Option<f32>, Option<f32>) {
        match axis {
            Axis::Horizontal => (self.left, self.right, self.width),
            Axis::Vertical => (self.top, self.bottom, self.height),
        }
    }

    /// Child bounds along `axis` inside a stack of extent `container`.
    fn range(&self, axis: Axis, container: f32) -> (f32, f32) {
        match self.axis(axis) {
            (_, _, Some(size)) => (size, size),
            (Some(lead), Some(trail), None) if container.is_finite() => {
                let v = (container - lead - trail).max(0.0);
                (v, v)
            }
            _ => (0.0, f32::INFINITY),
        }
    }

    /// The constraint for the child inside a stack of `size`.
    pub fn child_constraints(&self, size: Size) -> BoxConstraints {
        let (min_w, max_w) = self.range(Axis::Horizontal, size.width);
        let (min_h, max_h) = self.range(Axis::Vertical, size.height);
        BoxConstraints::new(min_w, max_w, min_h, max_h)
    }

    /// Offset of a child of extent `child` along `axis`.
    fn offset_on(&self, axis: Axis, container: f32, child: f32, alignment: Alignment) -> f32 {
        match self.axis(axis) {
            (Some(lead), _, _) => lead,
            (None, Some(trail), _) => container - trail - child,
            (None, None, _) => alignment.offset_on(axis, container, child),
        }
    }

    /// Offset of the child inside a stack of `size`.
    pub fn offset(&self, size: Size, child: Size, alignment: Alignment) -> Point {
        Point::new(
            self.offset_on(Axis::Horizontal, size.width, child.width, alignment),
            self.offset_on(Axis::Vertical, size.height, child.height, alignment),
        )
    }

    /// The extent this child asks for along `axis`, given its laid-out size.
    fn requested(&self, axis: Axis, child: f32) -> f32 {
        let (lead, trail, size) = self.axis(axis);
        lead.unwrap_or(0.0) + size.unwrap_or(child) + trail.unwrap_or(0.0)
    }
}

impl Stack {
    /// Constraint handed to every non-positioned child.
    fn flow_constraints(&self, constraints: BoxConstraints) -> BoxConstraints {
        match self.fit {
            StackFit::Loose => constraints.loosen(),
            StackFit::Passthrough => constraints,
            StackFit::Expand => [Axis::Horizontal, Axis::Vertical].into_iter().fold(
                constraints,
                |c, axis| {
                    if c.is_bounded(axis) {
                        c.tighten_on(axis, c.max(axis))
                    } else {
                        c
                    }
                },
            ),
        }
    }

    /// The stack's size given the sizing reference of its children.
    fn resolve_size(&self, constraints: BoxConstraints, reference: Size) -> Size {
        let extent = |axis: Axis| match self.fit {
            StackFit::Loose => reference.along(axis),
            StackFit::Expand | StackFit::Passthrough if constraints.is_bounded(axis) => {
                constraints.max(axis)
            }
            StackFit::Expand | StackFit::Passthrough => reference.along(axis),
        };
        constraints.constrain(Size::new(
            extent(Axis::Horizontal),
            extent(Axis::Vertical),
        ))
    }
}

impl RenderBox for Stack {
    fn layout_children(
        &self,
        cx: &mut LayoutCx<'_>,
        constraints: BoxConstraints,
    ) -> Result<Vec<Size>> {
        let n = cx.child_count();
        let positioned: Vec<Option<Positioned>> = (0..n).map(|i| cx.positioned_of(i)).collect();
        let mut sizes = vec![Size::ZERO; n];

        let flow = self.flow_constraints(constraints);
        let mut reference = Size::ZERO;
        let mut any_flow = false;
        for (index, p) in positioned.iter().enumerate() {
            if p.is_none() {
                any_flow = true;
                let s = cx.layout_child(index, flow)?;
                reference = Size::new(reference.width.max(s.width), reference.height.max(s.height));
                sizes[index] = s;
            }
        }

        if !any_flow {
            for (index, p) in positioned.iter().enumerate() {
                if let Some(p) = p {
                    let probe = cx.layout_child(index, BoxConstraints::tight_for(p.width, p.height))?;
                    reference = Size::new(
                        reference.width.max(p.requested(Axis::Horizontal, probe.width)),
                        reference.height.max(p.requested(Axis::Vertical, probe.height)),
                    );
                }
            }
        }

        let size = self.resolve_size(constraints, reference);
        cx.set_provisional_size(size);

        for (index, p) in positioned.iter().enumerate() {
            if let Some(p) = p {
                sizes[index] = cx.layout_child(index, p.child_constraints(size))?;
            }
        }
        Ok(sizes)
    }

    fn perform_layout(
        &self,
        cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        Ok(cx
            .provisional_size()
            .unwrap_or_else(|| wrap_children(constraints, children)))
    }

    fn position_child(&self, cx: &LayoutCx<'_>, size: Size, index: usize, child: Size) -> Point {
        match cx.positioned_of(index) {
            Some(p) => p.offset(size, child, self.alignment),
            None => self.alignment.offset(size, child),
        }
    }
}

impl RenderBox for Positioned {
    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        Ok(wrap_children(constraints, children))
    }
}
