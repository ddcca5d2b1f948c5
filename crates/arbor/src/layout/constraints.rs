//! Box constraints.
//!
//! Constraints flow down the tree and bound the size a node may take. A node
//! answers with a single `Size` that must lie inside them.

use crate::geom::{Axis, EdgeInsets, Size};

/// Min/max bounds for a node's width and height.
///
/// `min <= max` holds on both axes. Constructors clamp rather than reject:
/// a min above its max is pulled down to the max, negative values are raised
/// to zero, and NaN is treated as zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxConstraints {
    /// Smallest permitted width.
    pub min_width: f32,
    /// Largest permitted width. May be infinite.
    pub max_width: f32,
    /// Smallest permitted height.
    pub min_height: f32,
    /// Largest permitted height. May be infinite.
    pub max_height: f32,
}

impl BoxConstraints {
    /// Unbounded constraints (infinite max, zero min).
    pub const UNBOUNDED: Self = Self {
        min_width: 0.0,
        max_width: f32::INFINITY,
        min_height: 0.0,
        max_height: f32::INFINITY,
    };

    /// Build constraints, clamping so that `min <= max` on each axis.
    pub fn new(min_width: f32, max_width: f32, min_height: f32, max_height: f32) -> Self {
        let (min_width, max_width) = normalize_axis(min_width, max_width);
        let (min_height, max_height) = normalize_axis(min_height, max_height);
        Self {
            min_width,
            max_width,
            min_height,
            max_height,
        }
    }

    /// Tight constraints (exact size required).
    pub fn tight(size: Size) -> Self {
        Self::new(size.width, size.width, size.height, size.height)
    }

    /// Loose constraints with maximum bounds.
    pub fn loose(max: Size) -> Self {
        Self::new(0.0, max.width, 0.0, max.height)
    }

    /// Tight on a single axis, unbounded on the other.
    pub fn tight_for(width: Option<f32>, height: Option<f32>) -> Self {
        let (min_width, max_width) = width.map_or((0.0, f32::INFINITY), |w| (w, w));
        let (min_height, max_height) = height.map_or((0.0, f32::INFINITY), |h| (h, h));
        Self::new(min_width, max_width, min_height, max_height)
    }

    /// Build constraints from main/cross ranges along `axis`.
    pub fn from_axes(axis: Axis, main: (f32, f32), cross: (f32, f32)) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main.0, main.1, cross.0, cross.1),
            Axis::Vertical => Self::new(cross.0, cross.1, main.0, main.1),
        }
    }

    /// Clamp a size into these bounds.
    #[inline]
    pub fn constrain(&self, size: Size) -> Size {
        Size::new(
            clamp(size.width, self.min_width, self.max_width),
            clamp(size.height, self.min_height, self.max_height),
        )
    }

    /// Tighten these constraints into `outer`, preserving `min <= max`.
    pub fn enforce(&self, outer: &Self) -> Self {
        Self::new(
            clamp(self.min_width, outer.min_width, outer.max_width),
            clamp(self.max_width, outer.min_width, outer.max_width),
            clamp(self.min_height, outer.min_height, outer.max_height),
            clamp(self.max_height, outer.min_height, outer.max_height),
        )
    }

    /// The minimum bound along `axis`.
    pub fn min(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// The maximum bound along `axis`.
    pub fn max(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// True if the max along `axis` is finite.
    pub fn is_bounded(&self, axis: Axis) -> bool {
        self.max(axis).is_finite()
    }

    /// True if min == max along `axis`.
    pub fn is_tight_on(&self, axis: Axis) -> bool {
        self.min(axis) == self.max(axis)
    }

    /// Whether these are tight constraints (min == max on both axes).
    pub fn is_tight(&self) -> bool {
        self.is_tight_on(Axis::Horizontal) && self.is_tight_on(Axis::Vertical)
    }

    /// Drop the minimums, keeping the maximums.
    pub fn loosen(&self) -> Self {
        Self::new(0.0, self.max_width, 0.0, self.max_height)
    }

    /// Drop the minimum along a single axis.
    pub fn loosen_on(&self, axis: Axis) -> Self {
        self.with_range(axis, 0.0, self.max(axis))
    }

    /// Replace the bounds on one axis.
    pub fn with_range(&self, axis: Axis, min: f32, max: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(min, max, self.min_height, self.max_height),
            Axis::Vertical => Self::new(self.min_width, self.max_width, min, max),
        }
    }

    /// Replace the bounds on one axis with an exact value.
    pub fn tighten_on(&self, axis: Axis, value: f32) -> Self {
        self.with_range(axis, value, value)
    }

    /// Shrink constraints by insets.
    pub fn deflate(&self, insets: &EdgeInsets) -> Self {
        let h = insets.horizontal();
        let v = insets.vertical();
        Self::new(
            (self.min_width - h).max(0.0),
            (self.max_width - h).max(0.0),
            (self.min_height - v).max(0.0),
            (self.max_height - v).max(0.0),
        )
    }

    /// The biggest finite size that satisfies these constraints. Unbounded
    /// axes fall back to their minimum.
    pub fn biggest(&self) -> Size {
        Size::new(
            if self.max_width.is_finite() {
                self.max_width
            } else {
                self.min_width
            },
            if self.max_height.is_finite() {
                self.max_height
            } else {
                self.min_height
            },
        )
    }

    /// The smallest size that satisfies these constraints.
    pub fn smallest(&self) -> Size {
        Size::new(self.min_width, self.min_height)
    }

    /// True if `size` lies within these bounds.
    pub fn is_satisfied_by(&self, size: Size) -> bool {
        size.width >= self.min_width
            && size.width <= self.max_width
            && size.height >= self.min_height
            && size.height <= self.max_height
    }
}

impl Default for BoxConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

/// Clamp a pair of bounds so that `0 <= min <= max`.
fn normalize_axis(min: f32, max: f32) -> (f32, f32) {
    let min = if min.is_nan() { 0.0 } else { min.max(0.0) };
    let max = if max.is_nan() { 0.0 } else { max.max(0.0) };
    (min.min(max), max)
}

/// Clamp a value into `[min, max]`, with NaN mapped to `min`.
#[inline]
fn clamp(value: f32, min: f32, max: f32) -> f32 {
    if value.is_nan() {
        min
    } else {
        value.max(min).min(max)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tight_constraints() {
        let c = BoxConstraints::tight(Size::new(100.0, 50.0));
        assert!(c.is_tight());
        assert_eq!(c.min_width, 100.0);
        assert_eq!(c.max_height, 50.0);
    }

    #[test]
    fn min_above_max_is_clamped() {
        let c = BoxConstraints::new(300.0, 200.0, 10.0, 5.0);
        assert_eq!((c.min_width, c.max_width), (200.0, 200.0));
        assert_eq!((c.min_height, c.max_height), (5.0, 5.0));
    }

    #[test]
    fn constrain_clamps_both_axes() {
        let c = BoxConstraints::new(10.0, 100.0, 0.0, 50.0);
        assert_eq!(c.constrain(Size::new(5.0, 80.0)), Size::new(10.0, 50.0));
        assert_eq!(c.constrain(Size::new(50.0, 25.0)), Size::new(50.0, 25.0));
    }

    #[test]
    fn deflate_never_negative() {
        let c = BoxConstraints::tight(Size::new(10.0, 10.0)).deflate(&EdgeInsets::all(8.0));
        assert_eq!(c.max_width, 0.0);
        assert_eq!(c.min_height, 0.0);
        let u = BoxConstraints::UNBOUNDED.deflate(&EdgeInsets::all(8.0));
        assert!(!u.is_bounded(Axis::Horizontal));
    }

    #[test]
    fn biggest_falls_back_on_unbounded_axis() {
        let c = BoxConstraints::new(20.0, f32::INFINITY, 0.0, 40.0);
        assert_eq!(c.biggest(), Size::new(20.0, 40.0));
    }

    #[test]
    fn enforce_stays_inside_outer() {
        let inner = BoxConstraints::tight(Size::new(300.0, 10.0));
        let outer = BoxConstraints::new(0.0, 200.0, 20.0, 30.0);
        let e = inner.enforce(&outer);
        assert_eq!(e, BoxConstraints::new(200.0, 200.0, 20.0, 20.0));
    }

    proptest! {
        #[test]
        fn constrain_is_always_satisfied(
            min_w in 0.0f32..500.0,
            span_w in 0.0f32..500.0,
            min_h in 0.0f32..500.0,
            span_h in 0.0f32..500.0,
            w in -100.0f32..2000.0,
            h in -100.0f32..2000.0,
        ) {
            let c = BoxConstraints::new(min_w, min_w + span_w, min_h, min_h + span_h);
            prop_assert!(c.is_satisfied_by(c.constrain(Size::new(w, h))));
        }

        #[test]
        fn new_always_orders_bounds(a in -50.0f32..500.0, b in -50.0f32..500.0) {
            let c = BoxConstraints::new(a, b, b, a);
            prop_assert!(c.min_width <= c.max_width);
            prop_assert!(c.min_height <= c.max_height);
        }
    }
}
