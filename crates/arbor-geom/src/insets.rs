use super::{Axis, Point, Rect, Size};

/// Space reserved on each side of a box, as used by padding and margin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    /// Space above the content.
    pub top: f32,
    /// Space right of the content.
    pub right: f32,
    /// Space below the content.
    pub bottom: f32,
    /// Space left of the content.
    pub left: f32,
}

impl EdgeInsets {
    /// No insets.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// Create insets with explicit values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Uniform insets on all sides.
    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Symmetric insets.
    pub fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total inset along `axis`.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// The combined inset extent as a size.
    pub fn size(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }

    /// The top-left origin of the content box.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Sum two insets side by side.
    pub fn combine(&self, other: &Self) -> Self {
        Self::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }

    /// Shrink a rectangle by these insets. If the insets don't fit, the
    /// result collapses to zero extent on that axis.
    pub fn deflate_rect(&self, rect: Rect) -> Rect {
        Rect::new(
            rect.tl.x + self.left,
            rect.tl.y + self.top,
            (rect.w - self.horizontal()).max(0.0),
            (rect.h - self.vertical()).max(0.0),
        )
    }
}
