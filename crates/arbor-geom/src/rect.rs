use super::{Point, Size};

/// An axis-aligned rectangle described by its top-left corner and extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub tl: Point,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            tl: Point::new(x, y),
            w,
            h,
        }
    }

    /// Construct a rectangle from an origin and a size.
    pub fn from_origin_size(tl: Point, size: Size) -> Self {
        Self {
            tl,
            w: size.width,
            h: size.height,
        }
    }

    /// A zero rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The rectangle's size.
    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    /// True if the point lies in the half-open span `[tl, tl + size)` on both axes.
    pub fn contains_point(&self, p: impl Into<Point>) -> bool {
        let p = p.into();
        p.x >= self.tl.x && p.x < self.tl.x + self.w && p.y >= self.tl.y && p.y < self.tl.y + self.h
    }

    /// Shift the rectangle by an offset.
    pub fn shift(&self, by: Point) -> Self {
        Self {
            tl: self.tl + by,
            ..*self
        }
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let x0 = self.tl.x.max(other.tl.x);
        let y0 = self.tl.y.max(other.tl.y);
        let x1 = (self.tl.x + self.w).min(other.tl.x + other.w);
        let y1 = (self.tl.y + self.h).min(other.tl.y + other.h);
        if x1 <= x0 || y1 <= y0 {
            None
        } else {
            Some(Self::new(x0, y0, x1 - x0, y1 - y0))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10.0, 10.0, 5.0, 5.0);
        assert!(r.contains_point((10.0, 10.0)));
        assert!(r.contains_point((14.9, 14.9)));
        assert!(!r.contains_point((15.0, 12.0)));
        assert!(!r.contains_point((12.0, 15.0)));
        assert!(!r.contains_point((9.9, 12.0)));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(&Rect::new(20.0, 0.0, 1.0, 1.0)), None);
    }
}
