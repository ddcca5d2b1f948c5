use serde::Deserialize;

use crate::{
    error::Error,
    geom::{Axis, Point, Size},
};

/// A point within a box, as fractions from -1 (start) to 1 (end) on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Alignment {
    /// Horizontal factor.
    pub x: f32,
    /// Vertical factor.
    pub y: f32,
}

impl Alignment {
    /// Top-left corner.
    pub const TOP_LEFT: Self = Self::new(-1.0, -1.0);
    /// Top edge, centered.
    pub const TOP_CENTER: Self = Self::new(0.0, -1.0);
    /// Top-right corner.
    pub const TOP_RIGHT: Self = Self::new(1.0, -1.0);
    /// Left edge, centered.
    pub const CENTER_LEFT: Self = Self::new(-1.0, 0.0);
    /// Center.
    pub const CENTER: Self = Self::new(0.0, 0.0);
    /// Right edge, centered.
    pub const CENTER_RIGHT: Self = Self::new(1.0, 0.0);
    /// Bottom-left corner.
    pub const BOTTOM_LEFT: Self = Self::new(-1.0, 1.0);
    /// Bottom edge, centered.
    pub const BOTTOM_CENTER: Self = Self::new(0.0, 1.0);
    /// Bottom-right corner.
    pub const BOTTOM_RIGHT: Self = Self::new(1.0, 1.0);

    /// Construct an alignment from raw factors.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The factor along `axis`.
    pub fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    /// Offset of a `child` inside a `container` on one axis.
    pub fn offset_on(&self, axis: Axis, container: f32, child: f32) -> f32 {
        (container - child) * (self.along(axis) + 1.0) / 2.0
    }

    /// Offset of a `child` inside a `container`.
    pub fn offset(&self, container: Size, child: Size) -> Point {
        Point::new(
            self.offset_on(Axis::Horizontal, container.width, child.width),
            self.offset_on(Axis::Vertical, container.height, child.height),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Self::TOP_LEFT
    }
}

impl TryFrom<String> for Alignment {
    type Error = Error;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Ok(match name.as_str() {
            "topLeft" => Self::TOP_LEFT,
            "topCenter" => Self::TOP_CENTER,
            "topRight" => Self::TOP_RIGHT,
            "centerLeft" => Self::CENTER_LEFT,
            "center" => Self::CENTER,
            "centerRight" => Self::CENTER_RIGHT,
            "bottomLeft" => Self::BOTTOM_LEFT,
            "bottomCenter" => Self::BOTTOM_CENTER,
            "bottomRight" => Self::BOTTOM_RIGHT,
            other => return Err(Error::Config(format!("unknown alignment: {other}"))),
        })
    }
}
