//! Painting: the drawing capability, paint attributes and recorded layers.

/// Recorded draw operations.
mod display_list;

use std::{any::Any, collections::HashMap};

use serde::Deserialize;

pub use display_list::{DisplayList, PaintOp};

use crate::{
    NodeId,
    error::Result,
    geom::{Point, Rect, Size},
    text::TextStyle,
};

/// A backend color. Interpretation (names, hex, rgba) is up to the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Color(pub String);

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Fill or stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaintStyle {
    /// Fill the shape.
    Fill,
    /// Stroke the outline with the given width.
    Stroke(f32),
}

/// Attributes for a shape draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Color.
    pub color: Color,
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Corner radius for rectangles.
    pub radius: f32,
}

impl Paint {
    /// A fill.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            radius: 0.0,
        }
    }

    /// A stroke of `width`.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            style: PaintStyle::Stroke(width),
            radius: 0.0,
        }
    }

    /// Set the corner radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }
}

/// One segment of a path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight segment.
    LineTo(Point),
    /// Quadratic curve through a control point.
    QuadTo(Point, Point),
    /// Close the current subpath.
    Close,
}

/// The drawing surface. Coordinates are local to the current transform.
pub trait Canvas {
    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: Rect, paint: &Paint);
    /// Draw text with its top-left corner at `at`, wrapping at `max_width`.
    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle, max_width: f32);
    /// Draw the image identified by `src` scaled into `dest`.
    fn draw_image(&mut self, src: &str, dest: Rect);
    /// Draw a path.
    fn draw_path(&mut self, path: &[PathCommand], paint: &Paint);
    /// Push the current transform and clip.
    fn save(&mut self);
    /// Pop the transform and clip pushed by the matching `save`.
    fn restore(&mut self);
    /// Move the origin.
    fn translate(&mut self, by: Point);
    /// Scale subsequent drawing.
    fn scale(&mut self, sx: f32, sy: f32);
    /// Intersect the clip with `rect`.
    fn clip_rect(&mut self, rect: Rect);
    /// Escape hatch to the backend's native surface.
    fn raw_instance(&mut self) -> Option<&mut dyn Any> {
        None
    }
}

/// Draws the content of a CustomPaint node.
pub trait Painter {
    /// Paint into a box of `size` at the canvas origin.
    fn paint(&self, canvas: &mut dyn Canvas, size: Size) -> Result<()>;
}

impl<F> Painter for F
where
    F: Fn(&mut dyn Canvas, Size) -> Result<()>,
{
    fn paint(&self, canvas: &mut dyn Canvas, size: Size) -> Result<()> {
        self(canvas, size)
    }
}

/// Named painters available to CustomPaint nodes.
pub type PainterRegistry = HashMap<String, Box<dyn Painter>>;

/// What a node sees while painting itself.
pub struct PaintCx<'a> {
    /// Node being painted.
    node: NodeId,
    /// Destination of draw calls.
    canvas: &'a mut dyn Canvas,
    /// Registered painters.
    painters: &'a PainterRegistry,
    /// Decoded intrinsic size, for images.
    intrinsic: Option<Size>,
}

impl<'a> PaintCx<'a> {
    /// Construct a paint context.
    pub fn new(
        node: NodeId,
        canvas: &'a mut dyn Canvas,
        painters: &'a PainterRegistry,
        intrinsic: Option<Size>,
    ) -> Self {
        Self {
            node,
            canvas,
            painters,
            intrinsic,
        }
    }

    /// The node being painted.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// The canvas to draw on.
    pub fn canvas(&mut self) -> &mut dyn Canvas {
        &mut *self.canvas
    }

    /// Look up a painter by name.
    pub fn painter(&self, name: &str) -> Option<&'a dyn Painter> {
        self.painters.get(name).map(|p| p.as_ref())
    }

    /// The node's intrinsic size, once known.
    pub fn intrinsic(&self) -> Option<Size> {
        self.intrinsic
    }
}
