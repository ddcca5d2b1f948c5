use super::{Canvas, Paint, PathCommand};
use crate::{
    NodeId,
    geom::{Point, Rect},
    text::TextStyle,
};

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintOp {
    /// `Canvas::draw_rect`.
    Rect {
        /// Rectangle in local coordinates.
        rect: Rect,
        /// Paint attributes.
        paint: Paint,
    },
    /// `Canvas::draw_text`.
    Text {
        /// Text content.
        text: String,
        /// Top-left corner.
        at: Point,
        /// Style.
        style: TextStyle,
        /// Wrap width.
        max_width: f32,
    },
    /// `Canvas::draw_image`.
    Image {
        /// Image source.
        src: String,
        /// Destination rectangle.
        dest: Rect,
    },
    /// `Canvas::draw_path`.
    Path {
        /// Path segments.
        commands: Vec<PathCommand>,
        /// Paint attributes.
        paint: Paint,
    },
    /// `Canvas::save`.
    Save,
    /// `Canvas::restore`.
    Restore,
    /// `Canvas::translate`.
    Translate(Point),
    /// `Canvas::scale`.
    Scale(f32, f32),
    /// `Canvas::clip_rect`.
    Clip(Rect),
    /// The cached layer of a child repaint boundary, composited in place.
    Layer(NodeId),
}

/// A recorded sequence of draw calls: the cached output of one layer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayList {
    /// Recorded operations, in order.
    ops: Vec<PaintOp>,
}

impl DisplayList {
    /// Record a reference to the layer owned by `node`.
    pub fn push_layer(&mut self, node: NodeId) {
        self.ops.push(PaintOp::Layer(node));
    }

    /// Recorded operations.
    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// True if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Child layers referenced from this list, in paint order.
    pub fn layers(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ops.iter().filter_map(|op| match op {
            PaintOp::Layer(id) => Some(*id),
            _ => None,
        })
    }

    /// Replay onto `canvas`. Layer references are resolved through `layer`;
    /// unresolved layers are skipped.
    pub fn replay<'a, F>(&self, canvas: &mut dyn Canvas, layer: &F)
    where
        F: Fn(NodeId) -> Option<&'a Self>,
    {
        for op in &self.ops {
            match op {
                PaintOp::Rect { rect, paint } => canvas.draw_rect(*rect, paint),
                PaintOp::Text {
                    text,
                    at,
                    style,
                    max_width,
                } => canvas.draw_text(text, *at, style, *max_width),
                PaintOp::Image { src, dest } => canvas.draw_image(src, *dest),
                PaintOp::Path { commands, paint } => canvas.draw_path(commands, paint),
                PaintOp::Save => canvas.save(),
                PaintOp::Restore => canvas.restore(),
                PaintOp::Translate(by) => canvas.translate(*by),
                PaintOp::Scale(sx, sy) => canvas.scale(*sx, *sy),
                PaintOp::Clip(rect) => canvas.clip_rect(*rect),
                PaintOp::Layer(id) => match layer(*id) {
                    Some(child) => child.replay(canvas, layer),
                    None => tracing::warn!(node = ?id, "missing layer during composite"),
                },
            }
        }
    }
}

impl Canvas for DisplayList {
    fn draw_rect(&mut self, rect: Rect, paint: &Paint) {
        self.ops.push(PaintOp::Rect {
            rect,
            paint: paint.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle, max_width: f32) {
        self.ops.push(PaintOp::Text {
            text: text.to_string(),
            at,
            style: style.clone(),
            max_width,
        });
    }

    fn draw_image(&mut self, src: &str, dest: Rect) {
        self.ops.push(PaintOp::Image {
            src: src.to_string(),
            dest,
        });
    }

    fn draw_path(&mut self, path: &[PathCommand], paint: &Paint) {
        self.ops.push(PaintOp::Path {
            commands: path.to_vec(),
            paint: paint.clone(),
        });
    }

    fn save(&mut self) {
        self.ops.push(PaintOp::Save);
    }

    fn restore(&mut self) {
        self.ops.push(PaintOp::Restore);
    }

    fn translate(&mut self, by: Point) {
        if !by.is_zero() {
            self.ops.push(PaintOp::Translate(by));
        }
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.ops.push(PaintOp::Scale(sx, sy));
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(PaintOp::Clip(rect));
    }
}
