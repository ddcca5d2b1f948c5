use crate::{
    geom::{Point, Rect},
    paint::{Canvas, Paint, PaintStyle, PathCommand},
    text::TextStyle,
};

/// A backend canvas that logs every call as one line of text.
///
/// Useful for asserting on composited output without caring about the
/// recorded layer structure.
#[derive(Debug, Default)]
pub struct TextCanvas {
    /// One entry per draw call, in order.
    pub calls: Vec<String>,
}

impl TextCanvas {
    /// Construct an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls that actually draw, skipping transforms and clips.
    pub fn draws(&self) -> Vec<&str> {
        self.calls
            .iter()
            .map(String::as_str)
            .filter(|c| {
                ["rect", "text", "image", "path"]
                    .iter()
                    .any(|p| c.starts_with(p))
            })
            .collect()
    }
}

/// Format a rectangle as `x,y wxh`.
fn rect(r: Rect) -> String {
    format!("{},{} {}x{}", r.tl.x, r.tl.y, r.w, r.h)
}

/// Format a paint as `fill <color>` or `stroke(<w>) <color>`.
fn paint(p: &Paint) -> String {
    match p.style {
        PaintStyle::Fill => format!("fill {}", p.color.0),
        PaintStyle::Stroke(w) => format!("stroke({w}) {}", p.color.0),
    }
}

impl Canvas for TextCanvas {
    fn draw_rect(&mut self, r: Rect, p: &Paint) {
        self.calls.push(format!("rect {} {}", rect(r), paint(p)));
    }

    fn draw_text(&mut self, text: &str, at: Point, _style: &TextStyle, max_width: f32) {
        self.calls
            .push(format!("text {:?} at {},{} max {max_width}", text, at.x, at.y));
    }

    fn draw_image(&mut self, src: &str, dest: Rect) {
        self.calls.push(format!("image {src} {}", rect(dest)));
    }

    fn draw_path(&mut self, path: &[PathCommand], p: &Paint) {
        let mut line = format!("path {}", paint(p));
        for cmd in path {
            line.push_str(&match cmd {
                PathCommand::MoveTo(a) => format!(" M{},{}", a.x, a.y),
                PathCommand::LineTo(a) => format!(" L{},{}", a.x, a.y),
                PathCommand::QuadTo(c, a) => format!(" Q{},{} {},{}", c.x, c.y, a.x, a.y),
                PathCommand::Close => " Z".to_string(),
            });
        }
        self.calls.push(line);
    }

    fn save(&mut self) {
        self.calls.push("save".into());
    }

    fn restore(&mut self) {
        self.calls.push("restore".into());
    }

    fn translate(&mut self, by: Point) {
        self.calls.push(format!("translate {},{}", by.x, by.y));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.calls.push(format!("scale {sx},{sy}"));
    }

    fn clip_rect(&mut self, r: Rect) {
        self.calls.push(format!("clip {}", rect(r)));
    }
}
