//! Text, Image and CustomPaint leaves.

use serde::Deserialize;

use super::{BoxConstraints, RenderBox};
use crate::{
    core::LayoutCx,
    error::{Error, Result},
    geom::{Point, Rect, Size},
    paint::PaintCx,
    text::TextStyle,
};

/// A block of text measured by the tree's text measurer.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Text {
    /// Content.
    pub text: String,
    /// Style.
    pub style: TextStyle,
    /// Truncate to at most this many lines.
    pub max_lines: Option<usize>,
}

impl RenderBox for Text {
    fn perform_layout(
        &self,
        cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        _children: &[Size],
    ) -> Result<Size> {
        let mut metrics = cx.measurer().measure(&self.text, &self.style, constraints);
        if let Some(max) = self.max_lines {
            if metrics.lines > max {
                let per_line = metrics.height / metrics.lines as f32;
                metrics.height = per_line * max as f32;
                metrics.lines = max;
            }
        }
        Ok(Size::new(metrics.width, metrics.height))
    }

    fn accepts_children(&self) -> bool {
        false
    }

    fn paint(&self, cx: &mut PaintCx<'_>, size: Size) -> Result<()> {
        if self.max_lines.is_some() {
            cx.canvas().clip_rect(size.rect());
        }
        cx.canvas()
            .draw_text(&self.text, Point::ZERO, &self.style, size.width);
        Ok(())
    }
}

/// How a decoded image is fitted into its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImageFit {
    /// Stretch to the box.
    #[default]
    Fill,
    /// Scale to fit inside the box, preserving aspect ratio.
    Contain,
    /// Scale to cover the box, preserving aspect ratio.
    Cover,
    /// Draw at intrinsic size, centered.
    None,
}

impl ImageFit {
    /// Destination rectangle inside `area` for an image of `intrinsic` size.
    pub fn dest(self, area: Size, intrinsic: Size) -> Rect {
        if intrinsic.is_empty() {
            return area.rect();
        }
        let sx = area.width / intrinsic.width;
        let sy = area.height / intrinsic.height;
        let scale = match self {
            Self::Fill => return area.rect(),
            Self::Contain => sx.min(sy),
            Self::Cover => sx.max(sy),
            Self::None => 1.0,
        };
        let w = intrinsic.width * scale;
        let h = intrinsic.height * scale;
        Rect::new((area.width - w) / 2.0, (area.height - h) / 2.0, w, h)
    }
}

/// An image whose intrinsic size is reported out of band through
/// `Tree::resolve_image`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Image {
    /// Image source, passed through to the canvas.
    pub src: String,
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
    /// Fit inside the box.
    pub fit: ImageFit,
}

impl Image {
    /// The size this image asks for, given what is known so far.
    fn requested(&self, intrinsic: Option<Size>) -> Size {
        match (self.width, self.height, intrinsic) {
            (Some(w), Some(h), _) => Size::new(w, h),
            (Some(w), None, Some(i)) if i.width > 0.0 => Size::new(w, w * i.height / i.width),
            (None, Some(h), Some(i)) if i.height > 0.0 => Size::new(h * i.width / i.height, h),
            (w, h, i) => Size::new(
                w.or(i.map(|i| i.width)).unwrap_or(0.0),
                h.or(i.map(|i| i.height)).unwrap_or(0.0),
            ),
        }
    }
}

impl RenderBox for Image {
    fn perform_layout(
        &self,
        cx: &LayoutCx<'_>,
        _constraints: BoxConstraints,
        _children: &[Size],
    ) -> Result<Size> {
        Ok(self.requested(cx.intrinsic()))
    }

    fn accepts_children(&self) -> bool {
        false
    }

    fn paint(&self, cx: &mut PaintCx<'_>, size: Size) -> Result<()> {
        if let Some(intrinsic) = cx.intrinsic() {
            let dest = self.fit.dest(size, intrinsic);
            cx.canvas().draw_image(&self.src, dest);
        }
        Ok(())
    }
}

/// A box painted by a painter registered on the tree under `painter`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CustomPaint {
    /// Registered painter name.
    pub painter: String,
    /// Explicit width.
    pub width: Option<f32>,
    /// Explicit height.
    pub height: Option<f32>,
}

impl RenderBox for CustomPaint {
    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        _children: &[Size],
    ) -> Result<Size> {
        let smallest = constraints.smallest();
        Ok(Size::new(
            self.width.unwrap_or(smallest.width),
            self.height.unwrap_or(smallest.height),
        ))
    }

    fn accepts_children(&self) -> bool {
        false
    }

    fn paint(&self, cx: &mut PaintCx<'_>, size: Size) -> Result<()> {
        let painter = cx.painter(&self.painter).ok_or_else(|| Error::Paint {
            node: cx.node(),
            message: format!("no painter registered as {:?}", self.painter),
        })?;
        painter.paint(cx.canvas(), size)
    }
}
