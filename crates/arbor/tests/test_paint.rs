//! Recording layers and compositing them onto a backend.

#[cfg(test)]
mod tests {
    use arbor::{
        Result,
        geom::Size,
        paint::{Canvas, Paint, PaintOp, PathCommand},
        testing::{canvas::TextCanvas, harness::Harness},
    };
    use serde_json::json;

    fn composite(h: &Harness) -> TextCanvas {
        let mut canvas = TextCanvas::new();
        h.tree.composite(&mut canvas);
        canvas
    }

    #[test]
    fn container_paints_decoration_then_children() -> Result<()> {
        let h = Harness::new(
            json!({
                "type": "Container",
                "width": 100,
                "height": 50,
                "color": "red",
                "border": {"color": "black", "width": 2},
                "child": {"type": "Text", "text": "hi"},
            }),
            400.0,
            400.0,
        )?;
        assert_eq!(
            composite(&h).draws(),
            vec![
                "rect 0,0 100x50 fill red",
                "rect 0,0 100x50 stroke(2) black",
                "text \"hi\" at 0,0 max 100",
            ]
        );
        Ok(())
    }

    #[test]
    fn children_paint_in_ascending_z() -> Result<()> {
        let h = Harness::new(
            json!({
                "type": "Stack",
                "children": [
                    {"type": "Container", "width": 10, "height": 10, "color": "top", "zIndex": 5},
                    {"type": "Container", "width": 10, "height": 10, "color": "bottom"},
                ],
            }),
            100.0,
            100.0,
        )?;
        assert_eq!(
            composite(&h).draws(),
            vec!["rect 0,0 10x10 fill bottom", "rect 0,0 10x10 fill top"]
        );
        Ok(())
    }

    #[test]
    fn child_boundaries_are_referenced_not_inlined() -> Result<()> {
        let h = Harness::new(
            json!({
                "type": "Padding",
                "padding": 4,
                "child": {
                    "type": "RepaintBoundary",
                    "key": "rb",
                    "child": {"type": "Container", "width": 8, "height": 8, "color": "blue"},
                },
            }),
            100.0,
            100.0,
        )?;
        let rb = h.id("rb")?;
        let root = h.tree.layer(h.root).map(|l| l.ops().to_vec()).unwrap_or_default();
        assert!(root.contains(&PaintOp::Layer(rb)));
        assert!(!root.iter().any(|op| matches!(op, PaintOp::Rect { .. })));

        let calls = composite(&h).calls;
        let translate = calls.iter().position(|c| c == "translate 4,4");
        let rect = calls.iter().position(|c| c == "rect 0,0 8x8 fill blue");
        assert!(translate.is_some() && rect.is_some() && translate < rect);
        Ok(())
    }

    #[test]
    fn clip_rect_clips_before_children() -> Result<()> {
        let h = Harness::new(
            json!({
                "type": "SizedBox",
                "width": 20,
                "height": 20,
                "child": {
                    "type": "ClipRect",
                    "child": {"type": "Container", "width": 90, "height": 90, "color": "green"},
                },
            }),
            100.0,
            100.0,
        )?;
        let calls = composite(&h).calls;
        let clip = calls.iter().position(|c| c == "clip 0,0 20x20");
        let rect = calls.iter().position(|c| c.starts_with("rect"));
        assert!(clip.is_some() && clip < rect);
        Ok(())
    }

    #[test]
    fn image_draws_once_resolved() -> Result<()> {
        let mut h = Harness::new(
            json!({"type": "Image", "key": "img", "src": "cat.png", "width": 100, "height": 100, "fit": "contain"}),
            400.0,
            400.0,
        )?;
        assert!(composite(&h).draws().is_empty());
        let img = h.id("img")?;
        h.tree.resolve_image(img, Size::new(200.0, 100.0))?;
        h.frame()?;
        assert_eq!(composite(&h).draws(), vec!["image cat.png 0,25 100x50"]);
        Ok(())
    }

    #[test]
    fn custom_painter_draws_paths() -> Result<()> {
        let mut h = Harness::new(
            json!({"type": "CustomPaint", "key": "cp", "painter": "tri", "width": 10, "height": 10}),
            100.0,
            100.0,
        )?;
        h.tree
            .register_painter("tri", |canvas: &mut dyn Canvas, size: Size| -> Result<()> {
                canvas.draw_path(
                    &[
                        PathCommand::MoveTo((0.0, 0.0).into()),
                        PathCommand::LineTo((size.width, 0.0).into()),
                        PathCommand::LineTo((0.0, size.height).into()),
                        PathCommand::Close,
                    ],
                    &Paint::fill("red".into()),
                );
                Ok(())
            });
        let cp = h.id("cp")?;
        h.tree.mark_needs_paint(cp)?;
        assert!(h.frame()?.is_clean());
        assert_eq!(
            composite(&h).draws(),
            vec!["path fill red M0,0 L10,0 L0,10 Z"]
        );
        Ok(())
    }
}
