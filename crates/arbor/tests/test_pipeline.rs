//! Scheduling, flush ordering, paint fault isolation and re-binding.

#[cfg(test)]
mod tests {
    use arbor::{
        Error, Result,
        geom::{Point, Size},
        paint::Canvas,
        testing::{harness::Harness, init_tracing},
    };
    use serde_json::json;

    /// A fixed-size root whose child is a relayout boundary.
    fn boxed() -> Result<Harness> {
        Harness::new(
            json!({
                "type": "SizedBox",
                "key": "root",
                "width": 100,
                "height": 100,
                "child": {
                    "type": "Container",
                    "key": "c",
                    "color": "red",
                    "child": {"type": "SizedBox", "key": "d", "width": 50, "height": 50},
                },
            }),
            400.0,
            400.0,
        )
    }

    #[test]
    fn frame_leaves_the_pipeline_idle() -> Result<()> {
        let h = boxed()?;
        assert!(h.tree.pipeline().is_idle());
        assert!(!h.node("c")?.needs_layout());
        assert!(!h.node("d")?.needs_paint());
        Ok(())
    }

    #[test]
    fn repeated_scheduling_is_processed_once() -> Result<()> {
        let mut h = boxed()?;
        let c = h.id("c")?;
        for _ in 0..3 {
            h.tree.mark_needs_layout(c)?;
        }
        assert_eq!(h.tree.pipeline().pending_layout(), 1);
        assert!(h.tree.pipeline().is_layout_scheduled(c));
        assert_eq!(h.tree.flush_layout()?, 1);
        Ok(())
    }

    #[test]
    fn layout_marks_stop_at_relayout_boundaries() -> Result<()> {
        let mut h = boxed()?;
        let d = h.id("d")?;
        h.tree.mark_needs_layout(d)?;
        assert!(h.tree.pipeline().is_layout_scheduled(d));
        assert!(!h.node("c")?.needs_layout());
        Ok(())
    }

    #[test]
    fn shallow_entries_are_flushed_first() -> Result<()> {
        let mut h = boxed()?;
        let c = h.id("c")?;
        let d = h.id("d")?;
        h.tree.mark_needs_layout(d)?;
        h.tree.mark_needs_layout(c)?;
        assert_eq!(h.tree.pipeline().pending_layout(), 2);
        // Relaying out `c` cleans `d`, so its own entry is skipped.
        assert_eq!(h.tree.flush_layout()?, 1);
        assert!(!h.node("d")?.needs_layout());
        Ok(())
    }

    #[test]
    fn layers_are_repainted_deepest_first() -> Result<()> {
        let mut h = Harness::new(
            json!({
                "type": "Column",
                "children": [{
                    "type": "Container",
                    "key": "outer",
                    "repaintBoundary": true,
                    "child": {
                        "type": "RepaintBoundary",
                        "key": "inner",
                        "child": {"type": "Container", "key": "leaf", "width": 5, "height": 5, "color": "red"},
                    },
                }],
            }),
            100.0,
            100.0,
        )?;
        let depths = |h: &Harness, ids: &[arbor::NodeId]| -> Vec<usize> {
            ids.iter()
                .filter_map(|id| h.tree.node(*id))
                .map(arbor::Node::depth)
                .collect()
        };
        for key in ["leaf", "outer"] {
            let id = h.id(key)?;
            h.tree.mark_needs_paint(id)?;
        }
        let report = h.frame()?;
        assert_eq!(report.repainted, vec![h.id("inner")?, h.id("outer")?]);
        let d = depths(&h, &report.repainted);
        assert!(d.windows(2).all(|w| w[0] >= w[1]));
        Ok(())
    }

    #[test]
    fn repaint_boundary_stops_paint_propagation() -> Result<()> {
        let mut h = Harness::new(
            json!({
                "type": "Container",
                "key": "root",
                "child": {
                    "type": "Container",
                    "key": "b",
                    "repaintBoundary": true,
                    "child": {"type": "Container", "key": "leaf", "color": "red", "width": 10, "height": 10},
                },
            }),
            100.0,
            100.0,
        )?;
        let root = h.id("root")?;
        let b = h.id("b")?;
        let leaf = h.id("leaf")?;

        h.tree.mark_needs_paint(b)?;
        assert!(h.tree.pipeline().is_paint_scheduled(b));
        assert!(!h.tree.pipeline().is_paint_scheduled(root));
        assert!(!h.node("root")?.needs_paint());

        h.tree.mark_needs_paint(leaf)?;
        assert!(h.tree.pipeline().is_paint_scheduled(leaf));
        assert!(!h.tree.pipeline().is_paint_scheduled(root));

        let report = h.frame()?;
        assert_eq!(report.repainted, vec![b]);
        Ok(())
    }

    #[test]
    fn non_boundary_paint_bubbles_to_the_root() -> Result<()> {
        let mut h = boxed()?;
        let d = h.id("d")?;
        let root = h.root;
        h.tree.mark_needs_paint(d)?;
        assert!(h.tree.pipeline().is_paint_scheduled(root));
        assert!(h.node("c")?.needs_paint());
        let report = h.frame()?;
        assert_eq!(report.repainted, vec![root]);
        Ok(())
    }

    #[test]
    fn paint_faults_are_isolated() -> Result<()> {
        init_tracing();
        let mut h = Harness::new(
            json!({
                "type": "Row",
                "children": [
                    {"type": "RepaintBoundary", "key": "a", "child": {"type": "CustomPaint", "key": "boom", "painter": "boom", "width": 10, "height": 10}},
                    {"type": "RepaintBoundary", "key": "b", "child": {"type": "CustomPaint", "painter": "ok", "width": 10, "height": 10}},
                ],
            }),
            100.0,
            100.0,
        )?;
        h.tree
            .register_painter("ok", |canvas: &mut dyn Canvas, size: Size| -> Result<()> {
                canvas.clip_rect(size.rect());
                Ok(())
            });
        h.tree
            .register_painter("boom", |_: &mut dyn Canvas, _: Size| -> Result<()> {
                Err(Error::Invalid("painter exploded".into()))
            });
        let (a, b, boom) = (h.id("a")?, h.id("b")?, h.id("boom")?);
        h.tree.mark_needs_paint(boom)?;
        h.tree.mark_needs_paint(b)?;

        let report = h.frame()?;
        assert!(!report.is_clean());
        assert_eq!(report.faults.len(), 1);
        assert!(matches!(&report.faults[0], Error::Paint { node, .. } if *node == a));
        assert_eq!(report.repainted, vec![b]);
        assert!(h.tree.layer(b).is_some());
        Ok(())
    }

    #[test]
    fn faulted_layer_keeps_its_previous_contents() -> Result<()> {
        let mut h = Harness::new(
            json!({"type": "Column", "children": [
                {"type": "CustomPaint", "key": "cp", "painter": "flaky", "width": 10, "height": 10, "repaintBoundary": true},
            ]}),
            100.0,
            100.0,
        )?;
        let cp = h.id("cp")?;
        h.tree
            .register_painter("flaky", |canvas: &mut dyn Canvas, size: Size| -> Result<()> {
                canvas.clip_rect(size.rect());
                Ok(())
            });
        h.tree.mark_needs_paint(cp)?;
        assert!(h.frame()?.is_clean());
        let before = h.tree.layer(cp).cloned();
        assert!(before.is_some());

        h.tree
            .register_painter("flaky", |_: &mut dyn Canvas, _: Size| -> Result<()> {
                Err(Error::Invalid("flaked".into()))
            });
        h.tree.mark_needs_paint(cp)?;
        let report = h.frame()?;
        assert!(matches!(&report.faults[0], Error::Paint { node, .. } if *node == cp));
        assert_eq!(h.tree.layer(cp).cloned(), before);
        Ok(())
    }

    #[test]
    fn missing_painter_is_a_paint_fault() -> Result<()> {
        let h = Harness::new(
            json!({"type": "CustomPaint", "painter": "nobody", "width": 10, "height": 10}),
            100.0,
            100.0,
        )?;
        assert!(h.tree.layer(h.root).is_none());
        Ok(())
    }

    #[test]
    fn disposed_nodes_are_skipped() -> Result<()> {
        let mut h = boxed()?;
        let c = h.id("c")?;
        let d = h.id("d")?;
        h.tree.mark_needs_layout(d)?;
        h.tree.dispose(c)?;
        assert!(!h.tree.pipeline().is_layout_scheduled(d));
        assert!(h.tree.node(d).is_none());
        h.frame()?;
        assert_eq!(h.size("root")?, Size::new(100.0, 100.0));
        Ok(())
    }

    #[test]
    fn paint_only_changes_skip_layout() -> Result<()> {
        let mut h = boxed()?;
        h.update(
            "c",
            json!({
                "type": "Container",
                "key": "c",
                "color": "blue",
                "child": {"type": "SizedBox", "key": "d", "width": 50, "height": 50},
            }),
        )?;
        assert_eq!(h.tree.pipeline().pending_layout(), 0);
        assert!(h.tree.pipeline().pending_paint() > 0);
        assert!(!h.node("c")?.needs_layout());
        Ok(())
    }

    #[test]
    fn layout_changes_schedule_layout() -> Result<()> {
        let mut h = boxed()?;
        h.update(
            "c",
            json!({
                "type": "Container",
                "key": "c",
                "color": "red",
                "padding": 10,
                "child": {"type": "SizedBox", "key": "d", "width": 50, "height": 50},
            }),
        )?;
        assert!(h.node("c")?.needs_layout());
        h.frame()?;
        assert_eq!(h.offset("d")?, Point::new(10.0, 10.0));
        assert_eq!(h.size("d")?, Size::new(80.0, 80.0));
        Ok(())
    }

    #[test]
    fn flex_weight_change_relays_out_the_parent() -> Result<()> {
        let mut h = Harness::with_constraints(
            json!({"type": "Row", "children": [
                {"type": "Expanded", "key": "a"},
                {"type": "Expanded", "key": "b"},
            ]}),
            arbor::layout::BoxConstraints::tight(Size::new(300.0, 10.0)),
        )?;
        assert_eq!(h.size("a")?.width, 150.0);
        h.update("a", json!({"type": "Expanded", "key": "a", "flex": 2}))?;
        h.frame()?;
        assert_eq!(h.size("a")?.width, 200.0);
        assert_eq!(h.size("b")?.width, 100.0);
        Ok(())
    }

    #[test]
    fn position_change_never_leaves_stale_sibling_offsets() -> Result<()> {
        let stack = |top: f32| {
            json!({
                "type": "Stack",
                "key": "s",
                "children": [{
                    "type": "Positioned",
                    "key": "p",
                    "left": 10,
                    "top": top,
                    "child": {"type": "SizedBox", "width": 20, "height": 20},
                }],
            })
        };
        let mut h = Harness::new(
            json!({
                "type": "Column",
                "mainAxisSize": "min",
                "crossAxisAlignment": "start",
                "children": [stack(0.0), {"type": "SizedBox", "key": "after", "width": 10, "height": 10}],
            }),
            400.0,
            400.0,
        )?;
        assert_eq!(h.size("s")?, Size::new(30.0, 20.0));
        assert_eq!(h.offset("after")?, Point::new(0.0, 20.0));

        h.update("p", json!({
            "type": "Positioned",
            "key": "p",
            "left": 10,
            "top": 30,
            "child": {"type": "SizedBox", "width": 20, "height": 20},
        }))?;
        let s = h.id("s")?;
        assert!(h.tree.pipeline().is_layout_scheduled(s));
        assert!(!h.node("p")?.needs_layout());

        h.frame()?;
        assert_eq!(h.offset("p")?, Point::new(10.0, 30.0));
        assert_eq!(h.size("s")?, Size::new(30.0, 50.0));
        assert_eq!(h.offset("after")?, Point::new(0.0, 50.0));
        assert_eq!(h.tree.node(h.root).map(arbor::Node::size), Some(Size::new(30.0, 60.0)));
        Ok(())
    }

    /// A Stack holding a Positioned behind a RepaintBoundary.
    fn wrapped_positioned(left: f32, width: f32) -> serde_json::Value {
        json!({"type": "Positioned", "key": "p", "left": left, "width": width, "height": 10})
    }

    fn wrapped_stack() -> Result<Harness> {
        Harness::new(
            json!({
                "type": "Stack",
                "key": "s",
                "fit": "expand",
                "children": [{"type": "RepaintBoundary", "key": "rb", "child": wrapped_positioned(10.0, 20.0)}],
            }),
            200.0,
            100.0,
        )
    }

    #[test]
    fn moving_a_wrapped_positioned_relays_out_the_stack() -> Result<()> {
        let mut h = wrapped_stack()?;
        assert_eq!(h.absolute("p")?, Point::new(10.0, 0.0));

        h.update("p", wrapped_positioned(50.0, 20.0))?;
        let s = h.id("s")?;
        assert!(h.tree.pipeline().is_layout_scheduled(s));
        assert!(!h.node("p")?.needs_layout());

        h.frame()?;
        assert_eq!(h.absolute("p")?, Point::new(50.0, 0.0));
        assert_eq!(h.size("p")?, Size::new(20.0, 10.0));
        Ok(())
    }

    #[test]
    fn resizing_a_wrapped_positioned_relays_out_the_stack() -> Result<()> {
        let mut h = wrapped_stack()?;
        h.update("p", wrapped_positioned(10.0, 80.0))?;
        assert!(h.tree.pipeline().is_layout_scheduled(h.id("s")?));

        h.frame()?;
        assert_eq!(h.size("p")?, Size::new(80.0, 10.0));
        assert_eq!(h.size("rb")?, Size::new(80.0, 10.0));
        assert_eq!(h.absolute("p")?, Point::new(10.0, 0.0));
        Ok(())
    }

    #[test]
    fn dropping_a_repaint_boundary_discards_its_layer() -> Result<()> {
        let container = |boundary: bool| {
            json!({"type": "Container", "key": "c", "width": 10, "height": 10, "color": "red", "repaintBoundary": boundary})
        };
        let mut h = Harness::new(
            json!({"type": "Column", "children": [container(true)]}),
            100.0,
            100.0,
        )?;
        let c = h.id("c")?;
        assert!(h.tree.layer(c).is_some());

        h.update("c", container(false))?;
        assert!(h.tree.layer(c).is_none());
        assert!(h.tree.pipeline().is_paint_scheduled(h.root));
        h.frame()?;
        assert!(h.tree.layer(c).is_none());
        assert!(h.tree.layer(h.root).is_some_and(|l| l.layers().next().is_none()));

        h.update("c", container(true))?;
        assert!(h.tree.pipeline().is_paint_scheduled(c));
        h.frame()?;
        assert!(h.tree.layer(c).is_some());
        assert!(h.tree.layer(h.root).is_some_and(|l| l.layers().any(|id| id == c)));
        Ok(())
    }

    #[test]
    fn root_constraint_change_relays_out() -> Result<()> {
        let mut h = Harness::new(json!({"type": "Center", "key": "c"}), 100.0, 100.0)?;
        h.tree
            .set_root_constraints(arbor::layout::BoxConstraints::loose(Size::new(300.0, 50.0)));
        assert_eq!(h.tree.pipeline().pending_layout(), 1);
        h.frame()?;
        assert_eq!(h.size("c")?, Size::new(300.0, 50.0));
        Ok(())
    }
}
