//! Run-based flow layout.

use serde::Deserialize;

use super::{BoxConstraints, RenderBox, flex::MainAxisAlignment};
use crate::{
    core::LayoutCx,
    error::Result,
    geom::{Axis, Point, Size},
};

/// Configuration of a Wrap.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Wrap {
    /// Direction children flow in before breaking into a new run.
    pub direction: Axis,
    /// Gap between children within a run.
    pub spacing: f32,
    /// Gap between runs.
    pub run_spacing: f32,
    /// Placement of children within each run.
    pub alignment: MainAxisAlignment,
}

/// One line of children.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Run {
    /// Index of the first child.
    start: usize,
    /// One past the last child.
    end: usize,
    /// Main extent including spacing.
    main: f32,
    /// Largest cross extent.
    cross: f32,
}

impl Wrap {
    /// Break children into runs no longer than `max_main`.
    fn runs(&self, max_main: f32, children: &[Size]) -> Vec<Run> {
        let axis = self.direction;
        let mut runs: Vec<Run> = Vec::new();
        for (index, child) in children.iter().enumerate() {
            let main = child.along(axis);
            let cross = child.along(axis.cross());
            match runs.last_mut() {
                Some(run) if run.main + self.spacing + main <= max_main => {
                    run.end = index + 1;
                    run.main += self.spacing + main;
                    run.cross = run.cross.max(cross);
                }
                _ => runs.push(Run {
                    start: index,
                    end: index + 1,
                    main,
                    cross,
                }),
            }
        }
        runs
    }

    /// Total cross extent of `runs`.
    fn cross_extent(&self, runs: &[Run]) -> f32 {
        runs.iter().map(|r| r.cross).sum::<f32>()
            + self.run_spacing * runs.len().saturating_sub(1) as f32
    }
}

impl RenderBox for Wrap {
    fn constraints_for_child(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        _index: usize,
    ) -> BoxConstraints {
        BoxConstraints::from_axes(
            self.direction,
            (0.0, constraints.max(self.direction)),
            (0.0, f32::INFINITY),
        )
    }

    fn perform_layout(
        &self,
        _cx: &LayoutCx<'_>,
        constraints: BoxConstraints,
        children: &[Size],
    ) -> Result<Size> {
        let runs = self.runs(constraints.max(self.direction), children);
        let main = runs.iter().map(|r| r.main).fold(0.0f32, f32::max);
        Ok(constraints.constrain(Size::from_axes(
            self.direction,
            main,
            self.cross_extent(&runs),
        )))
    }

    fn position_children(&self, cx: &LayoutCx<'_>, size: Size, children: &[Size]) -> Vec<Point> {
        let axis = self.direction;
        let mut offsets = vec![Point::ZERO; children.len()];
        let mut cross = 0.0;
        for run in self.runs(cx.constraints().max(axis), children) {
            let free = (size.along(axis) - run.main).max(0.0);
            let (lead, between) = super::flex::distribute(self.alignment, free, run.end - run.start);
            let mut main = lead;
            for index in run.start..run.end {
                offsets[index] = Point::from_axes(axis, main, cross);
                main += children[index].along(axis) + self.spacing + between;
            }
            cross += run.cross + self.run_spacing;
        }
        offsets
    }
}
