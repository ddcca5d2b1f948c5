//! Dirty tracking and the ordered layout and paint flushes.

use std::{cmp::Reverse, collections::HashSet, mem};

use crate::{
    core::{id::NodeId, layout_pass::layout_node, paint_pass::paint_into, tree::Tree},
    error::{Error, Result},
    paint::DisplayList,
};

/// Nodes awaiting layout and paint.
///
/// Membership is idempotent: scheduling a node twice is the same as
/// scheduling it once.
#[derive(Debug, Default)]
pub struct PipelineOwner {
    /// Relayout roots awaiting `flush_layout`.
    needs_layout: HashSet<NodeId>,
    /// Layer owners awaiting `flush_paint`.
    needs_paint: HashSet<NodeId>,
}

impl PipelineOwner {
    /// Schedule a relayout. Returns false if already scheduled.
    pub fn schedule_layout(&mut self, id: NodeId) -> bool {
        self.needs_layout.insert(id)
    }

    /// Schedule a repaint. Returns false if already scheduled.
    pub fn schedule_paint(&mut self, id: NodeId) -> bool {
        self.needs_paint.insert(id)
    }

    /// Whether `id` is awaiting layout.
    pub fn is_layout_scheduled(&self, id: NodeId) -> bool {
        self.needs_layout.contains(&id)
    }

    /// Whether `id` is awaiting paint.
    pub fn is_paint_scheduled(&self, id: NodeId) -> bool {
        self.needs_paint.contains(&id)
    }

    /// Number of nodes awaiting layout.
    pub fn pending_layout(&self) -> usize {
        self.needs_layout.len()
    }

    /// Number of nodes awaiting paint.
    pub fn pending_paint(&self) -> usize {
        self.needs_paint.len()
    }

    /// True if nothing is scheduled.
    pub fn is_idle(&self) -> bool {
        self.needs_layout.is_empty() && self.needs_paint.is_empty()
    }

    /// Drop a node from both sets.
    pub fn forget(&mut self, id: NodeId) {
        self.needs_layout.remove(&id);
        self.needs_paint.remove(&id);
    }

    /// Take the layout set, leaving it empty.
    fn take_layout(&mut self) -> Vec<NodeId> {
        mem::take(&mut self.needs_layout).into_iter().collect()
    }

    /// Take the paint set, leaving it empty.
    fn take_paint(&mut self) -> Vec<NodeId> {
        mem::take(&mut self.needs_paint).into_iter().collect()
    }
}

/// Outcome of a paint flush.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PaintReport {
    /// Layers that were re-recorded, deepest first.
    pub repainted: Vec<NodeId>,
    /// Failures. The affected layers keep their previous contents.
    pub faults: Vec<Error>,
}

impl PaintReport {
    /// True if every layer painted without error.
    pub fn is_clean(&self) -> bool {
        self.faults.is_empty()
    }
}

/// Relayout every scheduled node, shallowest first. Returns how many entries
/// were processed.
///
/// On error, the entries not yet processed are rescheduled and the error is
/// returned.
pub fn flush_layout(tree: &mut Tree) -> Result<usize> {
    let span = tracing::debug_span!("flush_layout");
    let _guard = span.enter();

    let mut pending = tree.pipeline.take_layout();
    pending.sort_by_cached_key(|id| tree.nodes.get(*id).map_or(0, |n| n.depth));

    let mut processed = 0;
    for (i, id) in pending.iter().enumerate() {
        let dirty = tree.nodes.get(*id).is_some_and(|n| n.needs_layout);
        if !dirty {
            tracing::trace!(node = ?id, "skipping clean or disposed node");
            continue;
        }
        if let Err(e) = relayout(tree, *id) {
            for rest in &pending[i..] {
                tree.pipeline.schedule_layout(*rest);
            }
            return Err(e);
        }
        processed += 1;
    }
    tracing::debug!(processed, "layout flushed");
    Ok(processed)
}

/// Relayout `id` under its stored constraints. While the resulting size
/// differs from the previous one, the parent is relaid out too, so offsets
/// never lag behind sizes.
fn relayout(tree: &mut Tree, id: NodeId) -> Result<()> {
    let mut current = id;
    loop {
        let node = tree.nodes.get(current).ok_or(Error::NodeNotFound(current))?;
        let parent = node.parent;
        let before = node.size;
        let constraints = match (parent, node.constraints) {
            (None, _) => tree.root_constraints,
            (Some(_), Some(c)) => c,
            (Some(p), None) => {
                // Never laid out: only the parent knows its constraints.
                mark_dirty(tree, p);
                current = p;
                continue;
            }
        };
        let after = layout_node(tree, current, constraints)?;
        match parent {
            Some(p) if after != before => {
                tracing::trace!(node = ?current, ?before, ?after, "size changed, relaying out parent");
                mark_dirty(tree, p);
                current = p;
            }
            _ => return Ok(()),
        }
    }
}

/// Flag a node for layout without scheduling it.
fn mark_dirty(tree: &mut Tree, id: NodeId) {
    if let Some(node) = tree.nodes.get_mut(id) {
        node.needs_layout = true;
    }
}

/// Re-record the layer of every scheduled node, deepest first.
///
/// A failing layer is logged, reported, and keeps its previous contents.
/// Other layers are still processed.
pub fn flush_paint(tree: &mut Tree) -> PaintReport {
    let span = tracing::debug_span!("flush_paint");
    let _guard = span.enter();

    let mut pending: Vec<NodeId> = tree
        .pipeline
        .take_paint()
        .into_iter()
        .filter(|id| tree.nodes.get(*id).is_some_and(|n| n.needs_paint))
        .filter_map(|id| layer_owner(tree, id))
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    pending.sort_by_cached_key(|id| Reverse(tree.nodes.get(*id).map_or(0, |n| n.depth)));

    let mut report = PaintReport::default();
    for id in pending {
        let mut list = DisplayList::default();
        let mut visited = Vec::new();
        match paint_into(tree, id, &mut list, id, &mut visited) {
            Ok(()) => {
                tracing::trace!(node = ?id, ops = list.ops().len(), "layer recorded");
                tree.layers.insert(id, list);
                report.repainted.push(id);
            }
            Err(e) => {
                let key = tree.nodes.get(id).and_then(|n| n.key()).map(str::to_string);
                tracing::error!(node = ?id, ?key, error = %e, "paint failed, keeping previous layer");
                report.faults.push(match e {
                    Error::Paint { .. } => e,
                    other => Error::Paint {
                        node: id,
                        message: other.to_string(),
                    },
                });
            }
        }
        // A failed layer stays clean until it is marked again.
        visited.push(id);
        for v in visited {
            if let Some(node) = tree.nodes.get_mut(v) {
                node.needs_paint = false;
            }
        }
    }
    tracing::debug!(
        repainted = report.repainted.len(),
        faults = report.faults.len(),
        "paint flushed"
    );
    report
}

/// The nearest live layer owner at or above `id`.
fn layer_owner(tree: &Tree, id: NodeId) -> Option<NodeId> {
    let mut current = id;
    loop {
        let node = tree.nodes.get(current)?;
        if node.is_repaint_boundary() {
            return Some(current);
        }
        current = node.parent?;
    }
}
