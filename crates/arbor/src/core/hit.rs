//! Point-to-node hit testing.

use crate::{
    core::{id::NodeId, tree::Tree},
    geom::{Point, Rect},
};

/// The topmost node under `point`, searching from `id` whose parent origin
/// is at `origin`.
///
/// A node is eligible only if the point lies in its half-open box. Children
/// are tried in reverse paint order and the first hit wins; otherwise the
/// node itself is the hit.
pub fn hit(tree: &Tree, id: NodeId, point: Point, origin: Point) -> Option<NodeId> {
    let node = tree.nodes.get(id)?;
    let at = origin + node.offset;
    if !Rect::from_origin_size(at, node.size).contains_point(point) {
        return None;
    }
    tree.paint_order(id)
        .into_iter()
        .rev()
        .find_map(|child| hit(tree, child, point, at))
        .or(Some(id))
}
