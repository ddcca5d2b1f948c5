//! Recording layers and compositing them onto a backend canvas.

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    paint::{Canvas, DisplayList, PaintCx},
};

/// Paint `id` and its descendants into `list`, in `layer_root`'s coordinate
/// space. Child repaint boundaries are referenced, not painted. Every node
/// painted inline is appended to `visited`.
pub fn paint_into(
    tree: &Tree,
    id: NodeId,
    list: &mut DisplayList,
    layer_root: NodeId,
    visited: &mut Vec<NodeId>,
) -> Result<()> {
    let node = tree.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
    if id != layer_root && node.is_repaint_boundary() {
        list.save();
        list.translate(node.offset);
        list.push_layer(id);
        list.restore();
        return Ok(());
    }
    visited.push(id);

    list.save();
    if id != layer_root {
        list.translate(node.offset);
    }
    let rb = node.record.props.render_box();
    rb.paint(
        &mut PaintCx::new(id, list, &tree.painters, node.intrinsic),
        node.size,
    )?;
    if rb.clips_children() {
        list.clip_rect(node.size.rect());
    }
    for child in tree.paint_order(id) {
        paint_into(tree, child, list, layer_root, visited)?;
    }
    list.restore();
    Ok(())
}

/// Replay the root layer, and every layer it references, onto `canvas`.
pub fn composite(tree: &Tree, canvas: &mut dyn Canvas) {
    let Some(root) = tree.root else {
        return;
    };
    match tree.layers.get(root) {
        Some(layer) => layer.replay(canvas, &|id| tree.layers.get(id)),
        None => tracing::warn!("composite before the root layer was painted"),
    }
}
