//! The layout engine: runs the three layout phases for one node and exposes
//! the child-facing half of the protocol to variants.

use std::rc::Rc;

use crate::{
    config::Config,
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::{Point, Size},
    layout::{BoxConstraints, flex::FlexProperties, stack::Positioned},
    props::{Record, Tag},
    text::TextMeasurer,
};

/// A variant's view of the node it is laying out.
///
/// Child geometry is only reachable through this type:
/// [`layout_child`](Self::layout_child) computes a child's size and
/// [`place_child`](Self::place_child) applies its offset.
pub struct LayoutCx<'a> {
    /// The tree being laid out.
    tree: &'a mut Tree,
    /// Node under layout.
    node: NodeId,
    /// Children of the node, in order.
    children: Vec<NodeId>,
    /// Constraints the node is being laid out under.
    constraints: BoxConstraints,
    /// Size settled on before children are finished, if any.
    provisional: Option<Size>,
}

impl LayoutCx<'_> {
    /// The node under layout.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Constraints the node is being laid out under.
    pub fn constraints(&self) -> BoxConstraints {
        self.constraints
    }

    /// Lay out the child at `index` and return its size.
    pub fn layout_child(&mut self, index: usize, constraints: BoxConstraints) -> Result<Size> {
        let child = self.child(index)?;
        layout_node(self.tree, child, constraints)
    }

    /// Set the offset of the child at `index` relative to this node.
    pub fn place_child(&mut self, index: usize, offset: Point) {
        let Some(&id) = self.children.get(index) else {
            return;
        };
        if let Some(node) = self.tree.nodes.get_mut(id) {
            node.offset = offset;
        }
    }

    /// The property record of the child at `index`.
    pub fn child_record(&self, index: usize) -> Option<&Record> {
        let id = self.children.get(index)?;
        self.tree.nodes.get(*id).map(|n| n.record.as_ref())
    }

    /// The tag of the child at `index`.
    pub fn child_tag(&self, index: usize) -> Option<Tag> {
        self.child_record(index).map(Record::tag)
    }

    /// Flex metadata of the child at `index`, if it is a weighted flexible.
    pub fn flex_of(&self, index: usize) -> Option<FlexProperties> {
        self.child_record(index).and_then(|r| r.props.flex())
    }

    /// Positioning metadata of the child at `index`.
    ///
    /// Single-child transparent wrappers are looked through, up to
    /// [`Config::positioned_unwrap_depth`] levels.
    pub fn positioned_of(&self, index: usize) -> Option<Positioned> {
        let mut id = *self.children.get(index)?;
        for _ in 0..=self.tree.config.positioned_unwrap_depth {
            let node = self.tree.nodes.get(id)?;
            if let Some(p) = node.record.props.positioned() {
                return Some(p.clone());
            }
            match node.children.as_slice() {
                [only] if node.record.props.is_transparent() => id = *only,
                _ => return None,
            }
        }
        None
    }

    /// The node's decoded intrinsic size, if reported.
    pub fn intrinsic(&self) -> Option<Size> {
        self.tree.nodes.get(self.node).and_then(|n| n.intrinsic)
    }

    /// The tree's text measurer.
    pub fn measurer(&self) -> &dyn TextMeasurer {
        self.tree.measurer.as_ref()
    }

    /// The tree's configuration.
    pub fn config(&self) -> &Config {
        &self.tree.config
    }

    /// Record the node's size before positioned children are laid out
    /// against it.
    pub fn set_provisional_size(&mut self, size: Size) {
        self.provisional = Some(size);
    }

    /// The size recorded with [`set_provisional_size`](Self::set_provisional_size).
    pub fn provisional_size(&self) -> Option<Size> {
        self.provisional
    }

    /// Resolve a child index.
    fn child(&self, index: usize) -> Result<NodeId> {
        self.children.get(index).copied().ok_or_else(|| {
            Error::Invalid(format!(
                "child index {index} out of range ({} children)",
                self.children.len()
            ))
        })
    }
}

/// Lay out `id` under `constraints` and return its size.
///
/// A clean node asked to lay out under its previous constraints returns its
/// cached size without running any phase.
pub fn layout_node(tree: &mut Tree, id: NodeId, constraints: BoxConstraints) -> Result<Size> {
    let node = tree.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
    if !node.needs_layout && node.constraints == Some(constraints) {
        return Ok(node.size);
    }
    let record = Rc::clone(&node.record);
    let children = node.children.clone();
    let rb = record.props.render_box();
    tracing::trace!(node = ?id, tag = %record.tag(), ?constraints, "layout");

    let mut cx = LayoutCx {
        tree: &mut *tree,
        node: id,
        children,
        constraints,
        provisional: None,
    };
    let child_sizes = if rb.accepts_children() {
        rb.layout_children(&mut cx, constraints)?
    } else {
        if cx.child_count() > 0 {
            let e = Error::Unsupported(format!("{} does not take children", record.tag()));
            tracing::warn!(node = ?id, %e, "laying out leaf children at zero extent");
        }
        for index in 0..cx.child_count() {
            cx.layout_child(index, BoxConstraints::tight(Size::ZERO))?;
        }
        vec![Size::ZERO; cx.child_count()]
    };
    let size = constraints.constrain(rb.perform_layout(&cx, constraints, &child_sizes)?);
    let offsets = rb.position_children(&cx, size, &child_sizes);
    for (index, offset) in offsets.into_iter().enumerate() {
        cx.place_child(index, offset);
    }

    let node = tree.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
    node.size = size;
    node.constraints = Some(constraints);
    node.needs_layout = false;
    tree.mark_needs_paint(id)?;
    Ok(size)
}
