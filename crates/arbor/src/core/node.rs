use std::rc::Rc;

use crate::{
    core::id::NodeId,
    geom::{Point, Size},
    layout::BoxConstraints,
    props::{Record, Tag},
};

/// Core node data stored in the arena.
pub struct Node {
    /// Property record the node is bound to.
    pub(crate) record: Rc<Record>,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in the arena tree.
    pub(crate) children: Vec<NodeId>,
    /// Distance from the root.
    pub(crate) depth: usize,

    /// Size assigned by the last layout.
    pub(crate) size: Size,
    /// Offset relative to the parent's origin, written by the parent.
    pub(crate) offset: Point,
    /// Constraints of the last layout.
    pub(crate) constraints: Option<BoxConstraints>,
    /// Decoded intrinsic size reported by the embedder, for images.
    pub(crate) intrinsic: Option<Size>,

    /// Layout is stale.
    pub(crate) needs_layout: bool,
    /// Painted output is stale.
    pub(crate) needs_paint: bool,
}

impl Node {
    /// A freshly created, dirty node.
    pub(crate) fn new(record: Rc<Record>, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            record,
            parent,
            children: Vec::new(),
            depth,
            size: Size::ZERO,
            offset: Point::ZERO,
            constraints: None,
            intrinsic: None,
            needs_layout: true,
            needs_paint: true,
        }
    }

    /// Return the bound property record.
    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Return the node's tag.
    pub fn tag(&self) -> Tag {
        self.record.tag()
    }

    /// Return the node's key, if any.
    pub fn key(&self) -> Option<&str> {
        self.record.key.as_deref()
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Return the node's depth. The root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Return the size from the last layout.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Return the offset relative to the parent.
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Return the constraints of the last layout.
    pub fn constraints(&self) -> Option<BoxConstraints> {
        self.constraints
    }

    /// Return the decoded intrinsic size, if reported.
    pub fn intrinsic(&self) -> Option<Size> {
        self.intrinsic
    }

    /// Return the stacking index.
    pub fn z_index(&self) -> i32 {
        self.record.z_index
    }

    /// Whether layout is stale.
    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    /// Whether painted output is stale.
    pub fn needs_paint(&self) -> bool {
        self.needs_paint
    }

    /// Whether this node owns a cached layer. The root always does.
    pub fn is_repaint_boundary(&self) -> bool {
        self.parent.is_none()
            || self.record.repaint_boundary
            || self.record.tag() == Tag::RepaintBoundary
    }

    /// Whether a change in this subtree cannot change this node's size.
    pub fn is_relayout_boundary(&self) -> bool {
        self.parent.is_none() || self.constraints.is_some_and(|c| c.is_tight())
    }
}
