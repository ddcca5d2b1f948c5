use serde_json::Value;

use crate::{
    NodeId, Tree,
    core::{Node, PaintReport},
    error::{Error, Result},
    geom::{Point, Size},
    layout::BoxConstraints,
    props::Record,
};

/// A [`Tree`] built from a JSON record, with accessors that look nodes up
/// by key.
pub struct Harness {
    /// The tree under test.
    pub tree: Tree,
    /// Root of the tree.
    pub root: NodeId,
}

impl Harness {
    /// Build a tree from `record` and lay it out under loose constraints of
    /// `width` x `height`.
    pub fn new(record: Value, width: f32, height: f32) -> Result<Self> {
        Self::with_constraints(record, BoxConstraints::loose(Size::new(width, height)))
    }

    /// Build a tree from `record` and run one frame under `constraints`.
    pub fn with_constraints(record: Value, constraints: BoxConstraints) -> Result<Self> {
        let mut tree = Tree::new();
        tree.set_root_constraints(constraints);
        let root = tree.build(Record::from_value(&record)?)?;
        tree.run_frame()?;
        Ok(Self { tree, root })
    }

    /// The node carrying `key`.
    pub fn id(&self, key: &str) -> Result<NodeId> {
        self.tree
            .find_by_key(key)
            .ok_or_else(|| Error::Invalid(format!("no node keyed {key:?}")))
    }

    /// The node carrying `key`.
    pub fn node(&self, key: &str) -> Result<&Node> {
        let id = self.id(key)?;
        self.tree.node(id).ok_or(Error::NodeNotFound(id))
    }

    /// Size of the node carrying `key`.
    pub fn size(&self, key: &str) -> Result<Size> {
        self.node(key).map(Node::size)
    }

    /// Offset of the node carrying `key`, relative to its parent.
    pub fn offset(&self, key: &str) -> Result<Point> {
        self.node(key).map(Node::offset)
    }

    /// Offset of the node carrying `key`, relative to the root.
    pub fn absolute(&self, key: &str) -> Result<Point> {
        let id = self.id(key)?;
        self.tree.absolute_offset(id).ok_or(Error::NodeNotFound(id))
    }

    /// Constraints the node carrying `key` was last laid out under.
    pub fn constraints(&self, key: &str) -> Result<BoxConstraints> {
        let id = self.id(key)?;
        self.node(key)?
            .constraints()
            .ok_or_else(|| Error::Invalid(format!("{id:?} was never laid out")))
    }

    /// Re-bind the node carrying `key` to a new record.
    pub fn update(&mut self, key: &str, record: Value) -> Result<()> {
        let id = self.id(key)?;
        self.tree.update(id, Record::from_value(&record)?)
    }

    /// Run one frame.
    pub fn frame(&mut self) -> Result<PaintReport> {
        self.tree.run_frame()
    }
}
