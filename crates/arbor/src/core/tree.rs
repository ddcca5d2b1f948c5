//! The node arena and the driver-facing mutation API.

use std::{collections::HashMap, rc::Rc};

use slotmap::{SecondaryMap, SlotMap};

use crate::{
    config::Config,
    core::{
        hit::hit, id::NodeId, layout_pass::layout_node, node::Node, paint_pass,
        pipeline::{self, PaintReport, PipelineOwner},
    },
    error::{Error, Result},
    geom::{Point, Size},
    layout::BoxConstraints,
    paint::{Canvas, DisplayList, Painter, PainterRegistry},
    props::{Change, Record, Tag},
    text::{MonospaceMeasurer, TextMeasurer},
};

/// The node arena, the scheduler and the cached layers of one scene.
///
/// The driver builds the tree from a [`Record`], re-binds nodes with
/// [`update`](Self::update), and calls [`run_frame`](Self::run_frame) whenever
/// it wants geometry and layers to be consistent again.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node, once built.
    pub(crate) root: Option<NodeId>,
    /// Constraints the root is laid out under.
    pub(crate) root_constraints: BoxConstraints,
    /// Dirty sets.
    pub(crate) pipeline: PipelineOwner,
    /// Cached output of every repaint boundary.
    pub(crate) layers: SecondaryMap<NodeId, DisplayList>,
    /// Painters available to CustomPaint nodes.
    pub(crate) painters: PainterRegistry,
    /// Text measurement oracle.
    pub(crate) measurer: Box<dyn TextMeasurer>,
    /// Tunables.
    pub(crate) config: Config,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    /// An empty tree with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// An empty tree. The built-in text measurer takes its metrics from
    /// `config`.
    pub fn with_config(config: Config) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
            root_constraints: BoxConstraints::UNBOUNDED,
            pipeline: PipelineOwner::default(),
            layers: SecondaryMap::new(),
            painters: PainterRegistry::new(),
            measurer: Box::new(MonospaceMeasurer::from_config(&config)),
            config,
        }
    }

    /// Replace the text measurer. Every text leaf is relaid out.
    pub fn set_measurer(&mut self, measurer: impl TextMeasurer + 'static) -> Result<()> {
        self.measurer = Box::new(measurer);
        let text: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, n)| n.tag() == Tag::Text)
            .map(|(id, _)| id)
            .collect();
        for id in text {
            self.mark_needs_layout(id)?;
        }
        Ok(())
    }

    /// Register a painter for CustomPaint nodes naming `name`.
    pub fn register_painter(&mut self, name: impl Into<String>, painter: impl Painter + 'static) {
        self.painters.insert(name.into(), Box::new(painter));
    }

    /// The configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The root node, if built.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tree holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The scheduler.
    pub fn pipeline(&self) -> &PipelineOwner {
        &self.pipeline
    }

    /// The cached layer of a repaint boundary, once painted.
    pub fn layer(&self, id: NodeId) -> Option<&DisplayList> {
        self.layers.get(id)
    }

    /// The constraints the root is laid out under.
    pub fn root_constraints(&self) -> BoxConstraints {
        self.root_constraints
    }

    /// Set the constraints the root is laid out under, usually the viewport.
    pub fn set_root_constraints(&mut self, constraints: BoxConstraints) {
        if self.root_constraints == constraints {
            return;
        }
        self.root_constraints = constraints;
        if let Some(root) = self.root
            && let Some(node) = self.nodes.get_mut(root)
        {
            node.needs_layout = true;
            self.pipeline.schedule_layout(root);
        }
    }

    /// Build a fresh tree from `record`, disposing of any previous root.
    /// Returns the new root.
    pub fn build(&mut self, record: impl Into<Rc<Record>>) -> Result<NodeId> {
        if let Some(old) = self.root.take() {
            self.dispose_subtree(old);
        }
        let root = self.create(record.into(), None, 0);
        self.root = Some(root);
        self.mark_needs_layout(root)?;
        tracing::debug!(nodes = self.nodes.len(), "tree built");
        Ok(root)
    }

    /// Re-bind `id` to `record` in place, keeping its identity.
    ///
    /// Layout-affecting changes schedule layout, paint-only changes schedule
    /// paint. Children are matched by key, or by tag at the same position
    /// among unkeyed siblings; unmatched old children are disposed.
    pub fn update(&mut self, id: NodeId, record: impl Into<Rc<Record>>) -> Result<()> {
        self.rebind(id, record.into())
    }

    /// Remove `id` and its descendants. Pending scheduler entries and cached
    /// layers for the subtree are dropped.
    pub fn dispose(&mut self, id: NodeId) -> Result<()> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let parent = node.parent;
        self.dispose_subtree(id);
        match parent {
            Some(p) => {
                if let Some(parent) = self.nodes.get_mut(p) {
                    parent.children.retain(|c| *c != id);
                }
                self.mark_needs_layout(p)?;
            }
            None => self.root = None,
        }
        Ok(())
    }

    /// Find the first node carrying `key`, in pre-order from the root.
    pub fn find_by_key(&self, key: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.nodes.get(id)?;
            if node.key() == Some(key) {
                return Some(id);
            }
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// The node's offset relative to the root.
    pub fn absolute_offset(&self, id: NodeId) -> Option<Point> {
        let mut at = Point::ZERO;
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.nodes.get(c)?;
            at = at + node.offset;
            current = node.parent;
        }
        Some(at)
    }

    /// Children of `id` in paint order: ascending z-index, insertion order
    /// among equals.
    pub fn paint_order(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut children = node.children.clone();
        children.sort_by_key(|c| self.nodes.get(*c).map_or(0, Node::z_index));
        children
    }

    // ------------------------------------------------------------------
    // Scheduling

    /// Mark `id` as needing layout.
    ///
    /// Every node from `id` up to its relayout boundary is marked and the
    /// boundary is scheduled. Paint is scheduled as well.
    pub fn mark_needs_layout(&mut self, id: NodeId) -> Result<()> {
        let mut current = id;
        loop {
            let node = self
                .nodes
                .get_mut(current)
                .ok_or(Error::NodeNotFound(current))?;
            node.needs_layout = true;
            match node.parent {
                Some(parent) if !node.is_relayout_boundary() => current = parent,
                _ => break,
            }
        }
        self.pipeline.schedule_layout(current);
        self.mark_needs_paint(id)
    }

    /// Mark `id` as moved within its parent without changing size.
    ///
    /// Only the node that positions `id` is scheduled; the node's own size is
    /// reused. For parent data that is the first ancestor above any
    /// transparent wrappers.
    pub fn mark_needs_position(&mut self, id: NodeId) -> Result<()> {
        self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        match self.parent_data_reader(id) {
            Some(parent) => {
                if let Some(p) = self.nodes.get_mut(parent) {
                    p.needs_layout = true;
                }
                self.pipeline.schedule_layout(parent);
                self.mark_needs_paint(parent)
            }
            None => self.mark_needs_layout(id),
        }
    }

    /// Mark `id` as needing paint.
    ///
    /// The node is scheduled. Unless it is a repaint boundary, dirtiness
    /// bubbles to the parent, since its output lives in an ancestor's layer.
    pub fn mark_needs_paint(&mut self, id: NodeId) -> Result<()> {
        let mut current = id;
        loop {
            let node = self
                .nodes
                .get_mut(current)
                .ok_or(Error::NodeNotFound(current))?;
            node.needs_paint = true;
            self.pipeline.schedule_paint(current);
            match node.parent {
                Some(parent) if !node.is_repaint_boundary() => current = parent,
                _ => return Ok(()),
            }
        }
    }

    /// Report the decoded intrinsic size of an Image node. The node is
    /// relaid out on the next frame.
    pub fn resolve_image(&mut self, id: NodeId, size: Size) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        if node.intrinsic == Some(size) {
            return Ok(());
        }
        node.intrinsic = Some(size);
        tracing::debug!(node = ?id, ?size, "image resolved");
        self.mark_needs_layout(id)
    }

    // ------------------------------------------------------------------
    // Frame

    /// Lay out `id` under `constraints` directly and return its size.
    pub fn layout(&mut self, id: NodeId, constraints: BoxConstraints) -> Result<Size> {
        layout_node(self, id, constraints)
    }

    /// Run every pending layout, shallowest first. Returns the number of
    /// entries processed.
    pub fn flush_layout(&mut self) -> Result<usize> {
        pipeline::flush_layout(self)
    }

    /// Re-record every pending layer, deepest first.
    pub fn flush_paint(&mut self) -> PaintReport {
        pipeline::flush_paint(self)
    }

    /// Flush layout, then paint.
    pub fn run_frame(&mut self) -> Result<PaintReport> {
        self.flush_layout()?;
        Ok(self.flush_paint())
    }

    /// Replay the cached layers onto a backend canvas.
    pub fn composite(&self, canvas: &mut dyn Canvas) {
        paint_pass::composite(self, canvas);
    }

    /// The topmost node under `point`, in root coordinates.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        hit(self, self.root?, point, Point::ZERO)
    }

    /// The hit node followed by its ancestors up to the root.
    pub fn hit_test_path(&self, point: Point) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.hit_test(point);
        while let Some(id) = current {
            path.push(id);
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        path
    }

    // ------------------------------------------------------------------
    // Building

    /// The ancestor that reads `id`'s parent data. For a Positioned node this
    /// is the first ancestor above single-child transparent wrappers, looking
    /// through at most [`Config::positioned_unwrap_depth`] of them; otherwise
    /// it is the parent.
    fn parent_data_reader(&self, id: NodeId) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        let mut current = node.parent?;
        if node.record.props.positioned().is_none() {
            return Some(current);
        }
        for _ in 0..self.config.positioned_unwrap_depth {
            let wrapper = self.nodes.get(current)?;
            if !(wrapper.record.props.is_transparent() && wrapper.children.len() == 1) {
                break;
            }
            match wrapper.parent {
                Some(up) => current = up,
                None => break,
            }
        }
        Some(current)
    }

    /// Create a node and its subtree from `record`.
    fn create(&mut self, record: Rc<Record>, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = self
            .nodes
            .insert(Node::new(Rc::clone(&record), parent, depth));
        let children: Vec<NodeId> = record
            .children
            .iter()
            .map(|child| self.create(Rc::clone(child), Some(id), depth + 1))
            .collect();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = children;
        }
        id
    }

    /// Re-bind one node and reconcile its children.
    fn rebind(&mut self, id: NodeId, record: Rc<Record>) -> Result<()> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        if Rc::ptr_eq(&node.record, &record) {
            return Ok(());
        }
        let old = Rc::clone(&node.record);
        if old.tag() != record.tag() {
            return Err(Error::Invalid(format!(
                "cannot re-bind a {} node to a {} record",
                old.tag(),
                record.tag()
            )));
        }
        let change = old.classify(&record);
        if let Some(node) = self.nodes.get_mut(id) {
            node.record = Rc::clone(&record);
        }
        let restructured = self.reconcile_children(id, &record.children)?;
        tracing::trace!(node = ?id, ?change, restructured, "re-bound");

        match change {
            Change::None => {}
            Change::Paint => self.mark_needs_paint(id)?,
            Change::Position => self.mark_needs_position(id)?,
            Change::Layout => {
                self.mark_needs_layout(id)?;
                if record.props.is_parent_data()
                    && let Some(reader) = self.parent_data_reader(id)
                {
                    self.mark_needs_layout(reader)?;
                }
            }
        }
        if old.repaint_boundary != record.repaint_boundary {
            if self.nodes.get(id).is_some_and(Node::is_repaint_boundary) {
                self.mark_needs_paint(id)?;
            } else {
                self.layers.remove(id);
            }
        }
        // Sibling order or layer structure changed: the parent's layer is stale.
        if (old.z_index != record.z_index || old.repaint_boundary != record.repaint_boundary)
            && let Some(parent) = self.nodes.get(id).and_then(|n| n.parent)
        {
            self.mark_needs_paint(parent)?;
        }
        if restructured {
            self.mark_needs_layout(id)?;
        }
        Ok(())
    }

    /// Match `records` against the current children of `parent`, re-binding,
    /// creating and disposing as needed. Returns true if the child list
    /// changed.
    fn reconcile_children(&mut self, parent: NodeId, records: &[Rc<Record>]) -> Result<bool> {
        let node = self.nodes.get(parent).ok_or(Error::NodeNotFound(parent))?;
        let depth = node.depth + 1;
        let old = node.children.clone();

        let mut keyed: HashMap<String, NodeId> = HashMap::new();
        let mut unkeyed: Vec<Option<NodeId>> = Vec::new();
        for id in &old {
            match self.nodes.get(*id).and_then(Node::key) {
                Some(k) => {
                    keyed.insert(k.to_string(), *id);
                }
                None => unkeyed.push(Some(*id)),
            }
        }

        let mut next = Vec::with_capacity(records.len());
        let mut unkeyed_index = 0;
        for record in records {
            let candidate = match &record.key {
                Some(k) => keyed.remove(k),
                None => {
                    let c = unkeyed.get_mut(unkeyed_index).and_then(Option::take);
                    unkeyed_index += 1;
                    c
                }
            };
            let reusable = candidate
                .filter(|c| self.nodes.get(*c).is_some_and(|n| n.tag() == record.tag()));
            let id = match reusable {
                Some(c) => {
                    self.rebind(c, Rc::clone(record))?;
                    c
                }
                None => self.create(Rc::clone(record), Some(parent), depth),
            };
            next.push(id);
        }

        for id in &old {
            if !next.contains(id) {
                self.dispose_subtree(*id);
            }
        }

        let changed = next != old;
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children = next;
        }
        Ok(changed)
    }

    /// Remove a subtree from the arena, the scheduler and the layer cache.
    /// The parent's child list is left untouched.
    fn dispose_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        let mut removed = 0;
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(current) {
                stack.extend(node.children);
                self.pipeline.forget(current);
                self.layers.remove(current);
                removed += 1;
            }
        }
        tracing::trace!(node = ?id, removed, "disposed");
    }
}
