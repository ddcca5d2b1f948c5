//! The node arena, the layout engine, the scheduler and hit-testing.

/// Point queries against laid-out geometry.
mod hit;
/// Node ID types.
mod id;
/// The three-phase layout engine.
mod layout_pass;
/// Node data stored in the arena.
mod node;
/// Layer recording and compositing.
mod paint_pass;
/// Dirty sets and ordered flushes.
pub mod pipeline;
/// The tree: arena, building, re-binding and scheduling entry points.
mod tree;

pub use id::NodeId;
pub use layout_pass::LayoutCx;
pub use node::Node;
pub use pipeline::{PaintReport, PipelineOwner};
pub use tree::Tree;
