use std::result::Result as StdResult;

use thiserror::Error;

use crate::{NodeId, geom::Axis};

/// Result type for arbor operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A property value could not be interpreted.
    #[error("config: {0}")]
    Config(String),

    /// The tree shape asks for something layout cannot satisfy.
    #[error(
        "layout contradiction: {variant} has a flexible child but the {} axis is unbounded \
         and the main axis size is max; {hint}",
        axis.name()
    )]
    LayoutContradiction {
        /// Main axis of the offending container.
        axis: Axis,
        /// Tag of the offending container.
        variant: &'static str,
        /// Suggested fix.
        hint: &'static str,
    },

    /// A child-bearing operation was invoked on a leaf.
    #[error("unsupported: {0}")]
    Unsupported(String),

    /// Painting a node failed.
    #[error("paint: {node:?}: {message}")]
    Paint {
        /// Node being painted.
        node: NodeId,
        /// Failure description.
        message: String,
    },

    /// A node id does not refer to a live node.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// An operation conflicts with the current tree state.
    #[error("invalid: {0}")]
    Invalid(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
