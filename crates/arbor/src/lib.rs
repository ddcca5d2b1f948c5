//! Arbor: the layout-and-paint core of a retained-mode scene graph.
//!
//! A scene is a [`Tree`] of nodes built from property [`Record`]s. Every node
//! takes part in a box-constraint layout protocol: constraints flow down,
//! sizes flow up, and each parent positions its children once its own size
//! is known. A [`PipelineOwner`] tracks which nodes need layout and which
//! need paint, and a frame flushes layout shallowest-first, then paint
//! deepest-first into cached layers. Hit-testing resolves a point to the
//! topmost node, honouring z-order.
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Point, Size, Rect, EdgeInsets)
//! - [`layout`] - Constraints and the layout variants
//! - [`paint`] - The canvas capability and recorded layers
//! - [`props`] - Property records and the variant registry

#![warn(missing_docs)]

mod core;

pub mod config;
pub mod error;
pub mod layout;
pub mod paint;
pub mod props;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod text;

pub use arbor_geom as geom;
pub use config::Config;
pub use core::{LayoutCx, Node, NodeId, PaintReport, PipelineOwner, Tree, pipeline};
pub use error::{Error, Result};
pub use props::{Change, Props, Record, Tag};
