#![forbid(unsafe_code)]

//! Graph data model for skein.
//!
//! Nodes carry a label, ordered tags, scalar-or-list attributes, an optional timestamp and the
//! source records they came from. [`GraphStore`] owns the graph state explicitly: edges to
//! unknown ids create stub nodes that are promoted once their backing record arrives.

pub mod error;
pub mod model;
pub mod store;

pub use error::{Error, Result};
pub use model::{AttributeValue, GraphData, GraphEdge, GraphNode, MetaNode, Scalar};
pub use store::{GraphStore, Upsert};
