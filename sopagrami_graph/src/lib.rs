//! Host graph storage for frequent-subgraph mining.
//!
//! A [`DataGraph`] is built once (from a `.lg` source or a [`GraphBuilder`])
//! and is read-only afterwards, so it can be shared across worker threads
//! without locking. [`MiningView`] pairs a graph with the effective mining
//! mode and answers the neighbor queries used by candidate generation and
//! embedding search.

mod builder;
mod error;
mod graph;
mod labels;
mod lg;
mod vertex_set;
mod view;

pub use builder::GraphBuilder;
pub use error::GraphError;
pub use graph::{DataGraph, Direction, Neighbor};
pub use labels::{Label, LabelKind, LabelTable, NO_LABEL, VertexId};
pub use vertex_set::VertexSet;
pub use view::{EdgeDir, EdgeType, MiningView};
