//! The patch graph.
//!
//! A [`Patcher`] owns every [`Node`](crate::Node) and [`Edge`] of one patch,
//! plus the document-level fields (device width, description, tags) that the
//! layout passes and the serializer read. Nodes live in an arena indexed by
//! their id; ids are allocated from a per-graph counter starting at 1, so two
//! graphs built the same way produce identical ids.
//!
//! Multiple edges between the same pair of ports are allowed. Cycles are
//! allowed. Edges are never removed.

pub mod edge;
mod patcher;

pub use edge::{Edge, EdgeId};
pub use patcher::Patcher;
