//! Patch cords.
//!
//! An [`Edge`] joins one outlet to one inlet. Edges are kept in insertion
//! order and serialize directly into `patchline` records.

use serde::Serialize;

use crate::node::PortRef;

/// Unique identifier for an edge in the patch graph.
///
/// Edge IDs are assigned sequentially and never reused within a graph instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgeId(pub(crate) u32);

/// A directed connection from an outlet to an inlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Source outlet.
    pub source: PortRef,
    /// Destination inlet.
    pub destination: PortRef,
    /// Fan-out order hint. Always 0.
    pub order: u32,
}

impl Edge {
    pub(crate) fn new(source: PortRef, destination: PortRef) -> Self {
        Self {
            source,
            destination,
            order: 0,
        }
    }
}
