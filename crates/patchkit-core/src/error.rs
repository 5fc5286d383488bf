//! Error types for graph construction.

use crate::node::{NodeId, PortDirection};
use crate::param::ParamKind;
use thiserror::Error;

/// Errors raised while building a patch graph.
///
/// Every variant is raised at the offending call, never deferred to
/// serialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// A port index outside a node's declared inlet/outlet count.
    #[error("box \"{node}\" has {count} {direction}s, port {port} out of range")]
    PortOutOfRange {
        /// Type name of the node.
        node: String,
        /// Whether an inlet or an outlet was requested.
        direction: PortDirection,
        /// Requested port index.
        port: usize,
        /// Number of ports of that direction.
        count: usize,
    },

    /// The raw (normalized) outlet was requested on a single-outlet parameter.
    #[error("param type \"{0}\" has no raw outlet")]
    NoRawOutlet(ParamKind),

    /// Unknown parameter display type
    #[error("unknown param type: {0}")]
    UnknownParamKind(String),

    /// Unknown parameter unit style
    #[error("unknown unit style: {0}")]
    UnknownUnitStyle(String),

    /// The node is not part of this graph
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// An inlet used as a connection source, or an outlet as a destination.
    #[error("{node} {found} {port} used where an {expected} is required")]
    WrongDirection {
        /// Node the port belongs to.
        node: NodeId,
        /// Port index.
        port: usize,
        /// Direction the connection needs at that end.
        expected: PortDirection,
        /// Direction of the port that was passed.
        found: PortDirection,
    },
}

impl PatchError {
    /// Create a port range error.
    pub fn port_out_of_range(
        node: impl Into<String>,
        direction: PortDirection,
        port: usize,
        count: usize,
    ) -> Self {
        PatchError::PortOutOfRange {
            node: node.into(),
            direction,
            port,
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_out_of_range_display() {
        let err = PatchError::port_out_of_range("tapout~", PortDirection::Outlet, 5, 1);
        assert_eq!(
            err.to_string(),
            "box \"tapout~\" has 1 outlets, port 5 out of range"
        );
    }

    #[test]
    fn inlet_display() {
        let err = PatchError::port_out_of_range("*~", PortDirection::Inlet, 2, 2);
        assert!(err.to_string().contains("2 inlets"), "got: {err}");
    }

    #[test]
    fn no_raw_outlet_display() {
        let err = PatchError::NoRawOutlet(ParamKind::Toggle);
        assert_eq!(err.to_string(), "param type \"toggle\" has no raw outlet");
    }

    #[test]
    fn unknown_param_kind_display() {
        let err = PatchError::UnknownParamKind("knob".to_string());
        assert_eq!(err.to_string(), "unknown param type: knob");
    }

    #[test]
    fn wrong_direction_display() {
        let err = PatchError::WrongDirection {
            node: NodeId::from_index(2),
            port: 0,
            expected: PortDirection::Outlet,
            found: PortDirection::Inlet,
        };
        assert_eq!(
            err.to_string(),
            "obj-2 inlet 0 used where an outlet is required"
        );
    }

    #[test]
    fn node_not_found_display() {
        let err = PatchError::NodeNotFound(NodeId::from_index(7));
        assert_eq!(err.to_string(), "node obj-7 not found");
    }
}
