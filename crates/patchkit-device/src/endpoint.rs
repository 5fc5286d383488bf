//! Connection endpoints.

use patchkit_core::{NodeHandle, ParameterNode, PatchError, PortRef};

/// Anything that can be wired: a box, a parameter, or an explicit port.
///
/// Bare boxes and parameters resolve to outlet 0 as a source and inlet 0 as
/// a destination. A parameter's outlet 0 is its formatted value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// A box.
    Node(NodeHandle),
    /// A parameter box.
    Parameter(ParameterNode),
    /// A specific port.
    Port(PortRef),
}

impl Endpoint {
    /// Resolves to an outlet reference.
    pub fn as_source(&self) -> Result<PortRef, PatchError> {
        match self {
            Endpoint::Node(node) => node.outlet(0),
            Endpoint::Parameter(param) => Ok(param.value()),
            Endpoint::Port(port) => Ok(*port),
        }
    }

    /// Resolves to an inlet reference.
    pub fn as_destination(&self) -> Result<PortRef, PatchError> {
        match self {
            Endpoint::Node(node) => node.inlet(0),
            Endpoint::Parameter(param) => param.inlet(0),
            Endpoint::Port(port) => Ok(*port),
        }
    }
}

impl From<NodeHandle> for Endpoint {
    fn from(node: NodeHandle) -> Self {
        Endpoint::Node(node)
    }
}

impl From<&NodeHandle> for Endpoint {
    fn from(node: &NodeHandle) -> Self {
        Endpoint::Node(node.clone())
    }
}

impl From<ParameterNode> for Endpoint {
    fn from(param: ParameterNode) -> Self {
        Endpoint::Parameter(param)
    }
}

impl From<&ParameterNode> for Endpoint {
    fn from(param: &ParameterNode) -> Self {
        Endpoint::Parameter(param.clone())
    }
}

impl From<PortRef> for Endpoint {
    fn from(port: PortRef) -> Self {
        Endpoint::Port(port)
    }
}
