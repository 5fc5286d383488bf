//! Patch graph storage and mutation.

use std::collections::BTreeMap;

use patchkit_registry::NodeTypeContract;
use serde_json::{Map, Value};

use super::edge::{Edge, EdgeId};
use crate::error::PatchError;
use crate::node::{Node, NodeHandle, NodeId, PortDirection, PortRef};

/// A patch under construction.
///
/// # Example
///
/// ```rust
/// use patchkit_core::{Patcher, NodeTypeRegistry};
/// use serde_json::Map;
///
/// let registry = NodeTypeRegistry::builtin();
/// let mut patcher = Patcher::new();
/// let osc = patcher.add_node("cycle~", &registry.lookup_or_default("cycle~"), "440", Map::new());
/// let out = patcher.add_node("plugout~", &registry.lookup_or_default("plugout~"), "", Map::new());
///
/// patcher.connect(osc.outlet(0)?, out.inlet(0)?)?;
/// patcher.connect(osc.outlet(0)?, out.inlet(1)?)?;
/// assert_eq!(patcher.edge_count(), 2);
/// # Ok::<(), patchkit_core::PatchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Patcher {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_node_slot: u32,
    next_edge_slot: u32,
    device_width: u32,
    open_in_presentation: bool,
    description: String,
    tags: String,
}

impl Patcher {
    /// Creates an empty patch. The first node gets id `obj-1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node built from `contract` and returns a handle for wiring it.
    pub fn add_node(
        &mut self,
        type_name: &str,
        contract: &NodeTypeContract,
        args: &str,
        attributes: Map<String, Value>,
    ) -> NodeHandle {
        self.next_node_slot += 1;
        let id = NodeId(self.next_node_slot);
        let node = Node::new(id, type_name, contract, args, attributes);
        let handle = node.handle();
        self.nodes.push(node);
        tracing::debug!("graph_add: {id} ({type_name})");
        handle
    }

    /// Connects an outlet to an inlet.
    ///
    /// `source` must be an outlet and `destination` an inlet, both on nodes of
    /// this graph and in range. On error the graph is unchanged.
    pub fn connect(&mut self, source: PortRef, destination: PortRef) -> Result<EdgeId, PatchError> {
        expect_direction(source, PortDirection::Outlet)?;
        expect_direction(destination, PortDirection::Inlet)?;

        let src = self
            .node(source.node())
            .ok_or(PatchError::NodeNotFound(source.node()))?
            .outlet(source.port())?;
        let dst = self
            .node(destination.node())
            .ok_or(PatchError::NodeNotFound(destination.node()))?
            .inlet(destination.port())?;

        let id = EdgeId(self.next_edge_slot);
        self.next_edge_slot += 1;
        self.edges.push(Edge::new(src, dst));
        tracing::debug!(
            "graph_connect: {}:{} → {}:{}",
            src.node(),
            src.port(),
            dst.node(),
            dst.port()
        );
        Ok(id)
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        let slot = (id.index() as usize).checked_sub(1)?;
        self.nodes.get(slot)
    }

    /// Returns the node with the given id, mutably.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = (id.index() as usize).checked_sub(1)?;
        self.nodes.get_mut(slot)
    }

    /// Every node, in insertion order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Every edge, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// First node created from `type_name`, if any.
    pub fn find_by_type(&self, type_name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.type_name() == type_name)
    }

    /// Successor lists for every node.
    ///
    /// Each list is deduplicated and keeps first-seen edge order.
    pub fn adjacency(&self) -> BTreeMap<NodeId, Vec<NodeId>> {
        let mut adj: BTreeMap<NodeId, Vec<NodeId>> =
            self.nodes.iter().map(|n| (n.id(), Vec::new())).collect();
        for edge in &self.edges {
            if let Some(succ) = adj.get_mut(&edge.source.node()) {
                let to = edge.destination.node();
                if !succ.contains(&to) {
                    succ.push(to);
                }
            }
        }
        adj
    }

    /// Incoming edge count for every node.
    ///
    /// Parallel edges each count.
    pub fn in_degrees(&self) -> BTreeMap<NodeId, usize> {
        let mut deg: BTreeMap<NodeId, usize> = self.nodes.iter().map(|n| (n.id(), 0)).collect();
        for edge in &self.edges {
            *deg.entry(edge.destination.node()).or_insert(0) += 1;
        }
        deg
    }

    /// Device strip width in pixels.
    pub fn device_width(&self) -> u32 {
        self.device_width
    }

    /// Sets the device strip width.
    pub fn set_device_width(&mut self, width: u32) {
        self.device_width = width;
    }

    /// Whether the document opens in presentation mode.
    pub fn open_in_presentation(&self) -> bool {
        self.open_in_presentation
    }

    /// Sets the open-in-presentation flag.
    pub fn set_open_in_presentation(&mut self, open: bool) {
        self.open_in_presentation = open;
    }

    /// Device description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sets the device description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Device tags.
    pub fn tags(&self) -> &str {
        &self.tags
    }

    /// Sets the device tags.
    pub fn set_tags(&mut self, tags: impl Into<String>) {
        self.tags = tags.into();
    }
}

fn expect_direction(port: PortRef, expected: PortDirection) -> Result<(), PatchError> {
    if port.direction() == expected {
        Ok(())
    } else {
        Err(PatchError::WrongDirection {
            node: port.node(),
            port: port.port(),
            expected,
            found: port.direction(),
        })
    }
}
