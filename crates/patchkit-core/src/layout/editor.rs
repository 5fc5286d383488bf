//! Editor (patching view) layout.
//!
//! Logic nodes are assigned to columns by a breadth-first Kahn pass over the
//! edge graph. Nodes that the pass never reaches (cycle members, and nodes
//! whose in-degree includes edges from parameters) are appended to the last
//! column.

use std::collections::{BTreeMap, BTreeSet};

use crate::graph::Patcher;
use crate::node::NodeId;

/// Left edge of the first column.
pub const X_START: u32 = 30;
/// Top of every column.
pub const Y_START: u32 = 30;
/// Horizontal distance between column origins.
pub const X_GAP: u32 = 180;
/// Vertical gap between stacked boxes.
pub const Y_GAP: u32 = 50;

/// Column assignment produced by [`layout_editor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorLayout {
    /// Parameter-like nodes, top to bottom.
    pub parameter_column: Vec<NodeId>,
    /// Logic columns, left to right, each top to bottom.
    pub layers: Vec<Vec<NodeId>>,
    /// Logic nodes the dependency pass never reached, in insertion order.
    /// They sit at the bottom of the last column.
    pub fallback: Vec<NodeId>,
}

impl EditorLayout {
    /// Index of the logic column containing `id`.
    pub fn layer_of(&self, id: NodeId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.contains(&id))
    }

    /// X coordinate of logic column `layer`.
    pub fn column_x(&self, layer: usize) -> u32 {
        let start = if self.parameter_column.is_empty() {
            X_START
        } else {
            X_START + X_GAP
        };
        start.saturating_add((layer as u32).saturating_mul(X_GAP))
    }
}

/// Assigns editor coordinates to every node in `patcher`.
///
/// Widths and heights are kept; only the origin of each editor rectangle
/// changes.
pub fn layout_editor(patcher: &mut Patcher) -> EditorLayout {
    let mut layout = EditorLayout::default();
    if patcher.node_count() == 0 {
        return layout;
    }

    let mut logic = Vec::new();
    for node in patcher.nodes() {
        if node.is_control() {
            layout.parameter_column.push(node.id());
        } else {
            logic.push(node.id());
        }
    }

    (layout.layers, layout.fallback) = assign_layers(patcher, &logic);
    tracing::debug!(
        "layout_editor: {} params, {} logic nodes in {} columns",
        layout.parameter_column.len(),
        logic.len(),
        layout.layers.len()
    );

    let mut y = Y_START;
    for &id in &layout.parameter_column {
        y = place(patcher, id, X_START, y);
    }

    for (i, layer) in layout.layers.iter().enumerate() {
        let x = layout.column_x(i);
        let mut y = Y_START;
        for &id in layer {
            y = place(patcher, id, x, y);
        }
    }

    layout
}

/// Moves `id` to `(x, y)` and returns the y of the next box below it.
fn place(patcher: &mut Patcher, id: NodeId, x: u32, y: u32) -> u32 {
    match patcher.node_mut(id) {
        Some(node) => {
            let rect = node.editor_rect().at(x, y);
            node.set_geometry(rect);
            y.saturating_add(rect.height).saturating_add(Y_GAP)
        }
        None => y,
    }
}

fn assign_layers(patcher: &Patcher, logic: &[NodeId]) -> (Vec<Vec<NodeId>>, Vec<NodeId>) {
    let adjacency = patcher.adjacency();
    let all_degrees = patcher.in_degrees();
    let is_logic: BTreeSet<NodeId> = logic.iter().copied().collect();

    let mut in_degree: BTreeMap<NodeId, usize> = logic
        .iter()
        .map(|id| (*id, all_degrees.get(id).copied().unwrap_or(0)))
        .collect();

    let mut visited = BTreeSet::new();
    let mut frontier: Vec<NodeId> = logic
        .iter()
        .copied()
        .filter(|id| in_degree[id] == 0)
        .collect();
    visited.extend(frontier.iter().copied());

    let mut layers = Vec::new();
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for id in &frontier {
            let Some(successors) = adjacency.get(id) else {
                continue;
            };
            for succ in successors {
                if !is_logic.contains(succ) || visited.contains(succ) {
                    continue;
                }
                if let Some(deg) = in_degree.get_mut(succ) {
                    *deg = deg.saturating_sub(1);
                    if *deg == 0 {
                        next.push(*succ);
                        visited.insert(*succ);
                    }
                }
            }
        }
        layers.push(frontier);
        frontier = next;
    }

    let stragglers: Vec<NodeId> = logic
        .iter()
        .copied()
        .filter(|id| !visited.contains(id))
        .collect();
    if !stragglers.is_empty() {
        tracing::debug!("layout_editor: {} unlayered nodes", stragglers.len());
        match layers.last_mut() {
            Some(last) => last.extend(stragglers.iter().copied()),
            None => layers.push(stragglers.clone()),
        }
    }

    (layers, stragglers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeHandle, Rect};
    use crate::param::{ParamKind, ParamOptions, ParameterNode};
    use patchkit_registry::NodeTypeRegistry;
    use serde_json::Map;

    fn add(p: &mut Patcher, name: &str) -> NodeHandle {
        let contract = NodeTypeRegistry::builtin().lookup_or_default(name);
        p.add_node(name, &contract, "", Map::new())
    }

    fn rect(p: &Patcher, id: NodeId) -> Rect {
        p.node(id).unwrap().editor_rect()
    }

    #[test]
    fn empty_graph() {
        let mut p = Patcher::new();
        assert_eq!(layout_editor(&mut p), EditorLayout::default());
    }

    #[test]
    fn chain_without_params() {
        let mut p = Patcher::new();
        let a = add(&mut p, "plugin~");
        let b = add(&mut p, "plugout~");
        p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();

        let layout = layout_editor(&mut p);
        assert_eq!(layout.layers, vec![vec![a.id()], vec![b.id()]]);
        assert_eq!((rect(&p, a.id()).x, rect(&p, a.id()).y), (30, 30));
        assert_eq!((rect(&p, b.id()).x, rect(&p, b.id()).y), (210, 30));
    }

    #[test]
    fn params_shift_logic_right() {
        let mut p = Patcher::new();
        let src = add(&mut p, "loadbang");
        let dial = ParameterNode::create(&mut p, "Gain", &ParamOptions::new(ParamKind::Dial));
        let toggle = ParameterNode::create(&mut p, "On", &ParamOptions::new(ParamKind::Toggle));

        let layout = layout_editor(&mut p);
        assert_eq!(layout.parameter_column, vec![dial.id(), toggle.id()]);
        assert_eq!(rect(&p, dial.id()), Rect::new(30, 30, 44, 48));
        assert_eq!(rect(&p, toggle.id()), Rect::new(30, 128, 15, 15));
        assert_eq!(rect(&p, src.id()).x, 210);
    }

    #[test]
    fn oversized_boxes_clamp_position() {
        let mut p = Patcher::new();
        let tall = ParamOptions::new(ParamKind::Slider).size(40, u32::MAX - 2);
        ParameterNode::create(&mut p, "A", &tall);
        let below = ParameterNode::create(&mut p, "B", &ParamOptions::new(ParamKind::Dial));

        layout_editor(&mut p);
        assert_eq!(rect(&p, below.id()).y, u32::MAX);
    }

    #[test]
    fn stacking_uses_box_height() {
        let mut p = Patcher::new();
        let a = add(&mut p, "loadbang");
        let b = add(&mut p, "loadbang");
        layout_editor(&mut p);
        assert_eq!(rect(&p, a.id()).y, 30);
        assert_eq!(rect(&p, b.id()).y, 30 + 22 + 50);
    }

    #[test]
    fn cycle_falls_into_last_layer() {
        let mut p = Patcher::new();
        let a = add(&mut p, "+");
        let b = add(&mut p, "+");
        p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();
        p.connect(b.outlet(0).unwrap(), a.inlet(0).unwrap()).unwrap();

        let layout = layout_editor(&mut p);
        assert_eq!(layout.layers, vec![vec![a.id(), b.id()]]);
        assert_eq!(layout.fallback, vec![a.id(), b.id()]);
        assert_eq!(rect(&p, a.id()).x, 30);
        assert_eq!(rect(&p, b.id()).x, 30);
        assert_eq!(rect(&p, b.id()).y, 30 + 22 + 50);
    }

    #[test]
    fn param_edge_pushes_target_to_fallback() {
        let mut p = Patcher::new();
        let src = add(&mut p, "plugin~");
        let mul = add(&mut p, "*~");
        let out = add(&mut p, "plugout~");
        let dial = ParameterNode::create(&mut p, "Gain", &ParamOptions::new(ParamKind::Dial));
        p.connect(src.outlet(0).unwrap(), mul.inlet(0).unwrap()).unwrap();
        p.connect(mul.outlet(0).unwrap(), out.inlet(0).unwrap()).unwrap();
        p.connect(dial.value(), mul.inlet(1).unwrap()).unwrap();

        let layout = layout_editor(&mut p);
        // `*~` keeps an unresolved in-degree from the dial, so it and its
        // successor end up appended to the last reached column.
        assert_eq!(layout.layers, vec![vec![src.id(), mul.id(), out.id()]]);
        assert_eq!(layout.layer_of(out.id()), Some(0));
        assert_eq!(layout.fallback, vec![mul.id(), out.id()]);
    }

    #[test]
    fn diamond_joins_after_both_branches() {
        let mut p = Patcher::new();
        let top = add(&mut p, "trigger");
        let left = add(&mut p, "+");
        let right = add(&mut p, "-");
        let join = add(&mut p, "pack");
        p.connect(top.outlet(0).unwrap(), left.inlet(0).unwrap()).unwrap();
        p.connect(top.outlet(0).unwrap(), right.inlet(0).unwrap()).unwrap();
        p.connect(left.outlet(0).unwrap(), join.inlet(0).unwrap()).unwrap();
        p.connect(right.outlet(0).unwrap(), join.inlet(1).unwrap()).unwrap();

        let layout = layout_editor(&mut p);
        assert_eq!(
            layout.layers,
            vec![vec![top.id()], vec![left.id(), right.id()], vec![join.id()]]
        );
        assert_eq!(rect(&p, join.id()).x, 30 + 2 * 180);
        assert!(layout.fallback.is_empty());
    }
}
