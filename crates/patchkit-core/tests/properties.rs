//! Property-based tests for patchkit-core layout and serialization.
//!
//! Random graphs mix parameter and logic nodes with arbitrary edges
//! (including cycles and parallel edges) to check coverage, column ordering,
//! presentation packing and byte-stable output.

use std::collections::BTreeSet;

use patchkit_core::{
    Document, EditorLayout, NodeId, NodeTypeRegistry, ParamKind, ParamOptions, ParameterNode,
    Patcher, layout_editor, layout_presentation,
};
use proptest::prelude::*;
use serde_json::Map;

/// A built random graph.
struct Built {
    patcher: Patcher,
    ids: Vec<NodeId>,
    params: Vec<NodeId>,
}

fn param_kind(index: usize) -> ParamKind {
    ParamKind::ALL[index % ParamKind::ALL.len()]
}

/// `nodes[i]` is `Some(kind index)` for a parameter, `None` for a logic box.
fn build(nodes: &[Option<usize>], edges: &[(usize, usize)]) -> Built {
    let registry = NodeTypeRegistry::builtin();
    let contract = registry.lookup_or_default("+");
    let mut patcher = Patcher::new();
    let mut handles = Vec::new();
    let mut params = Vec::new();

    for (i, node) in nodes.iter().enumerate() {
        match node {
            Some(kind) => {
                let p = ParameterNode::create(
                    &mut patcher,
                    &format!("P{i}"),
                    &ParamOptions::new(param_kind(*kind)),
                );
                params.push(p.id());
                handles.push(p.handle().clone());
            }
            None => handles.push(patcher.add_node("+", &contract, &i.to_string(), Map::new())),
        }
    }

    for &(from, to) in edges {
        let (Some(src), Some(dst)) = (handles.get(from % nodes.len()), handles.get(to % nodes.len()))
        else {
            continue;
        };
        if let (Ok(out), Ok(inp)) = (src.outlet(0), dst.inlet(0)) {
            patcher.connect(out, inp).unwrap();
        }
    }

    Built {
        ids: handles.iter().map(|h| h.id()).collect(),
        patcher,
        params,
    }
}

fn finalize(built: &mut Built) -> EditorLayout {
    let layout = layout_editor(&mut built.patcher);
    layout_presentation(&mut built.patcher, &built.params).unwrap();
    layout
}

fn node_strategy() -> impl Strategy<Value = Vec<Option<usize>>> {
    prop::collection::vec(prop::option::weighted(0.3, 0usize..7), 1..16)
}

fn edge_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0usize..16, 0usize..16), 0..32)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every node lands in exactly one editor slot.
    #[test]
    fn every_node_placed_once(nodes in node_strategy(), edges in edge_strategy()) {
        let mut built = build(&nodes, &edges);
        let layout = finalize(&mut built);

        let mut seen = BTreeSet::new();
        for id in layout.parameter_column.iter().chain(layout.layers.iter().flatten()) {
            prop_assert!(seen.insert(*id), "{id} placed twice");
        }
        let all: BTreeSet<NodeId> = built.ids.iter().copied().collect();
        prop_assert_eq!(seen, all);

        for id in &built.params {
            let node = built.patcher.node(*id).unwrap();
            prop_assert!(node.presentation_rect().is_some());
        }
    }

    /// A node reached by the dependency pass sits strictly right of each
    /// logic predecessor.
    #[test]
    fn columns_follow_edges(nodes in node_strategy(), edges in edge_strategy()) {
        let mut built = build(&nodes, &edges);
        let layout = finalize(&mut built);
        let params: BTreeSet<NodeId> = built.params.iter().copied().collect();

        for edge in built.patcher.edges() {
            let (u, v) = (edge.source.node(), edge.destination.node());
            if params.contains(&u) || params.contains(&v) || layout.fallback.contains(&v) {
                continue;
            }
            let lu = layout.layer_of(u).unwrap();
            let lv = layout.layer_of(v).unwrap();
            prop_assert!(lv > lu, "{u} (col {lu}) -> {v} (col {lv})");
        }
    }

    /// Controls pack left to right with a fixed gap.
    #[test]
    fn presentation_packing(kinds in prop::collection::vec(0usize..7, 1..12)) {
        let nodes: Vec<Option<usize>> = kinds.iter().copied().map(Some).collect();
        let mut built = build(&nodes, &[]);
        finalize(&mut built);

        let rects: Vec<_> = built
            .params
            .iter()
            .map(|id| built.patcher.node(*id).unwrap().presentation_rect().unwrap())
            .collect();
        prop_assert_eq!(rects[0].x, 4);
        for pair in rects.windows(2) {
            prop_assert_eq!(pair[1].x, pair[0].x + pair[0].width + 8);
            prop_assert_eq!(pair[1].y, 4);
        }
        let last = rects[rects.len() - 1];
        prop_assert_eq!(built.patcher.device_width(), last.x + last.width + 8 + 4);
    }

    /// Same construction sequence, same bytes.
    #[test]
    fn output_is_deterministic(nodes in node_strategy(), edges in edge_strategy()) {
        let mut a = build(&nodes, &edges);
        let mut b = build(&nodes, &edges);
        finalize(&mut a);
        finalize(&mut b);
        let ja = Document::from_patcher(&a.patcher).to_json_pretty().unwrap();
        let jb = Document::from_patcher(&b.patcher).to_json_pretty().unwrap();
        prop_assert_eq!(ja, jb);
    }

    /// Running layout again changes nothing.
    #[test]
    fn relayout_is_idempotent(nodes in node_strategy(), edges in edge_strategy()) {
        let mut built = build(&nodes, &edges);
        finalize(&mut built);
        let first = Document::from_patcher(&built.patcher).to_json_pretty().unwrap();
        finalize(&mut built);
        let second = Document::from_patcher(&built.patcher).to_json_pretty().unwrap();
        prop_assert_eq!(first, second);
    }

    /// Port references succeed exactly for in-range indices.
    #[test]
    fn port_bounds(kind in 0usize..7, port in 0usize..6) {
        let mut built = build(&[Some(kind), None], &[]);
        finalize(&mut built);
        let param = built.patcher.node(built.ids[0]).unwrap();
        prop_assert_eq!(param.outlet(port).is_ok(), port < param.num_outlets());
        prop_assert_eq!(param.inlet(port).is_ok(), port < 1);
        let logic = built.patcher.node(built.ids[1]).unwrap();
        prop_assert_eq!(logic.inlet(port).is_ok(), port < 2);
        prop_assert_eq!(logic.outlet(port).is_ok(), port < 1);
    }
}
