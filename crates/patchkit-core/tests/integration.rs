//! End-to-end tests for graph construction, layout and serialization.

use patchkit_core::{
    Document, NodeHandle, NodeTypeRegistry, ParamKind, ParamOptions, ParameterNode, PatchError,
    Patcher, PortDirection, Rect, layout_editor, layout_presentation,
};
use serde_json::{Map, Value};

fn add(p: &mut Patcher, name: &str, args: &str) -> NodeHandle {
    let contract = NodeTypeRegistry::builtin().lookup_or_default(name);
    p.add_node(name, &contract, args, Map::new())
}

fn editor_xy(p: &Patcher, handle: &NodeHandle) -> (u32, u32) {
    let r = p.node(handle.id()).unwrap().editor_rect();
    (r.x, r.y)
}

#[test]
fn two_node_chain_columns() {
    let mut p = Patcher::new();
    let a = add(&mut p, "plugin~", "");
    let b = add(&mut p, "plugout~", "");
    p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();

    layout_editor(&mut p);
    assert_eq!(editor_xy(&p, &a), (30, 30));
    assert_eq!(editor_xy(&p, &b), (210, 30));
}

#[test]
fn out_of_range_outlet_adds_no_edge() {
    let mut p = Patcher::new();
    let a = add(&mut p, "plugin~", "");
    let b = add(&mut p, "plugout~", "");

    let err = a.outlet(5).unwrap_err();
    assert_eq!(
        err,
        PatchError::PortOutOfRange {
            node: "plugin~".to_string(),
            direction: PortDirection::Outlet,
            port: 5,
            count: 2,
        }
    );
    assert!(b.inlet(2).is_err());
    assert_eq!(p.edge_count(), 0);
}

#[test]
fn presentation_widths_scenario() {
    let mut p = Patcher::new();
    let params: Vec<ParameterNode> = [
        ParamOptions::new(ParamKind::Dial),
        ParamOptions::new(ParamKind::Slider),
        ParamOptions::new(ParamKind::Menu),
    ]
    .iter()
    .enumerate()
    .map(|(i, opts)| ParameterNode::create(&mut p, &format!("p{i}"), opts))
    .collect();
    let ids: Vec<_> = params.iter().map(ParameterNode::id).collect();

    let width = layout_presentation(&mut p, &ids).unwrap();
    assert_eq!(width, Some(216));

    let rects: Vec<Rect> = ids
        .iter()
        .map(|id| p.node(*id).unwrap().presentation_rect().unwrap())
        .collect();
    assert_eq!(rects[0], Rect::new(4, 4, 44, 48));
    assert_eq!(rects[1], Rect::new(56, 4, 40, 80));
    assert_eq!(rects[2], Rect::new(104, 4, 100, 15));
}

#[test]
fn cycle_shares_one_column() {
    let mut p = Patcher::new();
    let a = add(&mut p, "+", "1");
    let b = add(&mut p, "*", "2");
    p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();
    p.connect(b.outlet(0).unwrap(), a.inlet(0).unwrap()).unwrap();

    let layout = layout_editor(&mut p);
    assert_eq!(layout.layers.len(), 1);
    assert_eq!(editor_xy(&p, &a), (30, 30));
    assert_eq!(editor_xy(&p, &b), (30, 102));
}

#[test]
fn delay_patch_document() {
    let mut p = Patcher::new();
    let input = add(&mut p, "plugin~", "");
    let tapin = add(&mut p, "tapin~", "5000");
    let tapout = add(&mut p, "tapout~", "500");
    let output = add(&mut p, "plugout~", "");
    let time = ParameterNode::create(
        &mut p,
        "Time",
        &ParamOptions::new(ParamKind::Dial).range(1.0, 5000.0).initial(500.0),
    );

    p.connect(input.outlet(0).unwrap(), tapin.inlet(0).unwrap()).unwrap();
    p.connect(tapin.outlet(0).unwrap(), tapout.inlet(0).unwrap()).unwrap();
    p.connect(time.value(), tapout.inlet(0).unwrap()).unwrap();
    p.connect(tapout.outlet(0).unwrap(), output.inlet(0).unwrap()).unwrap();
    p.connect(tapout.outlet(0).unwrap(), output.inlet(1).unwrap()).unwrap();

    layout_editor(&mut p);
    let width = layout_presentation(&mut p, &[time.id()]).unwrap();
    p.set_open_in_presentation(width.is_some());

    let doc = Document::from_patcher(&p);
    assert_eq!(doc.box_count(), 5);
    assert_eq!(doc.line_count(), 5);
    assert_eq!(doc.device_width(), 60);
    assert!(doc.opens_in_presentation());

    let v = doc.to_value().unwrap();
    let boxes = v["patcher"]["boxes"].as_array().unwrap();
    let texts: Vec<&str> = boxes
        .iter()
        .filter_map(|b| b["box"]["text"].as_str())
        .collect();
    assert_eq!(texts, ["plugin~", "tapin~ 5000", "tapout~ 500", "plugout~"]);

    let dial = &boxes[4]["box"];
    assert_eq!(dial["presentation"], 1);
    assert_eq!(dial["patching_rect"], serde_json::json!([30, 30, 44, 48]));
}

#[test]
fn rebuilding_gives_identical_bytes() {
    fn build() -> String {
        let mut p = Patcher::new();
        let a = add(&mut p, "cycle~", "220");
        let b = add(&mut p, "*~", "0.2");
        let c = add(&mut p, "plugout~", "");
        let gain = ParameterNode::create(&mut p, "Gain", &ParamOptions::new(ParamKind::Slider));
        p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();
        p.connect(gain.value(), b.inlet(1).unwrap()).unwrap();
        p.connect(b.outlet(0).unwrap(), c.inlet(0).unwrap()).unwrap();
        layout_editor(&mut p);
        layout_presentation(&mut p, &[gain.id()]).unwrap();
        Document::from_patcher(&p).to_json_pretty().unwrap()
    }

    assert_eq!(build(), build());
}

#[test]
fn layout_twice_is_stable() {
    let mut p = Patcher::new();
    let a = add(&mut p, "loadbang", "");
    let b = add(&mut p, "send", "out");
    p.connect(a.outlet(0).unwrap(), b.inlet(0).unwrap()).unwrap();

    layout_editor(&mut p);
    let first: Value = Document::from_patcher(&p).to_value().unwrap();
    layout_editor(&mut p);
    let second: Value = Document::from_patcher(&p).to_value().unwrap();
    assert_eq!(first, second);
}
