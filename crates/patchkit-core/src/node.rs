//! Patch nodes ("boxes") and port references.
//!
//! A [`Node`] is one typed vertex of the patch graph. Its port counts and
//! outlet kinds come from a [`NodeTypeContract`] and never change after
//! construction; only geometry and the free-form attribute bag are mutable.
//!
//! Connections are expressed through [`PortRef`]s, which can only be obtained
//! from a bounds-checked [`Node::inlet`]/[`Node::outlet`] (or the equivalent
//! methods on [`NodeHandle`]). An out-of-range port is rejected with
//! [`PatchError::PortOutOfRange`] before any edge exists.

use core::fmt;

use patchkit_registry::{GENERIC_RENDER_CLASS, NodeTypeContract, PortKind};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use serde_json::{Map, Value};

use crate::error::PatchError;

/// Approximate glyph width of the default 12pt font.
pub const CHAR_WIDTH: u32 = 7;
/// Narrowest auto-sized box.
pub const MIN_BOX_WIDTH: u32 = 40;
/// Horizontal padding around a box label.
pub const BOX_PADDING: u32 = 16;
/// Editor width of specialized boxes without a contract width.
pub const DEFAULT_BOX_WIDTH: u32 = 120;
/// Editor height of a one-line box.
pub const DEFAULT_BOX_HEIGHT: u32 = 22;

/// Live control classes that are system objects rather than user controls.
const SYSTEM_CONTROL_CLASSES: [&str; 5] = [
    "live.thisdevice",
    "live.object",
    "live.path",
    "live.observer",
    "live.remote~",
];

/// Width of an auto-sized box showing `text`.
pub fn box_width_for(text: &str) -> u32 {
    let chars = text.chars().count() as u32;
    MIN_BOX_WIDTH.max(chars * CHAR_WIDTH + BOX_PADDING)
}

/// Unique identifier for a node in a patch graph.
///
/// Ids are allocated sequentially by the owning [`Patcher`](crate::Patcher),
/// starting at 1, and never reused. They render as `obj-<n>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw numeric identifier.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    pub(crate) fn from_index(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj-{}", self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Which side of a node a port is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PortDirection {
    /// Input port.
    Inlet,
    /// Output port.
    Outlet,
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortDirection::Inlet => f.write_str("inlet"),
            PortDirection::Outlet => f.write_str("outlet"),
        }
    }
}

/// A resolved `(node, direction, port)` triple.
///
/// Only obtainable through bounds-checked accessors, so holding one means the
/// port existed on the node it was taken from. Serializes as `[id, port]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PortRef {
    node: NodeId,
    direction: PortDirection,
    port: usize,
}

impl PortRef {
    pub(crate) fn new(node: NodeId, direction: PortDirection, port: usize) -> Self {
        Self {
            node,
            direction,
            port,
        }
    }

    /// The node this port belongs to.
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether this is an inlet or an outlet.
    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    /// The port index.
    pub fn port(&self) -> usize {
        self.port
    }
}

impl Serialize for PortRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut tup = serializer.serialize_tuple(2)?;
        tup.serialize_element(&self.node)?;
        tup.serialize_element(&self.port)?;
        tup.end()
    }
}

fn check_port(
    type_name: &str,
    direction: PortDirection,
    port: usize,
    count: usize,
) -> Result<(), PatchError> {
    if port < count {
        Ok(())
    } else {
        Err(PatchError::port_out_of_range(type_name, direction, port, count))
    }
}

/// Axis-aligned rectangle `(x, y, width, height)` in patch coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Same size, new origin.
    pub const fn at(self, x: u32, y: u32) -> Self {
        Self::new(x, y, self.width, self.height)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0, 0, DEFAULT_BOX_WIDTH, DEFAULT_BOX_HEIGHT)
    }
}

/// One vertex of the patch graph.
#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    type_name: String,
    render_class: String,
    num_inlets: usize,
    outlet_kinds: Vec<PortKind>,
    args: String,
    editor_rect: Rect,
    presentation: bool,
    presentation_rect: Rect,
    attributes: Map<String, Value>,
}

impl Node {
    /// Creates a node from its type contract.
    ///
    /// Editor width comes from the contract's default width when set; generic
    /// boxes otherwise size themselves to their label.
    pub(crate) fn new(
        id: NodeId,
        type_name: &str,
        contract: &NodeTypeContract,
        args: &str,
        attributes: Map<String, Value>,
    ) -> Self {
        let mut editor_rect = Rect::default();
        if let Some(width) = contract.default_width {
            editor_rect.width = width;
        } else if contract.is_generic() {
            editor_rect.width = box_width_for(&label_text(type_name, args));
        }

        Self {
            id,
            type_name: type_name.to_string(),
            render_class: contract.render_class.to_string(),
            num_inlets: contract.num_inlets,
            outlet_kinds: contract.outlet_kinds.clone(),
            args: args.to_string(),
            editor_rect,
            presentation: false,
            presentation_rect: Rect::default(),
            attributes,
        }
    }

    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The type name the node was created from (e.g. `"tapout~"`).
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The host render class (e.g. `"newobj"`, `"live.dial"`).
    pub fn render_class(&self) -> &str {
        &self.render_class
    }

    /// Number of inlets.
    pub fn num_inlets(&self) -> usize {
        self.num_inlets
    }

    /// Number of outlets.
    pub fn num_outlets(&self) -> usize {
        self.outlet_kinds.len()
    }

    /// Data kind of each outlet.
    pub fn outlet_kinds(&self) -> &[PortKind] {
        &self.outlet_kinds
    }

    /// Constructor arguments.
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Editor (patching view) rectangle.
    pub fn editor_rect(&self) -> Rect {
        self.editor_rect
    }

    /// Presentation rectangle, when the node is shown in presentation mode.
    pub fn presentation_rect(&self) -> Option<Rect> {
        self.presentation.then_some(self.presentation_rect)
    }

    /// Free-form attribute bag.
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Reference to inlet `port`.
    pub fn inlet(&self, port: usize) -> Result<PortRef, PatchError> {
        check_port(&self.type_name, PortDirection::Inlet, port, self.num_inlets)?;
        Ok(PortRef::new(self.id, PortDirection::Inlet, port))
    }

    /// Reference to outlet `port`.
    pub fn outlet(&self, port: usize) -> Result<PortRef, PatchError> {
        check_port(
            &self.type_name,
            PortDirection::Outlet,
            port,
            self.num_outlets(),
        )?;
        Ok(PortRef::new(self.id, PortDirection::Outlet, port))
    }

    /// Sets the editor rectangle.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.editor_rect = rect;
    }

    /// Shows or hides the node in presentation mode, optionally moving it.
    pub fn set_presentation(&mut self, enabled: bool, rect: Option<Rect>) {
        self.presentation = enabled;
        if let Some(rect) = rect {
            self.presentation_rect = rect;
        }
    }

    /// Sets (or replaces) a free-form attribute.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    /// Returns true for user-facing live controls.
    ///
    /// System live objects (`live.thisdevice`, the Live API objects) are not
    /// controls and lay out with ordinary logic.
    pub fn is_control(&self) -> bool {
        self.render_class.starts_with("live.")
            && !SYSTEM_CONTROL_CLASSES.contains(&self.render_class.as_str())
    }

    /// The visible label, present only on generic boxes.
    pub fn label(&self) -> Option<String> {
        (self.render_class == GENERIC_RENDER_CLASS).then(|| label_text(&self.type_name, &self.args))
    }

    /// Lightweight handle for wiring this node.
    pub fn handle(&self) -> NodeHandle {
        NodeHandle {
            id: self.id,
            type_name: self.type_name.clone(),
            num_inlets: self.num_inlets,
            num_outlets: self.num_outlets(),
        }
    }

    /// Renders the node as a `box` record.
    ///
    /// Attribute keys keep their insertion position; an attribute that shadows
    /// a structural key replaces its value in place.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("id".into(), Value::String(self.id.to_string()));
        record.insert("maxclass".into(), Value::String(self.render_class.clone()));
        record.insert("numinlets".into(), self.num_inlets.into());
        record.insert("numoutlets".into(), self.num_outlets().into());
        record.insert(
            "outlettype".into(),
            Value::Array(
                self.outlet_kinds
                    .iter()
                    .map(|k| Value::String(k.as_str().to_string()))
                    .collect(),
            ),
        );
        record.insert("patching_rect".into(), rect_value(self.editor_rect));
        for (key, value) in &self.attributes {
            record.insert(key.clone(), value.clone());
        }
        if let Some(label) = self.label() {
            record.insert("text".into(), Value::String(label));
        }
        if self.presentation {
            record.insert("presentation".into(), 1.into());
            record.insert(
                "presentation_rect".into(),
                rect_value(self.presentation_rect),
            );
        }
        record
    }
}

fn label_text(type_name: &str, args: &str) -> String {
    if args.is_empty() {
        type_name.to_string()
    } else {
        format!("{type_name} {args}")
    }
}

fn rect_value(rect: Rect) -> Value {
    Value::Array(vec![
        rect.x.into(),
        rect.y.into(),
        rect.width.into(),
        rect.height.into(),
    ])
}

/// Detached reference to a node, used to wire connections.
///
/// Carries the port counts so port references can be bounds-checked without
/// borrowing the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeHandle {
    id: NodeId,
    type_name: String,
    num_inlets: usize,
    num_outlets: usize,
}

impl NodeHandle {
    /// The node's id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The node's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Number of inlets.
    pub fn num_inlets(&self) -> usize {
        self.num_inlets
    }

    /// Number of outlets.
    pub fn num_outlets(&self) -> usize {
        self.num_outlets
    }

    /// Reference to inlet `port`.
    pub fn inlet(&self, port: usize) -> Result<PortRef, PatchError> {
        check_port(&self.type_name, PortDirection::Inlet, port, self.num_inlets)?;
        Ok(PortRef::new(self.id, PortDirection::Inlet, port))
    }

    /// Reference to outlet `port`.
    pub fn outlet(&self, port: usize) -> Result<PortRef, PatchError> {
        check_port(&self.type_name, PortDirection::Outlet, port, self.num_outlets)?;
        Ok(PortRef::new(self.id, PortDirection::Outlet, port))
    }
}
