//! Automatable device parameters.
//!
//! A [`ParameterNode`] is a live control box (`live.dial`, `live.menu`, ...)
//! carrying the host parameter metadata: names, range, initial value, unit
//! style and enum entries. Parameters appear in the editor's left column and,
//! in declaration order, on the device's presentation face.

use core::fmt;
use core::str::FromStr;

use patchkit_registry::{NodeTypeContract, PortKind};
use serde_json::{Map, Number, Value, json};

use crate::error::PatchError;
use crate::graph::Patcher;
use crate::node::{NodeHandle, NodeId, PortDirection, PortRef, Rect};

const MSG: PortKind = PortKind::Message;

/// Display type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Rotary knob.
    Dial,
    /// Vertical fader.
    Slider,
    /// Drop-down list.
    Menu,
    /// On/off switch.
    Toggle,
    /// Momentary trigger.
    Button,
    /// Row of tabs.
    Tab,
    /// Numeric entry box.
    Numbox,
}

impl ParamKind {
    /// Every display type.
    pub const ALL: [ParamKind; 7] = [
        ParamKind::Dial,
        ParamKind::Slider,
        ParamKind::Menu,
        ParamKind::Toggle,
        ParamKind::Button,
        ParamKind::Tab,
        ParamKind::Numbox,
    ];

    /// Lowercase name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ParamKind::Dial => "dial",
            ParamKind::Slider => "slider",
            ParamKind::Menu => "menu",
            ParamKind::Toggle => "toggle",
            ParamKind::Button => "button",
            ParamKind::Tab => "tab",
            ParamKind::Numbox => "numbox",
        }
    }

    /// Host render class.
    pub const fn render_class(self) -> &'static str {
        match self {
            ParamKind::Dial => "live.dial",
            ParamKind::Slider => "live.slider",
            ParamKind::Menu => "live.menu",
            ParamKind::Toggle => "live.toggle",
            ParamKind::Button => "live.button",
            ParamKind::Tab => "live.tab",
            ParamKind::Numbox => "live.numbox",
        }
    }

    /// Default `(width, height)`.
    pub const fn default_size(self) -> (u32, u32) {
        match self {
            ParamKind::Dial => (44, 48),
            ParamKind::Slider => (40, 80),
            ParamKind::Menu => (100, 15),
            ParamKind::Toggle | ParamKind::Button => (15, 15),
            ParamKind::Tab => (100, 20),
            ParamKind::Numbox => (44, 15),
        }
    }

    /// Outlet kinds. Outlet 0 is the formatted value; outlet 1, where
    /// present, is the raw normalized value.
    pub const fn outlet_kinds(self) -> &'static [PortKind] {
        match self {
            ParamKind::Dial | ParamKind::Slider | ParamKind::Numbox => &[MSG, MSG],
            ParamKind::Menu | ParamKind::Tab => &[MSG, MSG, MSG],
            ParamKind::Toggle => &[MSG],
            ParamKind::Button => &[PortKind::Bang],
        }
    }

    /// Host parameter type code: 2 (enum) for menus and tabs, else 0 (float).
    pub const fn parameter_type(self) -> u8 {
        match self {
            ParamKind::Menu | ParamKind::Tab => 2,
            _ => 0,
        }
    }

    fn contract(self, width: u32) -> NodeTypeContract {
        NodeTypeContract::new(1, self.outlet_kinds())
            .with_render_class(self.render_class())
            .with_default_width(width)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ParamKind {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| PatchError::UnknownParamKind(s.to_string()))
    }
}

/// Display unit of a parameter value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum UnitStyle {
    /// Integer.
    #[default]
    Int,
    /// Float.
    Float,
    /// Milliseconds.
    Time,
    /// Hertz.
    Hertz,
    /// Decibels.
    Decibel,
    /// Percent.
    Percent,
    /// Pan (L/R).
    Pan,
    /// Semitones.
    Semitone,
    /// MIDI note name.
    Midi,
    /// Custom format string.
    Custom,
    /// Native host formatting.
    Native,
}

impl UnitStyle {
    /// Every unit style, ordered by code.
    pub const ALL: [UnitStyle; 11] = [
        UnitStyle::Int,
        UnitStyle::Float,
        UnitStyle::Time,
        UnitStyle::Hertz,
        UnitStyle::Decibel,
        UnitStyle::Percent,
        UnitStyle::Pan,
        UnitStyle::Semitone,
        UnitStyle::Midi,
        UnitStyle::Custom,
        UnitStyle::Native,
    ];

    /// Numeric code written as `parameter_unitstyle`.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Short name, as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            UnitStyle::Int => "int",
            UnitStyle::Float => "float",
            UnitStyle::Time => "time",
            UnitStyle::Hertz => "hertz",
            UnitStyle::Decibel => "decibel",
            UnitStyle::Percent => "%",
            UnitStyle::Pan => "pan",
            UnitStyle::Semitone => "semitone",
            UnitStyle::Midi => "midi",
            UnitStyle::Custom => "custom",
            UnitStyle::Native => "native",
        }
    }
}

impl FromStr for UnitStyle {
    type Err = PatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitStyle::ALL
            .into_iter()
            .find(|u| u.name() == s)
            .ok_or_else(|| PatchError::UnknownUnitStyle(s.to_string()))
    }
}

/// Options for a new parameter.
///
/// ```rust
/// use patchkit_core::{ParamKind, ParamOptions, UnitStyle};
///
/// let time = ParamOptions::new(ParamKind::Dial)
///     .range(1.0, 2000.0)
///     .initial(300.0)
///     .unit(UnitStyle::Time)
///     .short_name("Time");
/// assert_eq!(time.kind, ParamKind::Dial);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParamOptions {
    /// Display type.
    pub kind: ParamKind,
    /// Long name; defaults to the parameter name.
    pub long_name: Option<String>,
    /// Short name; defaults to the parameter name.
    pub short_name: Option<String>,
    /// Range minimum.
    pub min: Option<f64>,
    /// Range maximum.
    pub max: Option<f64>,
    /// Initial value.
    pub initial: Option<f64>,
    /// Display unit.
    pub unit_style: UnitStyle,
    /// Response curve exponent.
    pub exponent: Option<f64>,
    /// Number of discrete steps.
    pub steps: Option<u32>,
    /// Entries of an enum parameter.
    pub enum_values: Option<Vec<String>>,
    /// Width override.
    pub width: Option<u32>,
    /// Height override.
    pub height: Option<u32>,
}

impl ParamOptions {
    /// Options with every optional field unset.
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            long_name: None,
            short_name: None,
            min: None,
            max: None,
            initial: None,
            unit_style: UnitStyle::Int,
            exponent: None,
            steps: None,
            enum_values: None,
            width: None,
            height: None,
        }
    }

    /// Sets the long name.
    pub fn long_name(mut self, name: impl Into<String>) -> Self {
        self.long_name = Some(name.into());
        self
    }

    /// Sets the short name.
    pub fn short_name(mut self, name: impl Into<String>) -> Self {
        self.short_name = Some(name.into());
        self
    }

    /// Sets minimum and maximum.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// Sets the initial value.
    pub fn initial(mut self, value: f64) -> Self {
        self.initial = Some(value);
        self
    }

    /// Sets the unit style.
    pub fn unit(mut self, unit: UnitStyle) -> Self {
        self.unit_style = unit;
        self
    }

    /// Sets the response exponent.
    pub fn exponent(mut self, exponent: f64) -> Self {
        self.exponent = Some(exponent);
        self
    }

    /// Sets the step count.
    pub fn steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Sets the enum entries.
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Overrides the box size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    fn resolved_size(&self) -> (u32, u32) {
        let (w, h) = self.kind.default_size();
        (self.width.unwrap_or(w), self.height.unwrap_or(h))
    }

    /// Builds the attribute bag stored on the parameter box.
    fn attributes(&self, name: &str) -> Map<String, Value> {
        let long_name = self.long_name.as_deref().unwrap_or(name);
        let short_name = self.short_name.as_deref().unwrap_or(name);

        let mut valueof = Map::new();
        valueof.insert("parameter_longname".into(), long_name.into());
        valueof.insert("parameter_shortname".into(), short_name.into());
        valueof.insert("parameter_type".into(), self.kind.parameter_type().into());
        valueof.insert("parameter_unitstyle".into(), self.unit_style.code().into());
        valueof.insert("parameter_modmode".into(), 0.into());
        if let Some(min) = self.min {
            valueof.insert("parameter_mmin".into(), number(min));
        }
        if let Some(max) = self.max {
            valueof.insert("parameter_mmax".into(), number(max));
        }
        if let Some(initial) = self.initial {
            valueof.insert("parameter_initial".into(), Value::Array(vec![number(initial)]));
            valueof.insert("parameter_initial_enable".into(), 1.into());
        }
        if let Some(exponent) = self.exponent {
            valueof.insert("parameter_exponent".into(), number(exponent));
        }
        if let Some(steps) = self.steps {
            valueof.insert("parameter_steps".into(), steps.into());
        }
        if let Some(values) = &self.enum_values {
            valueof.insert("parameter_enum".into(), json!(values));
        }

        let mut attrs = Map::new();
        attrs.insert("parameter_enable".into(), 1.into());
        attrs.insert(
            "saved_attribute_attributes".into(),
            json!({ "valueof": valueof }),
        );
        attrs.insert("varname".into(), long_name.into());
        attrs
    }
}

/// Converts a float to a JSON number, writing integral values without a
/// fractional part.
pub fn number(value: f64) -> Value {
    // Exactly representable integer range of f64.
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() < MAX_EXACT {
        Value::from(value as i64)
    } else {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

/// A parameter box in a patch graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNode {
    handle: NodeHandle,
    kind: ParamKind,
}

impl ParameterNode {
    /// Adds a parameter box named `name` to `patcher`.
    ///
    /// The box's editor rectangle starts at `[0, 0, width, height]` using the
    /// display type's default size unless overridden.
    pub fn create(patcher: &mut Patcher, name: &str, options: &ParamOptions) -> Self {
        let (width, height) = options.resolved_size();
        let kind = options.kind;
        let handle = patcher.add_node(
            kind.render_class(),
            &kind.contract(width),
            "",
            options.attributes(name),
        );
        if let Some(node) = patcher.node_mut(handle.id()) {
            node.set_geometry(Rect::new(0, 0, width, height));
        }
        tracing::debug!("param_add: {} \"{name}\" ({kind})", handle.id());
        Self { handle, kind }
    }

    /// The box id.
    pub fn id(&self) -> NodeId {
        self.handle.id()
    }

    /// The display type.
    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Handle to the underlying box.
    pub fn handle(&self) -> &NodeHandle {
        &self.handle
    }

    /// Outlet 0: the formatted value.
    pub fn value(&self) -> PortRef {
        PortRef::new(self.handle.id(), PortDirection::Outlet, 0)
    }

    /// Outlet 1: the raw normalized value.
    ///
    /// Single-outlet display types (toggle, button) have none.
    pub fn raw(&self) -> Result<PortRef, PatchError> {
        if self.handle.num_outlets() < 2 {
            return Err(PatchError::NoRawOutlet(self.kind));
        }
        self.handle.outlet(1)
    }

    /// Inlet `port`.
    pub fn inlet(&self, port: usize) -> Result<PortRef, PatchError> {
        self.handle.inlet(port)
    }

    /// Outlet `port`.
    pub fn outlet(&self, port: usize) -> Result<PortRef, PatchError> {
        self.handle.outlet(port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_of(patcher: &Patcher, param: &ParameterNode) -> Map<String, Value> {
        patcher.node(param.id()).unwrap().to_record()
    }

    #[test]
    fn parse_kinds() {
        for kind in ParamKind::ALL {
            assert_eq!(kind.name().parse::<ParamKind>().unwrap(), kind);
        }
        assert!(matches!(
            "knob".parse::<ParamKind>(),
            Err(PatchError::UnknownParamKind(name)) if name == "knob"
        ));
    }

    #[test]
    fn unit_codes() {
        assert_eq!(UnitStyle::Int.code(), 0);
        assert_eq!(UnitStyle::Percent.code(), 5);
        assert_eq!(UnitStyle::Native.code(), 10);
        assert_eq!("%".parse::<UnitStyle>().unwrap(), UnitStyle::Percent);
        assert_eq!("hertz".parse::<UnitStyle>().unwrap(), UnitStyle::Hertz);
        assert!(matches!(
            "furlongs".parse::<UnitStyle>(),
            Err(PatchError::UnknownUnitStyle(_))
        ));
    }

    #[test]
    fn number_formatting() {
        assert_eq!(number(300.0), json!(300));
        assert_eq!(number(-12.0), json!(-12));
        assert_eq!(number(0.35), json!(0.35));
        assert_eq!(number(f64::NAN), Value::Null);
    }

    #[test]
    fn dial_record() {
        let mut p = Patcher::new();
        let opts = ParamOptions::new(ParamKind::Dial)
            .range(1.0, 2000.0)
            .initial(300.0)
            .unit(UnitStyle::Time)
            .short_name("Time");
        let param = ParameterNode::create(&mut p, "Delay Time", &opts);
        let rec = record_of(&p, &param);

        assert_eq!(rec["maxclass"], "live.dial");
        assert_eq!(rec["numinlets"], 1);
        assert_eq!(rec["outlettype"], json!(["", ""]));
        assert_eq!(rec["patching_rect"], json!([0, 0, 44, 48]));
        assert_eq!(rec["parameter_enable"], 1);
        assert_eq!(rec["varname"], "Delay Time");
        assert!(!rec.contains_key("text"));

        let valueof = &rec["saved_attribute_attributes"]["valueof"];
        assert_eq!(valueof["parameter_longname"], "Delay Time");
        assert_eq!(valueof["parameter_shortname"], "Time");
        assert_eq!(valueof["parameter_type"], 0);
        assert_eq!(valueof["parameter_unitstyle"], 2);
        assert_eq!(valueof["parameter_modmode"], 0);
        assert_eq!(valueof["parameter_mmin"], 1);
        assert_eq!(valueof["parameter_mmax"], 2000);
        assert_eq!(valueof["parameter_initial"], json!([300]));
        assert_eq!(valueof["parameter_initial_enable"], 1);
        assert!(valueof.get("parameter_exponent").is_none());
    }

    #[test]
    fn menu_is_enum() {
        let mut p = Patcher::new();
        let opts = ParamOptions::new(ParamKind::Menu).enum_values(["Sine", "Saw", "Square"]);
        let param = ParameterNode::create(&mut p, "Wave", &opts);
        let rec = record_of(&p, &param);
        let valueof = &rec["saved_attribute_attributes"]["valueof"];
        assert_eq!(valueof["parameter_type"], 2);
        assert_eq!(valueof["parameter_enum"], json!(["Sine", "Saw", "Square"]));
        assert_eq!(valueof["parameter_shortname"], "Wave");
        assert_eq!(rec["numoutlets"], 3);
    }

    #[test]
    fn size_override() {
        let mut p = Patcher::new();
        let opts = ParamOptions::new(ParamKind::Slider).size(30, 120);
        let param = ParameterNode::create(&mut p, "Level", &opts);
        let node = p.node(param.id()).unwrap();
        assert_eq!(node.editor_rect(), Rect::new(0, 0, 30, 120));
        assert!(node.is_control());
    }

    #[test]
    fn raw_outlet() {
        let mut p = Patcher::new();
        let dial = ParameterNode::create(&mut p, "Mix", &ParamOptions::new(ParamKind::Dial));
        assert_eq!(dial.raw().unwrap().port(), 1);
        assert_eq!(dial.value().port(), 0);

        let toggle = ParameterNode::create(&mut p, "On", &ParamOptions::new(ParamKind::Toggle));
        assert_eq!(toggle.raw(), Err(PatchError::NoRawOutlet(ParamKind::Toggle)));
        assert!(toggle.inlet(0).is_ok());
        assert!(toggle.inlet(1).is_err());
    }

    #[test]
    fn button_outlet_is_bang() {
        let mut p = Patcher::new();
        let b = ParameterNode::create(&mut p, "Fire", &ParamOptions::new(ParamKind::Button));
        let node = p.node(b.id()).unwrap();
        assert_eq!(node.outlet_kinds(), &[PortKind::Bang]);
        assert_eq!(node.type_name(), "live.button");
    }
}
