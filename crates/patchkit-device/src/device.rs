//! The device builder.

use std::path::PathBuf;

use patchkit_core::{
    Document, EdgeId, NodeHandle, NodeTypeContract, NodeTypeRegistry, ParamOptions,
    ParameterNode, Patcher, PortRef, layout_editor, layout_presentation,
};
use serde_json::{Map, Value};

use crate::endpoint::Endpoint;
use crate::error::DeviceError;
use crate::kind::{Boundary, DeviceKind};
use crate::paths;
use crate::validate::{ConnectionWarning, validate_connections};

/// Type name of the device context box.
pub const THIS_DEVICE: &str = "live.thisdevice";

/// Where [`Device::save`] writes.
///
/// Unset fields fall back to the User Library folder for the device kind and
/// `<device name>.maxpat`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// File name override.
    pub filename: Option<String>,
    /// Directory override.
    pub output_dir: Option<PathBuf>,
}

impl SaveOptions {
    /// Default location.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the output directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the file name.
    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = Some(name.into());
        self
    }
}

/// A Max for Live device under construction.
///
/// # Example
///
/// ```rust
/// use patchkit_device::{Device, ParamKind, ParamOptions, UnitStyle};
///
/// let mut device = Device::audio_effect("Gain");
/// let gain = device.add("*~", "1.");
/// let level = device.param(
///     "Level",
///     &ParamOptions::new(ParamKind::Dial).range(0.0, 1.0).initial(1.0).unit(UnitStyle::Float),
/// );
///
/// device.connect(device.input(0)?, &gain)?;
/// device.connect(level.value(), gain.inlet(1)?)?;
/// device.connect(&gain, device.output(0)?)?;
/// device.connect(gain.outlet(0)?, device.output(1)?)?;
///
/// let json = device.serialize()?;
/// assert!(json.contains("live.thisdevice"));
/// # Ok::<(), patchkit_device::DeviceError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Device {
    name: String,
    registry: NodeTypeRegistry,
    patcher: Patcher,
    boundary: Boundary,
    params: Vec<ParameterNode>,
    this_device: Option<NodeHandle>,
}

impl Device {
    /// Creates a device of `kind` with its boundary boxes in place.
    pub fn new(name: impl Into<String>, kind: DeviceKind) -> Self {
        Self::with_registry(name, kind, NodeTypeRegistry::builtin().clone())
    }

    /// Creates a device that resolves types through `registry`.
    pub fn with_registry(
        name: impl Into<String>,
        kind: DeviceKind,
        registry: NodeTypeRegistry,
    ) -> Self {
        let name = name.into();
        let mut patcher = Patcher::new();
        let boundary = Boundary::create(kind, &mut patcher, &registry);
        tracing::debug!("device_new: {kind} \"{name}\"");
        Self {
            name,
            registry,
            patcher,
            boundary,
            params: Vec::new(),
            this_device: None,
        }
    }

    /// Creates an audio effect (`plugin~` → `plugout~`).
    pub fn audio_effect(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::AudioEffect)
    }

    /// Creates a MIDI effect (`midiin` → `midiout`).
    pub fn midi_effect(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::MidiEffect)
    }

    /// Creates an instrument (`midiin` → `plugout~`).
    pub fn instrument(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Instrument)
    }

    /// Device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device kind.
    pub fn kind(&self) -> DeviceKind {
        self.boundary.kind()
    }

    /// Boundary boxes.
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// The underlying graph.
    pub fn patcher(&self) -> &Patcher {
        &self.patcher
    }

    /// Parameters, in declaration order.
    pub fn params(&self) -> &[ParameterNode] {
        &self.params
    }

    /// The type registry used by [`add`](Self::add).
    pub fn registry(&self) -> &NodeTypeRegistry {
        &self.registry
    }

    /// Mutable registry, for registering custom types on this device only.
    pub fn registry_mut(&mut self) -> &mut NodeTypeRegistry {
        &mut self.registry
    }

    /// Adds a box. Unknown types get the generic 1-in/1-out contract.
    pub fn add(&mut self, type_name: &str, args: &str) -> NodeHandle {
        let contract = self.registry.lookup_or_default(type_name);
        self.patcher.add_node(type_name, &contract, args, Map::new())
    }

    /// Adds a box with an explicit contract, bypassing the registry.
    pub fn add_with_contract(
        &mut self,
        type_name: &str,
        args: &str,
        contract: &NodeTypeContract,
    ) -> NodeHandle {
        self.patcher.add_node(type_name, contract, args, Map::new())
    }

    /// Adds a comment box.
    pub fn comment(&mut self, text: &str) -> NodeHandle {
        self.add_text_box("comment", text)
    }

    /// Adds a message box.
    pub fn message(&mut self, text: &str) -> NodeHandle {
        self.add_text_box("message", text)
    }

    fn add_text_box(&mut self, type_name: &str, text: &str) -> NodeHandle {
        let contract = self.registry.lookup_or_default(type_name);
        let mut attrs = Map::new();
        attrs.insert("text".into(), Value::String(text.to_string()));
        self.patcher.add_node(type_name, &contract, "", attrs)
    }

    /// Adds an automatable parameter.
    pub fn param(&mut self, name: &str, options: &ParamOptions) -> ParameterNode {
        let param = ParameterNode::create(&mut self.patcher, name, options);
        self.params.push(param.clone());
        param
    }

    /// Outlet carrying device input `channel`.
    pub fn input(&self, channel: usize) -> Result<PortRef, DeviceError> {
        self.boundary.input(channel)
    }

    /// Inlet feeding device output `channel`.
    pub fn output(&self, channel: usize) -> Result<PortRef, DeviceError> {
        self.boundary.output(channel)
    }

    /// Connects `source` to `destination`.
    ///
    /// Boxes and parameters resolve to outlet 0 / inlet 0.
    pub fn connect(
        &mut self,
        source: impl Into<Endpoint>,
        destination: impl Into<Endpoint>,
    ) -> Result<EdgeId, DeviceError> {
        let src = source.into().as_source()?;
        let dst = destination.into().as_destination()?;
        Ok(self.patcher.connect(src, dst)?)
    }

    /// Connects each item's outlet 0 to the next item's inlet 0.
    ///
    /// Stops at the first failing link; earlier links stay connected.
    pub fn chain<I>(&mut self, items: I) -> Result<(), DeviceError>
    where
        I: IntoIterator,
        I::Item: Into<Endpoint>,
    {
        let items: Vec<Endpoint> = items.into_iter().map(Into::into).collect();
        for pair in items.windows(2) {
            self.connect(pair[0].clone(), pair[1].clone())?;
        }
        Ok(())
    }

    /// Sets the device description.
    pub fn description(&mut self, text: impl Into<String>) -> &mut Self {
        self.patcher.set_description(text);
        self
    }

    /// Sets the device tags.
    pub fn tags(&mut self, text: impl Into<String>) -> &mut Self {
        self.patcher.set_tags(text);
        self
    }

    /// Returns the device context box, adding it on first call.
    pub fn ensure_this_device(&mut self) -> NodeHandle {
        if let Some(handle) = &self.this_device {
            return handle.clone();
        }
        let handle = self.add(THIS_DEVICE, "");
        self.this_device = Some(handle.clone());
        handle
    }

    /// Flags message outlets wired into signal-only inlets.
    pub fn validate(&self) -> Vec<ConnectionWarning> {
        validate_connections(&self.patcher)
    }

    /// Lays out the patch and snapshots it.
    ///
    /// Adds the device context box if missing, runs editor and presentation
    /// layout, opens in presentation mode when there are parameters, and logs
    /// every validation warning. Calling it again yields the same document.
    pub fn finalize(&mut self) -> Result<Document, DeviceError> {
        self.ensure_this_device();
        layout_editor(&mut self.patcher);

        let param_ids: Vec<_> = self.params.iter().map(ParameterNode::id).collect();
        layout_presentation(&mut self.patcher, &param_ids)?;
        if !self.params.is_empty() {
            self.patcher.set_open_in_presentation(true);
        }

        for warning in self.validate() {
            tracing::warn!("{warning}");
        }

        Ok(Document::from_patcher(&self.patcher))
    }

    /// Finalizes and returns the pretty-printed document.
    pub fn serialize(&mut self) -> Result<String, DeviceError> {
        Ok(self.finalize()?.to_json_pretty()?)
    }

    /// Finalizes and writes the document, returning the path written.
    pub fn save(&mut self, options: &SaveOptions) -> Result<PathBuf, DeviceError> {
        let json = self.serialize()?;

        let dir = options
            .output_dir
            .clone()
            .unwrap_or_else(|| paths::default_output_dir(self.kind()));
        paths::ensure_dir(&dir)?;

        let filename = options
            .filename
            .clone()
            .unwrap_or_else(|| paths::default_filename(&self.name));
        let path = dir.join(filename);
        std::fs::write(&path, json).map_err(|e| DeviceError::write_file(&path, e))?;

        tracing::info!(
            "saved {} \"{}\" → {}",
            self.kind().name(),
            self.name,
            path.display()
        );
        Ok(path)
    }
}
