//! Node type registry for patchkit patch documents.
//!
//! This crate provides the catalog of node ("box") types a patch may contain,
//! keyed by type name. Each entry is a [`NodeTypeContract`] describing how
//! many inlets and outlets a node of that type has, what kind of data each
//! outlet produces, and how the host application renders it.
//!
//! # Features
//!
//! - **Open Catalog**: ~150 built-in types, extensible at runtime via
//!   [`NodeTypeRegistry::register`]
//! - **Graceful Fallback**: unknown types resolve to a generic 1-in/1-out
//!   contract through [`NodeTypeRegistry::lookup_or_default`]
//! - **Category System**: built-in types are grouped by domain (audio I/O,
//!   MIDI, filters, timing, ...)
//!
//! # Example
//!
//! ```rust
//! use patchkit_registry::{NodeCategory, NodeTypeContract, NodeTypeRegistry, PortKind};
//!
//! let mut registry = NodeTypeRegistry::new();
//!
//! let tapout = registry.lookup("tapout~").unwrap();
//! assert_eq!(tapout.num_outlets(), 1);
//! assert_eq!(tapout.outlet_kinds[0], PortKind::Signal);
//!
//! // Extend the catalog with a custom abstraction
//! registry.register("my.granulator~", NodeTypeContract::new(3, &[PortKind::Signal, PortKind::Signal]));
//! assert!(registry.contains("my.granulator~"));
//!
//! for name in registry.types_in_category(NodeCategory::Timing) {
//!     println!("timing: {name}");
//! }
//! ```

mod catalog;

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Render class used by ordinary executable boxes.
///
/// Boxes with this class display their type name and arguments as a label;
/// every other class is a specialized UI object.
pub const GENERIC_RENDER_CLASS: &str = "newobj";

/// Data kind carried by an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortKind {
    /// Audio-rate signal.
    Signal,
    /// Multichannel audio-rate signal.
    MultichannelSignal,
    /// Bang (trigger without payload).
    Bang,
    /// Integer message.
    Int,
    /// Float message.
    Float,
    /// List message.
    List,
    /// Generic message of any type.
    Message,
}

impl PortKind {
    /// Returns the outlet type tag written into patch documents.
    ///
    /// Generic messages are written as the empty string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PortKind::Signal => "signal",
            PortKind::MultichannelSignal => "multichannelsignal",
            PortKind::Bang => "bang",
            PortKind::Int => "int",
            PortKind::Float => "float",
            PortKind::List => "list",
            PortKind::Message => "",
        }
    }

    /// Returns true for outlets that carry audio-rate data.
    pub const fn is_signal(&self) -> bool {
        matches!(self, PortKind::Signal | PortKind::MultichannelSignal)
    }
}

/// Domain grouping for catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    /// Plugin and DAC/ADC audio boundaries
    AudioIo,
    /// MIDI input, output and parsing
    MidiIo,
    /// Filters, delays and signal arithmetic
    Dsp,
    /// Oscillators and noise generators
    Oscillator,
    /// Envelopes and ramps
    Envelope,
    /// Gain stages and meters
    Amplitude,
    /// Unit conversion (pitch, decibels, signal/message)
    Conversion,
    /// Message-domain arithmetic
    Math,
    /// Gates, switches, routing and list plumbing
    Routing,
    /// Metronomes, delays, counters and transport
    Timing,
    /// Value, table and buffer storage
    Storage,
    /// Generic UI objects (number boxes, sliders, comments)
    Ui,
    /// Live device controls and the Live API
    Live,
    /// Send/receive, load triggers and message helpers
    Utility,
    /// Poly voices and subpatchers
    Subpatcher,
    /// Jitter matrix basics
    Jitter,
    /// Types registered at runtime
    Custom,
}

impl NodeCategory {
    /// All categories in catalog order.
    pub const ALL: [NodeCategory; 17] = [
        NodeCategory::AudioIo,
        NodeCategory::MidiIo,
        NodeCategory::Dsp,
        NodeCategory::Oscillator,
        NodeCategory::Envelope,
        NodeCategory::Amplitude,
        NodeCategory::Conversion,
        NodeCategory::Math,
        NodeCategory::Routing,
        NodeCategory::Timing,
        NodeCategory::Storage,
        NodeCategory::Ui,
        NodeCategory::Live,
        NodeCategory::Utility,
        NodeCategory::Subpatcher,
        NodeCategory::Jitter,
        NodeCategory::Custom,
    ];

    /// Returns a human-readable name for the category.
    pub const fn name(&self) -> &'static str {
        match self {
            NodeCategory::AudioIo => "Audio I/O",
            NodeCategory::MidiIo => "MIDI I/O",
            NodeCategory::Dsp => "DSP",
            NodeCategory::Oscillator => "Oscillators",
            NodeCategory::Envelope => "Envelopes",
            NodeCategory::Amplitude => "Amplitude",
            NodeCategory::Conversion => "Conversion",
            NodeCategory::Math => "Math",
            NodeCategory::Routing => "Routing",
            NodeCategory::Timing => "Timing",
            NodeCategory::Storage => "Data Storage",
            NodeCategory::Ui => "UI",
            NodeCategory::Live => "Live",
            NodeCategory::Utility => "Utility",
            NodeCategory::Subpatcher => "Subpatchers",
            NodeCategory::Jitter => "Jitter",
            NodeCategory::Custom => "Custom",
        }
    }

    /// Parses a category from a loose, case-insensitive name (`"midi"`, `"audio-io"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self::ALL.into_iter().find(|cat| {
            let candidate: String = cat
                .name()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect();
            !key.is_empty() && (candidate == key || candidate.starts_with(&key))
        })
    }
}

/// Port-arity and rendering contract for one node type.
///
/// The outlet count is the length of `outlet_kinds`, so the two can never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTypeContract {
    /// Number of inlets.
    pub num_inlets: usize,
    /// Data kind produced by each outlet, in port order.
    pub outlet_kinds: Vec<PortKind>,
    /// Host render class (`"newobj"` for ordinary boxes).
    pub render_class: Cow<'static, str>,
    /// Fixed editor width, overriding the label-derived width.
    pub default_width: Option<u32>,
}

impl NodeTypeContract {
    /// Creates a generic-class contract with the given inlets and outlet kinds.
    pub fn new(num_inlets: usize, outlet_kinds: &[PortKind]) -> Self {
        Self {
            num_inlets,
            outlet_kinds: outlet_kinds.to_vec(),
            render_class: Cow::Borrowed(GENERIC_RENDER_CLASS),
            default_width: None,
        }
    }

    /// Sets the render class.
    pub fn with_render_class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        self.render_class = class.into();
        self
    }

    /// Sets a fixed default width.
    pub fn with_default_width(mut self, width: u32) -> Self {
        self.default_width = Some(width);
        self
    }

    /// Number of outlets.
    pub fn num_outlets(&self) -> usize {
        self.outlet_kinds.len()
    }

    /// The contract used for types missing from the catalog: one inlet, one
    /// generic message outlet.
    pub fn fallback() -> Self {
        Self::new(1, &[PortKind::Message])
    }

    /// Returns true when boxes of this type render as ordinary labelled objects.
    pub fn is_generic(&self) -> bool {
        self.render_class == GENERIC_RENDER_CLASS
    }
}

/// Internal entry in the registry.
#[derive(Debug, Clone)]
struct RegistryEntry {
    contract: NodeTypeContract,
    category: NodeCategory,
}

/// Catalog of node types, keyed by type name.
///
/// [`NodeTypeRegistry::new`] returns a registry with every built-in type
/// registered. Builders own their registry, so runtime registrations never
/// leak between devices.
#[derive(Debug, Clone)]
pub struct NodeTypeRegistry {
    entries: BTreeMap<String, RegistryEntry>,
}

impl Default for NodeTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTypeRegistry {
    /// Create a new registry with all built-in types registered.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        catalog::register_builtin_types(&mut registry);
        registry
    }

    /// Create a registry with no types registered.
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Shared, lazily built registry holding the built-in catalog.
    ///
    /// Cloning it is the cheapest way to get a fresh, extensible registry.
    pub fn builtin() -> &'static NodeTypeRegistry {
        static BUILTIN: OnceLock<NodeTypeRegistry> = OnceLock::new();
        BUILTIN.get_or_init(NodeTypeRegistry::new)
    }

    /// Register a built-in type under a category.
    pub(crate) fn register_in(
        &mut self,
        category: NodeCategory,
        name: &str,
        contract: NodeTypeContract,
    ) {
        self.entries
            .insert(name.to_string(), RegistryEntry { contract, category });
    }

    /// Register (or silently replace) a type.
    ///
    /// Runtime registrations are filed under [`NodeCategory::Custom`].
    pub fn register(&mut self, name: impl Into<String>, contract: NodeTypeContract) {
        let name = name.into();
        tracing::debug!(type_name = %name, "registry: register");
        self.entries.insert(
            name,
            RegistryEntry {
                contract,
                category: NodeCategory::Custom,
            },
        );
    }

    /// Look up a type's contract.
    pub fn lookup(&self, name: &str) -> Option<&NodeTypeContract> {
        self.entries.get(name).map(|e| &e.contract)
    }

    /// Look up a type's contract, falling back to [`NodeTypeContract::fallback`].
    ///
    /// Misses are logged as warnings.
    pub fn lookup_or_default(&self, name: &str) -> NodeTypeContract {
        match self.lookup(name) {
            Some(contract) => contract.clone(),
            None => {
                tracing::warn!(
                    type_name = %name,
                    "unknown object \"{name}\", using default 1-in/1-out contract"
                );
                NodeTypeContract::fallback()
            }
        }
    }

    /// Returns the category a type is filed under.
    pub fn category(&self, name: &str) -> Option<NodeCategory> {
        self.entries.get(name).map(|e| e.category)
    }

    /// Returns true if the type is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns all registered type names in sorted order.
    pub fn list_all(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Returns the names of types in a specific category, sorted.
    pub fn types_in_category(&self, category: NodeCategory) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.category == category)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
