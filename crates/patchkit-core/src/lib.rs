//! Patchkit Core - patch graph model, auto-layout and document output
//!
//! This crate turns a typed graph of boxes and patch cords into a host patch
//! document with deterministic coordinates.
//!
//! # Core Abstractions
//!
//! ## Graph
//!
//! - [`Patcher`] - Node arena, edge list and document-level fields
//! - [`Node`] - One box, shaped by its [`NodeTypeContract`]
//! - [`NodeHandle`] / [`PortRef`] - Bounds-checked wiring references
//!
//! ## Parameters
//!
//! - [`ParameterNode`] - Automatable live control box
//! - [`ParamOptions`] - Builder for names, range, units and enum entries
//! - [`ParamKind`] / [`UnitStyle`] - Display type and value unit
//!
//! ## Layout
//!
//! - [`layout_editor`] - Parameter column plus dependency columns
//! - [`layout_presentation`] - Left-to-right device face
//!
//! ## Output
//!
//! - [`Document`] - Serializable `.maxpat` snapshot
//!
//! # Example
//!
//! ```rust
//! use patchkit_core::{Document, NodeTypeRegistry, ParamKind, ParamOptions, ParameterNode, Patcher};
//! use patchkit_core::{layout_editor, layout_presentation};
//! use serde_json::Map;
//!
//! let registry = NodeTypeRegistry::builtin();
//! let mut patcher = Patcher::new();
//! let input = patcher.add_node("plugin~", &registry.lookup_or_default("plugin~"), "", Map::new());
//! let gain = patcher.add_node("*~", &registry.lookup_or_default("*~"), "0.5", Map::new());
//! let output = patcher.add_node("plugout~", &registry.lookup_or_default("plugout~"), "", Map::new());
//! let level = ParameterNode::create(&mut patcher, "Level", &ParamOptions::new(ParamKind::Dial));
//!
//! patcher.connect(input.outlet(0)?, gain.inlet(0)?)?;
//! patcher.connect(gain.outlet(0)?, output.inlet(0)?)?;
//! patcher.connect(level.value(), gain.inlet(1)?)?;
//!
//! layout_editor(&mut patcher);
//! let width = layout_presentation(&mut patcher, &[level.id()])?;
//! assert_eq!(width, Some(60));
//!
//! let json = Document::from_patcher(&patcher).to_json_pretty().unwrap();
//! assert!(json.contains("\"maxclass\": \"live.dial\""));
//! # Ok::<(), patchkit_core::PatchError>(())
//! ```

pub mod document;
pub mod error;
pub mod graph;
pub mod layout;
pub mod node;
pub mod param;

pub use document::{AppVersion, Document};
pub use error::PatchError;
pub use graph::{Edge, EdgeId, Patcher};
pub use layout::{EditorLayout, layout_editor, layout_presentation};
pub use node::{Node, NodeHandle, NodeId, PortDirection, PortRef, Rect, box_width_for};
pub use param::{ParamKind, ParamOptions, ParameterNode, UnitStyle};

pub use patchkit_registry::{NodeCategory, NodeTypeContract, NodeTypeRegistry, PortKind};
