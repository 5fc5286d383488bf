//! Patch document serialization.
//!
//! [`Document`] is a snapshot of a [`Patcher`] in the host's `.maxpat` JSON
//! shape. Field order follows the struct declarations and box attributes keep
//! insertion order, so a given graph always serializes to the same bytes.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::graph::{Edge, Patcher};

/// Host application version stamped into every document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppVersion {
    /// Major version.
    pub major: u32,
    /// Minor version.
    pub minor: u32,
    /// Revision.
    pub revision: u32,
    /// Target architecture.
    pub architecture: &'static str,
    /// Modern UI flag.
    pub modernui: u8,
}

impl Default for AppVersion {
    fn default() -> Self {
        Self {
            major: 8,
            minor: 6,
            revision: 5,
            architecture: "x64",
            modernui: 1,
        }
    }
}

/// `{ "box": { ... } }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxEntry {
    #[serde(rename = "box")]
    record: Map<String, Value>,
}

/// `{ "patchline": { ... } }` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineEntry {
    patchline: Edge,
}

/// The `patcher` object of a document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatcherData {
    fileversion: u32,
    appversion: AppVersion,
    classnamespace: &'static str,
    rect: [u32; 4],
    bglocked: u8,
    openinpresentation: u8,
    default_fontsize: u32,
    default_fontface: u32,
    default_fontname: &'static str,
    gridonopen: u8,
    gridsize: [u32; 2],
    gridsnaponopen: u8,
    objectsnaponopen: u8,
    statusbarvisible: u8,
    toolbarvisible: u8,
    lefttoolbarpinned: u8,
    toptoolbarpinned: u8,
    righttoolbarpinned: u8,
    bottomtoolbarpinned: u8,
    toolbars_unpinned_last_save: u8,
    tallnewobj: u8,
    boxanimatetime: u32,
    enablehscroll: u8,
    enablevscroll: u8,
    devicewidth: u32,
    description: String,
    digest: &'static str,
    tags: String,
    style: &'static str,
    subpatcher_template: &'static str,
    assistshowspatchername: u8,
    boxes: Vec<BoxEntry>,
    lines: Vec<LineEntry>,
    parameters: Map<String, Value>,
    dependency_cache: Vec<Value>,
    autosave: u8,
}

/// A complete patch document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    patcher: PatcherData,
}

impl Document {
    /// Snapshots `patcher`. Boxes and lines appear in insertion order.
    pub fn from_patcher(patcher: &Patcher) -> Self {
        let boxes = patcher
            .nodes()
            .iter()
            .map(|node| BoxEntry {
                record: node.to_record(),
            })
            .collect();
        let lines = patcher
            .edges()
            .iter()
            .map(|edge| LineEntry {
                patchline: edge.clone(),
            })
            .collect();

        Self {
            patcher: PatcherData {
                fileversion: 1,
                appversion: AppVersion::default(),
                classnamespace: "box",
                rect: [0, 0, 900, 700],
                bglocked: 0,
                openinpresentation: u8::from(patcher.open_in_presentation()),
                default_fontsize: 12,
                default_fontface: 0,
                default_fontname: "Arial",
                gridonopen: 1,
                gridsize: [15, 15],
                gridsnaponopen: 1,
                objectsnaponopen: 1,
                statusbarvisible: 2,
                toolbarvisible: 1,
                lefttoolbarpinned: 0,
                toptoolbarpinned: 0,
                righttoolbarpinned: 0,
                bottomtoolbarpinned: 0,
                toolbars_unpinned_last_save: 0,
                tallnewobj: 0,
                boxanimatetime: 200,
                enablehscroll: 1,
                enablevscroll: 1,
                devicewidth: patcher.device_width(),
                description: patcher.description().to_string(),
                digest: "",
                tags: patcher.tags().to_string(),
                style: "",
                subpatcher_template: "",
                assistshowspatchername: 0,
                boxes,
                lines,
                parameters: Map::new(),
                dependency_cache: Vec::new(),
                autosave: 0,
            },
        }
    }

    /// Number of boxes.
    pub fn box_count(&self) -> usize {
        self.patcher.boxes.len()
    }

    /// Number of patch lines.
    pub fn line_count(&self) -> usize {
        self.patcher.lines.len()
    }

    /// Device width written to the document.
    pub fn device_width(&self) -> u32 {
        self.patcher.devicewidth
    }

    /// Whether the document opens in presentation mode.
    pub fn opens_in_presentation(&self) -> bool {
        self.patcher.openinpresentation != 0
    }

    /// The document as a JSON value.
    pub fn to_value(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
