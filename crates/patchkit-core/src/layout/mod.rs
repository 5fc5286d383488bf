//! Automatic placement of boxes.
//!
//! Two independent passes run at finalize time:
//!
//! - [`layout_editor`] places every node in the editing view: parameters in a
//!   left column, logic nodes in dependency columns to the right.
//! - [`layout_presentation`] packs parameters left to right on the device
//!   face and reports the resulting device width.
//!
//! Both are pure functions of graph contents and insertion order, so the same
//! build always yields the same coordinates.

pub mod editor;
pub mod presentation;

pub use editor::{EditorLayout, layout_editor};
pub use presentation::layout_presentation;
