//! Presentation (device face) layout.

use crate::error::PatchError;
use crate::graph::Patcher;
use crate::node::{NodeId, Rect};

/// Left margin of the device face.
pub const X_START: u32 = 4;
/// Top edge of every control.
pub const Y_START: u32 = 4;
/// Horizontal gap between controls.
pub const X_GAP: u32 = 8;

/// Places `params` left to right on the device face, in the given order, and
/// sets the patch's device width.
///
/// Each control keeps its editor size. Returns the device width, or `None`
/// (leaving the patch untouched) when there are no parameters.
pub fn layout_presentation(
    patcher: &mut Patcher,
    params: &[NodeId],
) -> Result<Option<u32>, PatchError> {
    if params.is_empty() {
        return Ok(None);
    }

    let mut x = X_START;
    for &id in params {
        let node = patcher.node_mut(id).ok_or(PatchError::NodeNotFound(id))?;
        let Rect { width, height, .. } = node.editor_rect();
        node.set_presentation(true, Some(Rect::new(x, Y_START, width, height)));
        x = x.saturating_add(width).saturating_add(X_GAP);
    }

    let device_width = x.saturating_add(X_START);
    patcher.set_device_width(device_width);
    tracing::debug!(
        "layout_presentation: {} controls, device width {device_width}",
        params.len()
    );
    Ok(Some(device_width))
}
