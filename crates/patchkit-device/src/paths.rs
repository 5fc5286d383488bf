//! Default output locations.
//!
//! Devices are saved into the Ableton User Library so they appear in the
//! browser without any manual copying:
//!
//! - Audio effects: `~/Music/Ableton/User Library/Presets/Audio Effects/Max Audio Effect/`
//! - MIDI effects: `~/Music/Ableton/User Library/Presets/MIDI Effects/Max MIDI Effect/`
//! - Instruments: `~/Music/Ableton/User Library/Presets/Instruments/Max Instrument/`

use std::path::{Path, PathBuf};

use crate::error::DeviceError;
use crate::kind::DeviceKind;

/// Presets folder of the User Library, relative to the home directory.
const USER_LIBRARY_PRESETS: &str = "Music/Ableton/User Library/Presets";

/// File extension of patch documents.
pub const PATCH_EXTENSION: &str = "maxpat";

/// Library subfolder for a device kind.
pub const fn library_subdir(kind: DeviceKind) -> &'static str {
    match kind {
        DeviceKind::AudioEffect => "Audio Effects/Max Audio Effect",
        DeviceKind::MidiEffect => "MIDI Effects/Max MIDI Effect",
        DeviceKind::Instrument => "Instruments/Max Instrument",
    }
}

/// Returns the default save directory for `kind`.
///
/// Returns a path relative to `.` if the home directory cannot be determined.
pub fn default_output_dir(kind: DeviceKind) -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(USER_LIBRARY_PRESETS)
        .join(library_subdir(kind))
}

/// Default file name for a device called `name`.
pub fn default_filename(name: &str) -> String {
    format!("{name}.{PATCH_EXTENSION}")
}

/// Creates `dir` (and parents) if it does not exist.
pub fn ensure_dir(dir: &Path) -> Result<(), DeviceError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|e| DeviceError::create_dir(dir, e))?;
    }
    Ok(())
}
