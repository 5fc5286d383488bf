//! Device kinds and their fixed I/O boundary boxes.

use core::fmt;
use core::str::FromStr;

use patchkit_core::{NodeHandle, NodeTypeRegistry, Patcher, PortRef};
use serde_json::Map;

use crate::error::DeviceError;

/// The three kinds of device a host can load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Stereo audio in, stereo audio out.
    AudioEffect,
    /// MIDI in, MIDI out.
    MidiEffect,
    /// MIDI in, stereo audio out.
    Instrument,
}

impl DeviceKind {
    /// Every device kind.
    pub const ALL: [DeviceKind; 3] = [
        DeviceKind::AudioEffect,
        DeviceKind::MidiEffect,
        DeviceKind::Instrument,
    ];

    /// Identifier form (`audio_effect`, `midi_effect`, `instrument`).
    pub const fn name(self) -> &'static str {
        match self {
            DeviceKind::AudioEffect => "audio_effect",
            DeviceKind::MidiEffect => "midi_effect",
            DeviceKind::Instrument => "instrument",
        }
    }

    /// Type names of the `(input, output)` boundary boxes.
    pub const fn boundary_types(self) -> (&'static str, &'static str) {
        match self {
            DeviceKind::AudioEffect => ("plugin~", "plugout~"),
            DeviceKind::MidiEffect => ("midiin", "midiout"),
            DeviceKind::Instrument => ("midiin", "plugout~"),
        }
    }

    /// Number of input channels exposed by [`Boundary::input`].
    pub const fn input_channels(self) -> usize {
        match self {
            DeviceKind::AudioEffect => 2,
            DeviceKind::MidiEffect | DeviceKind::Instrument => 1,
        }
    }

    /// Number of output channels exposed by [`Boundary::output`].
    pub const fn output_channels(self) -> usize {
        match self {
            DeviceKind::AudioEffect | DeviceKind::Instrument => 2,
            DeviceKind::MidiEffect => 1,
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceKind::AudioEffect => "audio effect",
            DeviceKind::MidiEffect => "MIDI effect",
            DeviceKind::Instrument => "instrument",
        })
    }
}

impl FromStr for DeviceKind {
    type Err = DeviceError;

    /// Accepts `audio`, `midi`, `instrument` and the `_effect` / `-effect`
    /// long forms, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "audio" | "audio_effect" => Ok(DeviceKind::AudioEffect),
            "midi" | "midi_effect" => Ok(DeviceKind::MidiEffect),
            "instrument" | "inst" => Ok(DeviceKind::Instrument),
            _ => Err(DeviceError::UnknownDeviceKind(s.to_string())),
        }
    }
}

/// The boundary boxes of a device, created once at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Boundary {
    /// `plugin~` → ... → `plugout~`.
    AudioEffect {
        /// Stereo audio input box.
        plugin: NodeHandle,
        /// Stereo audio output box.
        plugout: NodeHandle,
    },
    /// `midiin` → ... → `midiout`.
    MidiEffect {
        /// MIDI input box.
        midiin: NodeHandle,
        /// MIDI output box.
        midiout: NodeHandle,
    },
    /// `midiin` → ... → `plugout~`.
    Instrument {
        /// MIDI input box.
        midiin: NodeHandle,
        /// Stereo audio output box.
        plugout: NodeHandle,
    },
}

impl Boundary {
    /// Adds the boundary boxes for `kind` to `patcher`.
    pub(crate) fn create(
        kind: DeviceKind,
        patcher: &mut Patcher,
        registry: &NodeTypeRegistry,
    ) -> Self {
        let (input_type, output_type) = kind.boundary_types();
        let mut add = |name: &str| {
            patcher.add_node(name, &registry.lookup_or_default(name), "", Map::new())
        };
        let input = add(input_type);
        let output = add(output_type);
        match kind {
            DeviceKind::AudioEffect => Boundary::AudioEffect {
                plugin: input,
                plugout: output,
            },
            DeviceKind::MidiEffect => Boundary::MidiEffect {
                midiin: input,
                midiout: output,
            },
            DeviceKind::Instrument => Boundary::Instrument {
                midiin: input,
                plugout: output,
            },
        }
    }

    /// The device kind these boxes belong to.
    pub fn kind(&self) -> DeviceKind {
        match self {
            Boundary::AudioEffect { .. } => DeviceKind::AudioEffect,
            Boundary::MidiEffect { .. } => DeviceKind::MidiEffect,
            Boundary::Instrument { .. } => DeviceKind::Instrument,
        }
    }

    /// The input box.
    pub fn input_node(&self) -> &NodeHandle {
        match self {
            Boundary::AudioEffect { plugin, .. } => plugin,
            Boundary::MidiEffect { midiin, .. } | Boundary::Instrument { midiin, .. } => midiin,
        }
    }

    /// The output box.
    pub fn output_node(&self) -> &NodeHandle {
        match self {
            Boundary::AudioEffect { plugout, .. } | Boundary::Instrument { plugout, .. } => {
                plugout
            }
            Boundary::MidiEffect { midiout, .. } => midiout,
        }
    }

    /// Outlet carrying device input `channel` into the patch.
    pub fn input(&self, channel: usize) -> Result<PortRef, DeviceError> {
        let kind = self.kind();
        if channel >= kind.input_channels() {
            return Err(DeviceError::channel_out_of_range(
                kind,
                kind.input_channels(),
                channel,
            ));
        }
        Ok(self.input_node().outlet(channel)?)
    }

    /// Inlet feeding device output `channel`.
    pub fn output(&self, channel: usize) -> Result<PortRef, DeviceError> {
        let kind = self.kind();
        if channel >= kind.output_channels() {
            return Err(DeviceError::channel_out_of_range(
                kind,
                kind.output_channels(),
                channel,
            ));
        }
        Ok(self.output_node().inlet(channel)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary(kind: DeviceKind) -> Boundary {
        let mut p = Patcher::new();
        Boundary::create(kind, &mut p, NodeTypeRegistry::builtin())
    }

    #[test]
    fn parse_kinds() {
        assert_eq!("audio".parse::<DeviceKind>().unwrap(), DeviceKind::AudioEffect);
        assert_eq!("MIDI-effect".parse::<DeviceKind>().unwrap(), DeviceKind::MidiEffect);
        assert_eq!("instrument".parse::<DeviceKind>().unwrap(), DeviceKind::Instrument);
        assert!(matches!(
            "sampler".parse::<DeviceKind>(),
            Err(DeviceError::UnknownDeviceKind(_))
        ));
        for kind in DeviceKind::ALL {
            assert_eq!(kind.name().parse::<DeviceKind>().unwrap(), kind);
        }
    }

    #[test]
    fn audio_boundary_is_stereo() {
        let b = boundary(DeviceKind::AudioEffect);
        assert_eq!(b.input_node().type_name(), "plugin~");
        assert_eq!(b.output_node().type_name(), "plugout~");
        assert_eq!(b.input(1).unwrap().port(), 1);
        assert_eq!(b.output(1).unwrap().port(), 1);
        assert!(matches!(
            b.input(2),
            Err(DeviceError::ChannelOutOfRange { channels: 2, channel: 2, .. })
        ));
    }

    #[test]
    fn midi_boundary_is_single_channel() {
        let b = boundary(DeviceKind::MidiEffect);
        assert_eq!(b.kind(), DeviceKind::MidiEffect);
        assert!(b.input(0).is_ok());
        assert!(b.output(0).is_ok());
        assert!(b.input(1).is_err());
        assert!(b.output(1).is_err());
    }

    #[test]
    fn instrument_boundary() {
        let b = boundary(DeviceKind::Instrument);
        assert_eq!(b.input_node().type_name(), "midiin");
        assert!(b.input(1).is_err());
        assert_eq!(b.output(1).unwrap().node(), b.output_node().id());
    }
}
