//! Bundled example devices.

mod basic_synth;
mod grainy_delay;
mod midi_echo;
mod simple_delay;

use patchkit_device::{Device, DeviceError, DeviceKind};

/// A device the CLI can build by id.
#[derive(Debug, Clone, Copy)]
pub struct BundledDevice {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: DeviceKind,
    pub description: &'static str,
    pub build: fn() -> Result<Device, DeviceError>,
}

/// Every bundled device, in listing order.
pub fn bundled_devices() -> Vec<BundledDevice> {
    vec![
        BundledDevice {
            id: "simple-delay",
            name: simple_delay::NAME,
            kind: DeviceKind::AudioEffect,
            description: simple_delay::DESCRIPTION,
            build: simple_delay::build,
        },
        BundledDevice {
            id: "grainy-delay",
            name: grainy_delay::NAME,
            kind: DeviceKind::AudioEffect,
            description: grainy_delay::DESCRIPTION,
            build: grainy_delay::build,
        },
        BundledDevice {
            id: "basic-synth",
            name: basic_synth::NAME,
            kind: DeviceKind::Instrument,
            description: basic_synth::DESCRIPTION,
            build: basic_synth::build,
        },
        BundledDevice {
            id: "midi-echo",
            name: midi_echo::NAME,
            kind: DeviceKind::MidiEffect,
            description: midi_echo::DESCRIPTION,
            build: midi_echo::build,
        },
    ]
}

/// Finds a bundled device by id or display name, case-insensitively.
pub fn find_device(key: &str) -> Option<BundledDevice> {
    bundled_devices()
        .into_iter()
        .find(|d| d.id.eq_ignore_ascii_case(key) || d.name.eq_ignore_ascii_case(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bundled_device_builds() {
        for entry in bundled_devices() {
            let mut device = (entry.build)().unwrap();
            assert_eq!(device.name(), entry.name);
            assert_eq!(device.kind(), entry.kind);
            let json = device.serialize().unwrap();
            assert!(json.contains(entry.description), "{}", entry.id);
        }
    }

    #[test]
    fn lookup_by_id_or_name() {
        assert_eq!(find_device("simple-delay").unwrap().name, "Simple Delay");
        assert_eq!(find_device("MIDI Echo").unwrap().id, "midi-echo");
        assert!(find_device("reverb").is_none());
    }

    #[test]
    fn ids_are_unique() {
        let devices = bundled_devices();
        for (i, a) in devices.iter().enumerate() {
            assert!(devices[i + 1..].iter().all(|b| b.id != a.id));
        }
    }
}
