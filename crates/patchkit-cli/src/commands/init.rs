//! Device source scaffolding command.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Args;
use patchkit_device::DeviceKind;

const TEMPLATE: &str = r#"//! @NAME@

use patchkit_device::{Device, DeviceError, ParamKind, ParamOptions, SaveOptions, UnitStyle};

pub fn build() -> Result<Device, DeviceError> {
    let mut d = Device::@CONSTRUCTOR@(@NAME_LITERAL@);
    d.description("");

    let level = d.param(
        "Level",
        &ParamOptions::new(ParamKind::Dial)
            .range(0.0, 100.0)
            .initial(100.0)
            .unit(UnitStyle::Percent),
    );
@BODY@
    Ok(d)
}

fn main() -> Result<(), DeviceError> {
    let path = build()?.save(&SaveOptions::new())?;
    println!("Saved {}", path.display());
    Ok(())
}
"#;

const AUDIO_BODY: &str = r#"
    let scale = d.add("scale", "0 100 0. 1.");
    let gain = d.add("sig~", "");
    let amp_l = d.add("*~", "");
    let amp_r = d.add("*~", "");

    d.connect(&level, &scale)?;
    d.connect(&scale, &gain)?;
    d.connect(d.input(0)?, &amp_l)?;
    d.connect(&gain, amp_l.inlet(1)?)?;
    d.connect(d.input(1)?, &amp_r)?;
    d.connect(&gain, amp_r.inlet(1)?)?;
    d.connect(&amp_l, d.output(0)?)?;
    d.connect(&amp_r, d.output(1)?)?;
"#;

const MIDI_BODY: &str = r#"
    let midiparse = d.add("midiparse", "");
    let midiformat = d.add("midiformat", "");
    let velocity = d.add("scale", "0 100 0. 1.");
    let scaled = d.add("*", "1.");

    d.connect(d.input(0)?, &midiparse)?;
    d.connect(&midiparse, &midiformat)?;
    d.connect(&level, &velocity)?;
    d.connect(&velocity, scaled.inlet(1)?)?;
    d.connect(midiparse.outlet(1)?, &scaled)?;
    d.connect(&scaled, midiformat.inlet(1)?)?;
    d.connect(&midiformat, d.output(0)?)?;
"#;

const INSTRUMENT_BODY: &str = r#"
    let midiparse = d.add("midiparse", "");
    let stripnote = d.add("stripnote", "");
    let mtof = d.add("mtof~", "");
    let osc = d.add("saw~", "");
    let scale = d.add("scale", "0 100 0. 1.");
    let gain = d.add("sig~", "");
    let amp = d.add("*~", "");

    d.connect(d.input(0)?, &midiparse)?;
    d.connect(&midiparse, &stripnote)?;
    d.connect(midiparse.outlet(1)?, stripnote.inlet(1)?)?;
    d.chain([&stripnote, &mtof, &osc, &amp])?;
    d.connect(&level, &scale)?;
    d.connect(&scale, &gain)?;
    d.connect(&gain, amp.inlet(1)?)?;
    d.connect(&amp, d.output(0)?)?;
    d.connect(&amp, d.output(1)?)?;
"#;

#[derive(Args)]
pub struct InitArgs {
    /// Device name
    #[arg(value_name = "NAME")]
    name: String,

    /// Device kind: audio, midi, or instrument
    #[arg(short, long, default_value = "audio")]
    kind: DeviceKind,

    /// Directory to write the source file into
    #[arg(short, long, value_name = "DIR", default_value = "devices")]
    dir: PathBuf,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    let stem = snake_case(&args.name);
    if stem.is_empty() {
        bail!("Device name must contain at least one letter or digit");
    }

    let path = args.dir.join(format!("{stem}.rs"));
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("creating {}", args.dir.display()))?;
    std::fs::write(&path, render(&args.name, args.kind))
        .with_context(|| format!("writing {}", path.display()))?;

    tracing::debug!("scaffolded {} as {}", args.name, args.kind.name());
    println!("Created {} ({})", path.display(), args.kind);
    Ok(())
}

/// Renders the starter source for a device.
fn render(name: &str, kind: DeviceKind) -> String {
    let body = match kind {
        DeviceKind::AudioEffect => AUDIO_BODY,
        DeviceKind::MidiEffect => MIDI_BODY,
        DeviceKind::Instrument => INSTRUMENT_BODY,
    };
    TEMPLATE
        .replace("@NAME_LITERAL@", &format!("{name:?}"))
        .replace("@NAME@", name)
        .replace("@CONSTRUCTOR@", kind.name())
        .replace("@BODY@", body.trim_end_matches('\n'))
}

/// `"My Cool FX!"` → `"my_cool_fx"`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    out.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_collapses_separators() {
        assert_eq!(snake_case("My Cool FX!"), "my_cool_fx");
        assert_eq!(snake_case("  --Lo-Fi  "), "lo_fi");
        assert_eq!(snake_case("???"), "");
    }

    #[test]
    fn render_uses_kind_constructor() {
        let src = render("Bit \"Crusher\"", DeviceKind::AudioEffect);
        assert!(src.contains("Device::audio_effect(\"Bit \\\"Crusher\\\"\")"));
        assert!(src.starts_with("//! Bit \"Crusher\"\n"));
        assert!(!src.contains('@'));

        assert!(render("x", DeviceKind::MidiEffect).contains("Device::midi_effect(\"x\")"));
        assert!(render("x", DeviceKind::Instrument).contains("Device::instrument(\"x\")"));
    }
}
