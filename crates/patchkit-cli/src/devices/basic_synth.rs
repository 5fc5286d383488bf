//! Monophonic subtractive synth.
//!
//! MIDI note → `mtof~` → `saw~` → `lores~` → VCA (`adsr~`) → volume → both
//! outputs. Velocity triggers the envelope; velocity 0 releases it.

use patchkit_device::{Device, DeviceError, ParamKind, ParamOptions, UnitStyle};

pub const NAME: &str = "Basic Synth";
pub const DESCRIPTION: &str = "Simple subtractive synthesizer";

pub fn build() -> Result<Device, DeviceError> {
    let mut d = Device::instrument(NAME);
    d.description(DESCRIPTION);

    let dial = |min, max, initial, unit| {
        ParamOptions::new(ParamKind::Dial)
            .range(min, max)
            .initial(initial)
            .unit(unit)
    };
    let cutoff = d.param(
        "Cutoff",
        &dial(20.0, 20000.0, 5000.0, UnitStyle::Hertz).exponent(3.0),
    );
    let resonance = d.param("Resonance", &dial(0.0, 100.0, 20.0, UnitStyle::Percent));
    let attack = d.param("Attack", &dial(1.0, 5000.0, 10.0, UnitStyle::Time));
    let release = d.param("Release", &dial(1.0, 5000.0, 200.0, UnitStyle::Time));
    let volume = d.param("Volume", &dial(-70.0, 6.0, -6.0, UnitStyle::Decibel));

    let midiparse = d.add("midiparse", "");
    let stripnote = d.add("stripnote", "");
    let mtof = d.add("mtof~", "");
    let vel_scale = d.add("scale", "0 127 0. 1.");
    let saw = d.add("saw~", "");
    let res_scale = d.add("scale", "0 100 0. 1.");
    let filter = d.add("lores~", "5000 0.5");
    let adsr = d.add("adsr~", "10 50 0.7 200");
    let vca = d.add("*~", "");
    let dbtoa = d.add("dbtoa~", "");
    let vol_mul = d.add("*~", "");
    let note_off = d.add("select", "0");

    d.connect(d.input(0)?, &midiparse)?;
    d.connect(&midiparse, &stripnote)?;
    d.connect(midiparse.outlet(1)?, stripnote.inlet(1)?)?;
    d.chain([&stripnote, &mtof, &saw])?;

    d.connect(stripnote.outlet(1)?, &vel_scale)?;
    d.connect(&vel_scale, &adsr)?;

    d.connect(midiparse.outlet(1)?, &note_off)?;
    d.connect(&note_off, &adsr)?;

    d.connect(&attack, adsr.inlet(1)?)?;
    d.connect(&release, adsr.inlet(4)?)?;

    d.connect(&saw, &filter)?;
    d.connect(&cutoff, filter.inlet(1)?)?;
    d.connect(&resonance, &res_scale)?;
    d.connect(&res_scale, filter.inlet(2)?)?;

    d.connect(&filter, &vca)?;
    d.connect(&adsr, vca.inlet(1)?)?;

    d.connect(&volume, &dbtoa)?;
    d.connect(&dbtoa, vol_mul.inlet(1)?)?;
    d.connect(&vca, &vol_mul)?;

    d.connect(&vol_mul, d.output(0)?)?;
    d.connect(&vol_mul, d.output(1)?)?;
    Ok(d)
}
