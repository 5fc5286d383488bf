//! MIDI note echo with velocity decay.
//!
//! Three delayed copies of each note, each quieter than the last, merged back
//! with the dry notes into `midiformat`.

use patchkit_device::{
    Device, DeviceError, NodeTypeContract, ParamKind, ParamOptions, PortKind, UnitStyle,
};

pub const NAME: &str = "MIDI Echo";
pub const DESCRIPTION: &str = "MIDI note echo with velocity decay";

/// Echo taps as `(pipe args, velocity factor)`.
const TAPS: [(&str, &str); 3] = [("0 0 250", "0.7"), ("0 0 500", "0.49"), ("0 0 750", "0.343")];

pub fn build() -> Result<Device, DeviceError> {
    let mut d = Device::midi_effect(NAME);
    d.description(DESCRIPTION);

    d.param(
        "Delay",
        &ParamOptions::new(ParamKind::Dial)
            .range(50.0, 2000.0)
            .initial(250.0)
            .unit(UnitStyle::Time),
    );
    d.param(
        "Repeats",
        &ParamOptions::new(ParamKind::Dial)
            .range(1.0, 8.0)
            .initial(3.0)
            .unit(UnitStyle::Int)
            .steps(8),
    );
    d.param(
        "Decay",
        &ParamOptions::new(ParamKind::Dial)
            .range(10.0, 100.0)
            .initial(70.0)
            .unit(UnitStyle::Percent),
    );

    let midiparse = d.add("midiparse", "");
    let midiformat = d.add("midiformat", "");

    // pipe grows one inlet/outlet pair per argument.
    let pipe_contract = NodeTypeContract::new(3, &[PortKind::Message; 3]);
    let pipes: Vec<_> = TAPS
        .iter()
        .map(|(args, _)| d.add_with_contract("pipe", args, &pipe_contract))
        .collect();
    let vel_scales: Vec<_> = TAPS.iter().map(|(_, factor)| d.add("*", factor)).collect();
    let makenotes: Vec<_> = TAPS.iter().map(|_| d.add("makenote", "64 250")).collect();

    d.connect(d.input(0)?, &midiparse)?;

    // Dry notes pass straight through.
    d.connect(&midiparse, &midiformat)?;
    d.connect(midiparse.outlet(1)?, midiformat.inlet(1)?)?;

    for ((pipe, vel_scale), makenote) in pipes.iter().zip(&vel_scales).zip(&makenotes) {
        d.connect(&midiparse, pipe)?;
        d.connect(midiparse.outlet(1)?, vel_scale)?;
        d.connect(vel_scale, pipe.inlet(1)?)?;
        d.connect(pipe, makenote)?;
        d.connect(pipe.outlet(1)?, makenote.inlet(1)?)?;
        d.connect(makenote, &midiformat)?;
        d.connect(makenote.outlet(1)?, midiformat.inlet(1)?)?;
    }

    d.connect(&midiformat, d.output(0)?)?;
    Ok(d)
}
