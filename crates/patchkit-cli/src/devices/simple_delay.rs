//! Stereo delay with feedback and dry/wet mix.
//!
//! `plugin~ → tapin~/tapout~ feedback loop → dry/wet sum → plugout~`, one
//! loop per channel.

use patchkit_device::{Device, DeviceError, ParamKind, ParamOptions, UnitStyle};

pub const NAME: &str = "Simple Delay";
pub const DESCRIPTION: &str = "Stereo delay with feedback and dry/wet mix";

pub fn build() -> Result<Device, DeviceError> {
    let mut d = Device::audio_effect(NAME);
    d.description(DESCRIPTION);

    let dial = |min, max, initial, unit| {
        ParamOptions::new(ParamKind::Dial)
            .range(min, max)
            .initial(initial)
            .unit(unit)
    };
    let delay_time = d.param("Delay Time", &dial(1.0, 2000.0, 250.0, UnitStyle::Time));
    let feedback = d.param("Feedback", &dial(0.0, 95.0, 40.0, UnitStyle::Percent));
    let mix = d.param("Mix", &dial(0.0, 100.0, 50.0, UnitStyle::Percent));

    let tapin_l = d.add("tapin~", "5000");
    let tapout_l = d.add("tapout~", "250");
    let tapin_r = d.add("tapin~", "5000");
    let tapout_r = d.add("tapout~", "250");

    let fb_l = d.add("*~", "0.4");
    let fb_r = d.add("*~", "0.4");
    let fb_scale = d.add("scale", "0 95 0. 0.95");

    let dry_l = d.add("*~", "0.5");
    let dry_r = d.add("*~", "0.5");
    let wet_l = d.add("*~", "0.5");
    let wet_r = d.add("*~", "0.5");
    let sum_l = d.add("+~", "");
    let sum_r = d.add("+~", "");

    let mix_scale = d.add("scale", "0 100 0. 1.");
    let dry_calc = d.add("expr", "1. - $f1");

    // Delay time drives tapout~'s left inlet.
    d.connect(&delay_time, &tapout_l)?;
    d.connect(&delay_time, &tapout_r)?;

    d.connect(&feedback, &fb_scale)?;
    d.connect(&fb_scale, fb_l.inlet(1)?)?;
    d.connect(&fb_scale, fb_r.inlet(1)?)?;

    d.connect(d.input(0)?, &tapin_l)?;
    d.chain([&tapin_l, &tapout_l, &fb_l, &tapin_l])?;
    d.connect(d.input(1)?, &tapin_r)?;
    d.chain([&tapin_r, &tapout_r, &fb_r, &tapin_r])?;

    d.connect(&mix, &mix_scale)?;
    d.connect(&mix_scale, wet_l.inlet(1)?)?;
    d.connect(&mix_scale, wet_r.inlet(1)?)?;
    d.connect(&mix_scale, &dry_calc)?;
    d.connect(&dry_calc, dry_l.inlet(1)?)?;
    d.connect(&dry_calc, dry_r.inlet(1)?)?;

    d.connect(d.input(0)?, &dry_l)?;
    d.connect(d.input(1)?, &dry_r)?;
    d.connect(&tapout_l, &wet_l)?;
    d.connect(&tapout_r, &wet_r)?;

    d.connect(&dry_l, &sum_l)?;
    d.connect(&wet_l, sum_l.inlet(1)?)?;
    d.connect(&dry_r, &sum_r)?;
    d.connect(&wet_r, sum_r.inlet(1)?)?;

    d.connect(&sum_l, d.output(0)?)?;
    d.connect(&sum_r, d.output(1)?)?;
    Ok(d)
}
