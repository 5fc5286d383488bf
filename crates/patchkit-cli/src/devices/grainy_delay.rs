//! Diffuse stereo delay with LFO-wobbled delay times.
//!
//! Each channel's repeats run through a lowpass and cross over into the other
//! channel's delay input, so the echoes spread and darken:
//!
//! ```text
//! input ─→ [+~ fb] ─→ tapin~ ─→ tapout~ ─→ wet
//!                                  ↓
//!          (other channel) ←── lores~ ←── *~ fb
//! ```

use patchkit_device::{Device, DeviceError, ParamKind, ParamOptions, UnitStyle};

pub const NAME: &str = "Grainy Delay";
pub const DESCRIPTION: &str = "Diffuse granular-textured stereo delay";

pub fn build() -> Result<Device, DeviceError> {
    let mut d = Device::audio_effect(NAME);
    d.description(DESCRIPTION);

    let dial = |min, max, initial, unit| {
        ParamOptions::new(ParamKind::Dial)
            .range(min, max)
            .initial(initial)
            .unit(unit)
    };
    let time = d.param("Time", &dial(10.0, 1500.0, 300.0, UnitStyle::Time));
    let rate = d.param("Rate", &dial(0.05, 5.0, 0.4, UnitStyle::Float));
    let depth = d.param("Depth", &dial(0.0, 25.0, 6.0, UnitStyle::Float));
    let feedback = d.param("Feedback", &dial(0.0, 90.0, 40.0, UnitStyle::Percent));
    let tone = d.param(
        "Tone",
        &dial(200.0, 18000.0, 3500.0, UnitStyle::Hertz).exponent(3.0),
    );
    let mix = d.param("Mix", &dial(0.0, 100.0, 35.0, UnitStyle::Percent));

    // Modulation: slightly detuned LFOs per side.
    let lfo_l = d.add("cycle~", "0.4");
    let lfo_r = d.add("cycle~", "0.57");
    let depth_sig = d.add("sig~", "");
    let lfo_scaled_l = d.add("*~", "");
    let lfo_scaled_r = d.add("*~", "");

    let time_sig = d.add("sig~", "");
    let delay_time_l = d.add("+~", "");
    let delay_time_r = d.add("+~", "");

    let tapin_l = d.add("tapin~", "5000");
    let tapout_l = d.add("tapout~", "300");
    let tapin_r = d.add("tapin~", "5000");
    let tapout_r = d.add("tapout~", "300");

    // Two cross paths, so each carries half the loop gain.
    let fb_scale = d.add("scale", "0 90 0. 0.45");
    let fb_sig = d.add("sig~", "");
    let fb_mul_l = d.add("*~", "");
    let fb_mul_r = d.add("*~", "");
    let fb_filter_l = d.add("lores~", "3500 0.15");
    let fb_filter_r = d.add("lores~", "3500 0.15");
    let sum_l = d.add("+~", "");
    let sum_r = d.add("+~", "");

    let mix_scale = d.add("scale", "0 100 0. 1.");
    let dry_calc = d.add("expr", "1. - $f1");
    let dry_ctl = d.add("sig~", "");
    let wet_ctl = d.add("sig~", "");
    let dry_l = d.add("*~", "");
    let dry_r = d.add("*~", "");
    let wet_l = d.add("*~", "");
    let wet_r = d.add("*~", "");
    let out_l = d.add("+~", "");
    let out_r = d.add("+~", "");

    d.connect(&rate, &lfo_l)?;
    d.connect(&rate, &lfo_r)?;

    d.connect(&depth, &depth_sig)?;
    d.connect(&lfo_l, &lfo_scaled_l)?;
    d.connect(&depth_sig, lfo_scaled_l.inlet(1)?)?;
    d.connect(&lfo_r, &lfo_scaled_r)?;
    d.connect(&depth_sig, lfo_scaled_r.inlet(1)?)?;

    d.connect(&time, &time_sig)?;
    d.connect(&time_sig, &delay_time_l)?;
    d.connect(&lfo_scaled_l, delay_time_l.inlet(1)?)?;
    d.connect(&time_sig, &delay_time_r)?;
    d.connect(&lfo_scaled_r, delay_time_r.inlet(1)?)?;

    d.connect(&delay_time_l, &tapout_l)?;
    d.connect(&delay_time_r, &tapout_r)?;

    d.connect(d.input(0)?, &sum_l)?;
    d.connect(d.input(1)?, &sum_r)?;
    d.chain([&sum_l, &tapin_l, &tapout_l])?;
    d.chain([&sum_r, &tapin_r, &tapout_r])?;

    d.connect(&feedback, &fb_scale)?;
    d.connect(&fb_scale, &fb_sig)?;

    d.connect(&tapout_l, &fb_mul_l)?;
    d.connect(&fb_sig, fb_mul_l.inlet(1)?)?;
    d.connect(&fb_mul_l, &fb_filter_l)?;
    d.connect(&tone, fb_filter_l.inlet(1)?)?;
    d.connect(&fb_filter_l, &sum_r)?;

    d.connect(&tapout_r, &fb_mul_r)?;
    d.connect(&fb_sig, fb_mul_r.inlet(1)?)?;
    d.connect(&fb_mul_r, &fb_filter_r)?;
    d.connect(&tone, fb_filter_r.inlet(1)?)?;
    d.connect(&fb_filter_r, &sum_l)?;

    d.connect(&mix, &mix_scale)?;
    d.connect(&mix_scale, &wet_ctl)?;
    d.connect(&mix_scale, &dry_calc)?;
    d.connect(&dry_calc, &dry_ctl)?;

    d.connect(d.input(0)?, &dry_l)?;
    d.connect(&dry_ctl, dry_l.inlet(1)?)?;
    d.connect(d.input(1)?, &dry_r)?;
    d.connect(&dry_ctl, dry_r.inlet(1)?)?;

    d.connect(&tapout_l, &wet_l)?;
    d.connect(&wet_ctl, wet_l.inlet(1)?)?;
    d.connect(&tapout_r, &wet_r)?;
    d.connect(&wet_ctl, wet_r.inlet(1)?)?;

    d.connect(&dry_l, &out_l)?;
    d.connect(&wet_l, out_l.inlet(1)?)?;
    d.connect(&dry_r, &out_r)?;
    d.connect(&wet_r, out_r.inlet(1)?)?;

    d.connect(&out_l, d.output(0)?)?;
    d.connect(&out_r, d.output(1)?)?;
    Ok(d)
}
