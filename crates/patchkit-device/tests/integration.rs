//! End-to-end device build and save tests.

use patchkit_device::{
    Device, DeviceError, DeviceKind, NodeTypeContract, ParamKind, ParamOptions, PatchError,
    PortKind, SaveOptions, UnitStyle,
};
use serde_json::Value;

fn simple_delay() -> Result<Device, DeviceError> {
    let mut d = Device::audio_effect("Simple Delay");
    d.description("Stereo delay with feedback");

    let time = d.param(
        "Time",
        &ParamOptions::new(ParamKind::Dial)
            .range(1.0, 2000.0)
            .initial(300.0)
            .unit(UnitStyle::Time),
    );
    let feedback = d.param(
        "Feedback",
        &ParamOptions::new(ParamKind::Dial)
            .range(0.0, 95.0)
            .initial(40.0)
            .unit(UnitStyle::Percent),
    );

    let tapin = d.add("tapin~", "2000");
    let tapout = d.add("tapout~", "300");
    let fb_scale = d.add("/", "100.");
    let fb_gain = d.add("*~", "0.4");

    d.connect(d.input(0)?, &tapin)?;
    d.connect(&tapin, &tapout)?;
    d.connect(&time, &tapout)?;
    d.connect(&tapout, &fb_gain)?;
    d.connect(&fb_gain, &tapin)?;
    d.connect(&feedback, &fb_scale)?;
    d.connect(&fb_scale, fb_gain.inlet(1)?)?;
    d.connect(&tapout, d.output(0)?)?;
    d.connect(tapout.outlet(0)?, d.output(1)?)?;
    Ok(d)
}

fn parse(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

#[test]
fn save_writes_named_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut d = simple_delay().unwrap();

    let path = d.save(&SaveOptions::new().output_dir(dir.path())).unwrap();
    assert_eq!(path, dir.path().join("Simple Delay.maxpat"));

    let v = parse(&std::fs::read_to_string(&path).unwrap());
    let patcher = &v["patcher"];
    assert_eq!(patcher["openinpresentation"], 1);
    assert_eq!(patcher["description"], "Stereo delay with feedback");
    // two dials: 4 + 44 + 8 + 44 + 8 + 4
    assert_eq!(patcher["devicewidth"], 112);
    assert_eq!(patcher["lines"].as_array().unwrap().len(), 9);

    let classes: Vec<&str> = patcher["boxes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["box"]["maxclass"].as_str().unwrap())
        .collect();
    assert_eq!(classes.iter().filter(|c| **c == "live.dial").count(), 2);
    assert_eq!(classes.last(), Some(&"live.thisdevice"));
}

#[test]
fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let mut d = Device::midi_effect("Thru");
    d.connect(d.input(0).unwrap(), d.output(0).unwrap()).unwrap();

    let path = d
        .save(&SaveOptions::new().output_dir(&nested).filename("thru.maxpat"))
        .unwrap();
    assert_eq!(path, nested.join("thru.maxpat"));
    assert!(path.exists());
}

#[test]
fn save_into_file_path_fails_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let mut d = Device::audio_effect("fx");
    let err = d
        .save(&SaveOptions::new().output_dir(blocker.join("sub")))
        .unwrap_err();
    assert!(matches!(err, DeviceError::CreateDir { .. }), "got {err:?}");
}

#[test]
fn editor_layout_puts_params_left() {
    let mut d = simple_delay().unwrap();
    let v = d.finalize().unwrap().to_value().unwrap();
    for b in v["patcher"]["boxes"].as_array().unwrap() {
        let b = &b["box"];
        let x = b["patching_rect"][0].as_u64().unwrap();
        if b["maxclass"] == "live.dial" {
            assert_eq!(x, 30);
        } else {
            assert!(x >= 210, "{} at x={x}", b["id"]);
        }
    }
}

#[test]
fn serialize_is_deterministic_across_builds() {
    let a = simple_delay().unwrap().serialize().unwrap();
    let b = simple_delay().unwrap().serialize().unwrap();
    assert_eq!(a, b);
}

#[test]
fn validation_flags_message_into_signal() {
    let mut d = Device::audio_effect("fx");
    let num = d.add("float", "");
    let gain = d.add("*~", "");
    d.connect(&num, &gain).unwrap();
    let warnings = d.validate();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].destination_type, "*~");
    // Warnings never block output.
    assert!(d.serialize().is_ok());
}

#[test]
fn channel_bounds_per_kind() {
    let audio = Device::new("a", DeviceKind::AudioEffect);
    assert!(audio.input(1).is_ok());
    assert!(matches!(
        audio.output(2),
        Err(DeviceError::ChannelOutOfRange { channels: 2, .. })
    ));

    let midi = Device::new("m", DeviceKind::MidiEffect);
    assert!(midi.input(0).is_ok());
    assert!(midi.input(1).is_err());

    let inst = Device::new("i", DeviceKind::Instrument);
    assert!(inst.input(1).is_err());
    assert!(inst.output(1).is_ok());
}

#[test]
fn raw_outlet_on_toggle_errors() {
    let mut d = Device::audio_effect("fx");
    let on = d.param("On", &ParamOptions::new(ParamKind::Toggle));
    let err: DeviceError = on.raw().unwrap_err().into();
    assert_eq!(err.to_string(), "param type \"toggle\" has no raw outlet");
}

#[test]
fn reversed_port_refs_are_rejected() {
    let mut d = Device::midi_effect("Pass");
    let parse = d.add("midiparse", "");
    let format = d.add("midiformat", "");
    let before = d.patcher().edge_count();

    let err = d
        .connect(parse.inlet(0).unwrap(), format.inlet(0).unwrap())
        .unwrap_err();
    assert!(matches!(
        err,
        DeviceError::Patch(PatchError::WrongDirection { .. })
    ));

    // The device input is an outlet of the boundary box, not somewhere to send to.
    let err = d.connect(&parse, d.input(0).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        DeviceError::Patch(PatchError::WrongDirection { .. })
    ));

    assert_eq!(d.patcher().edge_count(), before);
}

#[test]
fn custom_pipe_contract_in_midi_effect() {
    let mut d = Device::midi_effect("Echo");
    let parse = d.add("midiparse", "");
    let pipe = d.add_with_contract(
        "pipe",
        "0 0 250",
        &NodeTypeContract::new(3, &[PortKind::Message; 3]),
    );
    d.connect(&parse, &pipe).unwrap();
    d.connect(parse.outlet(1).unwrap(), pipe.inlet(1).unwrap())
        .unwrap();
    assert!(pipe.inlet(2).is_ok());
    assert!(pipe.outlet(2).is_ok());
    let v = d.finalize().unwrap().to_value().unwrap();
    let pipe_box = v["patcher"]["boxes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|b| b["box"]["text"] == "pipe 0 0 250")
        .unwrap();
    assert_eq!(pipe_box["box"]["numoutlets"], 3);
}
