//! Built-in node type catalog.

use crate::{NodeCategory, NodeTypeContract, NodeTypeRegistry, PortKind};

const SIG: PortKind = PortKind::Signal;
const MC: PortKind = PortKind::MultichannelSignal;
const MSG: PortKind = PortKind::Message;
const BANG: PortKind = PortKind::Bang;
const INT: PortKind = PortKind::Int;
const FLOAT: PortKind = PortKind::Float;
const LIST: PortKind = PortKind::List;

fn obj(inlets: usize, outlets: &[PortKind]) -> NodeTypeContract {
    NodeTypeContract::new(inlets, outlets)
}

/// A UI object whose render class is its own type name.
fn ui(name: &'static str, inlets: usize, outlets: &[PortKind]) -> NodeTypeContract {
    NodeTypeContract::new(inlets, outlets).with_render_class(name)
}

/// Register every built-in type.
pub(crate) fn register_builtin_types(r: &mut NodeTypeRegistry) {
    use NodeCategory::{
        Amplitude, AudioIo, Conversion, Dsp, Envelope, Jitter, Live, Math, MidiIo, Oscillator,
        Routing, Storage, Subpatcher, Timing, Ui, Utility,
    };

    // Audio I/O
    r.register_in(AudioIo, "plugin~", obj(2, &[SIG, SIG]));
    r.register_in(AudioIo, "plugout~", obj(2, &[]));
    r.register_in(AudioIo, "adc~", obj(1, &[SIG, SIG]));
    r.register_in(AudioIo, "dac~", obj(2, &[]));
    r.register_in(AudioIo, "mc.plugin~", obj(1, &[MC]));
    r.register_in(AudioIo, "mc.plugout~", obj(1, &[]));

    // MIDI I/O
    r.register_in(MidiIo, "midiin", obj(1, &[INT]));
    r.register_in(MidiIo, "midiout", obj(1, &[]));
    r.register_in(MidiIo, "notein", obj(1, &[INT, INT, INT]));
    r.register_in(MidiIo, "noteout", obj(3, &[]));
    r.register_in(MidiIo, "ctlin", obj(1, &[INT, INT, INT]));
    r.register_in(MidiIo, "ctlout", obj(3, &[]));
    r.register_in(MidiIo, "pgmin", obj(1, &[INT, INT]));
    r.register_in(MidiIo, "pgmout", obj(2, &[]));
    r.register_in(MidiIo, "bendin", obj(1, &[INT, INT]));
    r.register_in(MidiIo, "bendout", obj(2, &[]));
    r.register_in(MidiIo, "makenote", obj(3, &[INT, INT]));
    r.register_in(MidiIo, "stripnote", obj(2, &[INT, INT]));
    r.register_in(MidiIo, "midiparse", obj(1, &[MSG; 7]));
    r.register_in(MidiIo, "midiformat", obj(7, &[INT]));
    r.register_in(MidiIo, "flush", obj(1, &[MSG]));
    r.register_in(MidiIo, "borax", obj(1, &[INT; 8]));

    // Filters, delays and signal arithmetic
    r.register_in(Dsp, "delay~", obj(2, &[SIG]));
    r.register_in(Dsp, "tapin~", obj(1, &[SIG]));
    r.register_in(Dsp, "tapout~", obj(1, &[SIG]));
    r.register_in(Dsp, "*~", obj(2, &[SIG]));
    r.register_in(Dsp, "+~", obj(2, &[SIG]));
    r.register_in(Dsp, "-~", obj(2, &[SIG]));
    r.register_in(Dsp, "/~", obj(2, &[SIG]));
    r.register_in(Dsp, "clip~", obj(3, &[SIG]));
    r.register_in(Dsp, "abs~", obj(1, &[SIG]));
    r.register_in(Dsp, "avg~", obj(1, &[SIG]));
    r.register_in(Dsp, "biquad~", obj(6, &[SIG]));
    r.register_in(Dsp, "cascade~", obj(2, &[SIG]));
    r.register_in(Dsp, "filtercoeff~", obj(6, &[SIG; 6]));
    r.register_in(Dsp, "svf~", obj(3, &[SIG; 4]));
    r.register_in(Dsp, "lores~", obj(3, &[SIG]));
    r.register_in(Dsp, "reson~", obj(3, &[SIG]));
    r.register_in(Dsp, "onepole~", obj(2, &[SIG]));
    r.register_in(Dsp, "allpass~", obj(3, &[SIG]));
    r.register_in(Dsp, "comb~", obj(4, &[SIG]));

    // Oscillators
    r.register_in(Oscillator, "cycle~", obj(2, &[SIG]));
    r.register_in(Oscillator, "saw~", obj(2, &[SIG]));
    r.register_in(Oscillator, "rect~", obj(3, &[SIG]));
    r.register_in(Oscillator, "tri~", obj(2, &[SIG]));
    r.register_in(Oscillator, "phasor~", obj(2, &[SIG]));
    r.register_in(Oscillator, "noise~", obj(1, &[SIG]));
    r.register_in(Oscillator, "pink~", obj(1, &[SIG]));

    // Envelopes and ramps
    r.register_in(Envelope, "adsr~", obj(5, &[SIG, SIG, BANG, MSG]));
    r.register_in(Envelope, "line~", obj(2, &[SIG, BANG]));
    r.register_in(Envelope, "curve~", obj(3, &[SIG, BANG]));
    r.register_in(Envelope, "function", obj(1, &[FLOAT, MSG, BANG, MSG]));

    // Amplitude and metering
    r.register_in(
        Amplitude,
        "gain~",
        ui("gain~", 2, &[SIG, INT]).with_default_width(22),
    );
    r.register_in(Amplitude, "meter~", ui("meter~", 1, &[FLOAT]));
    r.register_in(Amplitude, "levelmeter~", ui("levelmeter~", 1, &[MSG]));

    // Conversion
    r.register_in(Conversion, "mtof", obj(1, &[MSG]));
    r.register_in(Conversion, "ftom", obj(1, &[MSG]));
    r.register_in(Conversion, "mtof~", obj(1, &[SIG]));
    r.register_in(Conversion, "ftom~", obj(1, &[SIG]));
    r.register_in(Conversion, "atodb", obj(1, &[MSG]));
    r.register_in(Conversion, "dbtoa", obj(1, &[MSG]));
    r.register_in(Conversion, "atodb~", obj(1, &[SIG]));
    r.register_in(Conversion, "dbtoa~", obj(1, &[SIG]));
    r.register_in(Conversion, "sig~", obj(1, &[SIG]));
    r.register_in(Conversion, "snapshot~", obj(2, &[FLOAT]));
    r.register_in(Conversion, "number~", ui("number~", 2, &[SIG, BANG]));

    // Message-domain math
    r.register_in(Math, "+", obj(2, &[INT]));
    r.register_in(Math, "-", obj(2, &[INT]));
    r.register_in(Math, "*", obj(2, &[INT]));
    r.register_in(Math, "/", obj(2, &[INT]));
    r.register_in(Math, "%", obj(2, &[INT]));
    r.register_in(Math, "expr", obj(1, &[MSG]));
    r.register_in(Math, "scale", obj(6, &[MSG]));
    r.register_in(Math, "clip", obj(3, &[MSG]));
    r.register_in(Math, "split", obj(1, &[MSG, MSG]));
    r.register_in(Math, "random", obj(2, &[INT]));

    // Routing and logic
    r.register_in(Routing, "gate", obj(2, &[MSG]));
    r.register_in(Routing, "gate~", obj(2, &[SIG]));
    r.register_in(Routing, "switch", obj(3, &[MSG]));
    r.register_in(Routing, "select", obj(1, &[BANG, MSG]));
    r.register_in(Routing, "route", obj(1, &[MSG, MSG]));
    r.register_in(Routing, "trigger", obj(1, &[MSG, MSG]));
    r.register_in(Routing, "pack", obj(2, &[MSG]));
    r.register_in(Routing, "unpack", obj(1, &[MSG, MSG]));
    r.register_in(Routing, "swap", obj(2, &[MSG, MSG]));
    r.register_in(Routing, "if", obj(1, &[MSG, MSG]));

    // Timing
    r.register_in(Timing, "metro", obj(2, &[BANG]));
    r.register_in(Timing, "delay", obj(2, &[BANG]));
    r.register_in(Timing, "pipe", obj(2, &[MSG]));
    r.register_in(Timing, "timer", obj(2, &[FLOAT]));
    r.register_in(Timing, "clocker", obj(2, &[FLOAT]));
    r.register_in(Timing, "line", obj(2, &[MSG, BANG]));
    r.register_in(Timing, "counter", obj(5, &[INT; 4]));
    r.register_in(Timing, "transport", obj(1, &[INT, INT, FLOAT, FLOAT, FLOAT]));

    // Data storage
    r.register_in(Storage, "int", obj(2, &[INT]));
    r.register_in(Storage, "float", obj(2, &[FLOAT]));
    r.register_in(Storage, "value", obj(1, &[MSG]));
    r.register_in(Storage, "table", obj(2, &[INT, BANG]));
    r.register_in(Storage, "coll", obj(1, &[MSG, MSG, MSG, BANG]));
    r.register_in(Storage, "dict", obj(2, &[MSG; 4]));
    r.register_in(Storage, "buffer~", obj(1, &[FLOAT, BANG]));
    r.register_in(Storage, "groove~", obj(3, &[SIG; 3]));
    r.register_in(Storage, "play~", obj(2, &[SIG, BANG]));
    r.register_in(Storage, "record~", obj(3, &[SIG]));
    r.register_in(Storage, "waveform~", ui("waveform~", 5, &[FLOAT; 4]));

    // Generic UI objects
    r.register_in(Ui, "number", ui("number", 1, &[MSG, BANG]));
    r.register_in(Ui, "flonum", ui("flonum", 1, &[MSG, BANG]));
    r.register_in(Ui, "slider", ui("slider", 1, &[MSG]));
    r.register_in(Ui, "toggle", ui("toggle", 1, &[INT]));
    r.register_in(Ui, "button", ui("button", 1, &[BANG]));
    r.register_in(Ui, "message", ui("message", 2, &[MSG]));
    r.register_in(Ui, "comment", ui("comment", 1, &[]));
    r.register_in(Ui, "bang", obj(1, &[BANG]).with_render_class("button"));

    // Live device controls and Live API
    let live = |name: &'static str, outlets: &[PortKind], width: u32| {
        ui(name, 1, outlets).with_default_width(width)
    };
    r.register_in(Live, "live.dial", live("live.dial", &[MSG, MSG], 44));
    r.register_in(Live, "live.slider", live("live.slider", &[MSG, MSG], 40));
    r.register_in(Live, "live.menu", live("live.menu", &[MSG; 3], 100));
    r.register_in(Live, "live.toggle", live("live.toggle", &[MSG], 15));
    r.register_in(Live, "live.button", live("live.button", &[BANG], 15));
    r.register_in(Live, "live.tab", live("live.tab", &[MSG; 3], 100));
    r.register_in(Live, "live.numbox", live("live.numbox", &[MSG, MSG], 44));
    r.register_in(Live, "live.text", live("live.text", &[MSG, MSG], 44));
    r.register_in(
        Live,
        "live.gain~",
        ui("live.gain~", 2, &[SIG, MSG, FLOAT, MSG, MSG]).with_default_width(48),
    );
    r.register_in(Live, "live.meter~", ui("live.meter~", 1, &[MSG]));
    r.register_in(Live, "live.scope~", ui("live.scope~", 3, &[MSG]));
    r.register_in(Live, "live.thisdevice", ui("live.thisdevice", 1, &[MSG]));
    r.register_in(Live, "live.object", obj(2, &[MSG]));
    r.register_in(Live, "live.path", obj(1, &[MSG; 6]));
    r.register_in(Live, "live.observer", obj(2, &[MSG; 3]));
    r.register_in(Live, "live.remote~", obj(2, &[]));

    // MSP and message utilities
    r.register_in(Utility, "selector~", obj(3, &[SIG]));
    r.register_in(Utility, "matrix~", obj(1, &[SIG]));
    r.register_in(Utility, "send~", obj(1, &[]));
    r.register_in(Utility, "receive~", obj(1, &[SIG]));
    r.register_in(Utility, "send", obj(1, &[]));
    r.register_in(Utility, "receive", obj(1, &[MSG]));
    r.register_in(Utility, "loadbang", obj(1, &[BANG]));
    r.register_in(Utility, "closebang", obj(1, &[BANG]));
    r.register_in(Utility, "deferlow", obj(1, &[MSG]));
    r.register_in(Utility, "append", obj(2, &[MSG]));
    r.register_in(Utility, "prepend", obj(2, &[MSG]));
    r.register_in(Utility, "thresh", obj(2, &[LIST]));
    r.register_in(Utility, "speedlim", obj(2, &[MSG]));
    r.register_in(Utility, "change", obj(1, &[MSG, BANG]));
    r.register_in(Utility, "past", obj(2, &[BANG]));
    r.register_in(Utility, "minimum", obj(2, &[MSG, MSG]));
    r.register_in(Utility, "maximum", obj(2, &[MSG, MSG]));
    r.register_in(Utility, "drunk", obj(3, &[INT]));

    // Poly and subpatchers
    r.register_in(Subpatcher, "poly~", obj(1, &[SIG, MSG]));
    r.register_in(Subpatcher, "thispoly~", obj(1, &[MSG, INT]));
    r.register_in(Subpatcher, "patcher", obj(1, &[MSG]));
    r.register_in(Subpatcher, "bpatcher", ui("bpatcher", 1, &[MSG]));

    // Jitter basics
    r.register_in(Jitter, "jit.matrix", obj(1, &[MSG, MSG]));
    r.register_in(Jitter, "jit.pwindow", ui("jit.pwindow", 1, &[MSG, MSG]));
}
