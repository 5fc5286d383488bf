//! Connection type checking.
//!
//! A heuristic pass over the finished graph that flags control messages wired
//! into the first inlet of audio-rate (`~`) objects. Warnings never block
//! serialization.

use core::fmt;

use patchkit_core::{Patcher, PortKind};

/// Signal objects whose first inlet also takes control messages.
pub const MESSAGE_TO_SIGNAL_OK: [&str; 30] = [
    "sig~",
    "number~",
    "line~",
    "curve~",
    "adsr~",
    "snapshot~",
    "tapout~",
    "tapin~",
    "lores~",
    "reson~",
    "onepole~",
    "allpass~",
    "comb~",
    "delay~",
    "mtof~",
    "ftom~",
    "atodb~",
    "dbtoa~",
    "cycle~",
    "saw~",
    "rect~",
    "tri~",
    "phasor~",
    "svf~",
    "biquad~",
    "groove~",
    "play~",
    "buffer~",
    "record~",
    "filtercoeff~",
];

/// A suspicious message-to-signal connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionWarning {
    /// Type name of the source box.
    pub source_type: String,
    /// Source outlet index.
    pub source_port: usize,
    /// Type name of the destination box.
    pub destination_type: String,
}

impl fmt::Display for ConnectionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[warn] Message outlet {}:{} → signal inlet {}:0 (may need sig~ conversion)",
            self.source_type, self.source_port, self.destination_type
        )
    }
}

/// Checks every edge of `patcher`, in edge order.
///
/// An edge is flagged when its source outlet is neither a signal nor a bang,
/// it lands on inlet 0 of a `~` object, and that object is not in
/// [`MESSAGE_TO_SIGNAL_OK`].
pub fn validate_connections(patcher: &Patcher) -> Vec<ConnectionWarning> {
    let mut warnings = Vec::new();

    for edge in patcher.edges() {
        let (Some(src), Some(dst)) = (
            patcher.node(edge.source.node()),
            patcher.node(edge.destination.node()),
        ) else {
            continue;
        };

        let source_kind = src.outlet_kinds().get(edge.source.port()).copied();
        if source_kind.is_some_and(|k| k.is_signal() || k == PortKind::Bang) {
            continue;
        }
        if edge.destination.port() != 0 || !dst.type_name().ends_with('~') {
            continue;
        }
        if MESSAGE_TO_SIGNAL_OK.contains(&dst.type_name()) {
            continue;
        }

        warnings.push(ConnectionWarning {
            source_type: src.type_name().to_string(),
            source_port: edge.source.port(),
            destination_type: dst.type_name().to_string(),
        });
    }

    warnings
}
