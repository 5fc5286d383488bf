//! Patchkit Device - builders for Max for Live devices
//!
//! A [`Device`] wraps a patch graph with the boundary boxes of its
//! [`DeviceKind`], a per-device type registry, and the finalize pipeline that
//! turns the graph into a saved `.maxpat` document:
//!
//! 1. add the `live.thisdevice` context box (once)
//! 2. editor layout
//! 3. presentation layout of the parameters
//! 4. open in presentation mode when any parameter exists
//! 5. log connection warnings
//! 6. serialize, and for [`Device::save`], write to disk
//!
//! # Example
//!
//! ```rust,no_run
//! use patchkit_device::{Device, ParamKind, ParamOptions, SaveOptions, UnitStyle};
//!
//! let mut device = Device::audio_effect("Tiny Delay");
//! let tapin = device.add("tapin~", "2000");
//! let tapout = device.add("tapout~", "250");
//! let time = device.param(
//!     "Time",
//!     &ParamOptions::new(ParamKind::Dial).range(1.0, 2000.0).initial(250.0).unit(UnitStyle::Time),
//! );
//!
//! device.connect(device.input(0)?, &tapin)?;
//! device.connect(&tapin, &tapout)?;
//! device.connect(&time, &tapout)?;
//! device.connect(&tapout, device.output(0)?)?;
//! device.connect(tapout.outlet(0)?, device.output(1)?)?;
//!
//! let path = device.save(&SaveOptions::new())?;
//! println!("wrote {}", path.display());
//! # Ok::<(), patchkit_device::DeviceError>(())
//! ```

pub mod device;
pub mod endpoint;
pub mod error;
pub mod kind;
pub mod paths;
pub mod validate;

pub use device::{Device, SaveOptions, THIS_DEVICE};
pub use endpoint::Endpoint;
pub use error::DeviceError;
pub use kind::{Boundary, DeviceKind};
pub use validate::{ConnectionWarning, MESSAGE_TO_SIGNAL_OK, validate_connections};

pub use patchkit_core::{
    Document, NodeHandle, NodeTypeContract, NodeTypeRegistry, ParamKind, ParamOptions,
    ParameterNode, PatchError, PortKind, PortRef, UnitStyle,
};
