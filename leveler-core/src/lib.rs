#![no_std]
//! Hardware-agnostic building blocks for the tilt leveler firmware.
//!
//! Everything in here is free of HAL types so it can be exercised on the host:
//! the dead-band direction policy, the knob/angle conversions, the telemetry
//! line parser, and the watch channels the firmware tasks communicate through.

pub mod control;
pub mod convert;
pub mod signals;
pub mod telemetry;
