//! Shared watch channels between the firmware tasks.
//!
//! Each watch is a broadcast "latest value" cell: the producer overwrites it
//! unconditionally and every consumer independently reads the most recent
//! value without taking it away from the others. One writer task feeds each
//! watch; the control task and the display task are its two consumers.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::watch::{Receiver, Sender, Watch};

/// Number of consumers per angle watch (control + display).
pub const ANGLE_CONSUMERS: usize = 2;

pub type AngleWatch = Watch<CriticalSectionRawMutex, f32, ANGLE_CONSUMERS>;
pub type AngleSender = Sender<'static, CriticalSectionRawMutex, f32, ANGLE_CONSUMERS>;
pub type AngleReceiver = Receiver<'static, CriticalSectionRawMutex, f32, ANGLE_CONSUMERS>;

/// Measured tilt in degrees, written by the IMU task.
pub static PITCH_ACTUAL: AngleWatch = Watch::new();

/// Desired tilt in degrees, written by the knob task.
pub static PITCH_TARGET: AngleWatch = Watch::new();
