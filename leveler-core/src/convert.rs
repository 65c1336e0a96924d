//! Unit conversions between the raw input domains and degrees.

/// Full-scale reading of the 12-bit knob ADC.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Map a raw knob reading (0..=4095) linearly onto [-180, 180] degrees.
///
/// No clamping: a reading outside the 12-bit range maps outside ±180 and
/// flows through to the controller as-is.
pub fn setpoint_degrees(raw: u16) -> f32 {
    (raw as f32) * 360.0 / (ADC_FULL_SCALE as f32) - 180.0
}

/// Radians to degrees, for telemetry readings.
pub fn degrees_from_radians(radians: f32) -> f32 {
    radians * (180.0 / core::f32::consts::PI)
}
