//! Hysteretic direction policy for the drive output.

/// Dead-band half-width around the target, in degrees. Deliberately wide
/// relative to the ±180° range: this is a coarse leveling rig, not precision
/// control, and a narrow band makes the relay chatter.
pub const TOLERANCE_DEG: f32 = 30.0;

/// What the drive output should be doing right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveCommand {
    Forward,
    Reverse,
    Stop,
}

impl Default for DriveCommand {
    fn default() -> Self {
        DriveCommand::Stop
    }
}

/// Three-way dead-band decision, evaluated in priority order.
///
/// Comparisons are strict, so an actual angle sitting exactly on either band
/// edge resolves to `Stop`.
pub fn decide(actual_deg: f32, desired_deg: f32, tolerance_deg: f32) -> DriveCommand {
    if actual_deg < desired_deg - tolerance_deg {
        DriveCommand::Forward
    } else if actual_deg > desired_deg + tolerance_deg {
        DriveCommand::Reverse
    } else {
        DriveCommand::Stop
    }
}
