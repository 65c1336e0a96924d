use core::task::Poll;

use embassy_futures::poll_once;
use leveler_core::control::{decide, DriveCommand, TOLERANCE_DEG};
use leveler_core::convert::{degrees_from_radians, setpoint_degrees, ADC_FULL_SCALE};
use leveler_core::signals::AngleWatch;
use leveler_core::telemetry::{parse_line, LineAccumulator, TelemetryReading};

fn feed_line(acc: &mut LineAccumulator, text: &str) -> TelemetryReading<'static> {
    let mut result = None;
    for &b in text.as_bytes() {
        if let Some(line) = acc.push(b) {
            result = Some(match parse_line(line) {
                TelemetryReading::Pitch { radians, degrees } => {
                    TelemetryReading::Pitch { radians, degrees }
                }
                TelemetryReading::Unrecognized(s) => {
                    TelemetryReading::Unrecognized(Box::leak(s.to_owned().into_boxed_str()))
                }
            });
        }
    }
    result.expect("input did not complete a line")
}

// ── Direction policy ─────────────────────────────────────────────────────────

#[test]
fn below_band_drives_forward() {
    // actual=0, desired=50, tol=30 → band is [20, 80]
    assert_eq!(decide(0.0, 50.0, 30.0), DriveCommand::Forward);
}

#[test]
fn inside_band_stops() {
    // actual=0, desired=10, tol=30 → band is [-20, 40]
    assert_eq!(decide(0.0, 10.0, 30.0), DriveCommand::Stop);
}

#[test]
fn above_band_drives_reverse() {
    assert_eq!(decide(90.0, 50.0, 30.0), DriveCommand::Reverse);
}

#[test]
fn exact_band_edges_stop() {
    // Strict comparisons: sitting exactly on either edge is inside the band.
    assert_eq!(decide(20.0, 50.0, 30.0), DriveCommand::Stop);
    assert_eq!(decide(80.0, 50.0, 30.0), DriveCommand::Stop);
    assert_eq!(decide(19.9, 50.0, 30.0), DriveCommand::Forward);
    assert_eq!(decide(80.1, 50.0, 30.0), DriveCommand::Reverse);
}

#[test]
fn default_tolerance_is_wide() {
    assert_eq!(TOLERANCE_DEG, 30.0);
    assert_eq!(decide(-35.0, 0.0, TOLERANCE_DEG), DriveCommand::Forward);
    assert_eq!(decide(-25.0, 0.0, TOLERANCE_DEG), DriveCommand::Stop);
}

// ── Knob mapping ─────────────────────────────────────────────────────────────

#[test]
fn knob_endpoints_map_to_angle_range() {
    assert_eq!(setpoint_degrees(0), -180.0);
    assert!((setpoint_degrees(ADC_FULL_SCALE) - 180.0).abs() < 1e-3);
}

#[test]
fn knob_midpoint_maps_near_zero() {
    assert!(setpoint_degrees(2047).abs() < 0.05);
    assert!(setpoint_degrees(2048).abs() < 0.05);
}

// ── Telemetry ────────────────────────────────────────────────────────────────

#[test]
fn pitch_line_converts_radians_to_degrees() {
    let mut acc = LineAccumulator::new();
    match feed_line(&mut acc, "Pitch: 1.570796\n") {
        TelemetryReading::Pitch { radians, degrees } => {
            assert!((radians - 1.570796).abs() < 1e-6);
            assert!((degrees - 90.0).abs() < 0.01);
        }
        other => panic!("expected a pitch reading, got {other:?}"),
    }
}

#[test]
fn line_without_marker_is_preserved() {
    let mut acc = LineAccumulator::new();
    assert_eq!(
        feed_line(&mut acc, "no marker here\r"),
        TelemetryReading::Unrecognized("no marker here")
    );
}

#[test]
fn radian_conversion_matches_formula() {
    assert!((degrees_from_radians(core::f32::consts::PI) - 180.0).abs() < 1e-4);
    assert_eq!(degrees_from_radians(0.0), 0.0);
}

// ── Watch semantics ──────────────────────────────────────────────────────────

#[test]
fn watch_round_trips_a_single_value() {
    let watch = AngleWatch::new();
    let mut rx = watch.receiver().unwrap();
    watch.sender().send(12.5);
    assert_eq!(rx.try_changed(), Some(12.5));
}

#[test]
fn watch_overwrites_unread_values() {
    let watch = AngleWatch::new();
    let mut rx = watch.receiver().unwrap();
    watch.sender().send(1.0);
    watch.sender().send(2.0);
    // Only the latest value is observable; 1.0 is gone.
    assert_eq!(rx.try_changed(), Some(2.0));
    assert_eq!(rx.try_changed(), None);
}

#[test]
fn both_consumers_observe_the_latest_value() {
    let watch = AngleWatch::new();
    let mut control_rx = watch.receiver().unwrap();
    let mut display_rx = watch.receiver().unwrap();
    watch.sender().send(42.0);
    // Neither receiver steals the value from the other.
    assert_eq!(control_rx.try_changed(), Some(42.0));
    assert_eq!(display_rx.try_changed(), Some(42.0));
}

#[test]
fn read_blocks_until_first_write() {
    let watch = AngleWatch::new();
    let mut rx = watch.receiver().unwrap();
    assert!(poll_once(rx.changed()).is_pending());
    watch.sender().send(5.0);
    assert_eq!(poll_once(rx.changed()), Poll::Ready(5.0));
}
