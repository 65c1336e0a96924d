use embassy_executor::task;
use embassy_time::{Duration, Ticker};

use leveler_core::control::{decide, DriveCommand, TOLERANCE_DEG};
use leveler_core::signals::AngleReceiver;

use crate::drivers::motor::MotorDrive;

fn label(cmd: DriveCommand) -> &'static str {
    match cmd {
        DriveCommand::Forward => "forward",
        DriveCommand::Reverse => "reverse",
        DriveCommand::Stop => "stop",
    }
}

/// Direction control task — 5 Hz hysteretic dead-band controller.
///
/// Each cycle takes the latest published actual and target pitch, decides
/// forward/reverse/stop against the ±30° band and applies the command to the
/// drive. The command is re-applied even when unchanged; the drive primitive
/// enforces the relay settle time.
#[task]
pub async fn drive_task(
    mut motor: MotorDrive,
    mut actual_rx: AngleReceiver,
    mut target_rx: AngleReceiver,
) {
    let mut applied = DriveCommand::default();
    let mut ticker = Ticker::every(Duration::from_millis(200));

    loop {
        ticker.next().await;

        // Blocks until each watch has been written at least once; afterwards
        // this peeks the latest value without consuming it from the display
        let actual = actual_rx.get().await;
        let target = target_rx.get().await;

        let cmd = decide(actual, target, TOLERANCE_DEG);
        if cmd != applied {
            defmt::info!(
                "drive {} (actual {=f32} target {=f32})",
                label(cmd),
                actual,
                target
            );
            applied = cmd;
        }

        motor.set_direction(cmd).await;
    }
}
