use core::fmt::Write;

use embassy_executor::task;

use leveler_core::telemetry::{parse_line, LineAccumulator, TelemetryReading};

use crate::usb::UsbSerial;

/// Telemetry task — line parser over the USB serial link.
///
/// Lines carrying a `Pitch:` radian value are answered with the converted
/// degrees; anything else is echoed back as unrecognized. Runs independently
/// of the control loop.
#[task]
pub async fn telemetry_task(mut serial: UsbSerial<'static>) {
    let mut acc = LineAccumulator::new();
    let mut buf = [0u8; 64];

    loop {
        serial.wait_connection().await;
        defmt::info!("telemetry link up");
        let _ = serial.write_packet(b"telemetry link ready\r\n").await;

        loop {
            let n = match serial.read_packet(&mut buf).await {
                Ok(n) => n,
                // Disconnected — go back to waiting for the host
                Err(_) => break,
            };

            for &byte in &buf[..n] {
                let Some(line) = acc.push(byte) else { continue };

                let mut reply = heapless::String::<160>::new();
                match parse_line(line) {
                    TelemetryReading::Pitch { radians, degrees } => {
                        let _ = write!(reply, "Pitch: {:.2} deg ({:.6} rad)\r\n", degrees, radians);
                    }
                    TelemetryReading::Unrecognized(text) => {
                        let _ = write!(reply, "unrecognized: {}\r\n", text);
                    }
                }

                // CDC packets cap at 64 bytes; long replies go out in chunks
                for chunk in reply.as_bytes().chunks(64) {
                    let _ = serial.write_packet(chunk).await;
                }
            }
        }
    }
}
