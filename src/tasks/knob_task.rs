use embassy_executor::task;
use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::{ADC1, PA0};
use embassy_time::{Duration, Ticker};

use leveler_core::convert::setpoint_degrees;
use leveler_core::signals::AngleSender;

/// Setpoint task — reads the knob potentiometer every 500 ms and publishes
/// the desired pitch into the target-pitch watch.
///
/// The 12-bit reading maps linearly onto [-180, 180] degrees; no clamping.
#[task]
pub async fn knob_task(
    mut adc: Adc<'static, ADC1>,
    mut knob_pin: PA0,
    target_tx: AngleSender,
) {
    let mut ticker = Ticker::every(Duration::from_millis(500));
    loop {
        ticker.next().await;

        let raw = adc.read(&mut knob_pin);
        target_tx.send(setpoint_degrees(raw));
    }
}
