use embassy_executor::task;
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::{DMA1_CH0, DMA1_CH7, I2C1};
use embassy_time::{Duration, Ticker};

use leveler_core::signals::AngleSender;

use crate::drivers::mpu6050::Mpu6050;

/// Tilt sensor task — samples the MPU6050 every 500 ms and publishes the
/// measured pitch (degrees) into the actual-pitch watch.
#[task]
pub async fn imu_task(
    mut i2c: I2c<'static, I2C1, DMA1_CH7, DMA1_CH0>,
    mut imu: Mpu6050,
    pitch_tx: AngleSender,
) {
    let mut ticker = Ticker::every(Duration::from_millis(500));
    loop {
        ticker.next().await;

        // On an I2C error the cycle is skipped; consumers keep the last value
        if let Ok(pitch_deg) = imu.read_pitch(&mut i2c).await {
            pitch_tx.send(pitch_deg);
        }
    }
}
