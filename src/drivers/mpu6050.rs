use embassy_stm32::i2c::{Error, I2c, Instance, RxDma, TxDma};
use embassy_time::{Duration, Timer};
use micromath::F32Ext;

pub const MPU6050_ADDR: u8 = 0x68;

const REG_PWR_MGMT_1: u8 = 0x6B;
const REG_ACCEL_XOUT_H: u8 = 0x3B;
const REG_WHO_AM_I: u8 = 0x75;

#[allow(dead_code)]
const CHIP_ID: u8 = 0x68;

pub struct Mpu6050;

impl Mpu6050 {
    pub fn new() -> Self {
        Self
    }

    pub async fn init<T: Instance, Tx: TxDma<T>, Rx: RxDma<T>>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<(), Error> {
        // Wake from sleep, clock from the internal oscillator
        i2c.blocking_write(MPU6050_ADDR, &[REG_PWR_MGMT_1, 0x00])?;
        Timer::after(Duration::from_millis(100)).await;

        let _id = self.read_id(i2c).await?;
        // Accel stays at the ±2g default (16384 LSB/g); pitch only needs ratios
        Ok(())
    }

    pub async fn read_id<T: Instance, Tx: TxDma<T>, Rx: RxDma<T>>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<u8, Error> {
        let mut buf = [0u8; 1];
        i2c.blocking_write_read(MPU6050_ADDR, &[REG_WHO_AM_I], &mut buf)?;
        Ok(buf[0])
    }

    pub async fn read_accel<T: Instance, Tx: TxDma<T>, Rx: RxDma<T>>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<[i16; 3], Error> {
        let mut data = [0u8; 6];
        i2c.blocking_write_read(MPU6050_ADDR, &[REG_ACCEL_XOUT_H], &mut data)?;

        let x = i16::from_be_bytes([data[0], data[1]]);
        let y = i16::from_be_bytes([data[2], data[3]]);
        let z = i16::from_be_bytes([data[4], data[5]]);

        Ok([x, y, z])
    }

    /// Pitch from the accelerometer alone, in degrees.
    ///
    /// atan2(-ax, |ayz|) — the rig only rotates slowly, so the gravity vector
    /// is a good enough attitude reference without fusing the gyro.
    pub async fn read_pitch<T: Instance, Tx: TxDma<T>, Rx: RxDma<T>>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<f32, Error> {
        let [ax, ay, az] = self.read_accel(i2c).await?;
        let (ax, ay, az) = (ax as f32, ay as f32, az as f32);

        let pitch_rad = (-ax).atan2((ay * ay + az * az).sqrt());
        Ok(pitch_rad.to_degrees())
    }
}
