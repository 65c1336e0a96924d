pub mod lcd;
pub mod motor;
pub mod mpu6050;
