pub mod drive_task;
pub mod imu_task;
pub mod knob_task;
pub mod lcd_task;
pub mod telemetry_task;
