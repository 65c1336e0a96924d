#![no_std]
#![no_main]

mod board;
mod drivers;
mod tasks;
mod usb;

use embassy_executor::Spawner;
use embassy_stm32::adc::Adc;
use embassy_stm32::dma::NoDma;
use embassy_stm32::gpio::{Level, Output, OutputType, Pin, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz as TimeHertz;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_stm32::timer::Channel as PwmChannel;
use embassy_stm32::{bind_interrupts, peripherals};
use embassy_time::{Delay, Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use leveler_core::signals::{PITCH_ACTUAL, PITCH_TARGET};

use crate::board::Board;
use crate::drivers::lcd::{Lcd, LCD_ADDR};
use crate::drivers::motor::MotorDrive;
use crate::drivers::mpu6050::Mpu6050;

/// Drive enable duty, set once at startup. The loop only switches direction.
const DRIVE_DUTY_PERCENT: u8 = 5;

// ── Interrupt bindings ────────────────────────────────────────────────────────
bind_interrupts!(struct Irqs {
    I2C1_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C1>;
    I2C2_EV => embassy_stm32::i2c::EventInterruptHandler<peripherals::I2C2>;
    I2C2_ER => embassy_stm32::i2c::ErrorInterruptHandler<peripherals::I2C2>;
});

// ── Main ──────────────────────────────────────────────────────────────────────
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // 1. Board init (168 MHz PLL, 48 MHz for USB)
    let board = Board::init();
    let p = board.p;

    // 2. USB (CDC-ACM telemetry link)
    let (usb_dev, usb_serial) = usb::init(p.USB_OTG_FS, p.PA12, p.PA11);
    spawner.spawn(usb::usb_task(usb_dev)).unwrap();

    // 3. I2C1 @ 400 kHz — MPU6050 tilt sensor (SCL=PB8, SDA=PB9)
    let mut imu_i2c = I2c::new(
        p.I2C1,
        p.PB8, p.PB9,
        Irqs,
        p.DMA1_CH7,
        p.DMA1_CH0,
        TimeHertz(400_000),
        Default::default(),
    );

    // 4. I2C2 @ 100 kHz — LCD backpack (SCL=PB10, SDA=PB11), blocking only
    let mut lcd_i2c = I2c::new(
        p.I2C2,
        p.PB10, p.PB11,
        Irqs,
        NoDma,
        NoDma,
        TimeHertz(100_000),
        Default::default(),
    );

    // 5. Knob potentiometer on ADC1 / PA0
    let adc = Adc::new(p.ADC1, &mut Delay);

    // 6. Drive outputs: FWD=PB15, REV=PB14, enable PWM on TIM3 CH3 (PB0)
    let fwd = Output::new(p.PB15.degrade(), Level::Low, Speed::Low);
    let rev = Output::new(p.PB14.degrade(), Level::Low, Speed::Low);
    let ena = PwmPin::new_ch3(p.PB0, OutputType::PushPull);
    let pwm = SimplePwm::new(
        p.TIM3,
        None,
        None,
        Some(ena),
        None,
        TimeHertz(50_000),
        Default::default(),
    );
    let mut motor = MotorDrive::new(fwd, rev, pwm, PwmChannel::Ch3);
    motor.set_duty_percent(DRIVE_DUTY_PERCENT);

    // 7. One-shot hardware bring-up, before any loop task runs
    Timer::after(Duration::from_millis(100)).await;

    let mut imu = Mpu6050::new();
    if imu.init(&mut imu_i2c).await.is_err() {
        defmt::warn!("MPU6050 init failed; pitch readings unavailable");
    }

    let mut lcd = Lcd::new(LCD_ADDR);
    if lcd.init(&mut lcd_i2c).await.is_ok() {
        let _ = lcd.write_str(&mut lcd_i2c, "Actual:").await;
        let _ = lcd.set_cursor(&mut lcd_i2c, 1, 0).await;
        let _ = lcd.write_str(&mut lcd_i2c, "Target:").await;
    } else {
        defmt::warn!("LCD init failed; running headless");
    }

    // 8. Spawn the loop tasks. Watch senders/receivers are handed out here;
    //    each watch has exactly one writer and two readers.
    spawner.spawn(tasks::imu_task::imu_task(
        imu_i2c,
        imu,
        PITCH_ACTUAL.sender(),
    )).unwrap();

    spawner.spawn(tasks::knob_task::knob_task(
        adc,
        p.PA0,
        PITCH_TARGET.sender(),
    )).unwrap();

    spawner.spawn(tasks::drive_task::drive_task(
        motor,
        PITCH_ACTUAL.receiver().unwrap(),
        PITCH_TARGET.receiver().unwrap(),
    )).unwrap();

    spawner.spawn(tasks::lcd_task::lcd_task(
        lcd_i2c,
        lcd,
        PITCH_ACTUAL.receiver().unwrap(),
        PITCH_TARGET.receiver().unwrap(),
    )).unwrap();

    spawner.spawn(tasks::telemetry_task::telemetry_task(usb_serial)).unwrap();

    defmt::info!("leveler up");

    // 9. Main task: LED heartbeat @ 1 Hz
    let mut led = Output::new(p.PC13, Level::High, Speed::Low);
    loop {
        led.toggle();
        Timer::after(Duration::from_millis(500)).await;
    }
}
