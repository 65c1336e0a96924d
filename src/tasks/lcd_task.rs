use core::fmt::Write;

use embassy_executor::task;
use embassy_stm32::dma::NoDma;
use embassy_stm32::i2c::I2c;
use embassy_stm32::peripherals::I2C2;
use embassy_time::{Duration, Ticker};

use leveler_core::signals::AngleReceiver;

use crate::drivers::lcd::Lcd;

/// Display task — renders the latest actual and target pitch every 500 ms,
/// after the static `Actual:` / `Target:` labels written at startup.
#[task]
pub async fn lcd_task(
    mut i2c: I2c<'static, I2C2, NoDma, NoDma>,
    mut lcd: Lcd,
    mut actual_rx: AngleReceiver,
    mut target_rx: AngleReceiver,
) {
    let mut ticker = Ticker::every(Duration::from_millis(500));

    loop {
        ticker.next().await;

        let actual = actual_rx.get().await;
        let target = target_rx.get().await;

        // Display errors are ignored; the controller does not depend on us
        let mut text = heapless::String::<16>::new();
        let _ = write!(text, "{:.2}  ", actual);
        let _ = lcd.set_cursor(&mut i2c, 0, 8).await;
        let _ = lcd.write_str(&mut i2c, &text).await;

        let mut text = heapless::String::<16>::new();
        let _ = write!(text, "{:5.1} ", target);
        let _ = lcd.set_cursor(&mut i2c, 1, 8).await;
        let _ = lcd.write_str(&mut i2c, &text).await;
    }
}
