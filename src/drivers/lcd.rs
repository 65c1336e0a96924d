use embassy_stm32::i2c::{Error, I2c, Instance};
use embassy_time::{Duration, Timer};

/// Default address of the PCF8574 backpack.
pub const LCD_ADDR: u8 = 0x27;

// PCF8574 → HD44780 wiring: D4..D7 on the upper nibble, control on the lower
const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const RS_DATA: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// 16x2 character display behind a PCF8574 I2C backpack, 4-bit mode.
pub struct Lcd {
    addr: u8,
}

impl Lcd {
    pub fn new(addr: u8) -> Self {
        Self { addr }
    }

    async fn write_nibble<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
        nibble: u8,
        flags: u8,
    ) -> Result<(), Error> {
        let byte = (nibble & 0xF0) | BACKLIGHT | flags;
        // Latch on the falling edge of ENABLE
        i2c.blocking_write(self.addr, &[byte | ENABLE])?;
        Timer::after(Duration::from_micros(1)).await;
        i2c.blocking_write(self.addr, &[byte])?;
        Timer::after(Duration::from_micros(50)).await;
        Ok(())
    }

    async fn send<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
        value: u8,
        flags: u8,
    ) -> Result<(), Error> {
        self.write_nibble(i2c, value & 0xF0, flags).await?;
        self.write_nibble(i2c, value << 4, flags).await
    }

    pub async fn command<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
        cmd: u8,
    ) -> Result<(), Error> {
        self.send(i2c, cmd, 0).await
    }

    pub async fn init<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<(), Error> {
        Timer::after(Duration::from_millis(50)).await;

        // HD44780 reset dance: three 8-bit function sets, then drop to 4-bit
        self.write_nibble(i2c, 0x30, 0).await?;
        Timer::after(Duration::from_millis(5)).await;
        self.write_nibble(i2c, 0x30, 0).await?;
        Timer::after(Duration::from_millis(5)).await;
        self.write_nibble(i2c, 0x30, 0).await?;
        self.write_nibble(i2c, 0x20, 0).await?;

        self.command(i2c, CMD_FUNCTION_4BIT_2LINE).await?;
        self.command(i2c, CMD_DISPLAY_ON).await?;
        self.command(i2c, CMD_ENTRY_MODE).await?;
        self.clear(i2c).await
    }

    pub async fn clear<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
    ) -> Result<(), Error> {
        self.command(i2c, CMD_CLEAR).await?;
        // Clear is the one slow instruction (>1.5 ms busy)
        Timer::after(Duration::from_millis(2)).await;
        Ok(())
    }

    pub async fn set_cursor<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
        row: u8,
        col: u8,
    ) -> Result<(), Error> {
        let offset = if row == 0 { 0x00 } else { 0x40 };
        self.command(i2c, CMD_SET_DDRAM | (offset + col)).await
    }

    pub async fn write_str<T: Instance, Tx, Rx>(
        &mut self,
        i2c: &mut I2c<'_, T, Tx, Rx>,
        text: &str,
    ) -> Result<(), Error> {
        for b in text.bytes() {
            self.send(i2c, b, RS_DATA).await?;
        }
        Ok(())
    }
}
