//! HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! ## Hardware
//!
//! The expander drives the LCD in 4-bit mode:
//!
//! | PCF8574 bit | LCD line  |
//! |-------------|-----------|
//! | P0          | RS        |
//! | P1          | RW (tied low in software) |
//! | P2          | EN        |
//! | P3          | backlight |
//! | P4–P7       | D4–D7     |
//!
//! Each byte goes out as two nibbles, each latched by an EN high→low pulse.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::info;

use crate::display::{COLS, ROWS, TextSink};
use crate::error::DisplayError;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of column 0 for each row of a 20×4 panel.
const ROW_OFFSETS: [u8; ROWS as usize] = [0x00, 0x40, 0x14, 0x54];

pub struct I2cLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C: I2c, D: DelayNs> I2cLcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    /// Power-on reset into 4-bit mode, display on, cursor off, cleared.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);

        // Three 8-bit function-set nibbles resync the controller from any state.
        self.write_nibble(0x30, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x30, false)?;
        self.write_nibble(0x20, false)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.command(CMD_ENTRY_MODE_INC)?;
        TextSink::clear(self)?;

        info!("LCD: initialised at 0x{:02X}", self.addr);
        Ok(())
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, false)
    }

    fn send(&mut self, byte: u8, rs: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, rs)?;
        self.write_nibble(byte << 4, rs)
    }

    /// `nibble` is in the upper four bits.
    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), DisplayError> {
        let base = (nibble & 0xF0) | BACKLIGHT | if rs { RS } else { 0 };
        self.i2c
            .write(self.addr, &[base | EN, base])
            .map_err(|_| DisplayError::BusWriteFailed)?;
        self.delay.delay_us(50);
        Ok(())
    }
}

impl<I2C: I2c, D: DelayNs> TextSink for I2cLcd<I2C, D> {
    fn write_at(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if row >= ROWS || col >= COLS {
            return Err(DisplayError::OutOfBounds { row, col });
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col))?;
        for byte in text.bytes().take(usize::from(COLS - col)) {
            self.send(if byte.is_ascii() { byte } else { b'?' }, true)?;
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }
}
