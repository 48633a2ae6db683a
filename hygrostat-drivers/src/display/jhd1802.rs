//! JHD1802 16x2 character LCD (Grove LCD, I2C)
//!
//! An HD44780-compatible controller behind an I2C bridge at 0x3E. Every
//! transfer starts with a control byte:
//!
//! - `0x80`: the next byte is a command
//! - `0x40`: the following bytes are character data
//!
//! The display trait is fire-and-forget, so bus errors are counted
//! rather than returned.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use hygrostat_core::display::{Screen, DISPLAY_COLS, DISPLAY_ROWS};
use hygrostat_core::traits::DisplayDriver;

/// Default I2C address
pub const LCD_ADDRESS: u8 = 0x3E;

/// Control byte: command follows
const CONTROL_COMMAND: u8 = 0x80;

/// Control byte: data follows
const CONTROL_DATA: u8 = 0x40;

/// HD44780 commands
pub mod cmd {
    /// Clear display and home the cursor
    pub const CLEAR: u8 = 0x01;
    /// Entry mode: increment, no shift
    pub const ENTRY_MODE: u8 = 0x06;
    /// Display on, cursor off, blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, 2 lines, 5x8 font
    pub const FUNCTION_SET_2LINE: u8 = 0x28;
    /// Set DDRAM address
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM offset of the second line
const LINE_OFFSET: u8 = 0x40;

/// JHD1802 driver
pub struct Jhd1802<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    /// Transfers that failed since creation
    bus_errors: u32,
}

impl<I: I2c, D: DelayNs> Jhd1802<I, D> {
    /// Create a driver at the default address
    pub fn new(i2c: I, delay: D) -> Self {
        Self::with_address(i2c, delay, LCD_ADDRESS)
    }

    /// Create a driver at a custom address
    pub fn with_address(i2c: I, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            bus_errors: 0,
        }
    }

    /// Run the power-on initialization sequence
    pub fn init(&mut self) -> Result<(), I::Error> {
        // Controller needs >40 ms after power-up
        self.delay.delay_ms(50);

        self.command(cmd::FUNCTION_SET_2LINE)?;
        self.delay.delay_us(50);
        self.command(cmd::DISPLAY_ON)?;
        self.delay.delay_us(50);
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE)?;
        Ok(())
    }

    /// Send a command byte
    pub fn command(&mut self, command: u8) -> Result<(), I::Error> {
        self.i2c.write(self.address, &[CONTROL_COMMAND, command])
    }

    /// Send character data at the cursor
    pub fn write_data(&mut self, text: &[u8]) -> Result<(), I::Error> {
        let mut buf = [0u8; DISPLAY_COLS + 1];
        buf[0] = CONTROL_DATA;
        for chunk in text.chunks(DISPLAY_COLS) {
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(self.address, &buf[..=chunk.len()])?;
        }
        Ok(())
    }

    /// Copy a whole screen buffer to the panel
    ///
    /// Lines are written at full width, so no clear is needed.
    pub fn show(&mut self, screen: &Screen) -> Result<(), I::Error> {
        for row in 0..DISPLAY_ROWS as u8 {
            self.command(ddram_address(0, row))?;
            self.write_data(screen.line(row).as_bytes())?;
        }
        Ok(())
    }

    /// Number of failed transfers
    pub fn bus_errors(&self) -> u32 {
        self.bus_errors
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    fn record<T>(&mut self, result: Result<T, I::Error>) {
        if result.is_err() {
            self.bus_errors = self.bus_errors.saturating_add(1);
        }
    }
}

/// Set-DDRAM command for a cursor position
pub fn ddram_address(col: u8, row: u8) -> u8 {
    cmd::SET_DDRAM | (col + LINE_OFFSET * row)
}

impl<I: I2c, D: DelayNs> DisplayDriver for Jhd1802<I, D> {
    fn clear(&mut self) {
        let result = self.command(cmd::CLEAR);
        self.record(result);
        self.delay.delay_ms(2);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let col = col.min(DISPLAY_COLS as u8 - 1);
        let row = row.min(DISPLAY_ROWS as u8 - 1);
        let result = self.command(ddram_address(col, row));
        self.record(result);
    }

    fn print(&mut self, text: &str) {
        let result = self.write_data(text.as_bytes());
        self.record(result);
    }
}
