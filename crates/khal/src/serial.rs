//! Serial port (COM1 UART 16550) driver.
//!
//! Polled transmit only; the runtime never enables interrupts, so there is
//! no receive path.

use core::fmt;
use spin::Mutex;

use crate::port::Port;

/// COM1 base port address
const COM1_PORT: u16 = 0x3F8;

// Register offsets from the UART base.
const DATA: u16 = 0;
const INT_ENABLE: u16 = 1;
const FIFO_CTRL: u16 = 2;
const LINE_CTRL: u16 = 3;
const MODEM_CTRL: u16 = 4;
const LINE_STATUS: u16 = 5;

/// Line status: transmit holding register empty.
const LSR_THR_EMPTY: u8 = 0x20;

/// Serial port driver for a 16550-compatible UART.
pub struct Serial {
    base: Port,
    initialized: bool,
}

impl Serial {
    /// Create an uninitialized driver for the UART at `base`.
    pub const fn new(base: u16) -> Self {
        Self {
            base: Port::new(base),
            initialized: false,
        }
    }

    /// Whether `init` has run. Writes before that are dropped.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Initialize the serial port (115200 baud, 8N1)
    pub fn init(&mut self) {
        let reg = |offset| self.base.offset(offset);
        unsafe {
            // Disable all interrupts
            reg(INT_ENABLE).write(0x00);

            // Enable DLAB (set baud rate divisor)
            reg(LINE_CTRL).write(0x80);

            // Divisor 1 (115200 baud)
            reg(DATA).write(0x01);
            reg(INT_ENABLE).write(0x00);

            // 8 bits, no parity, one stop bit (clear DLAB)
            reg(LINE_CTRL).write(0x03);

            // Enable FIFO, clear them, with 14-byte threshold
            reg(FIFO_CTRL).write(0xC7);

            // Loopback mode for the self-test
            reg(MODEM_CTRL).write(0x1E);
            reg(DATA).write(0xAE);

            // A faulty UART still gets marked usable; output is best-effort.
            if reg(DATA).read() == 0xAE {
                // Normal operation: OUT1, OUT2, RTS, DTR
                reg(MODEM_CTRL).write(0x0F);
            }
        }
        self.initialized = true;
    }

    fn is_transmit_empty(&self) -> bool {
        unsafe { self.base.offset(LINE_STATUS).read() & LSR_THR_EMPTY != 0 }
    }

    /// Write a byte to the serial port
    pub fn write_byte(&self, byte: u8) {
        if !self.initialized {
            return;
        }

        while !self.is_transmit_empty() {
            core::hint::spin_loop();
        }

        unsafe {
            self.base.offset(DATA).write(byte);
        }
    }

    /// Write a string to the serial port
    pub fn write_str(&self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}

impl fmt::Write for Serial {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        Serial::write_str(self, s);
        Ok(())
    }
}

/// Global serial port instance (COM1)
static SERIAL: Mutex<Serial> = Mutex::new(Serial::new(COM1_PORT));

/// Initialize the global serial port
pub fn init() {
    SERIAL.lock().init();
}

/// Write a string to the serial port
pub fn write_str(s: &str) {
    SERIAL.lock().write_str(s);
}

/// Write formatted arguments to the serial port
pub fn write_fmt(args: fmt::Arguments) {
    use fmt::Write;
    if let Some(s) = args.as_str() {
        write_str(s);
        return;
    }
    // Serial::write_str never fails; a formatting error from a Display impl
    // just truncates the line.
    let _ = SERIAL.lock().write_fmt(args);
}
