//! x86 port I/O primitives.
//!
//! Provides `inb` and `outb` wrappers for x86 port-mapped I/O
//! using inline assembly, plus a `Port` handle that remembers its
//! port number.

/// Write a byte to an x86 I/O port.
///
/// # Safety
///
/// Writing to an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port and value are valid.
#[inline]
pub unsafe fn outb(port: u16, value: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Read a byte from an x86 I/O port.
///
/// # Safety
///
/// Reading from an arbitrary I/O port can have side effects on hardware.
/// The caller must ensure the port is valid.
#[inline]
pub unsafe fn inb(port: u16) -> u8 {
    let value: u8;
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") value,
            options(nomem, nostack, preserves_flags)
        );
    }
    value
}

/// A single byte-wide I/O port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port {
    number: u16,
}

impl Port {
    pub const fn new(number: u16) -> Self {
        Self { number }
    }

    /// The port number this handle addresses.
    pub const fn number(&self) -> u16 {
        self.number
    }

    /// A handle for the port `offset` registers above this one.
    ///
    /// Device register blocks (UART, PIC) are addressed as base + offset.
    pub const fn offset(&self, offset: u16) -> Self {
        Self::new(self.number.wrapping_add(offset))
    }

    /// # Safety
    /// See [`inb`].
    #[inline]
    pub unsafe fn read(&self) -> u8 {
        unsafe { inb(self.number) }
    }

    /// # Safety
    /// See [`outb`].
    #[inline]
    pub unsafe fn write(&self, value: u8) {
        unsafe { outb(self.number, value) }
    }
}
