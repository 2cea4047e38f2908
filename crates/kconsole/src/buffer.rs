//! Text frame buffer storage.
//!
//! A frame buffer is a `BUFFER_HEIGHT` x `BUFFER_WIDTH` grid of
//! [`ScreenChar`] cells. [`TextBuffer`] is the only way the console touches
//! it; every access is bounds-checked, and an out-of-grid coordinate is a
//! driver bug, so it panics rather than scribbling past video memory.

use core::ptr::NonNull;

use crate::color::{Color, ColorCode};

/// Rows in the text-mode grid.
pub const BUFFER_HEIGHT: usize = 25;

/// Columns in the text-mode grid.
pub const BUFFER_WIDTH: usize = 80;

/// Physical address of the color text-mode frame buffer.
pub const VGA_BUFFER_ADDR: usize = 0xB8000;

/// One cell: a character code and its color attribute.
///
/// Layout matches video memory, character in the low byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ScreenChar {
    pub ascii: u8,
    pub color: ColorCode,
}

impl ScreenChar {
    pub const fn new(ascii: u8, color: ColorCode) -> Self {
        Self { ascii, color }
    }

    /// A space in the given color.
    pub const fn blank(color: ColorCode) -> Self {
        Self::new(b' ', color)
    }

    /// The 16-bit word as stored in video memory (`0x0720` for a default
    /// blank).
    pub const fn to_u16(self) -> u16 {
        (self.color.as_u8() as u16) << 8 | self.ascii as u16
    }
}

/// Bounds-checked access to a text-mode cell grid.
///
/// # Panics
/// Implementations panic when `row >= BUFFER_HEIGHT` or
/// `col >= BUFFER_WIDTH`.
pub trait TextBuffer {
    fn read(&self, row: usize, col: usize) -> ScreenChar;
    fn write(&mut self, row: usize, col: usize, cell: ScreenChar);
}

#[inline]
fn check_bounds(row: usize, col: usize) {
    assert!(
        row < BUFFER_HEIGHT && col < BUFFER_WIDTH,
        "cell ({}, {}) outside {}x{} text buffer",
        row,
        col,
        BUFFER_HEIGHT,
        BUFFER_WIDTH
    );
}

// ── Hardware buffer ─────────────────────────────────────────────

/// The memory-mapped VGA text buffer.
///
/// All accesses are volatile so the compiler cannot elide or reorder
/// writes to video memory.
pub struct VgaBuffer {
    cells: NonNull<ScreenChar>,
}

// Safety: the buffer is exclusively owned by one console, and the runtime
// is single-threaded.
unsafe impl Send for VgaBuffer {}

impl VgaBuffer {
    /// Take ownership of the frame buffer at [`VGA_BUFFER_ADDR`].
    ///
    /// # Safety
    /// Must be called at most once, on a machine where the text frame
    /// buffer is identity-mapped at that address. A second instance would
    /// alias the same memory.
    pub unsafe fn new() -> Self {
        // SAFETY: caller guarantees the mapping.
        unsafe { Self::at(VGA_BUFFER_ADDR) }
    }

    /// Take ownership of a text buffer at an arbitrary address.
    ///
    /// # Safety
    /// `addr` must point to `BUFFER_HEIGHT * BUFFER_WIDTH` writable cells
    /// that nothing else accesses for the lifetime of this value.
    pub unsafe fn at(addr: usize) -> Self {
        let cells = match NonNull::new(addr as *mut ScreenChar) {
            Some(ptr) => ptr,
            None => panic!("text buffer at null address"),
        };
        Self { cells }
    }

    fn cell_ptr(&self, row: usize, col: usize) -> *mut ScreenChar {
        check_bounds(row, col);
        // SAFETY: the index is inside the grid the constructor vouched for.
        unsafe { self.cells.as_ptr().add(row * BUFFER_WIDTH + col) }
    }
}

impl TextBuffer for VgaBuffer {
    fn read(&self, row: usize, col: usize) -> ScreenChar {
        // SAFETY: in-bounds pointer into the owned frame buffer.
        unsafe { self.cell_ptr(row, col).read_volatile() }
    }

    fn write(&mut self, row: usize, col: usize, cell: ScreenChar) {
        // SAFETY: in-bounds pointer into the owned frame buffer.
        unsafe { self.cell_ptr(row, col).write_volatile(cell) }
    }
}

// ── In-memory buffer ────────────────────────────────────────────

/// A frame buffer held in ordinary memory.
///
/// Used by the hosted simulator and by tests, which inspect the grid
/// directly through [`MemoryBuffer::row`].
#[derive(Clone)]
pub struct MemoryBuffer {
    cells: [[ScreenChar; BUFFER_WIDTH]; BUFFER_HEIGHT],
}

impl MemoryBuffer {
    /// A grid of zero cells, as video memory looks before anyone clears it.
    pub const fn new() -> Self {
        Self {
            cells: [[ScreenChar::new(0, ColorCode::new(Color::Black, Color::Black)); BUFFER_WIDTH];
                BUFFER_HEIGHT],
        }
    }

    /// One row of cells.
    pub fn row(&self, row: usize) -> &[ScreenChar; BUFFER_WIDTH] {
        &self.cells[row]
    }

    /// The character codes of one row, without colors.
    pub fn row_bytes(&self, row: usize) -> [u8; BUFFER_WIDTH] {
        let mut out = [0u8; BUFFER_WIDTH];
        for (byte, cell) in out.iter_mut().zip(self.cells[row].iter()) {
            *byte = cell.ascii;
        }
        out
    }
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer for MemoryBuffer {
    fn read(&self, row: usize, col: usize) -> ScreenChar {
        check_bounds(row, col);
        self.cells[row][col]
    }

    fn write(&mut self, row: usize, col: usize, cell: ScreenChar) {
        check_bounds(row, col);
        self.cells[row][col] = cell;
    }
}
