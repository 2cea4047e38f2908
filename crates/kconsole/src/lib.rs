//! VGA text-mode console.
//!
//! The console owns the 80x25 text frame buffer: every write goes through
//! [`Console`], which keeps the cursor inside the grid by wrapping at the
//! last column and scrolling at the last row. The cell grid itself sits
//! behind the [`TextBuffer`] trait, so the same driver runs against real
//! video memory ([`VgaBuffer`]) or a plain array ([`MemoryBuffer`]).
#![cfg_attr(not(test), no_std)]

pub mod buffer;
pub mod color;
pub mod console;

pub use buffer::{BUFFER_HEIGHT, BUFFER_WIDTH, MemoryBuffer, ScreenChar, TextBuffer, VgaBuffer};
pub use color::{Color, ColorCode};
pub use console::Console;
