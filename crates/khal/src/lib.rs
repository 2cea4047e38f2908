//! Hardware Abstraction Layer.
//!
//! Stateless x86 primitives used by the boot runtime. Valid in both 32-bit
//! protected mode and 64-bit long mode, so the same crate serves the
//! freestanding kernel and host-side unit tests.
#![cfg_attr(not(test), no_std)]

pub mod cpu;
pub mod port;
pub mod serial;

pub use port::Port;
pub use serial::Serial;
