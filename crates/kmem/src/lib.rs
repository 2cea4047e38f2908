//! Physical memory for the boot runtime.
//!
//! There is no paging and no reclamation at this stage: memory is a fixed
//! physical [`HeapRegion`] that a [`BumpAllocator`] carves up front to
//! back, one request at a time.
#![cfg_attr(not(test), no_std)]

pub mod address;
pub mod bump;

pub use address::{PhysAddr, align_up};
pub use bump::{AllocError, BumpAllocator, HeapRegion};
