//! Boot-time bump allocator.
//!
//! Hands out consecutive slices of a fixed [`HeapRegion`] by advancing a
//! single offset. Nothing is ever freed: this is a one-way arena for
//! structures that live until the machine halts.
//!
//! The allocator deals in addresses only and never dereferences them, so
//! exhaustion and bookkeeping are testable with any region.

use core::fmt;

use crate::address::PhysAddr;

/// A fixed physical address range `[base, base + capacity)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeapRegion {
    base: PhysAddr,
    capacity: usize,
}

impl HeapRegion {
    /// A zero-byte region; every non-empty allocation from it fails.
    pub const EMPTY: HeapRegion = HeapRegion {
        base: PhysAddr::new(0),
        capacity: 0,
    };

    /// Describe `capacity` bytes starting at `base`.
    ///
    /// Fails if the range would run past the top of the address space.
    pub const fn new(base: PhysAddr, capacity: usize) -> Result<Self, AllocError> {
        if base.checked_add(capacity).is_none() {
            return Err(AllocError::InvalidRegion { base, capacity });
        }
        Ok(Self { base, capacity })
    }

    /// The region between two linker-provided bounds.
    pub fn from_bounds(start: PhysAddr, end: PhysAddr) -> Result<Self, AllocError> {
        if end < start {
            return Err(AllocError::InvalidRegion { base: start, capacity: 0 });
        }
        Self::new(start, end.offset_from(start))
    }

    pub const fn base(&self) -> PhysAddr {
        self.base
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// One past the last byte of the region.
    pub const fn end(&self) -> PhysAddr {
        PhysAddr::new(self.base.as_usize() + self.capacity)
    }

    pub fn contains(&self, addr: PhysAddr) -> bool {
        addr >= self.base && addr < self.end()
    }
}

/// Error returned when an allocation or region setup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The request does not fit in what is left of the region. The offset
    /// is unchanged.
    Exhausted { requested: usize, remaining: usize },
    /// The region bounds are inverted or wrap the address space.
    InvalidRegion { base: PhysAddr, capacity: usize },
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::Exhausted { requested, remaining } => write!(
                f,
                "heap exhausted: {} bytes requested, {} remaining",
                requested, remaining
            ),
            AllocError::InvalidRegion { base, capacity } => {
                write!(f, "invalid heap region: {} bytes at {}", capacity, base)
            }
        }
    }
}

/// Monotonic allocator over a [`HeapRegion`].
///
/// Invariant: `offset <= region.capacity()`, and `offset` never decreases.
#[derive(Debug)]
pub struct BumpAllocator {
    region: HeapRegion,
    offset: usize,
    allocations: usize,
}

impl BumpAllocator {
    pub const fn new(region: HeapRegion) -> Self {
        Self {
            region,
            offset: 0,
            allocations: 0,
        }
    }

    /// Reserve `size` bytes and return the address of the first one.
    ///
    /// A request that would overrun the region fails with
    /// [`AllocError::Exhausted`] and consumes nothing, so earlier
    /// allocations and later smaller requests are unaffected. Zero-sized
    /// requests succeed and return the current position.
    ///
    /// No alignment is applied; round `size` with [`crate::align_up`] if
    /// the next allocation must be aligned.
    pub fn allocate(&mut self, size: usize) -> Result<PhysAddr, AllocError> {
        let remaining = self.remaining();
        if size > remaining {
            log::warn!(
                "bump: {} byte request refused, {} of {} bytes left",
                size,
                remaining,
                self.region.capacity()
            );
            return Err(AllocError::Exhausted { requested: size, remaining });
        }

        let start = PhysAddr::new(self.region.base().as_usize() + self.offset);
        self.offset += size;
        self.allocations += 1;
        log::trace!("bump: {} bytes at {}", size, start);
        Ok(start)
    }

    pub fn region(&self) -> HeapRegion {
        self.region
    }

    /// Bytes handed out so far.
    pub fn used(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.region.capacity() - self.offset
    }

    /// Number of successful `allocate` calls.
    pub fn allocation_count(&self) -> usize {
        self.allocations
    }
}
