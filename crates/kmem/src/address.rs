// =============================================================================
// BumpBoot — Physical Address Type
// =============================================================================
//
// The runtime runs with paging off, so every address it handles is physical.
// Keeping them in a newtype still pays off: an offset (a plain `usize`) and
// an address cannot be mixed up, and the hex formatting is uniform in logs
// and on the console.
//
// 32-bit x86 ADDRESS SPACE:
//   - 4 GiB physical, no PAE
//   - 0x000B_8000 — color text-mode frame buffer
//   - 0x0010_0000 — kernel load address (1 MiB)
//   - heap region — reserved by the linker script right after .bss
//
// =============================================================================

use core::fmt;

/// A physical memory address.
///
/// Stored as `usize` so it matches the pointer width of whichever target the
/// code is built for (32-bit on the kernel, 64-bit on a host running tests).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct PhysAddr(usize);

impl PhysAddr {
    #[inline]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the raw value of this physical address.
    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0
    }

    /// The address `offset` bytes further on, or `None` if that would wrap
    /// past the top of the address space.
    #[inline]
    pub const fn checked_add(self, offset: usize) -> Option<Self> {
        match self.0.checked_add(offset) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// Bytes from `base` up to this address.
    ///
    /// # Panics
    /// Debug-asserts that `base` is not above `self`.
    #[inline]
    pub const fn offset_from(self, base: PhysAddr) -> usize {
        debug_assert!(self.0 >= base.0, "PhysAddr::offset_from: base above address");
        self.0 - base.0
    }

    /// Rounds up to the next multiple of `align`, or `None` if that
    /// would pass the top of the address space.
    ///
    /// `align` must be a non-zero power of two.
    #[inline]
    pub const fn align_up(self, align: usize) -> Option<Self> {
        match align_up(self.0, align) {
            Some(addr) => Some(Self(addr)),
            None => None,
        }
    }

    /// `align` must be a non-zero power of two.
    #[inline]
    pub const fn is_aligned(self, align: usize) -> bool {
        debug_assert!(align.is_power_of_two(), "is_aligned: alignment must be a power of two");
        self.0 & align.wrapping_sub(1) == 0
    }
}

/// Rounds `value` up to the next multiple of `align`, or `None` if the
/// result does not fit in a `usize`.
///
/// # Panics
/// Debug-asserts that `align` is a non-zero power of two.
#[inline]
pub const fn align_up(value: usize, align: usize) -> Option<usize> {
    debug_assert!(align.is_power_of_two(), "align_up: alignment must be a power of two");
    let mask = align.wrapping_sub(1);
    match value.checked_add(mask) {
        Some(bumped) => Some(bumped & !mask),
        None => None,
    }
}

/// Display a physical address as `0x0020_1000`-style fixed-width hex.
impl fmt::Debug for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P:{:#010X}", self.0)
    }
}

impl fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010X}", self.0)
    }
}

impl fmt::LowerHex for PhysAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
