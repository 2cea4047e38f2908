// =============================================================================
// BumpBoot — Architecture Abstraction
// =============================================================================
//
// The rest of the kernel uses `crate::arch::*` and never touches the
// hardware directly. Two things differ between bare metal and the hosted
// simulator: where the boot heap lives, and what "halt forever" means.
// =============================================================================

pub mod x86;

use kmem::{AllocError, HeapRegion};

/// Park the CPU. The terminal state of the boot sequence.
#[cfg(target_os = "none")]
pub fn idle() -> ! {
    khal::cpu::halt_forever()
}

/// No HLT in user mode: the simulator's idle state is process exit.
#[cfg(not(target_os = "none"))]
pub fn idle() -> ! {
    std::process::exit(0)
}

// Linker-provided bounds of the boot heap (see linker.ld). Only their
// addresses are meaningful; reading them is undefined behavior.
#[cfg(target_os = "none")]
unsafe extern "C" {
    static __heap_start: u8;
    static __heap_end: u8;
}

/// The physical range the bump allocator may hand out.
#[cfg(target_os = "none")]
pub fn heap_region() -> Result<HeapRegion, AllocError> {
    use kmem::PhysAddr;
    // SAFETY: only the symbol addresses are taken; nothing is read.
    let (start, end) = unsafe {
        (&raw const __heap_start as usize, &raw const __heap_end as usize)
    };
    HeapRegion::from_bounds(PhysAddr::new(start), PhysAddr::new(end))
}

/// A synthetic region; the simulator never dereferences heap addresses.
#[cfg(not(target_os = "none"))]
pub fn heap_region() -> Result<HeapRegion, AllocError> {
    use crate::config::{HOSTED_HEAP_BASE, HOSTED_HEAP_SIZE};
    HeapRegion::new(kmem::PhysAddr::new(HOSTED_HEAP_BASE), HOSTED_HEAP_SIZE)
}
