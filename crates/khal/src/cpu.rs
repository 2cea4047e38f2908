//! CPU control instructions.
//!
//! Thin wrappers around privileged instructions; no logic beyond executing
//! the instruction. Interrupts are never enabled by this runtime, so an HLT
//! after CLI parks the processor for good.

/// Parks the CPU permanently.
///
/// Disables interrupts and halts in a loop, so even an NMI that wakes the
/// core lands straight back in HLT. This is the idle state the boot
/// sequence ends in.
#[inline(always)]
pub fn halt_forever() -> ! {
    loop {
        // SAFETY: CLI + HLT touch no memory and never return control to
        // anything but this loop.
        unsafe {
            core::arch::asm!("cli", "hlt", options(nomem, nostack));
        }
    }
}
