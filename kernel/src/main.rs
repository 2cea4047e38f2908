// =============================================================================
// BumpBoot — Kernel Entry Point
// =============================================================================
//
// WHAT HAPPENED BEFORE WE GOT HERE:
//   1. A multiboot loader (GRUB, QEMU -kernel) found our header in the first
//      8 KiB of the image and checked its checksum
//   2. It loaded the ELF at 1 MiB and switched to 32-bit protected mode,
//      paging off, interrupts disabled
//   3. It jumped to `_start` (arch/x86/entry.rs) with EAX = 0x2BADB002 and
//      EBX = the info block address
//   4. `_start` set up a boot stack and called kmain(eax, ebx)
//
// WHAT WE DO HERE:
//   Phase 1: "Deaf and Blind" → Serial logging (feature `serial-log`)
//   Phase 2: "Can Listen"     → Check what the bootloader handed us
//   Phase 3: "Can See"        → Take the VGA text buffer
//   Phase 4: "Can Remember"   → Bump allocator over the linker-reserved heap
//   Phase 5: "Can Count"      → Process table + demo records
//   Phase 6: "Idle"           → Halted, forever
//
// Phases 3-6 are `boot::Kernel`; they run unchanged in the hosted simulator.
//
// =============================================================================

// Freestanding build: no std, no runtime entry point. Any hosted build gets
// std and an ordinary `main` that runs the simulator.
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

mod arch;
mod boot;
mod config;
mod error;

#[cfg(target_os = "none")]
mod util;

#[cfg(not(target_os = "none"))]
mod hosted;

/// Rust entry point, called from `_start` with the bootloader's registers.
#[cfg(target_os = "none")]
#[unsafe(no_mangle)]
pub extern "C" fn kmain(magic: u32, info: usize) -> ! {
    use arch::x86::multiboot;
    use kconsole::VgaBuffer;
    use kmem::HeapRegion;

    // =====================================================================
    // Phase 1: Serial logging
    // =====================================================================
    #[cfg(feature = "serial-log")]
    klog::init(config::LOG_LEVEL);

    klog::println!();
    klog::println!("==========================================================");
    klog::println!("  {} v{} booting", config::KERNEL_NAME, config::KERNEL_VERSION);
    klog::println!("==========================================================");

    // =====================================================================
    // Phase 2: Bootloader hand-off
    // =====================================================================
    // SAFETY: `_start` forwards EAX/EBX untouched; parse_handoff only
    // dereferences `info` when EAX carries the multiboot magic.
    let handoff = unsafe { multiboot::parse_handoff(magic, info) };
    multiboot::report(&handoff);

    // =====================================================================
    // Phases 3-6: Console, heap, processes, halt
    // =====================================================================
    let heap = arch::heap_region().unwrap_or_else(|err| {
        log::error!("{}", err);
        HeapRegion::EMPTY
    });

    // SAFETY: this is the only place the VGA buffer is claimed, and
    // nothing else in the kernel touches 0xB8000.
    let screen = unsafe { VgaBuffer::new() };

    let mut kernel = boot::Kernel::new(screen, heap);
    kernel.run();
    kernel.halt()
}

#[cfg(not(target_os = "none"))]
fn main() {
    hosted::run()
}
