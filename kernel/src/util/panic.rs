// =============================================================================
// BumpBoot — Kernel Panic Handler
// =============================================================================
//
// A panic here means a broken internal invariant (a cell write outside the
// text grid, an invalid boot transition). The subsystems' own failures are
// `Result`s and never reach this handler.
//
// WHAT WE DO:
//   1. Print location and message over serial, the one output that does not
//      depend on the state that just broke
//   2. Halt the CPU permanently
//
// =============================================================================

use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    klog::println!();
    klog::println!("==========================================================");
    klog::println!("  KERNEL PANIC — BumpBoot");
    klog::println!("==========================================================");

    if let Some(location) = info.location() {
        klog::println!("  Location: {}:{}", location.file(), location.line());
    } else {
        klog::println!("  Location: <unknown>");
    }
    klog::println!("  Message: {}", info.message());

    klog::println!("==========================================================");
    klog::println!("  System halted. Reboot required.");
    klog::println!("==========================================================");

    khal::cpu::halt_forever()
}
