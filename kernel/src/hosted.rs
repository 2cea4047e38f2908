// =============================================================================
// BumpBoot — Hosted Simulator
// =============================================================================
//
// On a hosted target there is no bootloader, no VGA memory and no HLT. The
// simulator runs the same boot sequence against an in-memory screen, sends
// log records to stderr and prints the final screen to stdout.
// =============================================================================

use std::fmt;
use std::io::Write;

use kconsole::{BUFFER_HEIGHT, MemoryBuffer};
use kmem::HeapRegion;

use crate::arch;
use crate::boot::Kernel;
use crate::config;

fn stderr_sink(args: fmt::Arguments) {
    let _ = std::io::stderr().write_fmt(args);
}

pub fn run() -> ! {
    klog::init_with_sink(stderr_sink, config::LOG_LEVEL);

    let region = arch::heap_region().unwrap_or_else(|err| {
        log::error!("{}", err);
        HeapRegion::EMPTY
    });

    let mut kernel = Kernel::new(MemoryBuffer::new(), region);
    kernel.run();
    kernel.finish();
    kernel.log_summary();

    let screen = kernel.console().buffer();
    let mut stdout = std::io::stdout().lock();
    for row in 0..BUFFER_HEIGHT {
        let bytes = screen.row_bytes(row);
        let text: String = bytes.iter().map(|&b| b as char).collect();
        let _ = writeln!(stdout, "{}", text.trim_end());
    }
    let _ = stdout.flush();

    arch::idle()
}
