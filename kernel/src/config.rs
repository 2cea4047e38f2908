// =============================================================================
// BumpBoot — Compile-Time Configuration
// =============================================================================
//
// Everything tunable lives here. There is no command line and no config
// file: the boot sequence runs once, with these values baked in.
// =============================================================================

use log::LevelFilter;

pub const KERNEL_NAME: &str = "BumpBoot";
pub const KERNEL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Records below this level are dropped before formatting.
pub const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Process records registered by the boot sequence, in creation order.
pub const DEMO_PROCESSES: &[&[u8]] = &[b"init", b"daemon"];

/// Bytes of heap reserved as the stack of each registered process.
pub const PROCESS_STACK_SIZE: usize = 4096;

/// Size of the stack `_start` runs kmain on.
#[cfg_attr(not(target_os = "none"), allow(dead_code))]
pub const BOOT_STACK_SIZE: usize = 16 * 1024;

/// Synthetic heap handed to the simulator's allocator.
#[cfg(not(target_os = "none"))]
pub const HOSTED_HEAP_BASE: usize = 0x0020_0000;
#[cfg(not(target_os = "none"))]
pub const HOSTED_HEAP_SIZE: usize = 1024 * 1024;
