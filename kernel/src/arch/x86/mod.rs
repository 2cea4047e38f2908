// =============================================================================
// BumpBoot — 32-bit x86 Support
// =============================================================================
//
//   multiboot.rs — boot-compatibility header + info block parsing
//   entry.rs     — `_start`: boot stack, jump into kmain (bare metal only)
//
// Port I/O, serial and HLT live in the `khal` crate.
// =============================================================================

// Parsed on the host too, so the header words are unit-tested.
#[cfg_attr(not(target_os = "none"), allow(dead_code))]
pub mod multiboot;

#[cfg(all(target_os = "none", target_arch = "x86"))]
mod entry;
