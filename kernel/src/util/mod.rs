// =============================================================================
// BumpBoot — Kernel Utilities
// =============================================================================

/// The panic handler. Bare metal only; hosted builds use std's.
mod panic;
