//! Errors surfaced by the boot sequence.

use core::fmt;

use kmem::AllocError;
use kproc::RegistryError;

/// Any recoverable failure of a subsystem call made during boot.
///
/// None of these stop the boot sequence; they are reported and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    Alloc(AllocError),
    Registry(RegistryError),
}

impl From<AllocError> for KernelError {
    fn from(err: AllocError) -> Self {
        KernelError::Alloc(err)
    }
}

impl From<RegistryError> for KernelError {
    fn from(err: RegistryError) -> Self {
        KernelError::Registry(err)
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::Alloc(err) => write!(f, "{}", err),
            KernelError::Registry(err) => write!(f, "{}", err),
        }
    }
}
