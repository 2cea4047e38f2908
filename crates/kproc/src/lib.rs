//! Process registry.
//!
//! A fixed table of process records. The registry only assigns identifiers
//! and remembers names; there is no execution, scheduling or teardown at
//! this stage of boot.
#![cfg_attr(not(test), no_std)]

pub mod name;
pub mod table;

pub use name::{PROCESS_NAME_LEN, ProcessName};
pub use table::{MAX_PROCESSES, Pid, ProcessRecord, ProcessState, ProcessTable, RegistryError};
