//! The process table.
//!
//! [`ProcessTable`] is a fixed array of [`ProcessRecord`] slots plus a
//! global identifier counter. Slots are addressed by position; identifiers
//! are stamped onto a slot when it is claimed and are never handed out
//! twice, not even across [`ProcessTable::reset`].
//!
//! Per-slot state machine: `Free --create--> Active`. There is no way back.

use core::fmt;
use core::num::NonZeroU32;

use crate::name::ProcessName;

/// Number of slots in the table.
pub const MAX_PROCESSES: usize = 64;

// ── Process identifiers ─────────────────────────────────────────

/// A process identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Pid(NonZeroU32);

impl Pid {
    /// The first identifier the registry hands out.
    pub const FIRST: Pid = Pid(NonZeroU32::MIN);

    /// `None` for zero, which is never a valid identifier.
    pub const fn new(raw: u32) -> Option<Self> {
        match NonZeroU32::new(raw) {
            Some(n) => Some(Pid(n)),
            None => None,
        }
    }

    pub const fn as_u32(self) -> u32 {
        self.0.get()
    }

    /// The identifier after this one, or `None` once the space is used up.
    const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(n) => Some(Pid(n)),
            None => None,
        }
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Process records ─────────────────────────────────────────────

/// The possible states of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState {
    /// Unclaimed; `create` may take it.
    Free,
    /// Holds a registered process.
    Active,
}

/// One slot of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessRecord {
    pid: Option<Pid>,
    state: ProcessState,
    name: ProcessName,
}

impl ProcessRecord {
    const FREE: ProcessRecord = ProcessRecord {
        pid: None,
        state: ProcessState::Free,
        name: ProcessName::EMPTY,
    };

    /// The identifier stamped on this slot; `None` while it is free.
    pub fn pid(&self) -> Option<Pid> {
        self.pid
    }

    pub fn state(&self) -> ProcessState {
        self.state
    }

    pub fn name(&self) -> &ProcessName {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.state == ProcessState::Active
    }
}

// ── Errors ──────────────────────────────────────────────────────

/// Error returned when a process cannot be registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// No free slot is left (or the identifier space is used up). Existing
    /// records are untouched.
    Full { capacity: usize },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Full { capacity } => {
                write!(f, "process table full ({} slots)", capacity)
            }
        }
    }
}

// ── The table ───────────────────────────────────────────────────

/// Fixed-capacity registry of process records.
pub struct ProcessTable {
    slots: [ProcessRecord; MAX_PROCESSES],
    /// `None` once every `u32` identifier has been issued.
    next_pid: Option<Pid>,
}

impl ProcessTable {
    /// An empty table. Equivalent to a freshly reset one.
    pub const fn new() -> Self {
        Self {
            slots: [ProcessRecord::FREE; MAX_PROCESSES],
            next_pid: Some(Pid::FIRST),
        }
    }

    /// Mark every slot free.
    ///
    /// The identifier counter is left alone, so a process created after a
    /// reset never shares an identifier with one created before it.
    pub fn reset(&mut self) {
        self.slots = [ProcessRecord::FREE; MAX_PROCESSES];
        log::debug!("process table reset, next pid {:?}", self.next_pid.map(Pid::as_u32));
    }

    /// Register `name` in the lowest-numbered free slot.
    ///
    /// The name is truncated to [`crate::PROCESS_NAME_LEN`] bytes. On
    /// failure nothing changes: no slot is written and the counter does
    /// not advance.
    pub fn create(&mut self, name: &[u8]) -> Result<Pid, RegistryError> {
        let full = RegistryError::Full { capacity: MAX_PROCESSES };
        let index = self
            .slots
            .iter()
            .position(|slot| slot.state == ProcessState::Free)
            .ok_or(full)?;
        let pid = self.next_pid.ok_or(full)?;

        let slot = &mut self.slots[index];
        slot.pid = Some(pid);
        slot.state = ProcessState::Active;
        slot.name = ProcessName::new(name);
        self.next_pid = pid.next();

        log::debug!("created pid {} ({}) in slot {}", pid, slot.name, index);
        Ok(pid)
    }

    /// Active records in slot order.
    pub fn active(&self) -> impl Iterator<Item = &ProcessRecord> + '_ {
        self.slots.iter().filter(|slot| slot.is_active())
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// The active record carrying `pid`.
    pub fn get(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.active().find(|slot| slot.pid == Some(pid))
    }

    /// The record at slot `index`, free or not.
    pub fn slot(&self, index: usize) -> Option<&ProcessRecord> {
        self.slots.get(index)
    }

    pub const fn capacity(&self) -> usize {
        MAX_PROCESSES
    }

    /// The identifier the next successful `create` will return.
    pub fn next_pid(&self) -> Option<Pid> {
        self.next_pid
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::name::PROCESS_NAME_LEN;

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).unwrap()
    }

    #[test]
    fn identifiers_start_at_one() {
        let mut table = ProcessTable::new();
        table.reset();
        assert_eq!(table.create(b"init"), Ok(pid(1)));
        assert_eq!(table.create(b"daemon"), Ok(pid(2)));

        let init = table.slot(0).unwrap();
        assert_eq!(init.pid(), Some(pid(1)));
        assert_eq!(init.state(), ProcessState::Active);
        assert_eq!(init.name().as_bytes(), b"init");
        assert_eq!(table.get(pid(2)).unwrap().name().as_bytes(), b"daemon");
    }

    #[test]
    fn fills_slots_first_fit_in_index_order() {
        let mut table = ProcessTable::new();
        for i in 0..5 {
            table.create(b"p").unwrap();
            assert!(table.slot(i).unwrap().is_active());
            assert_eq!(table.slot(i + 1).unwrap().state(), ProcessState::Free);
        }
    }

    #[test]
    fn sixty_fifth_create_fails_and_leaves_records_intact() {
        let mut table = ProcessTable::new();
        table.reset();
        let long = b"process-with-a-long-name";
        for i in 1..=MAX_PROCESSES as u32 {
            assert_eq!(table.create(long), Ok(pid(i)));
        }

        assert_eq!(
            table.create(b"overflow"),
            Err(RegistryError::Full { capacity: MAX_PROCESSES })
        );

        assert_eq!(table.active_count(), MAX_PROCESSES);
        for (i, record) in table.active().enumerate() {
            assert_eq!(record.pid(), Some(pid(i as u32 + 1)));
            assert_eq!(record.name().as_bytes(), &long[..PROCESS_NAME_LEN]);
        }
        // The failed call did not burn an identifier.
        assert_eq!(table.next_pid(), Some(pid(MAX_PROCESSES as u32 + 1)));
    }

    #[test]
    fn reset_frees_every_slot() {
        let mut table = ProcessTable::new();
        table.create(b"init").unwrap();
        table.create(b"daemon").unwrap();

        table.reset();

        assert_eq!(table.active_count(), 0);
        for i in 0..MAX_PROCESSES {
            let slot = table.slot(i).unwrap();
            assert_eq!(slot.state(), ProcessState::Free);
            assert_eq!(slot.pid(), None);
        }
        assert!(table.slot(MAX_PROCESSES).is_none());
    }

    #[test]
    fn identifiers_continue_across_reset() {
        let mut table = ProcessTable::new();
        table.create(b"init").unwrap();
        table.create(b"daemon").unwrap();

        table.reset();

        assert_eq!(table.create(b"init"), Ok(pid(3)));
        assert!(table.get(pid(1)).is_none());
        assert_eq!(table.slot(0).unwrap().pid(), Some(pid(3)));
    }

    #[test]
    fn repeated_reset_on_empty_table_is_harmless() {
        let mut table = ProcessTable::new();
        table.reset();
        table.reset();
        assert_eq!(table.active_count(), 0);
        assert_eq!(table.create(b"init"), Ok(Pid::FIRST));
    }

    #[test]
    fn exhausted_identifier_space_reports_full() {
        let mut table = ProcessTable::new();
        table.next_pid = Some(pid(u32::MAX));
        assert_eq!(table.create(b"last"), Ok(pid(u32::MAX)));
        assert_eq!(
            table.create(b"none"),
            Err(RegistryError::Full { capacity: MAX_PROCESSES })
        );
        assert_eq!(table.active_count(), 1);
    }

    #[test]
    fn zero_is_not_a_pid() {
        assert!(Pid::new(0).is_none());
        assert_eq!(Pid::FIRST.as_u32(), 1);
        assert_eq!(pid(42).to_string(), "42");
    }

    #[test]
    fn full_error_message() {
        let err = RegistryError::Full { capacity: 64 };
        assert_eq!(err.to_string(), "process table full (64 slots)");
    }
}
