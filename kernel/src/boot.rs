// =============================================================================
// BumpBoot — Boot Sequence
// =============================================================================
//
// The runtime context and the one straight-line sequence it runs.
//
// STATE MACHINE:
//
//   Entered ──run()──> Running ──finish()──> Halted
//
//   Halted has no exits. On bare metal it is the CLI+HLT loop; the hosted
//   simulator exits the process instead.
//
// SEQUENCE (inside run):
//   1. Initialize the console (clear screen, home cursor)
//   2. Banner, in white
//   3. Report the heap region the bump allocator owns
//   4. Reset the process table
//   5. Register each demo process and reserve its stack
//   6. Summary of the table
//
// A failed allocation or registration is printed in red, logged, and
// skipped. Nothing in the sequence is fatal.
//
// =============================================================================

use core::fmt::{self, Write};

use kconsole::{Color, Console, TextBuffer};
use kmem::{BumpAllocator, HeapRegion, PhysAddr};
use kproc::{Pid, ProcessTable};

use crate::config;
use crate::error::KernelError;

/// Where the boot sequence is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootState {
    /// Control just arrived from the bootloader.
    Entered,
    /// Subsystems are up; the sequence is executing.
    Running,
    /// Terminal. The CPU idles from here on.
    Halted,
}

impl BootState {
    fn can_enter(self, next: BootState) -> bool {
        matches!(
            (self, next),
            (BootState::Entered, BootState::Running) | (BootState::Running, BootState::Halted)
        )
    }
}

/// Everything the boot runtime owns: the screen, the boot heap and the
/// process table. Passed around explicitly; there are no global singletons.
pub struct Kernel<B: TextBuffer> {
    console: Console<B>,
    heap: BumpAllocator,
    processes: ProcessTable,
    state: BootState,
}

impl<B: TextBuffer> Kernel<B> {
    pub fn new(screen: B, heap: HeapRegion) -> Self {
        Self {
            console: Console::new(screen),
            heap: BumpAllocator::new(heap),
            processes: ProcessTable::new(),
            state: BootState::Entered,
        }
    }

    pub fn state(&self) -> BootState {
        self.state
    }

    // The hosted simulator reads the screen back; bare metal never does.
    #[cfg_attr(target_os = "none", allow(dead_code))]
    pub fn console(&self) -> &Console<B> {
        &self.console
    }

    pub fn heap(&self) -> &BumpAllocator {
        &self.heap
    }

    pub fn processes(&self) -> &ProcessTable {
        &self.processes
    }

    /// Run the boot sequence up to, but not including, the halt.
    pub fn run(&mut self) {
        self.enter(BootState::Running);

        self.console.initialize();
        self.line(
            Color::White,
            format_args!("{} {}", config::KERNEL_NAME, config::KERNEL_VERSION),
        );

        let region = self.heap.region();
        log::info!("boot heap {}..{}", region.base(), region.end());
        self.line(
            Color::LightGray,
            format_args!(
                "heap {}..{}, {} bytes",
                region.base(),
                region.end(),
                region.capacity()
            ),
        );

        self.processes.reset();
        for &name in config::DEMO_PROCESSES {
            self.start_process(name);
        }

        let active = self.processes.active_count();
        let capacity = self.processes.capacity();
        log::info!("{} of {} process slots active", active, capacity);
        self.line(
            Color::LightGray,
            format_args!("{} of {} process slots active", active, capacity),
        );
    }

    /// Enter the terminal state. The caller idles afterwards.
    ///
    /// # Panics
    /// If the sequence is not `Running`.
    pub fn finish(&mut self) {
        self.enter(BootState::Halted);
        self.line(Color::LightGray, format_args!("System halted."));
        log::info!("halted");
    }

    /// Log where the boot ended up: state, heap use and process count.
    pub fn log_summary(&self) {
        log::info!(
            "boot {:?}: {} of {} heap bytes in {} allocations, {} of {} processes",
            self.state(),
            self.heap().used(),
            self.heap().region().capacity(),
            self.heap().allocation_count(),
            self.processes().active_count(),
            self.processes().capacity()
        );
    }

    /// Finish and park the CPU.
    #[cfg_attr(not(target_os = "none"), allow(dead_code))]
    pub fn halt(mut self) -> ! {
        self.finish();
        self.log_summary();
        crate::arch::idle()
    }

    /// Register `name` and reserve its stack, then print the outcome.
    ///
    /// The name goes to the screen byte for byte, so a code above 0x7F
    /// fills exactly one cell.
    fn start_process(&mut self, name: &[u8]) {
        let printable = kproc::ProcessName::new(name);
        match self.spawn(name) {
            Ok((pid, stack)) => {
                self.console.set_color(Color::LightGray, Color::Black);
                let _ = write!(self.console, "pid {}: ", pid);
                self.console.write_text(printable.as_bytes());
                let _ = write!(self.console, ", stack at {}", stack);
                self.end_line();
            }
            Err(err) => {
                log::error!("{}: {}", printable, err);
                self.console.set_color(Color::LightRed, Color::Black);
                self.console.write_text(printable.as_bytes());
                let _ = write!(self.console, ": {}", err);
                self.end_line();
            }
        }
    }

    // A record whose stack reservation fails stays Active: there is no
    // destroy path in the table.
    fn spawn(&mut self, name: &[u8]) -> Result<(Pid, PhysAddr), KernelError> {
        let pid = self.processes.create(name)?;
        let stack = self.heap.allocate(config::PROCESS_STACK_SIZE)?;
        log::info!("pid {} stack at {}", pid, stack);
        Ok((pid, stack))
    }

    /// One console line in `color`, then back to the default color.
    fn line(&mut self, color: Color, args: fmt::Arguments) {
        self.console.set_color(color, Color::Black);
        // Console writes cannot fail.
        let _ = self.console.write_fmt(args);
        self.end_line();
    }

    fn end_line(&mut self) {
        self.console.write_char(b'\n');
        self.console.set_color(Color::LightGray, Color::Black);
    }

    fn enter(&mut self, next: BootState) {
        assert!(
            self.state.can_enter(next),
            "invalid boot transition {:?} -> {:?}",
            self.state,
            next
        );
        log::debug!("boot state {:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kconsole::{BUFFER_HEIGHT, ColorCode, MemoryBuffer};
    use kmem::AllocError;
    use kproc::{MAX_PROCESSES, ProcessState};

    const HEAP_BASE: PhysAddr = PhysAddr::new(0x0020_0000);

    fn kernel(heap_size: usize) -> Kernel<MemoryBuffer> {
        Kernel::new(MemoryBuffer::new(), HeapRegion::new(HEAP_BASE, heap_size).unwrap())
    }

    fn row_text(kernel: &Kernel<MemoryBuffer>, row: usize) -> String {
        let bytes = kernel.console().buffer().row_bytes(row);
        String::from_utf8_lossy(&bytes).trim_end().to_string()
    }

    fn pid(raw: u32) -> Pid {
        Pid::new(raw).unwrap()
    }

    #[test]
    fn boot_renders_banner_processes_and_summary() {
        let mut kernel = kernel(1024 * 1024);
        kernel.run();
        kernel.finish();

        assert_eq!(row_text(&kernel, 0), format!("BumpBoot {}", env!("CARGO_PKG_VERSION")));
        assert_eq!(row_text(&kernel, 1), "heap 0x00200000..0x00300000, 1048576 bytes");
        assert_eq!(row_text(&kernel, 2), "pid 1: init, stack at 0x00200000");
        assert_eq!(row_text(&kernel, 3), "pid 2: daemon, stack at 0x00201000");
        assert_eq!(row_text(&kernel, 4), "2 of 64 process slots active");
        assert_eq!(row_text(&kernel, 5), "System halted.");
        for row in 6..BUFFER_HEIGHT {
            assert_eq!(row_text(&kernel, row), "");
        }
    }

    #[test]
    fn banner_is_white_and_body_is_default_color() {
        let mut kernel = kernel(1024 * 1024);
        kernel.run();

        let screen = kernel.console().buffer();
        assert_eq!(screen.read(0, 0).color, ColorCode::new(Color::White, Color::Black));
        assert_eq!(screen.read(2, 0).color, ColorCode::DEFAULT);
        assert_eq!(kernel.console().color(), ColorCode::DEFAULT);
    }

    #[test]
    fn boot_registers_demo_processes_and_reserves_stacks() {
        let mut kernel = kernel(1024 * 1024);
        kernel.run();

        let table = kernel.processes();
        assert_eq!(table.active_count(), 2);
        assert_eq!(table.get(pid(1)).unwrap().name().as_bytes(), b"init");
        assert_eq!(table.get(pid(2)).unwrap().name().as_bytes(), b"daemon");
        assert_eq!(table.slot(2).unwrap().state(), ProcessState::Free);

        assert_eq!(kernel.heap().allocation_count(), 2);
        assert_eq!(kernel.heap().used(), 2 * config::PROCESS_STACK_SIZE);
    }

    #[test]
    fn state_moves_entered_running_halted() {
        let mut kernel = kernel(4096);
        assert_eq!(kernel.state(), BootState::Entered);
        kernel.run();
        assert_eq!(kernel.state(), BootState::Running);
        kernel.finish();
        assert_eq!(kernel.state(), BootState::Halted);
    }

    #[test]
    #[should_panic(expected = "invalid boot transition")]
    fn halted_has_no_exits() {
        let mut kernel = kernel(4096);
        kernel.run();
        kernel.finish();
        kernel.finish();
    }

    #[test]
    #[should_panic(expected = "invalid boot transition")]
    fn cannot_halt_before_running() {
        kernel(4096).finish();
    }

    #[test]
    fn exhausted_heap_is_reported_and_boot_continues() {
        let mut kernel = kernel(config::PROCESS_STACK_SIZE + 100);
        kernel.run();
        kernel.finish();

        assert_eq!(row_text(&kernel, 2), "pid 1: init, stack at 0x00200000");
        assert_eq!(
            row_text(&kernel, 3),
            "daemon: heap exhausted: 4096 bytes requested, 100 remaining"
        );
        assert_eq!(
            kernel.console().buffer().read(3, 0).color,
            ColorCode::new(Color::LightRed, Color::Black)
        );
        assert_eq!(row_text(&kernel, 4), "2 of 64 process slots active");
        assert_eq!(row_text(&kernel, 5), "System halted.");
        assert_eq!(kernel.heap().used(), config::PROCESS_STACK_SIZE);
    }

    #[test]
    fn empty_heap_fails_every_stack() {
        let mut kernel = Kernel::new(MemoryBuffer::new(), HeapRegion::EMPTY);
        kernel.run();

        assert_eq!(row_text(&kernel, 1), "heap 0x00000000..0x00000000, 0 bytes");
        assert!(row_text(&kernel, 2).starts_with("init: heap exhausted"));
        assert!(row_text(&kernel, 3).starts_with("daemon: heap exhausted"));
        assert_eq!(kernel.heap().allocation_count(), 0);
        assert_eq!(kernel.state(), BootState::Running);
    }

    #[test]
    fn full_table_is_reported_and_boot_continues() {
        let mut kernel = kernel(1024 * 1024);
        for _ in 0..MAX_PROCESSES {
            kernel.processes.create(b"filler").unwrap();
        }
        kernel.console.initialize();

        // Direct registration bypasses `run`, which would reset the table.
        kernel.start_process(b"late");

        assert_eq!(row_text(&kernel, 0), "late: process table full (64 slots)");
        assert_eq!(kernel.heap().used(), 0);
        assert_eq!(kernel.processes().active_count(), MAX_PROCESSES);
    }

    #[test]
    fn high_bytes_in_names_fill_one_cell_each() {
        let mut kernel = kernel(1024 * 1024);
        kernel.console.initialize();

        kernel.start_process(&[b'x', 0xDB, b'y']);

        let row = kernel.console().buffer().row_bytes(0);
        let expected = b"pid 1: x\xDBy, stack at 0x00200000";
        assert_eq!(&row[..expected.len()], &expected[..]);
        assert_eq!(kernel.console().buffer().read(0, 8).ascii, 0xDB);
        assert_eq!(kernel.console().cursor(), (1, 0));
    }

    #[test]
    fn high_bytes_in_names_survive_the_error_line() {
        let mut kernel = Kernel::new(MemoryBuffer::new(), HeapRegion::EMPTY);
        kernel.console.initialize();

        kernel.start_process(&[0xC9, b'd']);

        let row = kernel.console().buffer().row_bytes(0);
        let expected = b"\xC9d: heap exhausted";
        assert_eq!(&row[..expected.len()], &expected[..]);
        assert_eq!(
            kernel.console().buffer().read(0, 0).color,
            ColorCode::new(Color::LightRed, Color::Black)
        );
    }

    static CAPTURED: std::sync::Mutex<String> = std::sync::Mutex::new(String::new());

    fn capture(args: fmt::Arguments) {
        let _ = CAPTURED.lock().unwrap().write_fmt(args);
    }

    // The only test in this crate that installs the global logger.
    #[test]
    fn summary_reports_final_state_and_usage() {
        klog::init_with_sink(capture, log::LevelFilter::Info);

        let mut kernel = kernel(1024 * 1024);
        kernel.run();
        kernel.finish();
        kernel.log_summary();

        let out = CAPTURED.lock().unwrap().clone();
        assert!(out.contains(
            "boot Halted: 8192 of 1048576 heap bytes in 2 allocations, 2 of 64 processes"
        ));
    }

    #[test]
    fn spawn_errors_keep_their_source() {
        let mut kernel = Kernel::new(MemoryBuffer::new(), HeapRegion::EMPTY);
        assert_eq!(
            kernel.spawn(b"init"),
            Err(KernelError::Alloc(AllocError::Exhausted {
                requested: config::PROCESS_STACK_SIZE,
                remaining: 0
            }))
        );
    }
}
