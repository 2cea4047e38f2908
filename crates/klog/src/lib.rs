//! Kernel logging subsystem.
//!
//! Library crates log through the `log` facade and never see the hardware.
//! This crate supplies the backend: a [`log::Log`] implementation that
//! formats each record and hands it to a [`Sink`]. On bare metal the sink
//! is the COM1 UART ([`init`]); a hosted build can pass any function that
//! accepts [`fmt::Arguments`] ([`init_with_sink`]).
//!
//! Nothing here allocates, so logging works from the first instruction of
//! the boot sequence.
#![cfg_attr(not(test), no_std)]

use core::fmt;

use log::{Level, LevelFilter, Log, Metadata, Record};
use spin::Once;

/// Destination for formatted log output.
pub type Sink = fn(fmt::Arguments);

static SINK: Once<Sink> = Once::new();
static LOGGER: KernelLogger = KernelLogger;

/// Fixed-width level tag, so messages line up in the serial console.
pub fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => " INFO",
        Level::Warn => " WARN",
        Level::Error => "ERROR",
    }
}

/// ANSI color escape for a level.
pub fn level_color(level: Level) -> &'static str {
    match level {
        Level::Trace => "\x1b[90m", // Gray
        Level::Debug => "\x1b[36m", // Cyan
        Level::Info => "\x1b[32m",  // Green
        Level::Warn => "\x1b[33m",  // Yellow
        Level::Error => "\x1b[31m", // Red
    }
}

/// The `log::Log` backend. Stateless; the sink lives in [`SINK`].
struct KernelLogger;

impl Log for KernelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Some(sink) = SINK.get() {
            sink(format_args!(
                "{}[{}]\x1b[0m {}: {}\n",
                level_color(record.level()),
                level_tag(record.level()),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {}
}

/// Initialize the kernel logger on COM1.
///
/// Brings up the UART and installs it as the sink. Safe to call more than
/// once; only the first call installs a sink.
pub fn init(level: LevelFilter) {
    khal::serial::init();
    init_with_sink(khal::serial::write_fmt, level);
}

/// Install `sink` as the log destination and register the `log` backend.
pub fn init_with_sink(sink: Sink, level: LevelFilter) {
    SINK.call_once(|| sink);
    // A second registration fails harmlessly; the backend is the same
    // static either way.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}

/// Print to the sink without formatting a log record.
///
/// Dropped silently before a sink is installed.
pub fn print(args: fmt::Arguments) {
    if let Some(sink) = SINK.get() {
        sink(args);
    }
}

/// Print without newline
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::print(format_args!($($arg)*))
    };
}

/// Print with newline
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => {{
        $crate::print(format_args!($($arg)*));
        $crate::print(format_args!("\n"));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::String;
    use std::sync::Mutex;

    static CAPTURED: Mutex<String> = Mutex::new(String::new());

    fn capture(args: fmt::Arguments) {
        use core::fmt::Write;
        let _ = CAPTURED.lock().unwrap().write_fmt(args);
    }

    #[test]
    fn tags_are_fixed_width() {
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert_eq!(level_tag(level).len(), 5);
        }
    }

    // One test owns the global logger so installation order is deterministic.
    #[test]
    fn records_reach_the_installed_sink() {
        init_with_sink(capture, LevelFilter::Info);

        log::info!(target: "kproc", "created pid {}", 7);
        log::debug!(target: "kproc", "filtered out");
        println!("raw {}", "line");

        let out = CAPTURED.lock().unwrap().clone();
        assert!(out.contains("[ INFO]\x1b[0m kproc: created pid 7\n"));
        assert!(!out.contains("filtered out"));
        assert!(out.ends_with("raw line\n"));
    }
}
