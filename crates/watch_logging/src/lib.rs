#![deny(missing_docs)]
//! Shared logging utilities for the jobwatch workspace.
//!
//! Provides the `watch_*` logging macros used across the codebase and a
//! minimal test initializer for the global logger. Each macro stamps the
//! line with the current poll cycle so interleaved session output stays
//! readable.

use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide poll-cycle number. Atomic rather than thread-local because a
/// session task may migrate between runtime workers across await points.
static POLL_CYCLE: AtomicU64 = AtomicU64::new(0);

/// Sets the poll-cycle number.
/// A polling session calls this once at the start of every cycle.
pub fn set_poll_cycle(cycle: u64) {
    POLL_CYCLE.store(cycle, Ordering::Relaxed);
}

/// Retrieves the poll-cycle number.
/// Returns 0 if no cycle has been recorded yet.
pub fn current_poll_cycle() -> u64 {
    POLL_CYCLE.load(Ordering::Relaxed)
}

/// Logs a trace-level message stamped with the current poll cycle.
#[macro_export]
macro_rules! watch_trace {
    ($($arg:tt)*) => {{
        log::trace!("[cycle {}] {}", $crate::current_poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message stamped with the current poll cycle.
#[macro_export]
macro_rules! watch_info {
    ($($arg:tt)*) => {{
        log::info!("[cycle {}] {}", $crate::current_poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message stamped with the current poll cycle.
#[macro_export]
macro_rules! watch_debug {
    ($($arg:tt)*) => {{
        log::debug!("[cycle {}] {}", $crate::current_poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message stamped with the current poll cycle.
#[macro_export]
macro_rules! watch_warn {
    ($($arg:tt)*) => {{
        log::warn!("[cycle {}] {}", $crate::current_poll_cycle(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message stamped with the current poll cycle.
#[macro_export]
macro_rules! watch_error {
    ($($arg:tt)*) => {{
        log::error!("[cycle {}] {}", $crate::current_poll_cycle(), format_args!($($arg)*));
    }};
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
