#![deny(missing_docs)]
//! Shared logging utilities for the follow-up queue workspace.
//!
//! This crate provides the `engine_*` logging macros used across the codebase
//! and a minimal test initializer for the global logger. Every line emitted
//! through the macros is stamped with the reconciliation pulse that produced
//! it, so a log of one session reads as a sequence of pulses.

use std::cell::Cell;

#[doc(hidden)]
pub use log;

thread_local! {
    /// Thread-local storage for the sequence number of the running pulse.
    static PULSE_SEQ: Cell<u64> = const { Cell::new(0) };
}

/// Sets the pulse sequence number for the current thread.
/// The engine calls this once at the start of every pulse.
pub fn set_pulse_seq(seq: u64) {
    PULSE_SEQ.with(|v| v.set(seq));
}

/// Retrieves the pulse sequence number for the current thread.
/// Returns 0 before the first pulse.
pub fn pulse_seq() -> u64 {
    PULSE_SEQ.with(|v| v.get())
}

/// Logs a trace-level message prefixed with the current pulse.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!("[pulse {}] {}", $crate::pulse_seq(), format_args!($($arg)*));
    }};
}

/// Logs an info-level message prefixed with the current pulse.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        $crate::log::info!("[pulse {}] {}", $crate::pulse_seq(), format_args!($($arg)*));
    }};
}

/// Logs a debug-level message prefixed with the current pulse.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!("[pulse {}] {}", $crate::pulse_seq(), format_args!($($arg)*));
    }};
}

/// Logs a warn-level message prefixed with the current pulse.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!("[pulse {}] {}", $crate::pulse_seq(), format_args!($($arg)*));
    }};
}

/// Logs an error-level message prefixed with the current pulse.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        $crate::log::error!("[pulse {}] {}", $crate::pulse_seq(), format_args!($($arg)*));
    }};
}

/// Third-party modules whose debug output drowns the engine's own lines.
const QUIET_MODULES: &[&str] = &["selectors", "html5ever"];

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        test_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn test_config() -> simplelog::Config {
    let mut builder = simplelog::ConfigBuilder::new();
    for module in QUIET_MODULES.iter().copied() {
        builder.add_filter_ignore_str(module);
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulse_seq_is_thread_local() {
        set_pulse_seq(7);
        assert_eq!(pulse_seq(), 7);
        let other = std::thread::spawn(pulse_seq).join().unwrap_or(u64::MAX);
        assert_eq!(other, 0);
    }

    #[test]
    fn test_logger_stays_below_trace() {
        initialize_for_tests();
        assert!(log::max_level() <= log::LevelFilter::Debug);
        assert!(!log::log_enabled!(log::Level::Trace));
    }

    #[test]
    fn macros_expand_without_logger() {
        set_pulse_seq(3);
        engine_trace!("trace {}", 1);
        engine_debug!("debug {}", 2);
        engine_info!("info");
        engine_warn!("warn {value}", value = 4);
        engine_error!("error");
    }
}
