#![deny(missing_docs)]
//! Shared logging utilities for the Ghibli browser workspace.
//!
//! Every crate logs through the `ghibli_*` macros so the backend can be swapped
//! in one place. The macros forward to the `log` facade; the binary decides
//! where records end up (see `ghibli_app`'s platform logging).

use log::LevelFilter;

/// Environment variable that overrides the default log level.
pub const LEVEL_ENV: &str = "GHIBLI_LOG";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! ghibli_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! ghibli_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! ghibli_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! ghibli_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! ghibli_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level used when nothing else is configured.
///
/// Debug builds log at `Debug`, release builds at `Info`. A valid level name in
/// `GHIBLI_LOG` (`off`, `error`, `warn`, `info`, `debug`, `trace`) wins.
pub fn default_level() -> LevelFilter {
    if let Some(level) = std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| parse_level(&raw))
    {
        return level;
    }
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Parses a level name case-insensitively, ignoring surrounding whitespace.
pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse::<LevelFilter>().ok()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(
        default_level(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}
