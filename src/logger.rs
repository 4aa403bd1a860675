//! Logging and verbosity control.
//!
//! Provides a global logger with three verbosity levels:
//! - Quiet: Only result values output
//! - Normal: Labelled results and progress messages (default)
//! - Verbose: Timestamped colored logs with details
//!
//! The free functions are silent until [`Logger::init`] has been called, so
//! the library can log freely without forcing output on its callers.

use std::sync::OnceLock;
use std::time::Instant;

/// Verbosity level for controlling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Only result values output
    Quiet,
    /// Labelled results without prefixes (default)
    Normal,
    /// Timestamped colored logs with details
    Verbose,
}

/// Global logger instance.
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Global start time for elapsed calculations.
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Thread-safe logger for controlling application output.
#[derive(Debug)]
pub struct Logger {
    level: VerbosityLevel,
    colors_enabled: bool,
}

impl Logger {
    /// Initialize the global logger with the specified verbosity level.
    ///
    /// Returns false if a logger was already installed; the first one wins.
    pub fn init(level: VerbosityLevel, no_color: bool) -> bool {
        let colors_enabled = !no_color
            && std::env::var("NO_COLOR").is_err()
            && atty::is(atty::Stream::Stdout);

        START_TIME.set(Instant::now()).ok();
        LOGGER
            .set(Logger {
                level,
                colors_enabled,
            })
            .is_ok()
    }

    /// Get the global logger instance, if initialized.
    pub fn instance() -> Option<&'static Logger> {
        LOGGER.get()
    }

    /// Get elapsed time since logger init.
    fn elapsed(&self) -> f64 {
        START_TIME
            .get()
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Returns true if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.level == VerbosityLevel::Verbose
    }

    /// Returns true if quiet mode is enabled.
    pub fn is_quiet(&self) -> bool {
        self.level == VerbosityLevel::Quiet
    }

    /// Returns the current verbosity level.
    pub fn level(&self) -> VerbosityLevel {
        self.level
    }

    /// Format a message with level prefix and timestamp (verbose mode).
    fn format_with_level(&self, level: &str, msg: &str) -> String {
        let elapsed = self.elapsed();
        if self.colors_enabled {
            let level_color = match level {
                "ERROR" => "\x1b[31m",
                "WARN" => "\x1b[33m",
                "INFO" => "\x1b[34m",
                "DEBUG" => "\x1b[90m",
                _ => "",
            };
            format!(
                "\x1b[90m[{:.2}s]\x1b[0m {}[{}]\x1b[0m {}",
                elapsed, level_color, level, msg
            )
        } else {
            format!("[{:.2}s] [{}] {}", elapsed, level, msg)
        }
    }

    /// Log an error message (always displayed).
    pub fn error(&self, msg: &str) {
        if self.level == VerbosityLevel::Verbose {
            eprintln!("{}", self.format_with_level("ERROR", msg));
        } else {
            eprintln!("Error: {}", msg);
        }
    }

    /// Log a warning message (normal and verbose modes).
    pub fn warn(&self, msg: &str) {
        match self.level {
            VerbosityLevel::Quiet => {}
            VerbosityLevel::Normal => println!("{}", msg),
            VerbosityLevel::Verbose => println!("{}", self.format_with_level("WARN", msg)),
        }
    }

    /// Render a result line for the current level.
    fn format_output(&self, label: &str, value: &str) -> String {
        match self.level {
            VerbosityLevel::Quiet => value.to_string(),
            VerbosityLevel::Normal => format!("{}: {}", label, value),
            VerbosityLevel::Verbose => {
                self.format_with_level("INFO", &format!("{}: {}", label, value))
            }
        }
    }

    /// Output a result (quiet: just the value, normal: labelled, verbose: with prefix).
    pub fn output(&self, label: &str, value: &str) {
        println!("{}", self.format_output(label, value));
    }

    /// Log an info message (displayed in normal mode and above).
    pub fn info(&self, msg: &str) {
        match self.level {
            VerbosityLevel::Quiet => {}
            VerbosityLevel::Normal => println!("{}", msg),
            VerbosityLevel::Verbose => println!("{}", self.format_with_level("INFO", msg)),
        }
    }

    /// Log a debug message (displayed only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.level == VerbosityLevel::Verbose {
            println!("{}", self.format_with_level("DEBUG", msg));
        }
    }
}

/// Log an error message (always displayed once initialized).
pub fn error(msg: &str) {
    if let Some(logger) = Logger::instance() {
        logger.error(msg);
    }
}

/// Log a warning message (normal and verbose modes).
pub fn warn(msg: &str) {
    if let Some(logger) = Logger::instance() {
        logger.warn(msg);
    }
}

/// Output a labelled result.
pub fn output(label: &str, value: &str) {
    if let Some(logger) = Logger::instance() {
        logger.output(label, value);
    }
}

/// Log an info message (displayed in normal mode and above).
pub fn info(msg: &str) {
    if let Some(logger) = Logger::instance() {
        logger.info(msg);
    }
}

/// Log a debug message (displayed only in verbose mode).
pub fn debug(msg: &str) {
    if let Some(logger) = Logger::instance() {
        logger.debug(msg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger(level: VerbosityLevel) -> Logger {
        Logger {
            level,
            colors_enabled: false,
        }
    }

    #[test]
    fn test_verbosity_level_ordering() {
        assert!((VerbosityLevel::Quiet as i32) < (VerbosityLevel::Normal as i32));
        assert!((VerbosityLevel::Normal as i32) < (VerbosityLevel::Verbose as i32));
    }

    #[test]
    fn test_logger_is_verbose() {
        assert!(!logger(VerbosityLevel::Quiet).is_verbose());
        assert!(!logger(VerbosityLevel::Normal).is_verbose());
        assert!(logger(VerbosityLevel::Verbose).is_verbose());
    }

    #[test]
    fn test_logger_is_quiet() {
        assert!(logger(VerbosityLevel::Quiet).is_quiet());
        assert!(!logger(VerbosityLevel::Normal).is_quiet());
        assert!(!logger(VerbosityLevel::Verbose).is_quiet());
    }

    #[test]
    fn test_logger_level() {
        assert_eq!(logger(VerbosityLevel::Quiet).level(), VerbosityLevel::Quiet);
    }

    #[test]
    fn test_output_formatting() {
        assert_eq!(logger(VerbosityLevel::Quiet).format_output("Range", "12"), "12");
        assert_eq!(
            logger(VerbosityLevel::Normal).format_output("Range", "12"),
            "Range: 12"
        );
        let verbose = logger(VerbosityLevel::Verbose).format_output("Range", "12");
        assert!(verbose.contains("[INFO] Range: 12"));
    }

    #[test]
    fn test_elapsed_returns_value() {
        let logger = logger(VerbosityLevel::Verbose);
        assert!(logger.elapsed() >= 0.0);
    }

    #[test]
    fn test_free_functions_do_not_panic_when_uninitialized() {
        // Unit tests never call Logger::init.
        debug("walk started");
        info("walk finished");
        assert!(Logger::instance().is_none());
    }
}
