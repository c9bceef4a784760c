use std::fmt;

use memkit_fs::LOG_TARGET;

/// Emits outcome messages through [`log`] when enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Logger {
    enabled: bool,
}

impl Logger {
    /// Creates a logger.
    #[must_use]
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether messages are emitted.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs `message` at info level on success and at error level otherwise.
    pub fn log(&self, message: &str, successful: bool) {
        if !self.enabled {
            return;
        }
        if successful {
            log::info!(target: LOG_TARGET, "{message}");
        } else {
            log::error!(target: LOG_TARGET, "{message}");
        }
    }

    /// Logs the underlying cause of a failure at debug level.
    pub fn cause(&self, cause: &dyn fmt::Display) {
        if self.enabled {
            log::debug!(target: LOG_TARGET, "caused by: {cause}");
        }
    }
}
