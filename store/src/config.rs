use serde::{Deserialize, Serialize};

/// Behaviour switches of a [`Storage`](crate::Storage).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log every outcome message.
    pub logging_enabled: bool,
    /// Panic with the validation message when an operation receives invalid parameters.
    pub throw_on_invalid: bool,
}

impl Config {
    /// Sets [`Config::logging_enabled`].
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.logging_enabled = enabled;
        self
    }

    /// Sets [`Config::throw_on_invalid`].
    #[must_use]
    pub const fn with_throw_on_invalid(mut self, enabled: bool) -> Self {
        self.throw_on_invalid = enabled;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging_enabled: true,
            throw_on_invalid: true,
        }
    }
}
