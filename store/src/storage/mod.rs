use std::{fmt, sync::Arc};

use memkit_fs::{Context, Path, PathBuilder};

use crate::{
    Check, Config, Location, Logger, Outcome, ValidationInfo, Validator,
    messages::{FAILED, NO_CONTEXT, fill},
};

mod files;
mod folders;

/// Entry point of every storage operation.
///
/// Operations validate their parameters, create the folders of built
/// [`Path`] destinations, perform their I/O and report an [`Outcome`]. Invalid
/// parameters panic with the validation message when
/// [`Config::throw_on_invalid`] is set and produce a failed outcome otherwise.
#[derive(Debug, Clone)]
pub struct Storage {
    config: Config,
    logger: Logger,
    context: Option<Arc<dyn Context>>,
}

impl Default for Storage {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Storage {
    /// Creates a storage without a host context.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self {
            config,
            logger: Logger::new(config.logging_enabled),
            context: None,
        }
    }

    /// Attaches the host context used by asset, database, uri and path operations.
    #[must_use]
    pub fn with_context(mut self, context: Arc<dyn Context>) -> Self {
        self.context = Some(context);
        self
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// The logger outcome messages go through.
    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    /// The host context, if one was attached.
    #[must_use]
    pub fn context(&self) -> Option<&dyn Context> {
        self.context.as_deref()
    }

    /// Starts building a [`Path`] through the attached context.
    #[must_use]
    pub fn path(&self) -> Option<PathBuilder<'_>> {
        self.context().map(Path::builder)
    }

    /// Successful outcome.
    pub fn succeed<T>(&self, payload: Option<T>, message: String) -> Outcome<T> {
        self.logger.log(&message, true);
        Outcome::success(payload, message)
    }

    /// Failed outcome.
    pub fn fail<T>(&self, message: String) -> Outcome<T> {
        self.logger.log(&message, false);
        Outcome::failure(message)
    }

    /// Failed outcome caused by `cause`.
    pub fn fail_with<T>(&self, message: String, cause: &dyn fmt::Display) -> Outcome<T> {
        self.logger.cause(cause);
        self.fail(message)
    }

    /// Outcome of a call whose parameters failed validation.
    ///
    /// # Panics
    ///
    /// Panics with the validation message when [`Config::throw_on_invalid`] is set.
    pub fn reject<T>(&self, info: &ValidationInfo) -> Outcome<T> {
        let message = info.message();
        self.logger.log(&message, false);
        assert!(!self.config.throw_on_invalid, "{message}");
        Outcome::rejection(message, info.invalidity())
    }

    /// Runs `validator`, rejecting the call when a parameter is invalid.
    ///
    /// # Errors
    ///
    /// Returns the rejected outcome.
    pub fn validate<T>(&self, validator: &Validator<'_>) -> Result<(), Outcome<T>> {
        let info = validator.validate();
        if info.is_valid() {
            Ok(())
        } else {
            Err(self.reject(&info))
        }
    }

    /// Validates a call that reads from `origin`, checked after the other parameters.
    ///
    /// # Errors
    ///
    /// Returns the rejected outcome.
    pub fn prepare_origin<T>(
        &self,
        validator: Validator<'_>,
        origin: &Location<'_>,
    ) -> Result<String, Outcome<T>> {
        let path = origin.to_string();
        let validator = validator.check(Check::Origin {
            parameter: origin.origin_parameter(),
            path: path.clone(),
        });
        self.validate(&validator)?;
        Ok(path)
    }

    /// Validates a call that writes to `destination`, checked after the other
    /// parameters, and creates the folders of a built destination.
    ///
    /// # Errors
    ///
    /// Returns the rejected outcome, or a failed one when the folders cannot be created.
    pub fn prepare_destination<T>(
        &self,
        validator: Validator<'_>,
        destination: &Location<'_>,
        folder: bool,
        action: &str,
    ) -> Result<String, Outcome<T>> {
        let method = validator.method();
        let path = destination.to_string();

        let Some(built) = destination.path_object() else {
            let validator = validator.check(Check::Destination {
                parameter: destination.destination_parameter(),
                path: path.clone(),
                folder,
            });
            self.validate(&validator)?;
            return Ok(path);
        };

        let validator = validator.check(Check::Present {
            parameter: destination.destination_parameter(),
            value: Some(built.to_string()),
        });
        self.validate(&validator)?;
        if !self.create_path(built).is_successful() {
            return Err(self.fail(fill(FAILED, &[action])));
        }
        self.validate(&Validator::new(method).check(Check::Destination {
            parameter: destination.destination_parameter(),
            path: path.clone(),
            folder,
        }))?;
        Ok(path)
    }

    /// The attached context, or a failed outcome for `action`.
    ///
    /// # Errors
    ///
    /// Returns a failed outcome when no context is attached.
    pub fn require_context<T>(&self, action: &str) -> Result<&dyn Context, Outcome<T>> {
        self.context()
            .ok_or_else(|| self.fail(fill(NO_CONTEXT, &[action])))
    }
}

