//! Parameter validation.
//!
//! Every operation describes its parameters as a list of [`Check`]s, in the
//! order the parameters are declared. [`Validator::validate`] evaluates them in
//! that order and stops at the first invalid one; the resulting
//! [`ValidationInfo`] renders the message reported to the caller.

mod check;
mod kinds;

pub use check::{Check, saving_invalidity};
pub use kinds::{Invalidity, Method, Parameter};

/// Collects the checks of one call.
#[derive(Debug)]
pub struct Validator<'a> {
    method: Method,
    checks: Vec<Check<'a>>,
}

impl<'a> Validator<'a> {
    /// Starts validating a call to `method`.
    #[must_use]
    pub const fn new(method: Method) -> Self {
        Self {
            method,
            checks: Vec::new(),
        }
    }

    /// Adds the next parameter.
    #[must_use]
    pub fn check(mut self, check: Check<'a>) -> Self {
        self.checks.push(check);
        self
    }

    /// The method being validated.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Evaluates the checks in order, stopping at the first invalid one.
    #[must_use]
    pub fn validate(&self) -> ValidationInfo {
        let parameters = self
            .checks
            .iter()
            .map(|check| (check.parameter(), check.rendered()))
            .collect();
        let failure = self
            .checks
            .iter()
            .map(Check::evaluate)
            .find(|(_, invalidity)| !invalidity.is_valid());

        ValidationInfo {
            method: self.method,
            parameters,
            parameter: failure.map(|(parameter, _)| parameter),
            invalidity: failure.map_or(Invalidity::None, |(_, invalidity)| invalidity),
        }
    }
}

/// Verdict of a [`Validator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationInfo {
    method: Method,
    parameters: Vec<(Parameter, String)>,
    parameter: Option<Parameter>,
    invalidity: Invalidity,
}

impl ValidationInfo {
    /// Whether every parameter passed.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.invalidity.is_valid()
    }

    /// The validated method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// The first invalid parameter.
    #[must_use]
    pub const fn invalid_parameter(&self) -> Option<Parameter> {
        self.parameter
    }

    /// Why it is invalid, [`Invalidity::None`] when valid.
    #[must_use]
    pub const fn invalidity(&self) -> Invalidity {
        self.invalidity
    }

    /// One `\t<name>: <value>` line per parameter.
    #[must_use]
    pub fn parameter_list(&self) -> String {
        self.parameters
            .iter()
            .map(|(parameter, value)| {
                let value = if value.is_empty() { "<empty>" } else { value };
                format!("\t{}: {value}", parameter.name())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The message reported for this verdict.
    #[must_use]
    pub fn message(&self) -> String {
        match self.parameter {
            Some(parameter) if !self.is_valid() => format!(
                "You're calling {}, but {} that you're passing {}. Parameters for the call:\n{}",
                self.method,
                parameter.description(),
                self.invalidity,
                self.parameter_list()
            ),
            _ => format!("Parameters for calling {} are valid.", self.method),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_the_first_invalid_parameter() {
        let info = Validator::new(Method::ImportFromAssets)
            .check(Check::Present {
                parameter: Parameter::Context,
                value: None,
            })
            .check(Check::Text {
                parameter: Parameter::FileName,
                value: String::new(),
            })
            .validate();

        assert!(!info.is_valid());
        assert_eq!(info.invalid_parameter(), Some(Parameter::Context));
        assert_eq!(info.invalidity(), Invalidity::IsNull);
    }

    #[test]
    fn message_lists_every_parameter() {
        let info = Validator::new(Method::SaveTextFile)
            .check(Check::Present {
                parameter: Parameter::Text,
                value: Some("hello".to_owned()),
            })
            .check(Check::Destination {
                parameter: Parameter::DestinationPath,
                path: String::new(),
                folder: false,
            })
            .validate();

        assert_eq!(
            info.message(),
            "You're calling save_text_file(text, destination, append), but the destination path \
             that you're passing is empty. Parameters for the call:\n\ttext: hello\n\tdestination: <empty>"
        );
    }

    #[test]
    fn valid_calls() {
        let info = Validator::new(Method::LoadObject)
            .check(Check::Present {
                parameter: Parameter::Type,
                value: Some("Note".to_owned()),
            })
            .validate();
        assert!(info.is_valid());
        assert_eq!(info.invalid_parameter(), None);
        assert_eq!(
            info.message(),
            "Parameters for calling load_object(origin) are valid."
        );
    }
}
