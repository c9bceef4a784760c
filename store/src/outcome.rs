use crate::{Invalidity, StoreError};

/// Result of a storage operation: a success flag, an optional payload and a
/// human-readable message.
///
/// A failed outcome never carries a payload. Outcomes of calls rejected during
/// validation also carry the [`Invalidity`] that caused the rejection.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Outcome<T> {
    successful: bool,
    payload: Option<T>,
    message: String,
    invalidity: Option<Invalidity>,
}

impl<T> Outcome<T> {
    pub(crate) const fn success(payload: Option<T>, message: String) -> Self {
        Self {
            successful: true,
            payload,
            message,
            invalidity: None,
        }
    }

    pub(crate) const fn failure(message: String) -> Self {
        Self {
            successful: false,
            payload: None,
            message,
            invalidity: None,
        }
    }

    pub(crate) const fn rejection(message: String, invalidity: Invalidity) -> Self {
        Self {
            successful: false,
            payload: None,
            message,
            invalidity: Some(invalidity),
        }
    }

    /// Runs `step`, where an early `Err` carries the failed outcome.
    ///
    /// Lets operations short-circuit with `?` on steps that produce outcomes.
    pub fn settle(step: impl FnOnce() -> Result<Self, Self>) -> Self {
        step().unwrap_or_else(|failed| failed)
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn is_successful(&self) -> bool {
        self.successful
    }

    /// The payload, if the operation produced one.
    #[must_use]
    pub const fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Takes the payload.
    #[must_use]
    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    /// The success or failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Why the call was rejected, when it failed validation.
    #[must_use]
    pub const fn invalidity(&self) -> Option<Invalidity> {
        self.invalidity
    }

    /// Maps the payload, keeping the flag and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            successful: self.successful,
            payload: self.payload.map(f),
            message: self.message,
            invalidity: self.invalidity,
        }
    }

    /// Converts into a [`Result`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidParameter`] for rejected calls and
    /// [`StoreError::Failed`] for any other failure.
    pub fn into_result(self) -> Result<Option<T>, StoreError> {
        match (self.successful, self.invalidity) {
            (true, _) => Ok(self.payload),
            (false, Some(invalidity)) => Err(StoreError::InvalidParameter {
                invalidity,
                message: self.message,
            }),
            (false, None) => Err(StoreError::Failed(self.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_carry_no_payload() {
        let outcome: Outcome<u8> = Outcome::failure("nope".to_owned());
        assert!(!outcome.is_successful());
        assert_eq!(outcome.payload(), None);
        assert_eq!(
            outcome.into_result(),
            Err(StoreError::Failed("nope".to_owned()))
        );
    }

    #[test]
    fn rejections_keep_their_invalidity() {
        let outcome: Outcome<u8> = Outcome::rejection("bad".to_owned(), Invalidity::IsEmpty);
        assert_eq!(outcome.invalidity(), Some(Invalidity::IsEmpty));
        assert!(matches!(
            outcome.into_result(),
            Err(StoreError::InvalidParameter {
                invalidity: Invalidity::IsEmpty,
                ..
            })
        ));
    }

    #[test]
    fn map_keeps_message() {
        let outcome = Outcome::success(Some(2), "done".to_owned()).map(|n| n * 2);
        assert_eq!(outcome.payload(), Some(&4));
        assert_eq!(outcome.message(), "done");
    }
}
