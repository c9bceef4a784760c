use thiserror::Error;

use crate::Invalidity;

/// Error form of a failed [`Outcome`](crate::Outcome).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The operation was called with an invalid parameter.
    #[error("{message}")]
    InvalidParameter {
        /// Why the parameter was rejected.
        invalidity: Invalidity,
        /// The full validation message.
        message: String,
    },
    /// The operation was attempted and failed.
    #[error("{0}")]
    Failed(String),
}
