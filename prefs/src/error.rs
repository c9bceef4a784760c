use thiserror::Error;

/// Errors reported by a [`Preferences`](crate::Preferences) backend.
#[derive(Debug, Error)]
pub enum PrefsError {
    /// The backend failed.
    #[error("preferences backend error: {0}")]
    Backend(String),

    /// A JNI call failed.
    #[cfg(target_os = "android")]
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),
}
