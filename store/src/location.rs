use std::{borrow::Cow, fmt, path::PathBuf};

use memkit_fs::Path;

use crate::Parameter;

/// Where an operation reads or writes: a plain path or a built [`Path`].
///
/// Write operations create the folders of a built [`Path`] before writing.
#[derive(Debug, Clone)]
pub enum Location<'a> {
    /// A path given as text.
    Raw(Cow<'a, str>),
    /// A path made with [`Path::builder`].
    Built(&'a Path),
}

impl Location<'_> {
    /// The built path, if this is one.
    #[must_use]
    pub const fn path_object(&self) -> Option<&Path> {
        match self {
            Self::Raw(_) => None,
            Self::Built(path) => Some(path),
        }
    }

    /// Parameter blamed when this is an invalid destination.
    #[must_use]
    pub const fn destination_parameter(&self) -> Parameter {
        match self {
            Self::Raw(_) => Parameter::DestinationPath,
            Self::Built(_) => Parameter::DestinationPathObject,
        }
    }

    /// Parameter blamed when this is an invalid origin.
    #[must_use]
    pub const fn origin_parameter(&self) -> Parameter {
        match self {
            Self::Raw(_) => Parameter::OriginPath,
            Self::Built(_) => Parameter::OriginPathObject,
        }
    }
}

impl fmt::Display for Location<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(path) => f.write_str(path),
            Self::Built(path) => fmt::Display::fmt(path, f),
        }
    }
}

impl<'a> From<&'a str> for Location<'a> {
    fn from(path: &'a str) -> Self {
        Self::Raw(Cow::Borrowed(path))
    }
}

impl<'a> From<&'a String> for Location<'a> {
    fn from(path: &'a String) -> Self {
        Self::Raw(Cow::Borrowed(path))
    }
}

impl From<String> for Location<'_> {
    fn from(path: String) -> Self {
        Self::Raw(Cow::Owned(path))
    }
}

impl<'a> From<&'a std::path::Path> for Location<'a> {
    fn from(path: &'a std::path::Path) -> Self {
        Self::Raw(path.to_string_lossy())
    }
}

impl<'a> From<&'a PathBuf> for Location<'a> {
    fn from(path: &'a PathBuf) -> Self {
        Self::from(path.as_path())
    }
}

impl<'a> From<&'a Path> for Location<'a> {
    fn from(path: &'a Path) -> Self {
        Self::Built(path)
    }
}
