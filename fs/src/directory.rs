use std::{fmt, path::PathBuf, str::FromStr};

use crate::{Context, LOG_TARGET};

/// The predefined directory types found in external storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExternalDirectoryType {
    /// Documents created by the user.
    Documents,
    /// Pictures and videos taken with the camera.
    Dcim,
    /// Audio files to be used as alarms.
    Alarms,
    /// Files downloaded by the user.
    Downloads,
    /// Movies available to the user.
    Movies,
    /// Music available to the user.
    Music,
    /// Audio files to be used as notification sounds.
    Notifications,
    /// Pictures available to the user.
    Pictures,
    /// Podcasts available to the user.
    Podcasts,
    /// Audio files to be used as ringtones.
    Ringtones,
}

impl ExternalDirectoryType {
    /// Every directory type, in declaration order.
    pub const ALL: [Self; 10] = [
        Self::Documents,
        Self::Dcim,
        Self::Alarms,
        Self::Downloads,
        Self::Movies,
        Self::Music,
        Self::Notifications,
        Self::Pictures,
        Self::Podcasts,
        Self::Ringtones,
    ];

    /// The lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Dcim => "dcim",
            Self::Alarms => "alarms",
            Self::Downloads => "downloads",
            Self::Movies => "movies",
            Self::Music => "music",
            Self::Notifications => "notifications",
            Self::Pictures => "pictures",
            Self::Podcasts => "podcasts",
            Self::Ringtones => "ringtones",
        }
    }

    /// The directory name the platform uses for this type (`Environment.DIRECTORY_*`).
    #[must_use]
    pub const fn platform_name(self) -> &'static str {
        match self {
            Self::Documents => "Documents",
            Self::Dcim => "DCIM",
            Self::Alarms => "Alarms",
            Self::Downloads => "Download",
            Self::Movies => "Movies",
            Self::Music => "Music",
            Self::Notifications => "Notifications",
            Self::Pictures => "Pictures",
            Self::Podcasts => "Podcasts",
            Self::Ringtones => "Ringtones",
        }
    }
}

impl fmt::Display for ExternalDirectoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when parsing an unknown [`ExternalDirectoryType`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown external directory type: {0}")]
pub struct UnknownDirectoryType(pub String);

impl FromStr for ExternalDirectoryType {
    type Err = UnknownDirectoryType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDirectoryType(s.to_owned()))
    }
}

/// Root directory a [`Path`](crate::Path) is built on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StorageDirectory {
    /// The application's private files directory.
    PrivateInternal,
    /// The application's private directory on external storage.
    PrivateExternal,
    /// The root of the shared external storage.
    PublicExternal,
    /// A shared predefined directory on external storage.
    PredefinedPublic(ExternalDirectoryType),
    /// A predefined directory inside the application's private external directory.
    PredefinedPrivate(ExternalDirectoryType),
    /// The file backing the named database.
    Database(String),
}

impl StorageDirectory {
    /// Whether this root lives on external storage.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        !matches!(self, Self::PrivateInternal | Self::Database(_))
    }

    /// Resolves the root through `context`.
    ///
    /// External roots resolve to `None` when external storage is not available.
    pub fn resolve(&self, context: &dyn Context) -> Option<PathBuf> {
        if self.is_external() && !context.external_storage_state().is_available() {
            log::error!(target: LOG_TARGET, "External memory is not available, cannot resolve {self}.");
            return None;
        }

        match self {
            Self::PrivateInternal => context.files_dir(),
            Self::PrivateExternal => context.external_files_dir(None),
            Self::PublicExternal => context.external_storage_dir(),
            Self::PredefinedPublic(kind) => context.external_public_dir(*kind),
            Self::PredefinedPrivate(kind) => context.external_files_dir(Some(*kind)),
            Self::Database(name) => context.database_path(name),
        }
    }
}

impl fmt::Display for StorageDirectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrivateInternal => f.write_str("private internal storage"),
            Self::PrivateExternal => f.write_str("private external storage"),
            Self::PublicExternal => f.write_str("public external storage"),
            Self::PredefinedPublic(kind) => write!(f, "public {kind} directory"),
            Self::PredefinedPrivate(kind) => write!(f, "private {kind} directory"),
            Self::Database(name) => write!(f, "database {name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_type_name() {
        for kind in ExternalDirectoryType::ALL {
            assert_eq!(kind.name().parse::<ExternalDirectoryType>(), Ok(kind));
        }
        assert_eq!("DCIM".parse(), Ok(ExternalDirectoryType::Dcim));
        assert!("wallpapers".parse::<ExternalDirectoryType>().is_err());
    }

    #[test]
    fn downloads_and_ringtones_keep_their_own_directory() {
        assert_eq!(ExternalDirectoryType::Downloads.platform_name(), "Download");
        assert_eq!(ExternalDirectoryType::Ringtones.platform_name(), "Ringtones");
    }
}
