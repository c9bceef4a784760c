use std::{
    fmt,
    fs::{self, File},
    io::{self, Read},
    path::{Path, PathBuf},
};

use url::Url;

use crate::ExternalDirectoryType;

/// Mount state of the external storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageState {
    /// Mounted with read and write access.
    #[default]
    Mounted,
    /// Mounted with read-only access.
    MountedReadOnly,
    /// Not present.
    Removed,
    /// Present but not mounted.
    Unmounted,
    /// Any other state reported by the platform.
    Unknown,
}

impl StorageState {
    /// Maps the strings returned by `Environment.getExternalStorageState()`.
    #[must_use]
    pub fn from_platform(state: &str) -> Self {
        match state {
            "mounted" => Self::Mounted,
            "mounted_ro" => Self::MountedReadOnly,
            "removed" => Self::Removed,
            "unmounted" => Self::Unmounted,
            _ => Self::Unknown,
        }
    }

    /// External storage can at least be read.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Mounted | Self::MountedReadOnly)
    }
}

/// Host environment the storage roots are resolved from.
///
/// On Android this is the application `Context`; elsewhere it is whatever the
/// application considers its sandbox. Directory getters return `None` when the
/// root is not available.
pub trait Context: Send + Sync + fmt::Debug {
    /// Private internal files directory.
    fn files_dir(&self) -> Option<PathBuf>;

    /// Private directory on external storage, or one of its predefined subdirectories.
    fn external_files_dir(&self, kind: Option<ExternalDirectoryType>) -> Option<PathBuf>;

    /// Root of the shared external storage.
    fn external_storage_dir(&self) -> Option<PathBuf>;

    /// Shared predefined directory on external storage.
    fn external_public_dir(&self, kind: ExternalDirectoryType) -> Option<PathBuf>;

    /// Full path of the file backing the named database.
    fn database_path(&self, name: &str) -> Option<PathBuf>;

    /// Current state of the external storage.
    fn external_storage_state(&self) -> StorageState;

    /// Opens a file bundled with the application.
    ///
    /// # Errors
    ///
    /// Returns an error if the asset does not exist or cannot be opened.
    fn open_asset(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;

    /// Opens the resource a URI refers to.
    ///
    /// Returns `Ok(None)` when the URI scheme is not understood. The default
    /// implementation handles `file://` URIs only.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be opened.
    fn open_uri(&self, uri: &Url) -> io::Result<Option<Box<dyn Read + '_>>> {
        if uri.scheme() != "file" {
            return Ok(None);
        }
        let Ok(path) = uri.to_file_path() else {
            return Ok(None);
        };
        let file = File::open(path)?;
        Ok(Some(Box::new(file)))
    }
}

/// A [`Context`] rooted at a single directory.
///
/// Every storage root lives under `root`:
///
/// | root                | location                        |
/// |---------------------|---------------------------------|
/// | files               | `root/files`                    |
/// | private external    | `root/external/files[/<Type>]`  |
/// | public external     | `root/storage[/<Type>]`         |
/// | databases           | `root/databases/<name>`         |
/// | assets              | `root/assets`                   |
///
/// Directory roots are created on first resolution, the database directory is not.
#[derive(Debug, Clone)]
pub struct SandboxContext {
    root: PathBuf,
    external_state: StorageState,
}

impl SandboxContext {
    /// Creates a context rooted at `root`, with external storage mounted.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            external_state: StorageState::Mounted,
        }
    }

    /// Sets the reported external storage state.
    #[must_use]
    pub const fn with_external_state(mut self, state: StorageState) -> Self {
        self.external_state = state;
        self
    }

    /// The sandbox root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory assets are read from.
    #[must_use]
    pub fn assets_dir(&self) -> PathBuf {
        self.root.join("assets")
    }

    fn ensure(path: PathBuf) -> Option<PathBuf> {
        match fs::create_dir_all(&path) {
            Ok(()) => Some(path),
            Err(err) => {
                log::error!(target: crate::LOG_TARGET, "Cannot create {}: {err}", path.display());
                None
            }
        }
    }
}

impl Context for SandboxContext {
    fn files_dir(&self) -> Option<PathBuf> {
        Self::ensure(self.root.join("files"))
    }

    fn external_files_dir(&self, kind: Option<ExternalDirectoryType>) -> Option<PathBuf> {
        let dir = self.root.join("external").join("files");
        Self::ensure(match kind {
            Some(kind) => dir.join(kind.platform_name()),
            None => dir,
        })
    }

    fn external_storage_dir(&self) -> Option<PathBuf> {
        Self::ensure(self.root.join("storage"))
    }

    fn external_public_dir(&self, kind: ExternalDirectoryType) -> Option<PathBuf> {
        Self::ensure(self.root.join("storage").join(kind.platform_name()))
    }

    fn database_path(&self, name: &str) -> Option<PathBuf> {
        Some(self.root.join("databases").join(name))
    }

    fn external_storage_state(&self) -> StorageState {
        self.external_state
    }

    fn open_asset(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.assets_dir().join(name))?;
        Ok(Box::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_roots_live_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let context = SandboxContext::new(dir.path());

        let files = context.files_dir().unwrap();
        assert_eq!(files, dir.path().join("files"));
        assert!(files.is_dir());

        let pictures = context
            .external_files_dir(Some(ExternalDirectoryType::Pictures))
            .unwrap();
        assert_eq!(pictures, dir.path().join("external/files/Pictures"));

        let database = context.database_path("app.db").unwrap();
        assert_eq!(database, dir.path().join("databases/app.db"));
        assert!(!database.parent().unwrap().exists());
    }

    #[test]
    fn opens_file_uris_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let context = SandboxContext::new(dir.path());
        let file = dir.path().join("hello.txt");
        fs::write(&file, "hi").unwrap();

        let uri = Url::from_file_path(&file).unwrap();
        let mut text = String::new();
        context
            .open_uri(&uri)
            .unwrap()
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "hi");

        let web = Url::parse("https://example.com/a.png").unwrap();
        assert!(context.open_uri(&web).unwrap().is_none());
    }

    #[test]
    fn storage_state_availability() {
        assert!(StorageState::from_platform("mounted").is_available());
        assert!(StorageState::from_platform("mounted_ro").is_available());
        assert!(!StorageState::from_platform("removed").is_available());
        assert_eq!(StorageState::from_platform("bad_removal"), StorageState::Unknown);
    }
}
