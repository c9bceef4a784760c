use std::{
    fs::{self, File},
    io::{self, Read},
    path::PathBuf,
};

use crate::{Context, ExternalDirectoryType, LOG_TARGET, StorageState};

/// [`Context`] backed by the user directories of a desktop session.
///
/// Private roots live under the per-user data directory in a folder named after
/// the application; public roots map onto the user's media folders.
#[derive(Debug, Clone)]
pub struct DesktopContext {
    app_id: String,
    assets_dir: Option<PathBuf>,
}

impl DesktopContext {
    /// Creates a context for the application `app_id`.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            assets_dir: None,
        }
    }

    /// Sets the directory bundled assets are read from.
    #[must_use]
    pub fn with_assets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(dir.into());
        self
    }

    fn app_dir(&self) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(&self.app_id))
    }

    fn ensure(path: PathBuf) -> Option<PathBuf> {
        fs::create_dir_all(&path)
            .inspect_err(|err| {
                log::error!(target: LOG_TARGET, "Cannot create {}: {err}", path.display());
            })
            .ok()?;
        Some(path)
    }
}

impl Context for DesktopContext {
    fn files_dir(&self) -> Option<PathBuf> {
        Self::ensure(self.app_dir()?.join("files"))
    }

    fn external_files_dir(&self, kind: Option<ExternalDirectoryType>) -> Option<PathBuf> {
        let dir = dirs::data_local_dir()?.join(&self.app_id).join("external");
        Self::ensure(match kind {
            Some(kind) => dir.join(kind.platform_name()),
            None => dir,
        })
    }

    fn external_storage_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn external_public_dir(&self, kind: ExternalDirectoryType) -> Option<PathBuf> {
        match kind {
            ExternalDirectoryType::Documents => dirs::document_dir(),
            ExternalDirectoryType::Downloads => dirs::download_dir(),
            ExternalDirectoryType::Pictures => dirs::picture_dir(),
            ExternalDirectoryType::Movies => dirs::video_dir(),
            ExternalDirectoryType::Music => dirs::audio_dir(),
            ExternalDirectoryType::Dcim => Self::ensure(dirs::picture_dir()?.join("DCIM")),
            ExternalDirectoryType::Alarms
            | ExternalDirectoryType::Notifications
            | ExternalDirectoryType::Podcasts
            | ExternalDirectoryType::Ringtones => {
                Self::ensure(dirs::audio_dir()?.join(kind.platform_name()))
            }
        }
    }

    fn database_path(&self, name: &str) -> Option<PathBuf> {
        Some(self.app_dir()?.join("databases").join(name))
    }

    fn external_storage_state(&self) -> StorageState {
        StorageState::Mounted
    }

    fn open_asset(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let Some(dir) = &self.assets_dir else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "no assets directory configured",
            ));
        };
        Ok(Box::new(File::open(dir.join(name))?))
    }
}
