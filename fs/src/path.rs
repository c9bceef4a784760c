use std::{fmt, path::PathBuf};

use crate::{Context, LOG_TARGET, StorageDirectory};

/// Errors produced while building a [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// `build()` was called before selecting a base directory.
    #[error(
        "no base directory was selected, call storage_directory() or database_directory() before build()"
    )]
    NoBaseDirectory,
    /// The selected base directory could not be resolved.
    #[error("{0} is not available")]
    Unavailable(StorageDirectory),
}

/// A location made of a base directory, folder segments and an optional file name.
///
/// Displays as `base/folder1/.../folderN/file`, leaving out the file segment when
/// there is no file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    base: String,
    folders: Vec<String>,
    file_name: String,
}

impl Path {
    /// Starts building a path resolved through `context`.
    #[must_use]
    pub fn builder(context: &dyn Context) -> PathBuilder<'_> {
        PathBuilder::new(context)
    }

    /// The resolved base directory.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base
    }

    /// Folder segments in order.
    #[must_use]
    pub fn folders(&self) -> &[String] {
        &self.folders
    }

    /// The file name, if any.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        (!self.file_name.is_empty()).then_some(self.file_name.as_str())
    }

    /// Cumulative folder paths: `base/f1`, `base/f1/f2`, ...
    pub fn folder_paths(&self) -> impl Iterator<Item = String> + '_ {
        self.folders.iter().scan(self.base.clone(), |acc, folder| {
            acc.push('/');
            acc.push_str(folder);
            Some(acc.clone())
        })
    }

    /// The deepest folder, or the base when there are no folders.
    #[must_use]
    pub fn folder_path(&self) -> String {
        self.folder_paths().last().unwrap_or_else(|| self.base.clone())
    }

    /// The path as a [`PathBuf`].
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.to_string())
    }

    /// Multi-line diagnostic description of the parts.
    #[must_use]
    pub fn describe(&self) -> String {
        let folders: String = self.folders.iter().map(|f| format!("/{f}")).collect();
        let file = self
            .file_name()
            .map_or_else(String::new, |name| format!("/{name}"));
        format!(
            "BASE PATH: {}\nFOLDERS: {folders}\nFILE: {file}",
            self.base
        )
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)?;
        for folder in &self.folders {
            write!(f, "/{folder}")?;
        }
        if !self.file_name.is_empty() {
            write!(f, "/{}", self.file_name)?;
        }
        Ok(())
    }
}

/// Fluent builder for [`Path`].
#[derive(Debug)]
pub struct PathBuilder<'a> {
    context: &'a dyn Context,
    directory: Option<StorageDirectory>,
    folders: Vec<String>,
    file_name: String,
}

impl<'a> PathBuilder<'a> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new(context: &'a dyn Context) -> Self {
        Self {
            context,
            directory: None,
            folders: Vec::new(),
            file_name: String::new(),
        }
    }

    /// Selects the base directory. The last selection wins.
    #[must_use]
    pub fn storage_directory(mut self, directory: StorageDirectory) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Selects the file backing the named database as the base.
    #[must_use]
    pub fn database_directory(self, name: impl Into<String>) -> Self {
        self.storage_directory(StorageDirectory::Database(name.into()))
    }

    /// Appends a folder segment.
    #[must_use]
    pub fn folder(mut self, name: impl Into<String>) -> Self {
        self.folders.push(name.into());
        self
    }

    /// Sets the file name.
    #[must_use]
    pub fn file(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// Resolves the base directory and builds the path.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NoBaseDirectory`] if no base was selected and
    /// [`PathError::Unavailable`] if the context cannot resolve it.
    pub fn build(self) -> Result<Path, PathError> {
        let directory = self.directory.ok_or(PathError::NoBaseDirectory)?;
        let base = directory
            .resolve(self.context)
            .ok_or_else(|| PathError::Unavailable(directory.clone()))?;

        let path = Path {
            base: base.to_string_lossy().into_owned(),
            folders: self.folders,
            file_name: self.file_name,
        };
        log::info!(target: LOG_TARGET, "Path object pointing to {path} was created.");
        Ok(path)
    }
}
