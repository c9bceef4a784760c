use std::{
    fs, io,
    path::{Path as FsPath, PathBuf},
};

use memkit_fs::Path;
use walkdir::WalkDir;

use super::Storage;
use crate::{
    Check, Invalidity, Location, Method, Outcome, Parameter, Validator,
    messages::{
        CANNOT_COPY, CANNOT_CREATE_FOLDER, CANNOT_DELETE, CANNOT_DELETE_FOLDER, CANNOT_READ_FOLDER,
        CLEAR_FOLDER, COULD_NOT_CREATE_PATH, DELETE_FILE, DIRECTORY_HAS_FILES, DUPLICATE_FOLDER,
        EXTERNAL_MEMORY_AVAILABLE, EXTERNAL_MEMORY_NOT_AVAILABLE, FAILED, FILE_DELETED,
        FILE_DOESNT_EXIST, FILE_EXISTS, FILE_TREE_GENERATED, FILES_LISTED, FOLDER_ALREADY_EMPTY,
        FOLDER_ALREADY_EXISTS, FOLDER_CLEARED, FOLDER_CREATED, FOLDER_DUPLICATED,
        FOLDER_IS_EMPTY, FOLDER_IS_NOT_EMPTY, FOLDER_NOT_CLEARED, GENERATE_FILE_TREE,
        IS_A_FOLDER, IS_NOT_A_FOLDER, LIST_FILES, LONGEST_VALID_PATH, NO_FOLDERS_IN_PATH,
        NOT_VALID_FOR_SAVING, NOTHING_TO_DELETE, PATH_CREATED, VALID_FOR_SAVING, fill,
    },
    saving_invalidity,
};

impl Storage {
    /// Whether `file` exists.
    pub fn exists<'a>(&self, file: impl Into<Location<'a>>) -> bool {
        let path = file.into().to_string();
        let validator = Validator::new(Method::Exists).check(Check::Text {
            parameter: Parameter::PathToFile,
            value: path.clone(),
        });
        if self.validate::<()>(&validator).is_err() {
            return false;
        }

        let exists = FsPath::new(&path).exists();
        let template = if exists { FILE_EXISTS } else { FILE_DOESNT_EXIST };
        self.logger.log(&fill(template, &[&path]), true);
        exists
    }

    /// Whether `path` can be written to, as a folder when `is_folder` is set.
    ///
    /// The payload is [`Invalidity::None`] when it can and the reason otherwise.
    pub fn is_valid_for_saving<'a>(
        &self,
        path: impl Into<Location<'a>>,
        is_folder: bool,
    ) -> Outcome<Invalidity> {
        let path = path.into().to_string();
        Outcome::settle(|| {
            self.validate(&Validator::new(Method::IsValidForSaving).check(Check::Text {
                parameter: Parameter::Path,
                value: path.clone(),
            }))?;

            let invalidity = saving_invalidity(&path, is_folder);
            let message = if invalidity.is_valid() {
                fill(VALID_FOR_SAVING, &[&path])
            } else {
                fill(NOT_VALID_FOR_SAVING, &[&path, invalidity.description()])
            };
            Ok(self.succeed(Some(invalidity), message))
        })
    }

    /// Copies the folder `origin` and everything below it to `destination`.
    pub fn duplicate_folder<'a, 'b>(
        &self,
        origin: impl Into<Location<'a>>,
        destination: impl Into<Location<'b>>,
    ) -> Outcome<PathBuf> {
        let origin = origin.into();
        let destination = destination.into();
        Outcome::settle(|| {
            let source = origin.to_string();
            let action = fill(DUPLICATE_FOLDER, &[&source]);
            let validator = Validator::new(Method::DuplicateFolder).check(Check::Folder {
                parameter: origin.origin_parameter(),
                path: source.clone(),
            });
            let target = self.prepare_destination(validator, &destination, true, &action)?;
            let target = PathBuf::from(target);
            let inside = is_within(&target, FsPath::new(&source))
                .map_err(|err| self.fail_with(fill(FAILED, &[&action]), &err))?;
            if inside {
                return Err(self.fail(fill(FAILED, &[&action])));
            }

            fs::create_dir_all(&target).map_err(|err| {
                self.fail_with(fill(CANNOT_CREATE_FOLDER, &[&target.to_string_lossy()]), &err)
            })?;
            for entry in WalkDir::new(&source).min_depth(1).sort_by_file_name() {
                let entry = entry
                    .map_err(|err| self.fail_with(fill(CANNOT_READ_FOLDER, &[&action]), &err))?;
                let relative = entry
                    .path()
                    .strip_prefix(&source)
                    .map_err(|err| self.fail_with(fill(FAILED, &[&action]), &err))?;
                let copy = target.join(relative);
                let copied = if entry.file_type().is_dir() {
                    fs::create_dir_all(&copy)
                } else {
                    fs::copy(entry.path(), &copy).map(drop)
                };
                copied.map_err(|err| {
                    let message = fill(
                        CANNOT_COPY,
                        &[&entry.path().to_string_lossy(), &copy.to_string_lossy()],
                    );
                    self.fail_with(message, &err)
                })?;
            }

            let message = fill(FOLDER_DUPLICATED, &[&source, &target.to_string_lossy()]);
            Ok(self.succeed(Some(target), message))
        })
    }

    /// Deletes `file`.
    ///
    /// A missing file is a success without payload. A directory with contents
    /// is only deleted when `clear_if_directory` is set, after clearing it.
    pub fn delete_file<'a>(
        &self,
        file: impl Into<Location<'a>>,
        clear_if_directory: bool,
    ) -> Outcome<PathBuf> {
        let path = file.into().to_string();
        Outcome::settle(|| {
            let action = fill(DELETE_FILE, &[&path]);
            self.validate(&Validator::new(Method::DeleteFile).check(Check::Text {
                parameter: Parameter::PathToFile,
                value: path.clone(),
            }))?;

            let entry = PathBuf::from(&path);
            let Ok(metadata) = fs::symlink_metadata(&entry) else {
                return Ok(self.succeed(None, fill(NOTHING_TO_DELETE, &[&path])));
            };

            if metadata.is_dir() {
                let empty = is_empty_dir(&entry)
                    .map_err(|err| self.fail_with(fill(CANNOT_READ_FOLDER, &[&action]), &err))?;
                if !empty && !clear_if_directory {
                    return Err(self.fail(fill(DIRECTORY_HAS_FILES, &[&action])));
                }
                if !empty && !self.clear_folder(&entry).is_successful() {
                    return Err(self.fail(fill(FOLDER_NOT_CLEARED, &[&action])));
                }
            }
            remove_entry(&entry, metadata.is_dir())
                .map_err(|err| self.fail_with(fill(CANNOT_DELETE, &[&path]), &err))?;

            Ok(self.succeed(Some(entry), fill(FILE_DELETED, &[&path])))
        })
    }

    /// Deletes everything inside `folder`, stopping at the first entry that
    /// cannot be removed.
    pub fn clear_folder<'a>(&self, folder: impl Into<Location<'a>>) -> Outcome<PathBuf> {
        let path = folder.into().to_string();
        Outcome::settle(|| {
            let action = fill(CLEAR_FOLDER, &[&path]);
            self.validate(&Validator::new(Method::ClearFolder).check(Check::Folder {
                parameter: Parameter::PathToFolder,
                path: path.clone(),
            }))?;

            let entries = sorted_entries(FsPath::new(&path))
                .map_err(|err| self.fail_with(fill(CANNOT_READ_FOLDER, &[&action]), &err))?;
            if entries.is_empty() {
                return Ok(self.succeed(Some(PathBuf::from(&path)), fill(FOLDER_ALREADY_EMPTY, &[&path])));
            }

            for entry in entries {
                let is_dir = fs::symlink_metadata(&entry).is_ok_and(|metadata| metadata.is_dir());
                if is_dir && !self.clear_folder(&entry).is_successful() {
                    let message = fill(CANNOT_DELETE_FOLDER, &[&action, &entry.to_string_lossy()]);
                    return Err(self.fail(message));
                }
                if !self.delete_file(&entry, true).is_successful() {
                    return Err(self.fail(fill(FAILED, &[&action])));
                }
            }
            Ok(self.succeed(Some(PathBuf::from(&path)), fill(FOLDER_CLEARED, &[&path])))
        })
    }

    /// Whether `folder` has no entries.
    pub fn is_folder_empty<'a>(&self, folder: impl Into<Location<'a>>) -> bool {
        let path = folder.into().to_string();
        let validator = Validator::new(Method::IsFolderEmpty).check(Check::Folder {
            parameter: Parameter::PathToFolder,
            path: path.clone(),
        });
        if self.validate::<()>(&validator).is_err() {
            return false;
        }

        match is_empty_dir(FsPath::new(&path)) {
            Ok(empty) => {
                let template = if empty { FOLDER_IS_EMPTY } else { FOLDER_IS_NOT_EMPTY };
                self.logger.log(&fill(template, &[&path]), true);
                empty
            }
            Err(err) => {
                self.logger.cause(&err);
                false
            }
        }
    }

    /// Creates the single folder `folder`. An existing folder counts as created.
    pub fn create_folder<'a>(&self, folder: impl Into<Location<'a>>) -> Outcome<PathBuf> {
        let path = folder.into().to_string();
        Outcome::settle(|| {
            self.validate(&Validator::new(Method::CreateFolder).check(Check::FolderToCreate {
                parameter: Parameter::Folder,
                path: path.clone(),
            }))?;

            let folder = PathBuf::from(&path);
            if folder.is_dir() {
                return Ok(self.succeed(Some(folder), fill(FOLDER_ALREADY_EXISTS, &[&path])));
            }
            fs::create_dir(&folder)
                .map_err(|err| self.fail_with(fill(CANNOT_CREATE_FOLDER, &[&path]), &err))?;
            Ok(self.succeed(Some(folder), fill(FOLDER_CREATED, &[&path])))
        })
    }

    /// Creates every folder of `path` in order, stopping at the first failure.
    ///
    /// The payload is the deepest folder.
    pub fn create_path(&self, path: &Path) -> Outcome<PathBuf> {
        Outcome::settle(|| {
            if path.folders().is_empty() {
                let message = fill(NO_FOLDERS_IN_PATH, &[&path.to_string()]);
                return Ok(self.succeed(Some(PathBuf::from(path.base_path())), message));
            }

            for folder in path.folder_paths() {
                if !self.create_folder(folder.as_str()).is_successful() {
                    return Err(self.fail(fill(COULD_NOT_CREATE_PATH, &[&path.to_string()])));
                }
            }
            let message = fill(PATH_CREATED, &[&path.folders().join("/")]);
            Ok(self.succeed(Some(PathBuf::from(path.folder_path())), message))
        })
    }

    /// The longest leading part of `path` that exists, or `path` itself when it exists.
    ///
    /// Empty when not even the first segment exists.
    pub fn longest_valid_path<'a>(&self, path: impl Into<Location<'a>>) -> String {
        let path = path.into().to_string();
        let validator = Validator::new(Method::LongestValidPath).check(Check::Text {
            parameter: Parameter::Path,
            value: path.clone(),
        });
        if self.validate::<()>(&validator).is_err() {
            return String::new();
        }
        if FsPath::new(&path).exists() {
            return path;
        }

        let mut longest = String::new();
        for segment in path.split('/').filter(|segment| !segment.is_empty()) {
            let candidate = format!("{longest}/{segment}");
            if !FsPath::new(&candidate).exists() {
                break;
            }
            longest = candidate;
        }
        self.logger
            .log(&fill(LONGEST_VALID_PATH, &[&path, &longest]), true);
        longest
    }

    /// Whether `file` is a directory.
    pub fn is_directory<'a>(&self, file: impl Into<Location<'a>>) -> bool {
        let path = file.into().to_string();
        let validator = Validator::new(Method::IsDirectory).check(Check::Text {
            parameter: Parameter::PathToFile,
            value: path.clone(),
        });
        if self.validate::<()>(&validator).is_err() {
            return false;
        }

        let entry = FsPath::new(&path);
        let template = match (entry.exists(), entry.is_dir()) {
            (false, _) => FILE_DOESNT_EXIST,
            (true, true) => IS_A_FOLDER,
            (true, false) => IS_NOT_A_FOLDER,
        };
        self.logger.log(&fill(template, &[&path]), true);
        entry.is_dir()
    }

    /// Names of the entries of `folder`, sorted.
    pub fn files_in_directory<'a>(&self, folder: impl Into<Location<'a>>) -> Outcome<Vec<String>> {
        let path = folder.into().to_string();
        Outcome::settle(|| {
            self.validate(&Validator::new(Method::FilesInDirectory).check(Check::Folder {
                parameter: Parameter::PathToFolder,
                path: path.clone(),
            }))?;

            let names: Vec<String> = sorted_entries(FsPath::new(&path))
                .map_err(|err| {
                    let action = fill(LIST_FILES, &[&path]);
                    self.fail_with(fill(CANNOT_READ_FOLDER, &[&action]), &err)
                })?
                .iter()
                .filter_map(|entry| entry.file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .collect();
            let listing = if names.is_empty() {
                "no files.".to_owned()
            } else {
                format!("{}.", names.join(", "))
            };
            Ok(self.succeed(Some(names), fill(FILES_LISTED, &[&path, &listing])))
        })
    }

    /// Renders `folder` and everything below it, one tab-indented `\name` line per entry.
    pub fn file_tree<'a>(&self, folder: impl Into<Location<'a>>) -> Outcome<String> {
        let path = folder.into().to_string();
        Outcome::settle(|| {
            let action = fill(GENERATE_FILE_TREE, &[&path]);
            self.validate(&Validator::new(Method::FileTree).check(Check::Folder {
                parameter: Parameter::PathToFolder,
                path: path.clone(),
            }))?;

            let mut tree = format!("Files in {path}:\n");
            for entry in WalkDir::new(&path).min_depth(1).sort_by_file_name() {
                let entry = entry
                    .map_err(|err| self.fail_with(fill(CANNOT_READ_FOLDER, &[&action]), &err))?;
                tree.push_str(&"\t".repeat(entry.depth()));
                tree.push('\\');
                tree.push_str(&entry.file_name().to_string_lossy());
                tree.push('\n');
            }
            Ok(self.succeed(Some(tree), fill(FILE_TREE_GENERATED, &[&path])))
        })
    }

    /// Whether external storage is mounted, read-only or not.
    pub fn is_external_memory_available(&self) -> bool {
        let available = self
            .context()
            .is_some_and(|context| context.external_storage_state().is_available());
        let message = if available {
            EXTERNAL_MEMORY_AVAILABLE
        } else {
            EXTERNAL_MEMORY_NOT_AVAILABLE
        };
        self.logger.log(message, true);
        available
    }
}

/// Whether `path` is `folder` or lies below it once `..` and links are resolved.
///
/// Missing trailing components of `path` are resolved against their nearest
/// existing ancestor.
fn is_within(path: &FsPath, folder: &FsPath) -> io::Result<bool> {
    let folder = folder.canonicalize()?;
    let mut existing = path;
    let mut missing = Vec::new();
    let resolved = loop {
        match existing.canonicalize() {
            Ok(resolved) => break resolved,
            Err(err) => {
                let (Some(parent), Some(name)) = (existing.parent(), existing.file_name()) else {
                    return Err(err);
                };
                missing.push(name);
                existing = if parent.as_os_str().is_empty() {
                    FsPath::new(".")
                } else {
                    parent
                };
            }
        }
    };
    let resolved = missing
        .into_iter()
        .rev()
        .fold(resolved, |resolved, name| resolved.join(name));
    Ok(resolved.starts_with(folder))
}

#[cfg(test)]
thread_local! {
    static HELD: std::cell::RefCell<Vec<PathBuf>> = const { std::cell::RefCell::new(Vec::new()) };
}

fn remove_entry(entry: &FsPath, is_dir: bool) -> io::Result<()> {
    #[cfg(test)]
    if HELD.with_borrow(|held| held.iter().any(|held| held == entry)) {
        return Err(io::Error::new(io::ErrorKind::PermissionDenied, "entry is held open"));
    }
    if is_dir {
        fs::remove_dir(entry)
    } else {
        fs::remove_file(entry)
    }
}

fn is_empty_dir(dir: &FsPath) -> io::Result<bool> {
    Ok(fs::read_dir(dir)?.next().is_none())
}

fn sorted_entries(dir: &FsPath) -> io::Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    #[test]
    fn clearing_stops_at_the_first_entry_that_cannot_be_removed() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("box");
        fs::create_dir(&folder).unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(folder.join(name), name).unwrap();
        }
        HELD.with_borrow_mut(|held| held.push(folder.join("b.txt")));

        let storage = Storage::new(Config::default().with_logging(false));
        let cleared = storage.clear_folder(&folder);

        assert!(!cleared.is_successful());
        assert!(cleared.payload().is_none());
        assert!(!folder.join("a.txt").exists());
        assert!(folder.join("b.txt").exists());
        assert_eq!(fs::read_to_string(folder.join("c.txt")).unwrap(), "c.txt");
    }

    #[test]
    fn resolves_paths_before_comparing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src");
        fs::create_dir_all(dir.path().join("other")).unwrap();
        fs::create_dir(&source).unwrap();

        assert!(is_within(&source.join("inner/deeper"), &source).unwrap());
        assert!(is_within(&dir.path().join("other/../src/inner"), &source).unwrap());
        assert!(is_within(&source, &source).unwrap());
        assert!(!is_within(&dir.path().join("other/inner"), &source).unwrap());
        assert!(!is_within(&dir.path().join("src-copy"), &source).unwrap());
    }
}
