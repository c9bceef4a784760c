use std::{io, path::Path};

use memkit_fs::Context;
use url::Url;

use super::{Invalidity, Parameter};

/// One parameter of an operation together with the rule it must satisfy.
#[derive(Debug)]
pub enum Check<'a> {
    /// A file, or a folder when `folder` is set, that is about to be written.
    ///
    /// Must be valid for saving: see [`saving_invalidity`].
    Destination {
        /// Parameter named in the message.
        parameter: Parameter,
        /// Target path.
        path: String,
        /// The target is a folder.
        folder: bool,
    },
    /// A file or folder that is about to be read. Must exist.
    Origin {
        /// Parameter named in the message.
        parameter: Parameter,
        /// Source path.
        path: String,
    },
    /// An existing folder.
    Folder {
        /// Parameter named in the message.
        parameter: Parameter,
        /// Folder path.
        path: String,
    },
    /// A folder about to be created. Must not exist as a file and its container must exist.
    FolderToCreate {
        /// Parameter named in the message.
        parameter: Parameter,
        /// Folder path.
        path: String,
    },
    /// A name that must not be empty.
    Text {
        /// Parameter named in the message.
        parameter: Parameter,
        /// The name.
        value: String,
    },
    /// A reference that must be present. `value` is how it is rendered in the listing.
    Present {
        /// Parameter named in the message.
        parameter: Parameter,
        /// Rendering of the reference, `None` when absent.
        value: Option<String>,
    },
    /// A value about to be serialized. `error` holds the serialization error, if any.
    Serializable {
        /// Type of the value.
        type_name: String,
        /// Why serialization failed.
        error: Option<String>,
    },
    /// An asset that must open through `context`. Not probed without a context.
    Asset {
        /// Host context.
        context: Option<&'a dyn Context>,
        /// Asset name.
        file_name: String,
    },
    /// A uri that must open through `context`. Not probed without a context.
    Uri {
        /// Host context.
        context: Option<&'a dyn Context>,
        /// The uri.
        uri: String,
    },
}

impl Check<'_> {
    /// Presence check of the host context.
    #[must_use]
    pub fn context(context: Option<&dyn Context>) -> Self {
        Self::Present {
            parameter: Parameter::Context,
            value: context.map(|_| "context".to_owned()),
        }
    }

    /// Parameter this check is reported on.
    #[must_use]
    pub const fn parameter(&self) -> Parameter {
        match self {
            Self::Destination { parameter, .. }
            | Self::Origin { parameter, .. }
            | Self::Folder { parameter, .. }
            | Self::FolderToCreate { parameter, .. }
            | Self::Text { parameter, .. }
            | Self::Present { parameter, .. } => *parameter,
            Self::Serializable { .. } => Parameter::Object,
            Self::Asset { .. } => Parameter::FileName,
            Self::Uri { .. } => Parameter::OriginUri,
        }
    }

    /// Value shown in the parameter listing.
    #[must_use]
    pub fn rendered(&self) -> String {
        match self {
            Self::Destination { path, .. }
            | Self::Origin { path, .. }
            | Self::Folder { path, .. }
            | Self::FolderToCreate { path, .. } => path.clone(),
            Self::Text { value, .. } => value.clone(),
            Self::Present { value, .. } => value.clone().unwrap_or_else(|| "null".to_owned()),
            Self::Serializable { type_name, .. } => type_name.clone(),
            Self::Asset { file_name, .. } => file_name.clone(),
            Self::Uri { uri, .. } => uri.clone(),
        }
    }

    /// Applies the rule, returning the parameter to blame and the verdict.
    #[must_use]
    pub fn evaluate(&self) -> (Parameter, Invalidity) {
        let parameter = self.parameter();
        let invalidity = match self {
            Self::Destination { path, folder, .. } => {
                if path.is_empty() {
                    Invalidity::IsEmpty
                } else {
                    saving_invalidity(path, *folder)
                }
            }
            Self::Origin { path, .. } => existing(path),
            Self::Folder { path, .. } => match existing(path) {
                Invalidity::None if !Path::new(path).is_dir() => Invalidity::NotADirectory,
                other => other,
            },
            Self::FolderToCreate { path, .. } => {
                let entry = Path::new(path);
                if path.is_empty() {
                    Invalidity::IsEmpty
                } else if entry.exists() {
                    if entry.is_dir() {
                        Invalidity::None
                    } else {
                        Invalidity::ExistsAsNotDirectory
                    }
                } else {
                    saving_invalidity(path, true)
                }
            }
            Self::Text { value, .. } => {
                if value.is_empty() {
                    Invalidity::IsEmpty
                } else {
                    Invalidity::None
                }
            }
            Self::Present { value, .. } => {
                if value.is_some() {
                    Invalidity::None
                } else {
                    Invalidity::IsNull
                }
            }
            Self::Serializable { error, .. } => {
                if error.is_some() {
                    Invalidity::NotSerializable
                } else {
                    Invalidity::None
                }
            }
            Self::Asset { context, file_name } => {
                if file_name.is_empty() {
                    Invalidity::IsEmpty
                } else if context.is_some_and(|context| context.open_asset(file_name).is_err()) {
                    Invalidity::AssetDoesntExist
                } else {
                    Invalidity::None
                }
            }
            Self::Uri { context, uri } => return uri_verdict(*context, uri),
        };
        (parameter, invalidity)
    }
}

fn existing(path: &str) -> Invalidity {
    if path.is_empty() {
        Invalidity::IsEmpty
    } else if Path::new(path).exists() {
        Invalidity::None
    } else {
        Invalidity::FileDoesntExist
    }
}

fn uri_verdict(context: Option<&dyn Context>, uri: &str) -> (Parameter, Invalidity) {
    if uri.is_empty() {
        return (Parameter::OriginUri, Invalidity::IsEmpty);
    }
    let Ok(parsed) = Url::parse(uri) else {
        return (Parameter::OriginUri, Invalidity::UnparseableUri);
    };
    if parsed.path().is_empty() {
        return (Parameter::PathInUri, Invalidity::IsEmpty);
    }
    let Some(context) = context else {
        return (Parameter::OriginUri, Invalidity::None);
    };
    match context.open_uri(&parsed) {
        Ok(Some(_)) => (Parameter::OriginUri, Invalidity::None),
        Ok(None) => (Parameter::OriginUri, Invalidity::UnparseableUri),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            (Parameter::PathInUri, Invalidity::FileDoesntExist)
        }
        Err(_) => (Parameter::OriginUri, Invalidity::UnparseableUri),
    }
}

/// Whether `path` can be written to.
///
/// An existing entry must be a directory when `folder` is set and a file
/// otherwise. A missing entry needs an existing containing folder.
#[must_use]
pub fn saving_invalidity(path: &str, folder: bool) -> Invalidity {
    let entry = Path::new(path);
    if entry.exists() {
        return match (entry.is_dir(), folder) {
            (true, false) => Invalidity::IsADirectory,
            (false, true) => Invalidity::NotADirectory,
            _ => Invalidity::None,
        };
    }

    let container = entry
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    if container.is_dir() {
        Invalidity::None
    } else {
        Invalidity::ContainerFolderDoesntExist
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use memkit_fs::SandboxContext;

    use super::*;

    fn text(path: &std::path::Path) -> String {
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn saving_rules() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();

        assert_eq!(saving_invalidity(&text(&file), false), Invalidity::None);
        assert_eq!(saving_invalidity(&text(&file), true), Invalidity::NotADirectory);
        assert_eq!(saving_invalidity(&text(dir.path()), false), Invalidity::IsADirectory);
        assert_eq!(saving_invalidity(&text(dir.path()), true), Invalidity::None);
        assert_eq!(
            saving_invalidity(&text(&dir.path().join("new.txt")), false),
            Invalidity::None
        );
        assert_eq!(
            saving_invalidity(&text(&dir.path().join("a/new.txt")), false),
            Invalidity::ContainerFolderDoesntExist
        );
    }

    #[test]
    fn folder_to_create_rejects_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let check = Check::FolderToCreate {
            parameter: Parameter::Folder,
            path: text(&file),
        };
        assert_eq!(check.evaluate().1, Invalidity::ExistsAsNotDirectory);
    }

    #[test]
    fn folder_must_be_a_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f");
        fs::write(&file, "x").unwrap();

        let check = Check::Folder {
            parameter: Parameter::PathToFolder,
            path: text(&file),
        };
        assert_eq!(check.evaluate(), (Parameter::PathToFolder, Invalidity::NotADirectory));
    }

    #[test]
    fn assets_are_probed_through_the_context() {
        let dir = tempfile::tempdir().unwrap();
        let context = SandboxContext::new(dir.path());
        fs::create_dir_all(context.assets_dir()).unwrap();
        fs::write(context.assets_dir().join("seed.db"), "db").unwrap();

        let present = Check::Asset {
            context: Some(&context),
            file_name: "seed.db".to_owned(),
        };
        assert_eq!(present.evaluate().1, Invalidity::None);

        let missing = Check::Asset {
            context: Some(&context),
            file_name: "other.db".to_owned(),
        };
        assert_eq!(missing.evaluate().1, Invalidity::AssetDoesntExist);
    }

    #[test]
    fn uri_verdicts() {
        let dir = tempfile::tempdir().unwrap();
        let context = SandboxContext::new(dir.path());

        let check = |uri: &str| {
            Check::Uri {
                context: Some(&context),
                uri: uri.to_owned(),
            }
            .evaluate()
        };
        assert_eq!(check(""), (Parameter::OriginUri, Invalidity::IsEmpty));
        assert_eq!(check("not a uri"), (Parameter::OriginUri, Invalidity::UnparseableUri));
        assert_eq!(
            check("content://media/images/1"),
            (Parameter::OriginUri, Invalidity::UnparseableUri)
        );

        let missing = url::Url::from_file_path(dir.path().join("nope.png")).unwrap();
        assert_eq!(
            check(missing.as_str()),
            (Parameter::PathInUri, Invalidity::FileDoesntExist)
        );
    }
}
