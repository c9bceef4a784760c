use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufRead, BufReader, BufWriter, Read, Write},
    path::PathBuf,
};

use memkit_fs::Path;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::error::Category;

use super::Storage;
use crate::{
    Check, Location, Method, Outcome, Parameter, Validator,
    messages::{
        ASSET_NOT_FOUND, BYTE_ARRAY_SAVED, CANNOT_COPY, CANNOT_READ_OBJECT, CANNOT_SAVE_TEXT,
        CANNOT_WRITE_OBJECT, COPY_FROM_READER, DATABASE_IMPORTED, DESTINATION_FOLDER_NOT_FOUND,
        DUPLICATE_FILE, ERROR_WHILE_READING, ERROR_WRITING_BYTE_ARRAY, FAILED, FILE_COPIED,
        FILE_NOT_FOUND, IMPORT_DATABASE_FROM_ASSETS, IMPORT_FROM_ASSETS, LOAD_OBJECT,
        LOAD_TEXT_FROM_FILE, OBJECT_LOADED, OBJECT_SAVED, SAVE_BYTE_ARRAY, SAVE_OBJECT,
        SAVE_TEXT_TO_FILE, TEXT_FILE_SAVED, TEXT_LOADED, TYPE_MISMATCH, fill,
    },
};

const BUFFER_LEN: usize = 1024;
const PREVIEW_LEN: usize = 64;

impl Storage {
    /// Copies everything `reader` yields into `destination`.
    ///
    /// `origin` names the source in messages.
    pub fn copy_from_reader<'a>(
        &self,
        origin: &str,
        reader: &mut dyn Read,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(COPY_FROM_READER, &[origin]);
            let validator = Validator::new(Method::CopyFromReader).check(Check::Present {
                parameter: Parameter::Reader,
                value: Some(origin.to_owned()),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;
            Ok(self.relay(origin, reader, &target))
        })
    }

    /// Copies a bundled asset into `destination`.
    pub fn import_from_assets<'a>(
        &self,
        file_name: &str,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(IMPORT_FROM_ASSETS, &[file_name]);
            let validator = Validator::new(Method::ImportFromAssets)
                .check(Check::context(self.context()))
                .check(Check::Asset {
                    context: self.context(),
                    file_name: file_name.to_owned(),
                });
            let target = self.prepare_destination(validator, &destination, false, &action)?;
            let context = self.require_context(&action)?;
            let mut asset = context
                .open_asset(file_name)
                .map_err(|err| self.fail_with(fill(ASSET_NOT_FOUND, &[&action]), &err))?;
            Ok(self.relay(file_name, &mut *asset, &target))
        })
    }

    /// Copies the bundled asset `database_name` to the path of the database of
    /// the same name, creating the databases folder when needed.
    pub fn import_database_from_assets(&self, database_name: &str) -> Outcome<PathBuf> {
        Outcome::settle(|| {
            let action = fill(IMPORT_DATABASE_FROM_ASSETS, &[database_name]);
            self.validate(
                &Validator::new(Method::ImportDatabaseFromAssets)
                    .check(Check::Text {
                        parameter: Parameter::DatabaseName,
                        value: database_name.to_owned(),
                    })
                    .check(Check::context(self.context()))
                    .check(Check::Asset {
                        context: self.context(),
                        file_name: database_name.to_owned(),
                    }),
            )?;
            let context = self.require_context(&action)?;
            let database = Path::builder(context)
                .database_directory(database_name)
                .build()
                .map_err(|err| self.fail_with(fill(FAILED, &[&action]), &err))?
                .to_path_buf();
            if let Some(folder) = database.parent() {
                fs::create_dir_all(folder).map_err(|err| {
                    self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
                })?;
            }

            let imported = self.import_from_assets(database_name, &database);
            if !imported.is_successful() {
                return Ok(imported);
            }
            let message = fill(
                DATABASE_IMPORTED,
                &[database_name, &database.to_string_lossy()],
            );
            Ok(self.succeed(imported.into_payload(), message))
        })
    }

    /// Writes `text` to `destination`, appending instead of replacing when `append` is set.
    pub fn save_text_file<'a>(
        &self,
        text: &str,
        destination: impl Into<Location<'a>>,
        append: bool,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(SAVE_TEXT_TO_FILE, &[&destination.to_string()]);
            let validator = Validator::new(Method::SaveTextFile).check(Check::Present {
                parameter: Parameter::Text,
                value: Some(preview(text)),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;

            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .append(append)
                .truncate(!append)
                .open(&target)
                .map_err(|err| {
                    self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
                })?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(text.as_bytes())
                .and_then(|()| writer.flush())
                .map_err(|err| self.fail_with(fill(CANNOT_SAVE_TEXT, &[&action]), &err))?;

            Ok(self.succeed(Some(PathBuf::from(&target)), fill(TEXT_FILE_SAVED, &[&target])))
        })
    }

    /// Reads `origin` line by line, terminating every line with `\n`.
    pub fn load_text_file<'a>(&self, origin: impl Into<Location<'a>>) -> Outcome<String> {
        let origin = origin.into();
        Outcome::settle(|| {
            let action = fill(LOAD_TEXT_FROM_FILE, &[&origin.to_string()]);
            let source = self.prepare_origin(Validator::new(Method::LoadTextFile), &origin)?;
            let file = File::open(&source)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?;

            let mut text = String::new();
            for line in BufReader::new(file).lines() {
                let line = line
                    .map_err(|err| self.fail_with(fill(ERROR_WHILE_READING, &[&action]), &err))?;
                text.push_str(&line);
                text.push('\n');
            }
            Ok(self.succeed(Some(text), fill(TEXT_LOADED, &[&source])))
        })
    }

    /// Serializes `object` as JSON into `destination`.
    ///
    /// Values that cannot be serialized are rejected before anything is written.
    pub fn save_object<'a, T: Serialize + ?Sized>(
        &self,
        object: &T,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(SAVE_OBJECT, &[&destination.to_string()]);
            let value = serde_json::to_value(object);
            let validator = Validator::new(Method::SaveObject).check(Check::Serializable {
                type_name: type_name::<T>(),
                error: value.as_ref().err().map(ToString::to_string),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;
            let value =
                value.map_err(|err| self.fail_with(fill(CANNOT_WRITE_OBJECT, &[&action]), &err))?;

            let file = File::create(&target).map_err(|err| {
                self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &value)
                .map_err(io::Error::from)
                .and_then(|()| writer.flush())
                .map_err(|err| self.fail_with(fill(CANNOT_WRITE_OBJECT, &[&action]), &err))?;

            Ok(self.succeed(Some(PathBuf::from(&target)), fill(OBJECT_SAVED, &[&target])))
        })
    }

    /// Reads a JSON object of type `T` from `origin`.
    pub fn load_object<'a, T: DeserializeOwned>(
        &self,
        origin: impl Into<Location<'a>>,
    ) -> Outcome<T> {
        let origin = origin.into();
        Outcome::settle(|| {
            let type_name = type_name::<T>();
            let action = fill(LOAD_OBJECT, &[&type_name, &origin.to_string()]);
            let validator = Validator::new(Method::LoadObject).check(Check::Present {
                parameter: Parameter::Type,
                value: Some(type_name.clone()),
            });
            let source = self.prepare_origin(validator, &origin)?;
            let file = File::open(&source)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?;

            let object = serde_json::from_reader::<_, T>(BufReader::new(file)).map_err(|err| {
                let template = if err.classify() == Category::Data {
                    TYPE_MISMATCH
                } else {
                    CANNOT_READ_OBJECT
                };
                self.fail_with(fill(template, &[&action]), &err)
            })?;
            Ok(self.succeed(Some(object), fill(OBJECT_LOADED, &[&source])))
        })
    }

    /// Writes `bytes` to `destination`, replacing its contents.
    pub fn save_byte_array<'a>(
        &self,
        bytes: &[u8],
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(SAVE_BYTE_ARRAY, &[&destination.to_string()]);
            let validator = Validator::new(Method::SaveByteArray).check(Check::Present {
                parameter: Parameter::ByteArray,
                value: Some(format!("{} bytes", bytes.len())),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;

            let mut file = File::create(&target).map_err(|err| {
                self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
            })?;
            file.write_all(bytes).map_err(|err| {
                self.fail_with(fill(ERROR_WRITING_BYTE_ARRAY, &[&action]), &err)
            })?;

            Ok(self.succeed(Some(PathBuf::from(&target)), fill(BYTE_ARRAY_SAVED, &[&target])))
        })
    }

    /// Copies the file `origin` to `destination`.
    pub fn duplicate_file<'a, 'b>(
        &self,
        origin: impl Into<Location<'a>>,
        destination: impl Into<Location<'b>>,
    ) -> Outcome<PathBuf> {
        let origin = origin.into();
        let destination = destination.into();
        Outcome::settle(|| {
            let source = origin.to_string();
            let action = fill(DUPLICATE_FILE, &[&source]);
            let validator = Validator::new(Method::DuplicateFile).check(Check::Origin {
                parameter: origin.origin_parameter(),
                path: source.clone(),
            });
            let target = self.prepare_destination(validator, &destination, false, &action)?;

            let mut file = File::open(&source)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?;
            Ok(self.relay(&source, &mut file, &target))
        })
    }

    /// Streams `reader` into the file at `target` through a fixed-size buffer.
    fn relay(&self, origin: &str, reader: &mut dyn Read, target: &str) -> Outcome<PathBuf> {
        Outcome::settle(|| {
            let action = fill(COPY_FROM_READER, &[origin]);
            let mut file = File::create(target).map_err(|err| {
                self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
            })?;

            let mut buffer = [0_u8; BUFFER_LEN];
            loop {
                let read = match reader.read(&mut buffer) {
                    Ok(0) => break,
                    Ok(read) => read,
                    Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                    Err(err) => return Err(self.fail_with(fill(CANNOT_COPY, &[origin, target]), &err)),
                };
                file.write_all(&buffer[..read])
                    .map_err(|err| self.fail_with(fill(CANNOT_COPY, &[origin, target]), &err))?;
            }

            Ok(self.succeed(Some(PathBuf::from(target)), fill(FILE_COPIED, &[origin, target])))
        })
    }
}

/// `std::any::type_name` without module paths.
pub(crate) fn type_name<T: ?Sized>() -> String {
    let full = std::any::type_name::<T>();
    let mut short = String::with_capacity(full.len());
    let mut segment = String::new();
    for c in full.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            segment.push(c);
        } else {
            short.push_str(segment.rsplit("::").next().unwrap_or_default());
            segment.clear();
            short.push(c);
        }
    }
    short.push_str(segment.rsplit("::").next().unwrap_or_default());
    short
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn type_names_drop_module_paths() {
        assert_eq!(type_name::<String>(), "String");
        assert_eq!(
            type_name::<BTreeMap<String, Vec<u8>>>(),
            "BTreeMap<String, Vec<u8>>"
        );
        assert_eq!(type_name::<[u8]>(), "[u8]");
    }

    #[test]
    fn previews_long_text() {
        assert_eq!(preview("short"), "short");
        let long = "x".repeat(100);
        assert_eq!(preview(&long), format!("{}...", "x".repeat(PREVIEW_LEN)));
    }
}
