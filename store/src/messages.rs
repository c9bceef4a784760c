//! Outcome message templates.
//!
//! Placeholders are `{0}`, `{1}`, ... and are filled with [`fill`]. Templates
//! named after an action (`SAVE_TEXT_TO_FILE`, ...) describe what was being
//! attempted and are nested into the `Cannot {0} ...` templates.

#![allow(missing_docs)]

// Actions
pub const SAVE_TEXT_TO_FILE: &str = "save text to file {0}";
pub const LOAD_TEXT_FROM_FILE: &str = "load text from file {0}";
pub const SAVE_OBJECT: &str = "save an object to file {0}";
pub const LOAD_OBJECT: &str = "load a/an {0} object from file {1}";
pub const SAVE_BYTE_ARRAY: &str = "save a byte array to file {0}";
pub const DUPLICATE_FILE: &str = "duplicate file {0}";
pub const DUPLICATE_FOLDER: &str = "duplicate folder {0}";
pub const DELETE_FILE: &str = "delete file {0}";
pub const CLEAR_FOLDER: &str = "clear folder {0}";
pub const COPY_FROM_READER: &str = "copy {0} from a reader";
pub const IMPORT_FROM_ASSETS: &str = "import {0} from assets";
pub const IMPORT_DATABASE_FROM_ASSETS: &str = "import database {0} from assets";
pub const LIST_FILES: &str = "list the files in {0}";
pub const GENERATE_FILE_TREE: &str = "generate the file tree of {0}";
pub const SAVE_BITMAP: &str = "save a bitmap to {0}";
pub const LOAD_BITMAP: &str = "load image {0}";
pub const LOAD_BITMAP_FROM_ASSETS: &str = "load image {0} from assets";
pub const LOAD_BITMAP_FROM_URI: &str = "load image from uri {0}";
pub const SAVE_SHARED_PREFERENCES: &str = "save preferences to file {0}";
pub const LOAD_SHARED_PREFERENCES: &str = "load preferences from file {0}";
pub const RESTORE_SHARED_PREFERENCES: &str = "restore preferences from file {0}";

// Successes
pub const TEXT_FILE_SAVED: &str = "Text was saved to {0}.";
pub const TEXT_LOADED: &str = "Text was loaded from file {0}.";
pub const OBJECT_SAVED: &str = "Object saved to {0}.";
pub const OBJECT_LOADED: &str = "Object retrieved from {0}.";
pub const BYTE_ARRAY_SAVED: &str = "Byte array was saved to {0}.";
pub const FILE_COPIED: &str = "File {0} was copied to {1}.";
pub const FOLDER_DUPLICATED: &str = "Folder {0} was duplicated to {1}.";
pub const FILE_DELETED: &str = "File {0} was deleted.";
pub const NOTHING_TO_DELETE: &str = "File {0} doesn't exist, so there was nothing to delete.";
pub const FOLDER_CLEARED: &str = "Folder {0} was cleared.";
pub const FOLDER_ALREADY_EMPTY: &str = "Folder {0} was already empty.";
pub const FOLDER_ALREADY_EXISTS: &str = "Folder {0} already exists.";
pub const FOLDER_CREATED: &str = "Folder {0} was created.";
pub const NO_FOLDERS_IN_PATH: &str =
    "Path object {0} contains no folders, so no intermediate folders were created to create it.";
pub const PATH_CREATED: &str = "Folders {0} were created or already existed. Path created.";
pub const FILES_LISTED: &str = "Files in {0}: {1}";
pub const FILE_TREE_GENERATED: &str = "File tree of {0} generated.";
pub const FILE_EXISTS: &str = "File {0} exists.";
pub const FILE_DOESNT_EXIST: &str = "File {0} doesn't exist.";
pub const IS_A_FOLDER: &str = "File {0} is a folder.";
pub const IS_NOT_A_FOLDER: &str = "File {0} is not a folder.";
pub const FOLDER_IS_EMPTY: &str = "Folder {0} is empty.";
pub const FOLDER_IS_NOT_EMPTY: &str = "Folder {0} is not empty.";
pub const VALID_FOR_SAVING: &str = "Path {0} is valid for saving to it.";
pub const NOT_VALID_FOR_SAVING: &str = "Path {0} is not valid for saving to it because it {1}.";
pub const LONGEST_VALID_PATH: &str = "The longest existing part of {0} is {1}.";
pub const EXTERNAL_MEMORY_AVAILABLE: &str = "External memory is available.";
pub const EXTERNAL_MEMORY_NOT_AVAILABLE: &str = "External memory is not available.";
pub const DATABASE_IMPORTED: &str = "Database {0} was imported to {1}.";
pub const BITMAP_SAVED: &str = "Bitmap was saved to {0}.";
pub const BITMAP_LOADED: &str = "Bitmap was loaded from {0}.";
pub const PREFERENCES_SAVED: &str = "Preferences were saved to {0}.";
pub const PREFERENCES_LOADED: &str = "Preferences were loaded from {0}.";
pub const ALL_PREFERENCES_RESTORED: &str = "Preferences in {0} were restored.\n{1}";
pub const PREFERENCES_PARTIALLY_RESTORED: &str =
    "Stored preferences in {0} could only be partially restored.\n{1}";

// Failures
pub const FAILED: &str = "Cannot {0}. FAILED.";
pub const DESTINATION_FOLDER_NOT_FOUND: &str =
    "Cannot {0} because the destination folder was not found.";
pub const FILE_NOT_FOUND: &str = "Cannot {0} because file was not found.";
pub const CANNOT_SAVE_TEXT: &str = "Cannot {0} because there was an error while writing.";
pub const ERROR_WHILE_READING: &str = "Cannot {0} because there was an error while reading.";
pub const CANNOT_WRITE_OBJECT: &str =
    "Cannot {0} because there was an error while writing the object.";
pub const TYPE_MISMATCH: &str =
    "Cannot {0} because the stored object does not match the requested type.";
pub const CANNOT_READ_OBJECT: &str = "Cannot {0} because the object could not be read.";
pub const ERROR_WRITING_BYTE_ARRAY: &str =
    "Cannot {0} because there was an error while writing the byte array.";
pub const CANNOT_COPY: &str = "Couldn't copy file {0} to {1}.";
pub const CANNOT_DELETE: &str = "File {0} couldn't be deleted.";
pub const DIRECTORY_HAS_FILES: &str = "Cannot {0} because it is a directory containing other files. If you want to delete it, pass clear_if_directory = true to delete_file().";
pub const FOLDER_NOT_CLEARED: &str = "Cannot {0} because it's a folder but it could not be cleared.";
pub const CANNOT_DELETE_FOLDER: &str = "Cannot {0} because inner folder {1} cannot be deleted.";
pub const CANNOT_CREATE_FOLDER: &str = "Couldn't create folder {0}.";
pub const COULD_NOT_CREATE_PATH: &str = "Could not create path {0}.";
pub const CANNOT_READ_FOLDER: &str = "Cannot {0} because the folder could not be read.";
pub const NO_CONTEXT: &str = "Cannot {0} because no context was provided.";
pub const ASSET_NOT_FOUND: &str = "Cannot {0} because the asset could not be opened.";
pub const CANNOT_CONVERT_TO_BITMAP: &str =
    "Cannot {0} because the file cannot be converted to a Bitmap object.";
pub const UNEXPECTED_IO_ERROR: &str = "Cannot {0} because there was an unexpected IO error.";
pub const URI_NOT_OPENED: &str = "Cannot {0} because the uri could not be opened.";
pub const NO_PREFERENCES_RESTORED: &str = "No preferences at all were restored from {0}.";
pub const PREFERENCES_NOT_RESTORED: &str = "Cannot load preferences from {0}.";

/// Substitutes `args` for the placeholders of `template`.
///
/// A placeholder without an argument is removed together with the template
/// spaces around it, so the sentence stays well formed. Argument text is
/// inserted unchanged.
#[must_use]
pub fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let fragment = &rest[..start];
        let tail = &rest[start + 1..];
        let placeholder = tail
            .find('}')
            .and_then(|end| tail[..end].parse::<usize>().ok().map(|index| (index, end)));
        let Some((index, end)) = placeholder else {
            out.push_str(fragment);
            out.push('{');
            rest = tail;
            continue;
        };

        rest = &tail[end + 1..];
        if let Some(arg) = args.get(index) {
            out.push_str(fragment);
            out.push_str(arg);
        } else {
            out.push_str(fragment.trim_end_matches(' '));
            let after = rest.trim_start_matches(' ');
            if out.is_empty() || after.starts_with('.') {
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
