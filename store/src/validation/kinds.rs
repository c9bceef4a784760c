use std::fmt;

/// A parameter of a storage operation, as named in validation messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Parameter {
    DestinationPath,
    DestinationPathObject,
    OriginPath,
    OriginPathObject,
    Context,
    FileName,
    Reader,
    Text,
    Object,
    Type,
    ByteArray,
    Bitmap,
    Preferences,
    Folder,
    PathToFolder,
    PathToFile,
    Path,
    DatabaseName,
    OriginUri,
    PathInUri,
}

impl Parameter {
    /// Name used in the parameter listing.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DestinationPath | Self::DestinationPathObject => "destination",
            Self::OriginPath | Self::OriginPathObject => "origin",
            Self::Context => "context",
            Self::FileName => "file_name",
            Self::Reader => "reader",
            Self::Text => "text",
            Self::Object => "object",
            Self::Type => "type",
            Self::ByteArray => "bytes",
            Self::Bitmap => "bitmap",
            Self::Preferences => "preferences",
            Self::Folder | Self::PathToFolder => "folder",
            Self::PathToFile => "file",
            Self::Path => "path",
            Self::DatabaseName => "database_name",
            Self::OriginUri | Self::PathInUri => "uri",
        }
    }

    /// Phrase used in the body of validation messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::DestinationPath => "the destination path",
            Self::DestinationPathObject => "the String path contained in the destination Path object",
            Self::OriginPath => "the origin path",
            Self::OriginPathObject => "the String path contained in the origin Path object",
            Self::Context => "the context",
            Self::FileName => "the file name",
            Self::Reader => "the reader",
            Self::Text => "the text",
            Self::Object => "the object",
            Self::Type => "the type",
            Self::ByteArray => "the byte array",
            Self::Bitmap => "the bitmap",
            Self::Preferences => "the preferences store",
            Self::Folder => "the folder",
            Self::PathToFolder => "the path to folder",
            Self::PathToFile => "the path to file",
            Self::Path => "the path",
            Self::DatabaseName => "the data base name",
            Self::OriginUri => "the origin uri",
            Self::PathInUri => "the file referenced by the uri",
        }
    }
}

/// Why a parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Invalidity {
    /// The parameter is valid.
    #[default]
    None,
    /// A required reference is absent.
    IsNull,
    /// A string is empty.
    IsEmpty,
    /// The file does not exist.
    FileDoesntExist,
    /// The entry should be a directory and is not.
    NotADirectory,
    /// The entry should be a file and is a directory.
    IsADirectory,
    /// The folder that would contain the entry does not exist.
    ContainerFolderDoesntExist,
    /// A folder cannot be created because a file has its name.
    ExistsAsNotDirectory,
    /// The value cannot be serialized.
    NotSerializable,
    /// The asset cannot be opened.
    AssetDoesntExist,
    /// The uri cannot be turned into a reader.
    UnparseableUri,
    /// Anything else.
    Unexpected,
}

impl Invalidity {
    /// Phrase used in validation messages.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::None => "",
            Self::IsNull => "is null",
            Self::IsEmpty => "is empty",
            Self::FileDoesntExist => "doesn't exist",
            Self::NotADirectory => "is not a directory",
            Self::IsADirectory => "is a directory when it should be a file",
            Self::ContainerFolderDoesntExist => {
                "would be contained in a folder that still doesn't exist. You must create it first"
            }
            Self::ExistsAsNotDirectory => "already exists and is not a directory",
            Self::NotSerializable => "is not serializable",
            Self::AssetDoesntExist => "refers to an asset file that doesn't exist",
            Self::UnparseableUri => "refers to a file that couldn't be converted into a reader",
            Self::Unexpected => "is unexpected",
        }
    }

    /// Whether this is [`Invalidity::None`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::None)
    }
}

impl fmt::Display for Invalidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// The storage operation being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Method {
    CopyFromReader,
    ImportFromAssets,
    ImportDatabaseFromAssets,
    SaveTextFile,
    LoadTextFile,
    SaveObject,
    LoadObject,
    SaveByteArray,
    Exists,
    IsValidForSaving,
    DuplicateFile,
    DuplicateFolder,
    DeleteFile,
    ClearFolder,
    IsFolderEmpty,
    CreateFolder,
    LongestValidPath,
    IsDirectory,
    FilesInDirectory,
    FileTree,
    SaveBitmap,
    LoadBitmap,
    LoadBitmapFromAssets,
    LoadBitmapFromUri,
    SaveSharedPreferences,
    LoadSharedPreferences,
    RestoreSharedPreferences,
}

impl Method {
    /// Call signature quoted in validation messages.
    #[must_use]
    pub const fn signature(self) -> &'static str {
        match self {
            Self::CopyFromReader => "copy_from_reader(origin, reader, destination)",
            Self::ImportFromAssets => "import_from_assets(file_name, destination)",
            Self::ImportDatabaseFromAssets => "import_database_from_assets(database_name)",
            Self::SaveTextFile => "save_text_file(text, destination, append)",
            Self::LoadTextFile => "load_text_file(origin)",
            Self::SaveObject => "save_object(object, destination)",
            Self::LoadObject => "load_object(origin)",
            Self::SaveByteArray => "save_byte_array(bytes, destination)",
            Self::Exists => "exists(file)",
            Self::IsValidForSaving => "is_valid_for_saving(path, is_folder)",
            Self::DuplicateFile => "duplicate_file(origin, destination)",
            Self::DuplicateFolder => "duplicate_folder(origin, destination)",
            Self::DeleteFile => "delete_file(file, clear_if_directory)",
            Self::ClearFolder => "clear_folder(folder)",
            Self::IsFolderEmpty => "is_folder_empty(folder)",
            Self::CreateFolder => "create_folder(folder)",
            Self::LongestValidPath => "longest_valid_path(path)",
            Self::IsDirectory => "is_directory(file)",
            Self::FilesInDirectory => "files_in_directory(folder)",
            Self::FileTree => "file_tree(folder)",
            Self::SaveBitmap => "save_bitmap(bitmap, destination)",
            Self::LoadBitmap => "load_bitmap(origin)",
            Self::LoadBitmapFromAssets => "load_bitmap_from_assets(file_name)",
            Self::LoadBitmapFromUri => "load_bitmap_from_uri(uri)",
            Self::SaveSharedPreferences => "save_shared_preferences(preferences, destination)",
            Self::LoadSharedPreferences => "load_shared_preferences(origin)",
            Self::RestoreSharedPreferences => "restore_shared_preferences(origin, preferences)",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}
