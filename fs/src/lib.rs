//! Storage directories and path building.
//!
//! This crate resolves the well-known storage roots of an application (private
//! internal files, private and public external storage, the predefined media
//! folders and the database directory) through a [`Context`], and composes them
//! with folder segments and a file name into a [`Path`].
//!
//! ```no_run
//! use memkit_fs::{Path, SandboxContext, StorageDirectory};
//!
//! let context = SandboxContext::new("/tmp/app");
//! let path = Path::builder(&context)
//!     .storage_directory(StorageDirectory::PrivateInternal)
//!     .folder("notes")
//!     .file("today.txt")
//!     .build()?;
//! assert!(path.to_string().ends_with("/notes/today.txt"));
//! # Ok::<(), memkit_fs::PathError>(())
//! ```

#![warn(missing_docs)]

/// Platform-specific implementations.
pub mod sys;

mod context;
mod directory;
mod path;

pub use context::{Context, SandboxContext, StorageState};
pub use directory::{ExternalDirectoryType, StorageDirectory, UnknownDirectoryType};
pub use path::{Path, PathBuilder, PathError};

/// Log target shared by every memkit crate.
pub const LOG_TARGET: &str = "memkit";
