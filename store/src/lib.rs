//! Validated file, folder, text, byte and object storage.
//!
//! [`Storage`] is the entry point. Every operation takes its targets as a
//! [`Location`] (a plain path or a built [`memkit_fs::Path`]), validates its
//! parameters and reports an [`Outcome`] whose message explains what happened.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use memkit_fs::{Path, SandboxContext, StorageDirectory};
//! use memkit_store::{Config, Storage};
//!
//! let context = Arc::new(SandboxContext::new("/tmp/app"));
//! let storage = Storage::new(Config::default()).with_context(context.clone());
//!
//! let notes = Path::builder(context.as_ref())
//!     .storage_directory(StorageDirectory::PrivateInternal)
//!     .folder("notes")
//!     .file("today.txt")
//!     .build()?;
//! let saved = storage.save_text_file("hello", &notes, false);
//! assert!(saved.is_successful(), "{}", saved.message());
//! # Ok::<(), memkit_fs::PathError>(())
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod location;
mod logger;
pub mod messages;
mod outcome;
mod storage;
pub mod validation;

pub use config::Config;
pub use error::StoreError;
pub use location::Location;
pub use logger::Logger;
pub use memkit_fs::LOG_TARGET;
pub use outcome::Outcome;
pub use storage::Storage;
pub use validation::{
    Check, Invalidity, Method, Parameter, ValidationInfo, Validator, saving_invalidity,
};
