//! # Memkit
//!
//! Validated storage utilities for mobile and desktop applications.
//!
//! Memkit builds paths inside the well-known directories of a platform,
//! checks every parameter before touching the disk and explains each result
//! in a human readable message.
//!
//! ## Features
//!
//! Memkit is modular. Enable only the parts you need.
//!
//! - `fs`: storage directories, platform contexts and the path builder.
//! - `store`: text, byte, object, file and folder operations with validation.
//! - `bitmap`: saving and loading images.
//! - `prefs`: backup and restore of key/value preferences.
//!
//! Use the `full` feature to enable everything.
//!
//! ## Example
//!
//! ```toml
//! [dependencies]
//! memkit = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use memkit::fs::{StorageDirectory, sys::DesktopContext};
//! use memkit::store::{Config, Storage};
//!
//! let storage = Storage::new(Config::default())
//!     .with_context(Arc::new(DesktopContext::new("com.example.notes")));
//!
//! let path = storage
//!     .path()
//!     .expect("context is set")
//!     .storage_directory(StorageDirectory::PrivateInternal)
//!     .folder("drafts")
//!     .file("today.txt")
//!     .build()?;
//! let saved = storage.save_text_file("Buy milk", &path, true);
//! println!("{}", saved.message());
//! ```

#[cfg(feature = "fs")]
pub use memkit_fs as fs;

#[cfg(feature = "store")]
pub use memkit_store as store;

#[cfg(feature = "bitmap")]
pub use memkit_bitmap as bitmap;

#[cfg(feature = "prefs")]
pub use memkit_prefs as prefs;
