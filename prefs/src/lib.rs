//! Backup and restore of key/value preferences.
//!
//! A [`Preferences`] store is saved with [`PreferencesStorage`], which is
//! implemented for [`memkit_store::Storage`]. Backups are JSON objects whose
//! entries are tagged [`PrefValue`]s, so they can be applied back to any store.
//!
//! ```no_run
//! use memkit_prefs::{Editor, InMemoryPreferences, Preferences, PreferencesStorage};
//! use memkit_store::Storage;
//!
//! let storage = Storage::default();
//! let mut settings = InMemoryPreferences::new();
//! let mut editor = Editor::new();
//! editor.put("theme", "dark").put("volume", 7);
//! settings.apply(editor)?;
//!
//! storage.save_shared_preferences(&settings, "/tmp/settings.json");
//! let restored = storage.restore_shared_preferences("/tmp/settings.json", &mut settings);
//! println!("{}", restored.message());
//! # Ok::<(), memkit_prefs::PrefsError>(())
//! ```
//!
//! On Android, `sys::SharedPreferences` wraps a `SharedPreferences` file.

#![warn(missing_docs)]

mod backup;
mod error;
mod store;
pub mod sys;
mod value;

pub use backup::PreferencesStorage;
pub use error::PrefsError;
pub use store::{Editor, InMemoryPreferences, Preferences};
pub use value::PrefValue;
