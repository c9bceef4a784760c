use std::{collections::BTreeMap, fmt};

use crate::{PrefValue, PrefsError};

/// A key/value preferences store.
pub trait Preferences: fmt::Debug {
    /// Every stored entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get_all(&self) -> Result<BTreeMap<String, PrefValue>, PrefsError>;

    /// Writes every change of `editor` in one batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the changes.
    fn apply(&mut self, editor: Editor) -> Result<(), PrefsError>;
}

/// A batch of changes to a [`Preferences`] store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Editor {
    changes: BTreeMap<String, PrefValue>,
}

impl Editor {
    /// An empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an earlier change of the same key.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<PrefValue>) -> &mut Self {
        self.changes.insert(key.into(), value.into());
        self
    }

    /// Number of changed keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Whether nothing was changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// The changes.
    #[must_use]
    pub const fn changes(&self) -> &BTreeMap<String, PrefValue> {
        &self.changes
    }

    /// Takes the changes.
    #[must_use]
    pub fn into_changes(self) -> BTreeMap<String, PrefValue> {
        self.changes
    }
}

impl From<BTreeMap<String, PrefValue>> for Editor {
    fn from(changes: BTreeMap<String, PrefValue>) -> Self {
        Self { changes }
    }
}

/// [`Preferences`] held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryPreferences {
    values: BTreeMap<String, PrefValue>,
}

impl InMemoryPreferences {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PrefValue> {
        self.values.get(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, PrefValue>> for InMemoryPreferences {
    fn from(values: BTreeMap<String, PrefValue>) -> Self {
        Self { values }
    }
}

impl Preferences for InMemoryPreferences {
    fn get_all(&self) -> Result<BTreeMap<String, PrefValue>, PrefsError> {
        Ok(self.values.clone())
    }

    fn apply(&mut self, editor: Editor) -> Result<(), PrefsError> {
        self.values.extend(editor.into_changes());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_changes() {
        let mut preferences = InMemoryPreferences::new();
        let mut editor = Editor::new();
        editor.put("volume", 7).put("theme", "dark");
        preferences.apply(editor).unwrap();

        let mut editor = Editor::new();
        editor.put("volume", 3);
        preferences.apply(editor).unwrap();

        assert_eq!(preferences.len(), 2);
        assert_eq!(preferences.get("volume"), Some(&PrefValue::Int(3)));
        assert_eq!(preferences.get("theme"), Some(&PrefValue::from("dark")));
    }
}
