use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::PathBuf,
};

use memkit_store::{
    Check, Location, Method, Outcome, Parameter, Storage, Validator,
    messages::{
        ALL_PREFERENCES_RESTORED, CANNOT_READ_OBJECT, CANNOT_WRITE_OBJECT,
        DESTINATION_FOLDER_NOT_FOUND, FAILED, FILE_NOT_FOUND, LOAD_SHARED_PREFERENCES,
        NO_PREFERENCES_RESTORED, PREFERENCES_LOADED, PREFERENCES_NOT_RESTORED,
        PREFERENCES_PARTIALLY_RESTORED, PREFERENCES_SAVED, RESTORE_SHARED_PREFERENCES,
        SAVE_SHARED_PREFERENCES, fill,
    },
};
use serde_json::Value;

use crate::{Editor, PrefValue, Preferences};

/// Preferences backup operations on [`Storage`].
pub trait PreferencesStorage {
    /// Saves every entry of `preferences` to `destination`.
    fn save_shared_preferences<'a>(
        &self,
        preferences: &dyn Preferences,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf>;

    /// Reads a backup without interpreting its entries.
    fn load_shared_preferences<'a>(
        &self,
        origin: impl Into<Location<'a>>,
    ) -> Outcome<BTreeMap<String, Value>>;

    /// Applies the entries of a backup to `preferences`.
    ///
    /// Entries that are not a [`PrefValue`] are skipped and listed as
    /// unparseable. Restoring fails when no entry at all can be applied.
    fn restore_shared_preferences<'a>(
        &self,
        origin: impl Into<Location<'a>>,
        preferences: &mut dyn Preferences,
    ) -> Outcome<BTreeMap<String, PrefValue>>;
}

impl PreferencesStorage for Storage {
    fn save_shared_preferences<'a>(
        &self,
        preferences: &dyn Preferences,
        destination: impl Into<Location<'a>>,
    ) -> Outcome<PathBuf> {
        let destination = destination.into();
        Outcome::settle(|| {
            let action = fill(SAVE_SHARED_PREFERENCES, &[&destination.to_string()]);
            let validator =
                Validator::new(Method::SaveSharedPreferences).check(preferences_check());
            let target = self.prepare_destination(validator, &destination, false, &action)?;

            let entries = preferences
                .get_all()
                .map_err(|err| self.fail_with(fill(FAILED, &[&action]), &err))?;
            let file = File::create(&target).map_err(|err| {
                self.fail_with(fill(DESTINATION_FOLDER_NOT_FOUND, &[&action]), &err)
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &entries)
                .map_err(io::Error::from)
                .and_then(|()| writer.flush())
                .map_err(|err| self.fail_with(fill(CANNOT_WRITE_OBJECT, &[&action]), &err))?;

            Ok(self.succeed(Some(PathBuf::from(&target)), fill(PREFERENCES_SAVED, &[&target])))
        })
    }

    fn load_shared_preferences<'a>(
        &self,
        origin: impl Into<Location<'a>>,
    ) -> Outcome<BTreeMap<String, Value>> {
        let origin = origin.into();
        Outcome::settle(|| {
            let action = fill(LOAD_SHARED_PREFERENCES, &[&origin.to_string()]);
            let source =
                self.prepare_origin(Validator::new(Method::LoadSharedPreferences), &origin)?;
            let file = File::open(&source)
                .map_err(|err| self.fail_with(fill(FILE_NOT_FOUND, &[&action]), &err))?;
            let entries: BTreeMap<String, Value> = serde_json::from_reader(BufReader::new(file))
                .map_err(|err| self.fail_with(fill(CANNOT_READ_OBJECT, &[&action]), &err))?;
            Ok(self.succeed(Some(entries), fill(PREFERENCES_LOADED, &[&source])))
        })
    }

    fn restore_shared_preferences<'a>(
        &self,
        origin: impl Into<Location<'a>>,
        preferences: &mut dyn Preferences,
    ) -> Outcome<BTreeMap<String, PrefValue>> {
        let origin = origin.into();
        Outcome::settle(|| {
            let action = fill(RESTORE_SHARED_PREFERENCES, &[&origin.to_string()]);
            let validator =
                Validator::new(Method::RestoreSharedPreferences).check(preferences_check());
            let source = self.prepare_origin(validator, &origin)?;

            let stored = self.load_shared_preferences(source.as_str());
            if !stored.is_successful() {
                return Err(self.fail(fill(PREFERENCES_NOT_RESTORED, &[&source])));
            }

            let mut restored = BTreeMap::new();
            let mut unparseable = Vec::new();
            for (key, raw) in stored.into_payload().unwrap_or_default() {
                match serde_json::from_value::<PrefValue>(raw) {
                    Ok(value) => {
                        restored.insert(key, value);
                    }
                    Err(_) => unparseable.push(key),
                }
            }
            if restored.is_empty() {
                return Err(self.fail(fill(NO_PREFERENCES_RESTORED, &[&source])));
            }

            let summary = summary(&restored, &unparseable);
            preferences
                .apply(Editor::from(restored.clone()))
                .map_err(|err| self.fail_with(fill(FAILED, &[&action]), &err))?;

            let template = if unparseable.is_empty() {
                ALL_PREFERENCES_RESTORED
            } else {
                PREFERENCES_PARTIALLY_RESTORED
            };
            Ok(self.succeed(Some(restored), fill(template, &[&source, &summary])))
        })
    }
}

fn preferences_check() -> Check<'static> {
    Check::Present {
        parameter: Parameter::Preferences,
        value: Some("preferences".to_owned()),
    }
}

fn summary(restored: &BTreeMap<String, PrefValue>, unparseable: &[String]) -> String {
    let mut summary = String::from("Retrieved preferences:\n");
    for (key, value) in restored {
        summary.push_str(&format!("{key}: {value}\n"));
    }
    if !unparseable.is_empty() {
        summary.push_str("Unparseable preferences:\n");
        for key in unparseable {
            summary.push_str(key);
            summary.push('\n');
        }
    }
    summary
}
