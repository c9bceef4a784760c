use std::collections::{BTreeMap, BTreeSet};

use jni::{
    JNIEnv, JavaVM,
    errors::Error as JniError,
    objects::{GlobalRef, JObject, JValue},
};
use memkit_store::LOG_TARGET;

use crate::{Editor, PrefValue, Preferences, PrefsError};

const MODE_PRIVATE: i32 = 0;
const EDITOR: &str = "Landroid/content/SharedPreferences$Editor;";

/// [`Preferences`] backed by an Android `SharedPreferences` file.
#[derive(Debug)]
pub struct SharedPreferences {
    vm: JavaVM,
    preferences: GlobalRef,
}

impl SharedPreferences {
    /// Opens the private preferences file `name` of `context`.
    ///
    /// # Errors
    ///
    /// Returns an error if any JNI call fails.
    pub fn new(env: &mut JNIEnv<'_>, context: &JObject<'_>, name: &str) -> Result<Self, PrefsError> {
        let name = env.new_string(name)?;
        let preferences = env
            .call_method(
                context,
                "getSharedPreferences",
                "(Ljava/lang/String;I)Landroid/content/SharedPreferences;",
                &[JValue::Object(&name), JValue::Int(MODE_PRIVATE)],
            )?
            .l()?;
        Ok(Self {
            vm: env.get_java_vm()?,
            preferences: env.new_global_ref(preferences)?,
        })
    }

    fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T, PrefsError>,
    ) -> Result<T, PrefsError> {
        let mut env = self.vm.attach_current_thread()?;
        let result = f(&mut env, self.preferences.as_obj());
        if matches!(result, Err(PrefsError::Jni(JniError::JavaException))) {
            env.exception_clear().ok();
        }
        result
    }
}

impl Preferences for SharedPreferences {
    fn get_all(&self) -> Result<BTreeMap<String, PrefValue>, PrefsError> {
        self.with_env(|env, preferences| {
            let map = env
                .call_method(preferences, "getAll", "()Ljava/util/Map;", &[])?
                .l()?;
            let entries = env
                .call_method(&map, "entrySet", "()Ljava/util/Set;", &[])?
                .l()?;
            let iterator = env
                .call_method(&entries, "iterator", "()Ljava/util/Iterator;", &[])?
                .l()?;

            let mut values = BTreeMap::new();
            while env.call_method(&iterator, "hasNext", "()Z", &[])?.z()? {
                let entry = env
                    .call_method(&iterator, "next", "()Ljava/lang/Object;", &[])?
                    .l()?;
                let key = env
                    .call_method(&entry, "getKey", "()Ljava/lang/Object;", &[])?
                    .l()?;
                let value = env
                    .call_method(&entry, "getValue", "()Ljava/lang/Object;", &[])?
                    .l()?;

                let name: String = env.get_string((&key).into())?.into();
                match pref_value(env, &value)? {
                    Some(value) => {
                        values.insert(name, value);
                    }
                    None => {
                        log::warn!(target: LOG_TARGET, "Skipping preference {name} of unsupported type.");
                    }
                }

                env.delete_local_ref(value)?;
                env.delete_local_ref(key)?;
                env.delete_local_ref(entry)?;
            }
            Ok(values)
        })
    }

    fn apply(&mut self, editor: Editor) -> Result<(), PrefsError> {
        self.with_env(|env, preferences| {
            let editor_obj = env
                .call_method(preferences, "edit", format!("(){EDITOR}"), &[])?
                .l()?;

            for (key, value) in editor.into_changes() {
                let key = env.new_string(&key)?;
                let key = JValue::Object(&key);
                match value {
                    PrefValue::Bool(value) => env.call_method(
                        &editor_obj,
                        "putBoolean",
                        format!("(Ljava/lang/String;Z){EDITOR}"),
                        &[key, JValue::Bool(u8::from(value))],
                    )?,
                    PrefValue::Float(value) => env.call_method(
                        &editor_obj,
                        "putFloat",
                        format!("(Ljava/lang/String;F){EDITOR}"),
                        &[key, JValue::Float(value)],
                    )?,
                    PrefValue::Int(value) => env.call_method(
                        &editor_obj,
                        "putInt",
                        format!("(Ljava/lang/String;I){EDITOR}"),
                        &[key, JValue::Int(value)],
                    )?,
                    PrefValue::Long(value) => env.call_method(
                        &editor_obj,
                        "putLong",
                        format!("(Ljava/lang/String;J){EDITOR}"),
                        &[key, JValue::Long(value)],
                    )?,
                    PrefValue::String(value) => {
                        let value = env.new_string(value)?;
                        env.call_method(
                            &editor_obj,
                            "putString",
                            format!("(Ljava/lang/String;Ljava/lang/String;){EDITOR}"),
                            &[key, JValue::Object(&value)],
                        )?
                    }
                    PrefValue::StringSet(values) => {
                        let set = string_set(env, &values)?;
                        env.call_method(
                            &editor_obj,
                            "putStringSet",
                            format!("(Ljava/lang/String;Ljava/util/Set;){EDITOR}"),
                            &[key, JValue::Object(&set)],
                        )?
                    }
                };
            }

            if env.call_method(&editor_obj, "commit", "()Z", &[])?.z()? {
                Ok(())
            } else {
                Err(PrefsError::Backend(
                    "SharedPreferences.Editor.commit() returned false".to_owned(),
                ))
            }
        })
    }
}

fn pref_value(env: &mut JNIEnv<'_>, value: &JObject<'_>) -> Result<Option<PrefValue>, PrefsError> {
    if value.is_null() {
        return Ok(None);
    }
    let value = if env.is_instance_of(value, "java/lang/Boolean")? {
        PrefValue::Bool(env.call_method(value, "booleanValue", "()Z", &[])?.z()?)
    } else if env.is_instance_of(value, "java/lang/Float")? {
        PrefValue::Float(env.call_method(value, "floatValue", "()F", &[])?.f()?)
    } else if env.is_instance_of(value, "java/lang/Integer")? {
        PrefValue::Int(env.call_method(value, "intValue", "()I", &[])?.i()?)
    } else if env.is_instance_of(value, "java/lang/Long")? {
        PrefValue::Long(env.call_method(value, "longValue", "()J", &[])?.j()?)
    } else if env.is_instance_of(value, "java/lang/String")? {
        PrefValue::String(env.get_string(value.into())?.into())
    } else if env.is_instance_of(value, "java/util/Set")? {
        let iterator = env
            .call_method(value, "iterator", "()Ljava/util/Iterator;", &[])?
            .l()?;
        let mut items = BTreeSet::new();
        while env.call_method(&iterator, "hasNext", "()Z", &[])?.z()? {
            let item = env
                .call_method(&iterator, "next", "()Ljava/lang/Object;", &[])?
                .l()?;
            items.insert(env.get_string((&item).into())?.into());
            env.delete_local_ref(item)?;
        }
        PrefValue::StringSet(items)
    } else {
        return Ok(None);
    };
    Ok(Some(value))
}

fn string_set<'local>(
    env: &mut JNIEnv<'local>,
    values: &BTreeSet<String>,
) -> Result<JObject<'local>, PrefsError> {
    let set = env.new_object("java/util/HashSet", "()V", &[])?;
    for value in values {
        let item = env.new_string(value)?;
        env.call_method(&set, "add", "(Ljava/lang/Object;)Z", &[JValue::Object(&item)])?;
        env.delete_local_ref(item)?;
    }
    Ok(set)
}
