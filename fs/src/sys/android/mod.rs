use std::{
    fs::File,
    io::{self, Cursor, Read},
    path::PathBuf,
};

use jni::{
    JNIEnv, JavaVM,
    errors::Error as JniError,
    objects::{GlobalRef, JObject, JValue},
};
use url::Url;

use crate::{Context, ExternalDirectoryType, LOG_TARGET, StorageState};

const ENVIRONMENT: &str = "android/os/Environment";
const BUFFER_LEN: i32 = 1024;

/// [`Context`] backed by an Android `android.content.Context`.
#[derive(Debug)]
pub struct AndroidContext {
    vm: JavaVM,
    context: GlobalRef,
}

impl AndroidContext {
    /// Wraps an application or activity context.
    ///
    /// # Errors
    ///
    /// Returns an error if the VM or a global reference cannot be obtained.
    pub fn new(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> jni::errors::Result<Self> {
        Ok(Self {
            vm: env.get_java_vm()?,
            context: env.new_global_ref(context)?,
        })
    }

    /// Runs `f` on an attached thread, clearing any pending Java exception.
    fn with_env<T>(
        &self,
        f: impl FnOnce(&mut JNIEnv<'_>) -> jni::errors::Result<T>,
    ) -> jni::errors::Result<T> {
        let mut env = self.vm.attach_current_thread()?;
        let result = f(&mut env);
        if matches!(result, Err(JniError::JavaException)) {
            env.exception_clear().ok();
        }
        result
    }

    fn directory(
        &self,
        what: &str,
        f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> jni::errors::Result<Option<PathBuf>>,
    ) -> Option<PathBuf> {
        self.with_env(|env| f(env, self.context.as_obj()))
            .unwrap_or_else(|err| {
                log::error!(target: LOG_TARGET, "Error getting {what}: {err}");
                None
            })
    }
}

fn file_path(env: &mut JNIEnv<'_>, file: &JObject<'_>) -> jni::errors::Result<Option<PathBuf>> {
    if file.is_null() {
        return Ok(None);
    }
    let path = env
        .call_method(file, "getAbsolutePath", "()Ljava/lang/String;", &[])?
        .l()?;
    let path: String = env.get_string((&path).into())?.into();
    Ok(Some(PathBuf::from(path)))
}

fn read_stream(env: &mut JNIEnv<'_>, stream: &JObject<'_>) -> jni::errors::Result<Vec<u8>> {
    let buffer = env.new_byte_array(BUFFER_LEN)?;
    let mut chunk = [0i8; BUFFER_LEN as usize];
    let mut bytes = Vec::new();
    loop {
        let read = env
            .call_method(stream, "read", "([B)I", &[JValue::Object(&buffer)])?
            .i()?;
        let Ok(read) = usize::try_from(read) else {
            break;
        };
        env.get_byte_array_region(&buffer, 0, &mut chunk[..read])?;
        bytes.extend(chunk[..read].iter().map(|b| u8::from_ne_bytes(b.to_ne_bytes())));
    }
    env.call_method(stream, "close", "()V", &[])?;
    Ok(bytes)
}

fn to_io(err: JniError) -> io::Error {
    match err {
        JniError::JavaException => io::Error::new(io::ErrorKind::NotFound, "Java exception"),
        other => io::Error::other(other.to_string()),
    }
}

impl Context for AndroidContext {
    fn files_dir(&self) -> Option<PathBuf> {
        self.directory("files dir", |env, context| {
            let dir = env
                .call_method(context, "getFilesDir", "()Ljava/io/File;", &[])?
                .l()?;
            file_path(env, &dir)
        })
    }

    fn external_files_dir(&self, kind: Option<ExternalDirectoryType>) -> Option<PathBuf> {
        self.directory("external files dir", |env, context| {
            let kind = match kind {
                Some(kind) => JObject::from(env.new_string(kind.platform_name())?),
                None => JObject::null(),
            };
            let dir = env
                .call_method(
                    context,
                    "getExternalFilesDir",
                    "(Ljava/lang/String;)Ljava/io/File;",
                    &[JValue::Object(&kind)],
                )?
                .l()?;
            file_path(env, &dir)
        })
    }

    fn external_storage_dir(&self) -> Option<PathBuf> {
        self.directory("external storage dir", |env, _| {
            let dir = env
                .call_static_method(
                    ENVIRONMENT,
                    "getExternalStorageDirectory",
                    "()Ljava/io/File;",
                    &[],
                )?
                .l()?;
            file_path(env, &dir)
        })
    }

    fn external_public_dir(&self, kind: ExternalDirectoryType) -> Option<PathBuf> {
        self.directory("external public dir", |env, _| {
            let kind = env.new_string(kind.platform_name())?;
            let dir = env
                .call_static_method(
                    ENVIRONMENT,
                    "getExternalStoragePublicDirectory",
                    "(Ljava/lang/String;)Ljava/io/File;",
                    &[JValue::Object(&kind)],
                )?
                .l()?;
            file_path(env, &dir)
        })
    }

    fn database_path(&self, name: &str) -> Option<PathBuf> {
        self.directory("database path", |env, context| {
            let name = env.new_string(name)?;
            let file = env
                .call_method(
                    context,
                    "getDatabasePath",
                    "(Ljava/lang/String;)Ljava/io/File;",
                    &[JValue::Object(&name)],
                )?
                .l()?;
            file_path(env, &file)
        })
    }

    fn external_storage_state(&self) -> StorageState {
        let state = self.with_env(|env| {
            let state = env
                .call_static_method(
                    ENVIRONMENT,
                    "getExternalStorageState",
                    "()Ljava/lang/String;",
                    &[],
                )?
                .l()?;
            let state: String = env.get_string((&state).into())?.into();
            Ok(state)
        });
        match state {
            Ok(state) => StorageState::from_platform(&state),
            Err(err) => {
                log::error!(target: LOG_TARGET, "Error getting external storage state: {err}");
                StorageState::Unknown
            }
        }
    }

    fn open_asset(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let bytes = self
            .with_env(|env| {
                let assets = env
                    .call_method(
                        self.context.as_obj(),
                        "getAssets",
                        "()Landroid/content/res/AssetManager;",
                        &[],
                    )?
                    .l()?;
                let name = env.new_string(name)?;
                let stream = env
                    .call_method(
                        &assets,
                        "open",
                        "(Ljava/lang/String;)Ljava/io/InputStream;",
                        &[JValue::Object(&name)],
                    )?
                    .l()?;
                read_stream(env, &stream)
            })
            .map_err(to_io)?;
        Ok(Box::new(Cursor::new(bytes)))
    }

    fn open_uri(&self, uri: &Url) -> io::Result<Option<Box<dyn Read + '_>>> {
        if uri.scheme() == "file" {
            let Ok(path) = uri.to_file_path() else {
                return Ok(None);
            };
            return Ok(Some(Box::new(File::open(path)?)));
        }

        let bytes = self
            .with_env(|env| {
                let text = env.new_string(uri.as_str())?;
                let uri = env
                    .call_static_method(
                        "android/net/Uri",
                        "parse",
                        "(Ljava/lang/String;)Landroid/net/Uri;",
                        &[JValue::Object(&text)],
                    )?
                    .l()?;
                let resolver = env
                    .call_method(
                        self.context.as_obj(),
                        "getContentResolver",
                        "()Landroid/content/ContentResolver;",
                        &[],
                    )?
                    .l()?;
                let stream = env
                    .call_method(
                        &resolver,
                        "openInputStream",
                        "(Landroid/net/Uri;)Ljava/io/InputStream;",
                        &[JValue::Object(&uri)],
                    )?
                    .l()?;
                if stream.is_null() {
                    return Ok(None);
                }
                read_stream(env, &stream).map(Some)
            })
            .map_err(to_io)?;
        Ok(bytes.map(|bytes| Box::new(Cursor::new(bytes)) as Box<dyn Read>))
    }
}
