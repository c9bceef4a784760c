use std::{collections::BTreeMap, fs, io::Cursor, sync::Arc};

use memkit_fs::{Path, SandboxContext, StorageDirectory, StorageState};
use memkit_store::{Config, Invalidity, Storage, StoreError};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Note {
    title: String,
    tags: Vec<String>,
}

fn sandbox() -> (TempDir, Arc<SandboxContext>, Storage) {
    let dir = tempfile::tempdir().unwrap();
    let context = Arc::new(SandboxContext::new(dir.path()));
    let storage = Storage::new(Config::default().with_throw_on_invalid(false))
        .with_context(context.clone());
    (dir, context, storage)
}

fn text(path: &std::path::Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn path_destinations_create_their_folders() {
    let (_dir, context, storage) = sandbox();
    let path = Path::builder(context.as_ref())
        .storage_directory(StorageDirectory::PrivateInternal)
        .folder("a")
        .folder("b")
        .file("f.txt")
        .build()
        .unwrap();

    let saved = storage.save_text_file("hi", &path, false);
    assert!(saved.is_successful(), "{}", saved.message());
    assert_eq!(saved.payload(), Some(&path.to_path_buf()));

    let base = std::path::Path::new(path.base_path());
    assert!(base.join("a").is_dir());
    assert!(base.join("a/b").is_dir());
    assert!(storage.exists(&path));

    let refused = storage.delete_file(&text(&base.join("a")), false);
    assert!(!refused.is_successful());
    assert!(refused.message().contains("clear_if_directory"));
    assert!(storage.exists(&path));

    let deleted = storage.delete_file(&text(&base.join("a")), true);
    assert!(deleted.is_successful(), "{}", deleted.message());
    assert!(!base.join("a").exists());
}

#[test]
fn create_path_is_idempotent() {
    let (_dir, context, storage) = sandbox();
    let path = Path::builder(context.as_ref())
        .storage_directory(StorageDirectory::PublicExternal)
        .folder("x")
        .folder("y")
        .build()
        .unwrap();

    let first = storage.create_path(&path);
    let second = storage.create_path(&path);
    assert!(first.is_successful());
    assert!(second.is_successful());
    assert_eq!(second.payload(), Some(&path.to_path_buf()));
    assert!(second.message().contains("x/y"));
}

#[test]
fn create_path_without_folders() {
    let (_dir, context, storage) = sandbox();
    let path = Path::builder(context.as_ref())
        .storage_directory(StorageDirectory::PrivateInternal)
        .file("f.txt")
        .build()
        .unwrap();
    let created = storage.create_path(&path);
    assert!(created.is_successful());
    assert!(created.message().contains("contains no folders"));
}

#[test]
fn deleting_a_missing_file_succeeds_without_payload() {
    let (dir, _context, storage) = sandbox();
    let deleted = storage.delete_file(&dir.path().join("ghost.txt"), false);
    assert!(deleted.is_successful());
    assert_eq!(deleted.payload(), None);
}

#[test]
fn text_round_trip_terminates_lines() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("t.txt");

    assert!(storage.save_text_file("hello", &file, false).is_successful());
    assert_eq!(storage.load_text_file(&file).into_payload().as_deref(), Some("hello\n"));

    assert!(storage.save_text_file("\nworld", &file, true).is_successful());
    assert_eq!(
        storage.load_text_file(&file).into_payload().as_deref(),
        Some("hello\nworld\n")
    );

    assert!(storage.save_text_file("reset", &file, false).is_successful());
    assert_eq!(storage.load_text_file(&file).into_payload().as_deref(), Some("reset\n"));
}

#[test]
fn object_round_trip() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("note.json");
    let note = Note {
        title: "groceries".to_owned(),
        tags: vec!["home".to_owned()],
    };

    assert!(storage.save_object(&note, &file).is_successful());
    let loaded = storage.load_object::<Note>(&file);
    assert!(loaded.is_successful(), "{}", loaded.message());
    assert_eq!(loaded.into_payload(), Some(note));
}

#[test]
fn loading_the_wrong_type_or_garbage_fails() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("note.json");
    let note = Note {
        title: "t".to_owned(),
        tags: Vec::new(),
    };
    assert!(storage.save_object(&note, &file).is_successful());

    let mismatch = storage.load_object::<Vec<u8>>(&file);
    assert!(!mismatch.is_successful());
    assert!(mismatch.message().contains("does not match the requested type"));
    assert!(mismatch.message().contains("Vec<u8>"));

    fs::write(&file, "not json{").unwrap();
    let garbage = storage.load_object::<Note>(&file);
    assert!(!garbage.is_successful());
    assert!(garbage.message().contains("could not be read"));
}

#[test]
fn unserializable_objects_are_rejected_before_writing() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("map.json");
    let map: BTreeMap<(u8, u8), u8> = BTreeMap::from([((1, 2), 3)]);

    let saved = storage.save_object(&map, &file);
    assert!(!saved.is_successful());
    assert_eq!(saved.invalidity(), Some(Invalidity::NotSerializable));
    assert!(!file.exists());
}

#[test]
fn byte_arrays_replace_contents() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("blob.bin");

    assert!(storage.save_byte_array(&[1, 2, 3], &file).is_successful());
    assert_eq!(fs::read(&file).unwrap(), [1, 2, 3]);

    assert!(storage.save_byte_array(&[], &file).is_successful());
    assert!(fs::read(&file).unwrap().is_empty());
}

#[test]
fn missing_container_is_reported() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("nowhere/t.txt");

    let saved = storage.save_text_file("x", &file, false);
    assert_eq!(saved.invalidity(), Some(Invalidity::ContainerFolderDoesntExist));
    assert!(saved.message().starts_with("You're calling save_text_file"));
    assert!(matches!(
        saved.into_result(),
        Err(StoreError::InvalidParameter { .. })
    ));
}

#[test]
#[should_panic(expected = "the destination path that you're passing is empty")]
fn invalid_parameters_panic_when_configured() {
    let storage = Storage::new(Config::default());
    let _ = storage.save_text_file("x", "", false);
}

#[test]
fn copy_from_reader_writes_everything() {
    let (dir, _context, storage) = sandbox();
    let file = dir.path().join("copy.bin");
    let data: Vec<u8> = (0..=255).cycle().take(5000).collect();

    let copied = storage.copy_from_reader("memory", &mut Cursor::new(data.clone()), &file);
    assert!(copied.is_successful(), "{}", copied.message());
    assert_eq!(fs::read(&file).unwrap(), data);
    assert!(copied.message().starts_with("File memory was copied to"));
}

#[test]
fn duplicates_files_and_folders() {
    let (dir, _context, storage) = sandbox();
    let origin = dir.path().join("src");
    fs::create_dir_all(origin.join("nested")).unwrap();
    fs::write(origin.join("a.txt"), "a").unwrap();
    fs::write(origin.join("nested/b.txt"), "b").unwrap();

    let copy = dir.path().join("copy.txt");
    assert!(storage.duplicate_file(&origin.join("a.txt"), &copy).is_successful());
    assert_eq!(fs::read_to_string(&copy).unwrap(), "a");

    let target = dir.path().join("dst");
    let duplicated = storage.duplicate_folder(&origin, &target);
    assert!(duplicated.is_successful(), "{}", duplicated.message());
    assert_eq!(fs::read_to_string(target.join("nested/b.txt")).unwrap(), "b");

    let into_itself = storage.duplicate_folder(&origin, &origin.join("inner"));
    assert!(!into_itself.is_successful());
}

#[test]
fn folders_are_not_duplicated_into_themselves_through_another_spelling() {
    let (_dir, _context, storage) = sandbox();
    let scratch = tempfile::Builder::new().tempdir_in(".").unwrap();
    let name = scratch.path().file_name().unwrap().to_owned();
    let relative = std::path::Path::new(&name).join("src");
    fs::create_dir_all(relative.join("nested")).unwrap();
    fs::write(relative.join("nested/a.txt"), "a").unwrap();

    let absolute = std::env::current_dir().unwrap().join(&relative);
    let duplicated = storage.duplicate_folder(&relative, &absolute.join("inner"));
    assert!(!duplicated.is_successful(), "{}", duplicated.message());
    assert!(!absolute.join("inner").exists());

    fs::create_dir(scratch.path().join("other")).unwrap();
    let dotted = scratch.path().join("other/../src/inner");
    let duplicated = storage.duplicate_folder(&absolute, &dotted);
    assert!(!duplicated.is_successful(), "{}", duplicated.message());
    assert!(!absolute.join("inner").exists());
}

#[test]
fn deleting_a_built_file_path() {
    let (_dir, context, storage) = sandbox();
    let path = Path::builder(context.as_ref())
        .storage_directory(StorageDirectory::PrivateInternal)
        .folder("a")
        .folder("b")
        .file("f.txt")
        .build()
        .unwrap();

    assert!(storage.save_text_file("hello", &path, false).is_successful());
    assert!(storage.exists(&path));

    let deleted = storage.delete_file(&path, false);
    assert!(deleted.is_successful(), "{}", deleted.message());
    assert_eq!(deleted.payload(), Some(&path.to_path_buf()));
    assert!(!storage.exists(&path));
    assert!(std::path::Path::new(&path.folder_path()).is_dir());
}

#[test]
fn clear_and_inspect_folders() {
    let (dir, _context, storage) = sandbox();
    let folder = dir.path().join("box");
    fs::create_dir_all(folder.join("a")).unwrap();
    fs::write(folder.join("a/x.txt"), "x").unwrap();
    fs::write(folder.join("b.txt"), "b").unwrap();

    let listed = storage.files_in_directory(&folder);
    assert_eq!(listed.payload(), Some(&vec!["a".to_owned(), "b.txt".to_owned()]));
    assert!(listed.message().ends_with("a, b.txt."));

    let tree = storage.file_tree(&folder).into_payload().unwrap();
    assert_eq!(
        tree,
        format!("Files in {}:\n\t\\a\n\t\t\\x.txt\n\t\\b.txt\n", folder.display())
    );

    assert!(!storage.is_folder_empty(&folder));
    let cleared = storage.clear_folder(&folder);
    assert!(cleared.is_successful(), "{}", cleared.message());
    assert!(storage.is_folder_empty(&folder));
    assert!(folder.is_dir());

    let again = storage.clear_folder(&folder);
    assert!(again.message().contains("was already empty"));
}

#[test]
fn folder_queries() {
    let (dir, _context, storage) = sandbox();
    let folder = dir.path().join("f");

    assert!(storage.create_folder(&folder).is_successful());
    let again = storage.create_folder(&folder);
    assert!(again.is_successful());
    assert!(again.message().contains("already exists"));
    assert!(storage.is_directory(&folder));

    let file = dir.path().join("plain");
    fs::write(&file, "x").unwrap();
    assert!(!storage.is_directory(&file));
    assert_eq!(
        storage.create_folder(&file).invalidity(),
        Some(Invalidity::ExistsAsNotDirectory)
    );
}

#[test]
fn valid_for_saving_query() {
    let (dir, _context, storage) = sandbox();

    let fine = storage.is_valid_for_saving(&dir.path().join("new.txt"), false);
    assert_eq!(fine.payload(), Some(&Invalidity::None));

    let folder = storage.is_valid_for_saving(dir.path(), false);
    assert!(folder.is_successful());
    assert_eq!(folder.payload(), Some(&Invalidity::IsADirectory));
    assert!(folder.message().contains("is a directory when it should be a file"));
}

#[test]
fn longest_valid_path_stops_at_the_first_missing_segment() {
    let (dir, _context, storage) = sandbox();
    fs::create_dir_all(dir.path().join("a/b")).unwrap();

    let existing = text(&dir.path().join("a/b"));
    assert_eq!(storage.longest_valid_path(existing.as_str()), existing);

    let missing = text(&dir.path().join("a/b/c/d"));
    assert_eq!(storage.longest_valid_path(missing.as_str()), existing);
}

#[test]
fn imports_assets_and_databases() {
    let (_dir, context, storage) = sandbox();
    fs::create_dir_all(context.assets_dir()).unwrap();
    fs::write(context.assets_dir().join("seed.db"), "tables").unwrap();

    let target = context.root().join("seed-copy.db");
    assert!(storage.import_from_assets("seed.db", &target).is_successful());
    assert_eq!(fs::read_to_string(&target).unwrap(), "tables");

    let imported = storage.import_database_from_assets("seed.db");
    assert!(imported.is_successful(), "{}", imported.message());
    let database = context.root().join("databases/seed.db");
    assert_eq!(imported.payload(), Some(&database));
    assert_eq!(fs::read_to_string(database).unwrap(), "tables");

    let missing = storage.import_from_assets("nope.db", &target);
    assert_eq!(missing.invalidity(), Some(Invalidity::AssetDoesntExist));
}

#[test]
fn database_names_must_not_be_empty() {
    let (_dir, context, storage) = sandbox();
    fs::create_dir_all(context.assets_dir()).unwrap();

    let imported = storage.import_database_from_assets("");
    assert_eq!(imported.invalidity(), Some(Invalidity::IsEmpty));
    assert!(imported.message().contains("the data base name that you're passing is empty"));
    assert!(imported.message().contains("import_database_from_assets("));
}

#[test]
fn assets_need_a_context() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::new(Config::default().with_throw_on_invalid(false));
    let imported = storage.import_from_assets("seed.db", &dir.path().join("x.db"));
    assert_eq!(imported.invalidity(), Some(Invalidity::IsNull));
    assert!(imported.message().contains("the context that you're passing is null"));
}

#[test]
fn external_memory_follows_the_context() {
    let dir = tempfile::tempdir().unwrap();
    let mounted = Storage::default().with_context(Arc::new(SandboxContext::new(dir.path())));
    assert!(mounted.is_external_memory_available());

    let removed = Storage::default().with_context(Arc::new(
        SandboxContext::new(dir.path()).with_external_state(StorageState::Removed),
    ));
    assert!(!removed.is_external_memory_available());
    assert!(!Storage::default().is_external_memory_available());
}
