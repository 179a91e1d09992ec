use super::common::{run, scratch, write_file};
use mediadex::actions::{delete_group_side, DeleteConfig, Side};
use mediadex::engine::update_index;
use mediadex::index::HashIndex;
use mediadex::engine::Indexer;
use mediadex::reporter::NullReporter;
use std::sync::Arc;

#[test]
fn test_keys_are_lowercased() {
    let dir = scratch();
    write_file(dir.path(), "Foo/Bar.JPG", b"mixed case");
    run(dir.path());

    let store = HashIndex::open(dir.path()).unwrap();
    assert!(store.digest_for_path("foo/bar.jpg").unwrap().is_some());
    assert!(store.digest_for_path("Foo/Bar.JPG").unwrap().is_none());
}

#[test]
fn test_key_for_matches_index_key() {
    let dir = scratch();
    write_file(dir.path(), "Foo/Bar.JPG", b"x");
    let indexer = Indexer::open(dir.path(), Arc::new(NullReporter)).unwrap();

    let upper = indexer.key_for(&dir.path().join("Foo/Bar.JPG")).unwrap();
    assert_eq!(upper, "foo/bar.jpg");
}

#[test]
fn test_nfd_and_nfc_names_share_a_key() {
    let dir = scratch();
    write_file(dir.path(), "cafe\u{0301}/a.jpg", b"accent");
    run(dir.path());

    let store = HashIndex::open(dir.path()).unwrap();
    assert!(store.digest_for_path("caf\u{00e9}/a.jpg").unwrap().is_some());
}

#[test]
fn test_delete_removes_nfd_named_copy() {
    let dir = scratch();
    write_file(dir.path(), "a/x.jpg", b"same bytes");
    let nfd = write_file(dir.path(), "cafe\u{0301}/x.jpg", b"same bytes");

    let indexer = Indexer::open(dir.path(), Arc::new(NullReporter)).unwrap();
    let (groups, _) = indexer.run(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].new_files, vec!["cafe\u{0301}/x.jpg"]);

    let result = delete_group_side(
        indexer.store_root(),
        &groups[0],
        Side::New,
        &DeleteConfig::permanent(),
    );

    assert_eq!(result.success_count(), 1);
    assert!(result.missing.is_empty());
    assert!(!nfd.exists());
    assert!(dir.path().join("a/x.jpg").exists());
}

#[test]
fn test_unicode_and_spaces_in_names() {
    let dir = scratch();
    write_file(dir.path(), "Été 2023/plage 01.jpg", b"sun");
    write_file(dir.path(), "日本/写真.png", b"sun");

    let (groups, _) = run(dir.path());

    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    let mut folders = vec![group.original_folder.as_str(), group.new_folder.as_str()];
    folders.sort();
    assert_eq!(folders, vec!["Été 2023", "日本"]);
}

#[test]
fn test_walk_root_outside_store_root() {
    let store = scratch();
    let photos = scratch();
    write_file(photos.path(), "x.jpg", b"elsewhere");

    update_index(store.path(), photos.path()).unwrap();

    let index = HashIndex::open(store.path()).unwrap();
    let entries = index.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].path.starts_with("../"));
    assert!(entries[0].path.ends_with("/x.jpg"));
}

#[test]
fn test_store_root_created_if_missing() {
    let dir = scratch();
    let store_root = dir.path().join("new/store");
    write_file(dir.path(), "pics/a.jpg", b"a");

    update_index(&store_root, &dir.path().join("pics")).unwrap();

    assert!(store_root.join(mediadex::index::STORE_FILE_NAME).exists());
}
