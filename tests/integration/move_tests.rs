use super::common::{entry_count, run, scratch, write_file, Event, RecordingReporter};
use mediadex::engine::Indexer;
use mediadex::index::HashIndex;
use mediadex::scanner::{Hasher, MediaKind};
use std::fs;
use std::sync::Arc;

#[test]
fn test_moved_file_repoints_entry() {
    let dir = scratch();
    let original = write_file(dir.path(), "inbox/IMG_1.jpg", b"moving picture");
    let digest = Hasher::new().hash(&original, MediaKind::Picture).unwrap();
    run(dir.path());

    fs::create_dir_all(dir.path().join("2024/Trip")).unwrap();
    fs::rename(&original, dir.path().join("2024/Trip/IMG_1.jpg")).unwrap();

    let (groups, summary) = run(dir.path());

    assert!(groups.is_empty());
    assert_eq!(summary.moved, 1);
    assert_eq!(entry_count(dir.path()), 1);

    let store = HashIndex::open(dir.path()).unwrap();
    assert_eq!(
        store.path_for_digest(&digest).unwrap().as_deref(),
        Some("2024/trip/img_1.jpg")
    );
    assert!(store.digest_for_path("inbox/img_1.jpg").unwrap().is_none());
}

#[test]
fn test_deleted_then_recreated_is_move() {
    let dir = scratch();
    let a = write_file(dir.path(), "a/photo.png", b"identical");
    run(dir.path());

    fs::remove_file(&a).unwrap();
    write_file(dir.path(), "b/other_name.png", b"identical");

    let reporter = Arc::new(RecordingReporter::default());
    let indexer = Indexer::open(dir.path(), reporter.clone()).unwrap();
    let (groups, _) = indexer.run(dir.path()).unwrap();

    assert!(groups.is_empty());
    assert!(reporter
        .events()
        .contains(&Event::Moved("a/photo.png".to_string(), "b/other_name.png".to_string())));
}

#[test]
fn test_move_then_rerun_is_quiet() {
    let dir = scratch();
    let a = write_file(dir.path(), "old/v.mp4", b"video bytes");
    run(dir.path());
    fs::create_dir_all(dir.path().join("new")).unwrap();
    fs::rename(&a, dir.path().join("new/v.mp4")).unwrap();
    run(dir.path());

    let (groups, summary) = run(dir.path());
    assert!(groups.is_empty());
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.moved, 0);
}

#[test]
fn test_case_only_rename_is_unchanged() {
    let dir = scratch();
    let a = write_file(dir.path(), "trip/img.jpg", b"case");
    run(dir.path());

    fs::rename(&a, dir.path().join("trip/IMG.JPG")).unwrap();
    let (groups, summary) = run(dir.path());

    assert!(groups.is_empty());
    assert_eq!(summary.unchanged, 1);
    assert_eq!(entry_count(dir.path()), 1);
}
