use super::common::{entry_count, run, scratch, write_file};
use mediadex::engine::update_index;
use mediadex::index::HashIndex;
use mediadex::scanner::{Hasher, MediaKind};

#[test]
fn test_first_run_indexes_supported_files() {
    let dir = scratch();
    write_file(dir.path(), "2023/a.jpg", b"picture a");
    write_file(dir.path(), "2023/b.PNG", b"picture b");
    write_file(dir.path(), "clips/c.mov", b"video c");

    let (groups, summary) = run(dir.path());

    assert!(groups.is_empty());
    assert_eq!(summary.visited, 3);
    assert_eq!(summary.new_files, 3);
    assert_eq!(summary.errors, 0);
    assert_eq!(entry_count(dir.path()), 3);
}

#[test]
fn test_second_run_is_idempotent() {
    let dir = scratch();
    write_file(dir.path(), "a/1.jpg", b"one");
    write_file(dir.path(), "b/2.heic", b"two");
    write_file(dir.path(), "c/3.mp4", b"three");

    let (first_groups, _) = run(dir.path());
    let count = entry_count(dir.path());
    let (second_groups, summary) = run(dir.path());

    assert!(first_groups.is_empty());
    assert!(second_groups.is_empty());
    assert_eq!(summary.unchanged, 3);
    assert_eq!(summary.new_files, 0);
    assert_eq!(entry_count(dir.path()), count);
}

#[test]
fn test_second_run_reports_no_new_groups() {
    let dir = scratch();
    write_file(dir.path(), "a/1.jpg", b"same");
    write_file(dir.path(), "b/1.jpg", b"same");

    let (first, _) = run(dir.path());
    let count = entry_count(dir.path());
    let (second, _) = run(dir.path());

    // The unresolved copy is seen again, but nothing beyond what the first
    // run already reported.
    assert_eq!(first, second);
    assert_eq!(entry_count(dir.path()), count);
}

#[test]
fn test_unsupported_files_never_indexed() {
    let dir = scratch();
    write_file(dir.path(), "notes/readme.txt", b"same");
    write_file(dir.path(), "notes/copy.txt", b"same");
    write_file(dir.path(), "raw/IMG.dng", b"same");
    write_file(dir.path(), "noext", b"same");

    let (groups, summary) = run(dir.path());

    assert!(groups.is_empty());
    assert_eq!(summary.visited, 0);
    assert_eq!(entry_count(dir.path()), 0);
}

#[test]
fn test_store_survives_reopen() {
    let dir = scratch();
    let photo = write_file(dir.path(), "x/photo.jpg", b"durable");
    run(dir.path());

    let expected = Hasher::new().hash(&photo, MediaKind::Picture).unwrap();
    let store = HashIndex::open(dir.path()).unwrap();
    assert_eq!(store.digest_for_path("x/photo.jpg").unwrap(), Some(expected.clone()));
    assert_eq!(store.path_for_digest(&expected).unwrap().as_deref(), Some("x/photo.jpg"));
}

#[test]
fn test_walk_root_below_store_root() {
    let dir = scratch();
    write_file(dir.path(), "library/a.jpg", b"a");
    write_file(dir.path(), "incoming/b.jpg", b"b");

    let groups = update_index(dir.path(), &dir.path().join("incoming")).unwrap();
    assert!(groups.is_empty());

    let store = HashIndex::open(dir.path()).unwrap();
    let paths: Vec<String> = store.entries().unwrap().into_iter().map(|e| e.path).collect();
    assert_eq!(paths, vec!["incoming/b.jpg"]);
}

#[test]
fn test_video_digest_stable_and_prefix_bound() {
    let dir = scratch();
    let mut first = vec![7u8; 10 * 1024];
    first.extend_from_slice(b"tail one");
    let mut second = vec![7u8; 10 * 1024];
    second.extend_from_slice(b"tail two");
    let a = write_file(dir.path(), "a/clip.mp4", &first);
    let b = write_file(dir.path(), "b/clip.mp4", &second);

    let hasher = Hasher::new();
    let digest_a = hasher.hash(&a, MediaKind::Video).unwrap();
    assert_eq!(digest_a, hasher.hash(&a, MediaKind::Video).unwrap());
    assert_eq!(digest_a, hasher.hash(&b, MediaKind::Video).unwrap());

    // Same prefix and size collide, so the engine reports them together
    let (groups, _) = run(dir.path());
    assert_eq!(groups.len(), 1);
}

#[test]
fn test_video_size_distinguishes_same_prefix() {
    let dir = scratch();
    let mut long = vec![1u8; 10 * 1024];
    long.push(0);
    let a = write_file(dir.path(), "a.mov", &vec![1u8; 10 * 1024]);
    let b = write_file(dir.path(), "b.mov", &long);

    let hasher = Hasher::new();
    assert_ne!(
        hasher.hash(&a, MediaKind::Video).unwrap(),
        hasher.hash(&b, MediaKind::Video).unwrap()
    );
}
