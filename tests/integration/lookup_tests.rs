use super::common::{run, scratch, write_file};
use mediadex::engine::Indexer;
use mediadex::reporter::NullReporter;
use mediadex::scanner::{Digest, Hasher, MediaKind};
use std::sync::Arc;

#[test]
fn test_lookup_both_directions() {
    let dir = scratch();
    let photo = write_file(dir.path(), "Album/Pic.jpeg", b"look me up");
    run(dir.path());

    let indexer = Indexer::open(dir.path(), Arc::new(NullReporter)).unwrap();
    let key = indexer.key_for(&photo).unwrap();
    let digest = indexer.store().digest_for_path(&key).unwrap().unwrap();

    assert_eq!(digest, Hasher::new().hash(&photo, MediaKind::Picture).unwrap());
    assert_eq!(
        indexer.store().path_for_digest(&digest).unwrap().as_deref(),
        Some("album/pic.jpeg")
    );
}

#[test]
fn test_lookup_missing_is_empty_not_error() {
    let dir = scratch();
    let indexer = Indexer::open(dir.path(), Arc::new(NullReporter)).unwrap();

    assert!(indexer.store().digest_for_path("nope.jpg").unwrap().is_none());
    assert!(indexer
        .store()
        .path_for_digest(&Digest::from_encoded("AAAA"))
        .unwrap()
        .is_none());
}
