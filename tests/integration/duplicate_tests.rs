use super::common::{entry_count, run, scratch, write_file};
use mediadex::duplicates::FolderPair;

#[test]
fn test_copy_in_other_folder_is_duplicate() {
    let dir = scratch();
    write_file(dir.path(), "2023/Trip/IMG_1.jpg", b"beach");
    run(dir.path());

    write_file(dir.path(), "Backup/IMG_1.jpg", b"beach");
    let (groups, summary) = run(dir.path());

    assert_eq!(groups.len(), 1);
    assert_eq!(summary.duplicates, 1);
    let group = &groups[0];
    assert_eq!(group.original_folder, "2023/Trip");
    assert_eq!(group.new_folder, "Backup");
    assert_eq!(group.original_files, vec!["2023/Trip/IMG_1.jpg"]);
    assert_eq!(group.new_files, vec!["Backup/IMG_1.jpg"]);
    assert_eq!(group.key(), FolderPair::new("backup", "2023/trip"));

    // The copy is reported, not indexed
    assert_eq!(entry_count(dir.path()), 1);
}

#[test]
fn test_reversed_pairs_collapse_into_one_group() {
    let dir = scratch();
    write_file(dir.path(), "x/1.jpg", b"first");
    write_file(dir.path(), "y/2.jpg", b"second");
    run(dir.path());

    // y/1.jpg duplicates x/1.jpg, x/2.jpg duplicates y/2.jpg
    write_file(dir.path(), "y/1.jpg", b"first");
    write_file(dir.path(), "x/2.jpg", b"second");
    let (groups, summary) = run(dir.path());

    assert_eq!(summary.duplicates, 2);
    assert_eq!(groups.len(), 1);
    let group = &groups[0];
    let mut all: Vec<&String> = group.original_files.iter().chain(&group.new_files).collect();
    all.sort();
    assert_eq!(all, vec!["x/1.jpg", "x/2.jpg", "y/1.jpg", "y/2.jpg"]);

    // Each side holds files of one folder only
    for file in &group.original_files {
        assert!(file.starts_with(&format!("{}/", group.original_folder)));
    }
    for file in &group.new_files {
        assert!(file.starts_with(&format!("{}/", group.new_folder)));
    }
}

#[test]
fn test_copies_within_one_walk() {
    let dir = scratch();
    write_file(dir.path(), "a/pic.gif", b"gif");
    write_file(dir.path(), "b/pic.gif", b"gif");
    write_file(dir.path(), "c/pic.gif", b"gif");

    let (groups, _) = run(dir.path());

    // a is indexed first (sorted walk); b and c pair with it
    assert_eq!(groups.len(), 2);
    for group in &groups {
        assert_eq!(group.original_folder, "a");
        assert_eq!(group.original_files, vec!["a/pic.gif"]);
    }
}

#[test]
fn test_same_folder_copy() {
    let dir = scratch();
    write_file(dir.path(), "album/a.jpg", b"twin");
    write_file(dir.path(), "album/b.jpg", b"twin");

    let (groups, _) = run(dir.path());

    assert_eq!(groups.len(), 1);
    assert!(groups[0].key().is_same_folder());
    assert_eq!(groups[0].original_files, vec!["album/a.jpg"]);
    assert_eq!(groups[0].new_files, vec!["album/b.jpg"]);
}

#[test]
fn test_different_content_never_grouped() {
    let dir = scratch();
    write_file(dir.path(), "a/1.jpg", b"one");
    write_file(dir.path(), "b/1.jpg", b"two");

    let (groups, _) = run(dir.path());
    assert!(groups.is_empty());
}
