//! Directory scan and bucketing tests.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tagmark_core::{BucketKey, Buckets, Priority, find_tagged, normalize_filter_tag, scan};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").expect("create task file");
}

#[test]
fn scan_skips_bookkeeping_swap_files_and_directories() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "real task[1-now].md");
    touch(dir.path(), ".last.tagmark");
    touch(dir.path(), ".gitignore");
    touch(dir.path(), "tagmark.log");
    touch(dir.path(), ".real task[1-now].md.swp");
    touch(dir.path(), "other.swo");
    fs::create_dir(dir.path().join("completed")).expect("mkdir");
    touch(&dir.path().join("completed"), "old[done].md");

    let tasks = scan(dir.path()).expect("scan");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].file_name(), "real task[1-now].md");
}

#[test]
fn scan_of_missing_directory_is_empty() {
    let dir = TempDir::new().expect("temp dir");
    let tasks = scan(dir.path().join("nowhere")).expect("scan");
    assert!(tasks.is_empty());
}

#[test]
fn buckets_partition_every_task() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[1-now].md");
    touch(dir.path(), "b[1-now extra].md");
    touch(dir.path(), "c[3-soon].md");
    touch(dir.path(), "no priority one.md");
    touch(dir.path(), "no priority two.md");
    touch(dir.path(), "finished[done].md");

    let buckets = Buckets::scan(dir.path()).expect("scan");

    assert_eq!(buckets.total(), 6);
    assert_eq!(buckets.get(BucketKey::Priority(Priority::Now)).len(), 2);
    assert_eq!(buckets.get(BucketKey::Priority(Priority::Soon)).len(), 1);
    assert_eq!(buckets.get(BucketKey::Priority(Priority::Next)).len(), 0);
    assert_eq!(buckets.get(BucketKey::Unprioritized).len(), 2);
    assert_eq!(buckets.get(BucketKey::Done).len(), 1);
}

#[test]
fn done_overrides_a_stale_priority_tag() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "stale[1-now done].md");

    let buckets = Buckets::scan(dir.path()).expect("scan");

    assert_eq!(buckets.get(BucketKey::Done).len(), 1);
    assert_eq!(buckets.get(BucketKey::Priority(Priority::Now)).len(), 0);
}

#[test]
fn report_order_is_fixed() {
    let dir = TempDir::new().expect("temp dir");
    let buckets = Buckets::scan(dir.path()).expect("scan");
    let keys: Vec<String> = buckets.iter().map(|(key, _)| key.to_string()).collect();
    assert_eq!(
        keys,
        [
            "inbox",
            "1-now",
            "2-next",
            "3-soon",
            "4-later",
            "5-someday",
            "6-waiting",
            "done",
            "none"
        ]
    );
}

#[test]
fn find_tagged_requires_every_tag() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[6-waiting email security].md");
    touch(dir.path(), "b[6-waiting email].md");
    touch(dir.path(), "c[email security].md");

    let tags = vec!["6-waiting".to_string(), "email".to_string()];
    let found = find_tagged(dir.path(), &tags).expect("find");

    let mut names: Vec<String> = found.iter().map(|t| t.file_name()).collect();
    names.sort();
    assert_eq!(
        names,
        ["a[6-waiting email security].md", "b[6-waiting email].md"]
    );
}

#[test]
fn filter_keys_normalize_priority_shorthand() {
    assert_eq!(normalize_filter_tag("2"), "2-next");
    assert_eq!(normalize_filter_tag("inbox"), "inbox");
    assert_eq!(normalize_filter_tag("email"), "email");
}
