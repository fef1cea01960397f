//! Traversal engine tests: cursor order, mutate-then-advance, termination.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use tagmark_core::{BucketKey, Buckets, Priority, ReviewQueue, Step, WorkQueue, find_tagged};

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), "").expect("create task file");
}

fn review_of(dir: &Path) -> ReviewQueue {
    ReviewQueue::new(Buckets::scan(dir).expect("scan"))
}

#[test]
fn review_visits_least_urgent_buckets_first() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "urgent[1-now].md");
    touch(dir.path(), "someday[5-someday].md");
    touch(dir.path(), "unfiled.md");

    let mut review = review_of(dir.path());

    let mut visited = Vec::new();
    loop {
        let pos = review.position().expect("position");
        visited.push((review.current().expect("current").file_name(), pos.bucket));
        if review.advance() == Step::Finished {
            break;
        }
    }

    assert_eq!(
        visited,
        [
            ("unfiled.md".to_string(), BucketKey::Unprioritized),
            ("someday[5-someday].md".to_string(), BucketKey::Priority(Priority::Someday)),
            ("urgent[1-now].md".to_string(), BucketKey::Priority(Priority::Now)),
        ]
    );
}

#[test]
fn review_terminates_after_exactly_total_advances() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[1-now].md");
    touch(dir.path(), "b[1-now].md");
    touch(dir.path(), "c[3-soon].md");
    touch(dir.path(), "d[6-waiting].md");
    touch(dir.path(), "e.md");

    let buckets = Buckets::scan(dir.path()).expect("scan");
    let total = buckets.total();
    let mut review = ReviewQueue::new(buckets);

    for _ in 0..total - 1 {
        assert_eq!(review.advance(), Step::Advanced);
    }
    assert_eq!(review.advance(), Step::Finished);
}

#[test]
fn empty_directory_gives_an_empty_review() {
    let dir = TempDir::new().expect("temp dir");
    let mut review = review_of(dir.path());
    assert!(review.is_empty());
    assert!(review.current().is_none());
    assert_eq!(review.advance(), Step::Finished);
}

#[test]
fn position_reports_index_within_bucket() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[2-next].md");
    touch(dir.path(), "b[2-next].md");

    let mut review = review_of(dir.path());

    let pos = review.position().expect("position");
    assert_eq!((pos.index, pos.len), (1, 2));
    assert_eq!(pos.bucket, BucketKey::Priority(Priority::Next));

    review.advance();
    let pos = review.position().expect("position");
    assert_eq!((pos.index, pos.len), (2, 2));
}

#[test]
fn next_bucket_skips_the_rest_of_the_current_bucket() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[4-later].md");
    touch(dir.path(), "b[4-later].md");
    touch(dir.path(), "c[1-now].md");

    let mut review = review_of(dir.path());

    assert_eq!(review.next_bucket(), Step::Advanced);
    assert_eq!(review.current().expect("current").file_name(), "c[1-now].md");
    assert_eq!(review.next_bucket(), Step::Finished);
}

#[test]
fn reprioritizing_the_current_task_renames_without_rescan() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "shuffle[5-someday].md");

    let mut review = review_of(dir.path());

    review
        .current_mut()
        .expect("current")
        .set_priority(Some(Priority::Now))
        .expect("set priority");

    // The snapshot record tracks the rename; the directory is not rescanned.
    assert_eq!(
        review.current().expect("current").file_name(),
        "shuffle[1-now].md"
    );
    assert!(dir.path().join("shuffle[1-now].md").exists());
    assert_eq!(review.advance(), Step::Finished);
}

#[test]
fn work_queue_advances_and_clamps_retreat() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[1-now].md");
    touch(dir.path(), "b[1-now].md");

    let tags = vec!["1-now".to_string()];
    let mut work = WorkQueue::new(find_tagged(dir.path(), &tags).expect("find"));

    assert_eq!(work.len(), 2);
    assert_eq!(work.position(), 1);

    work.retreat();
    assert_eq!(work.position(), 1, "retreat clamps at the first task");

    assert_eq!(work.advance(), Step::Advanced);
    assert_eq!(work.position(), 2);
    work.retreat();
    assert_eq!(work.position(), 1);
    work.advance();
    assert_eq!(work.advance(), Step::Finished);
}

#[test]
fn work_queue_marker_follows_the_cursor() {
    let dir = TempDir::new().expect("temp dir");
    touch(dir.path(), "a[1-now].md");
    touch(dir.path(), "b[1-now].md");

    let tags = vec!["1-now".to_string()];
    let mut work = WorkQueue::new(find_tagged(dir.path(), &tags).expect("find"));
    work.advance();

    let markers: Vec<bool> = work.iter().map(|(current, _)| current).collect();
    assert_eq!(markers.iter().filter(|&&m| m).count(), 1);
}
