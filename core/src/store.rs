//! Directory scan and priority bucketing.
//!
//! A scan is a snapshot: the bucket map is rebuilt from a fresh listing every
//! time a session starts and is never kept live across external changes.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::priority::Priority;
use crate::task::Task;
use crate::{DONE_TAG, LAST_SELECTION_FILE, LOG_FILE};

/// Bookkeeping files that are never tasks.
const IGNORED_FILES: [&str; 3] = [LAST_SELECTION_FILE, ".gitignore", LOG_FILE];

/// List every task file in `dir`, decoded. Regular files only; bookkeeping
/// files and editor swap files are skipped, and a missing directory scans as
/// empty. The `completed/` subdirectory is not descended into.
pub fn scan(dir: impl AsRef<Path>) -> Result<Vec<Task>> {
    let dir = dir.as_ref();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(Error::io(dir, e)),
    };
    let mut tasks = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if IGNORED_FILES.contains(&name.as_str()) || is_swap_file(&name) {
            continue;
        }
        tasks.push(Task::open(entry.path())?);
    }
    debug!(dir = %dir.display(), count = tasks.len(), "scanned task directory");
    Ok(tasks)
}

// Vim swap files: a three-character extension starting with "sw".
fn is_swap_file(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.len() == 3 && ext.starts_with("sw"))
}

/// Identity of one bucket in the fixed report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Priority(Priority),
    Done,
    /// Tasks with no priority tag at all.
    Unprioritized,
}

impl BucketKey {
    /// Fixed report order: `inbox`, `1-now` .. `6-waiting`, `done`, `none`.
    pub const ALL: [BucketKey; 9] = [
        BucketKey::Priority(Priority::Inbox),
        BucketKey::Priority(Priority::Now),
        BucketKey::Priority(Priority::Next),
        BucketKey::Priority(Priority::Soon),
        BucketKey::Priority(Priority::Later),
        BucketKey::Priority(Priority::Someday),
        BucketKey::Priority(Priority::Waiting),
        BucketKey::Done,
        BucketKey::Unprioritized,
    ];

    fn of(task: &Task) -> BucketKey {
        // Done overrides priority placement even if a stale priority tag
        // remains.
        if task.is_done() {
            BucketKey::Done
        } else {
            match task.priority() {
                Some(p) => BucketKey::Priority(p),
                None => BucketKey::Unprioritized,
            }
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Priority(p) => p.fmt(f),
            BucketKey::Done => f.write_str(DONE_TAG),
            BucketKey::Unprioritized => f.write_str("none"),
        }
    }
}

/// Tasks grouped by bucket, in fixed report order.
#[derive(Debug)]
pub struct Buckets {
    buckets: Vec<(BucketKey, Vec<Task>)>,
}

impl Buckets {
    /// Scan `dir` and bucket the result.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Buckets> {
        Ok(Buckets::from_tasks(scan(dir)?))
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Buckets {
        let mut buckets: Vec<(BucketKey, Vec<Task>)> =
            BucketKey::ALL.into_iter().map(|k| (k, Vec::new())).collect();
        for task in tasks {
            let key = BucketKey::of(&task);
            if let Some((_, bucket)) = buckets.iter_mut().find(|(k, _)| *k == key) {
                bucket.push(task);
            }
        }
        Buckets { buckets }
    }

    /// Buckets in report order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (BucketKey, &[Task])> {
        self.buckets.iter().map(|(k, v)| (*k, v.as_slice()))
    }

    pub fn get(&self, key: BucketKey) -> &[Task] {
        self.buckets
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, v)| v.len()).sum()
    }

    pub(crate) fn into_inner(self) -> Vec<(BucketKey, Vec<Task>)> {
        self.buckets
    }
}

/// Normalize a work-queue filter key: priority shorthand becomes the full
/// token, anything else passes through as a plain tag.
pub fn normalize_filter_tag(key: &str) -> String {
    match Priority::from_key(key) {
        Ok(p) => p.as_tag().to_string(),
        Err(_) => key.to_string(),
    }
}

/// Tasks in `dir` carrying every one of `tags` (already normalized).
pub fn find_tagged(dir: impl AsRef<Path>, tags: &[String]) -> Result<Vec<Task>> {
    let tasks = scan(dir)?;
    Ok(tasks
        .into_iter()
        .filter(|task| tags.iter().all(|tag| task.tags().contains(tag)))
        .collect())
}
