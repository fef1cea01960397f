//! Traversal cursors over a bucket snapshot.
//!
//! Both cursors operate purely on the snapshot taken at session start; the
//! directory is never rescanned mid-session, so out-of-band filesystem
//! changes only become visible to the next session. Mutating the current
//! task updates the in-memory record through [`current_mut`], which the
//! cursor simply keeps pointing at.
//!
//! [`current_mut`]: ReviewQueue::current_mut

use crate::store::{BucketKey, Buckets};
use crate::task::Task;

/// Outcome of a cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The cursor now points at another task.
    Advanced,
    /// Every bucket is exhausted; the session is over.
    Finished,
}

/// Cursor position for prompts: 1-based index, bucket size, bucket identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub index: usize,
    pub len: usize,
    pub bucket: BucketKey,
}

/// Visits every task, one non-empty bucket at a time, in reverse report
/// order — least urgent buckets first, `inbox` last — so a review ends on
/// the most urgent work.
#[derive(Debug)]
pub struct ReviewQueue {
    /// Non-empty buckets only, least urgent first.
    buckets: Vec<(BucketKey, Vec<Task>)>,
    bucket_idx: usize,
    index: usize,
}

impl ReviewQueue {
    pub fn new(buckets: Buckets) -> ReviewQueue {
        let mut buckets: Vec<(BucketKey, Vec<Task>)> = buckets
            .into_inner()
            .into_iter()
            .filter(|(_, tasks)| !tasks.is_empty())
            .collect();
        buckets.reverse();
        ReviewQueue {
            buckets,
            bucket_idx: 0,
            index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn current(&self) -> Option<&Task> {
        self.buckets
            .get(self.bucket_idx)
            .and_then(|(_, tasks)| tasks.get(self.index))
    }

    pub fn current_mut(&mut self) -> Option<&mut Task> {
        self.buckets
            .get_mut(self.bucket_idx)
            .and_then(|(_, tasks)| tasks.get_mut(self.index))
    }

    pub fn position(&self) -> Option<Position> {
        self.buckets.get(self.bucket_idx).map(|(key, tasks)| Position {
            index: self.index + 1,
            len: tasks.len(),
            bucket: *key,
        })
    }

    /// Advance to the next task, rolling over into the next non-empty bucket.
    pub fn advance(&mut self) -> Step {
        match self.buckets.get(self.bucket_idx) {
            Some((_, tasks)) if self.index + 1 < tasks.len() => {
                self.index += 1;
                Step::Advanced
            }
            _ => self.next_bucket(),
        }
    }

    /// Jump to the start of the next bucket, skipping the rest of this one.
    pub fn next_bucket(&mut self) -> Step {
        self.index = 0;
        self.bucket_idx += 1;
        if self.bucket_idx < self.buckets.len() {
            Step::Advanced
        } else {
            Step::Finished
        }
    }
}

/// Flat cursor over a tag-filtered task list: forward, and backward clamped
/// at the first task.
#[derive(Debug)]
pub struct WorkQueue {
    tasks: Vec<Task>,
    index: usize,
}

impl WorkQueue {
    pub fn new(tasks: Vec<Task>) -> WorkQueue {
        WorkQueue { tasks, index: 0 }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn current(&self) -> Option<&Task> {
        self.tasks.get(self.index)
    }

    pub fn current_mut(&mut self) -> Option<&mut Task> {
        self.tasks.get_mut(self.index)
    }

    /// 1-based position of the cursor.
    pub fn position(&self) -> usize {
        self.index + 1
    }

    /// Tasks with their cursor state, for listings.
    pub fn iter(&self) -> impl Iterator<Item = (bool, &Task)> {
        self.tasks
            .iter()
            .enumerate()
            .map(|(i, task)| (i == self.index, task))
    }

    pub fn advance(&mut self) -> Step {
        self.index += 1;
        if self.index >= self.tasks.len() {
            Step::Finished
        } else {
            Step::Advanced
        }
    }

    /// Step back one task, clamped at the first.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }
}
