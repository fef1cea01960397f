//! Task records encoded entirely in filenames.
//!
//! Every piece of mutable task state (priority, labels, completion) lives in
//! the file's *name*, never its contents. A directory of plain documents is
//! therefore the whole database: any listing can be re-derived into
//! structured records, and every record mutation is an atomic rename that
//! keeps the filesystem the single source of truth.
//!
//! The crate is split along the same seams as the data flow:
//! - [`name`] — the bidirectional filename codec
//! - [`tags`] — the ordered, duplicate-rejecting tag collection
//! - [`task`] — a live record that owns exactly one on-disk identity
//! - [`store`] — directory scan and priority bucketing
//! - [`queue`] — resumable review/work cursors over a bucket snapshot
//!
//! Everything here is synchronous and single-threaded; renames are single
//! syscalls, so an interrupt can never leave a half-written name.

pub mod config;
pub mod error;
pub mod name;
pub mod priority;
pub mod queue;
pub mod store;
pub mod tags;
pub mod task;

pub use config::Config;
pub use error::{Error, Result};
pub use name::TaskName;
pub use priority::Priority;
pub use queue::{Position, ReviewQueue, Step, WorkQueue};
pub use store::{BucketKey, Buckets, find_tagged, normalize_filter_tag, scan};
pub use tags::TagSet;
pub use task::Task;

/// Crate version, surfaced by the CLI's `version` command.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tag that marks a task as completed, orthogonal to priority.
pub const DONE_TAG: &str = "done";

/// Subdirectory that completed tasks are moved into.
pub const COMPLETED_DIR: &str = "completed";

/// Bookkeeping file remembering the last selected task across sessions.
pub const LAST_SELECTION_FILE: &str = ".last.tagmark";

/// Log file written next to the tasks when file logging is enabled.
pub const LOG_FILE: &str = "tagmark.log";
