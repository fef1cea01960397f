//! A live task record that owns exactly one on-disk identity.
//!
//! The invariant is lock-step: `path == dir/encode(name)` holds immediately
//! after every mutation, because each mutator builds the candidate name,
//! performs the rename, and only then commits the in-memory record. A failed
//! rename therefore leaves the record exactly at the state the filesystem
//! actually has — there is no observable window where the two disagree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::name::TaskName;
use crate::priority::Priority;
use crate::tags::TagSet;
use crate::{COMPLETED_DIR, DONE_TAG};

#[derive(Debug, Clone)]
pub struct Task {
    dir: PathBuf,
    name: TaskName,
    /// The file's current on-disk identity.
    path: PathBuf,
}

impl Task {
    /// Open an existing task file. Fails with [`Error::NotFound`] unless
    /// `path` is a regular file.
    pub fn open(path: impl AsRef<Path>) -> Result<Task> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }
        let dir = match path.parent() {
            Some(parent) if parent != Path::new("") => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Task {
            dir,
            name: TaskName::parse(&file_name),
            path: path.to_path_buf(),
        })
    }

    /// Create a new task file in `dir` with a `Title:` header body and a
    /// creation-timestamp tag, filed under the `inbox` priority.
    pub fn create(dir: impl AsRef<Path>, title: &str) -> Result<Task> {
        let dir = dir.as_ref();
        let stamp = chrono::Local::now().format("%Y%m%d~%H%M%S");
        let file_name = format!("{}[{stamp}].md", title.replace(' ', "-"));
        let path = dir.join(&file_name);
        fs::write(&path, format!("Title: {title}\n\n")).map_err(|e| Error::io(&path, e))?;
        let mut task = Task {
            dir: dir.to_path_buf(),
            name: TaskName::parse(&file_name),
            path,
        };
        task.set_priority(Some(Priority::Inbox))?;
        info!(file = %task.file_name(), "created task");
        Ok(task)
    }

    pub fn title(&self) -> &str {
        &self.name.title
    }

    pub fn tags(&self) -> &TagSet {
        &self.name.tags
    }

    pub fn ext(&self) -> Option<&str> {
        self.name.ext.as_deref()
    }

    /// The encoded filename (no directory component).
    pub fn file_name(&self) -> String {
        self.name.encode()
    }

    /// The file's current full path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_done(&self) -> bool {
        self.name.tags.contains(DONE_TAG)
    }

    /// Derived priority: the first enumerated token found among the tags,
    /// scanned in rank order.
    pub fn priority(&self) -> Option<Priority> {
        derived_priority(&self.name.tags)
    }

    /// Replace the title, renaming the file.
    pub fn set_title(&mut self, title: impl Into<String>) -> Result<()> {
        let mut name = self.name.clone();
        name.title = title.into();
        self.apply(name)
    }

    /// Append a tag (no-op if already present), renaming the file.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> Result<()> {
        self.add_tags([tag.into()])
    }

    /// Append each novel tag, renaming the file once for the whole batch.
    pub fn add_tags<I, S>(&mut self, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut name = self.name.clone();
        name.tags.extend(tags);
        // Once a tag has ever been present the bracket never drops.
        name.bracketed = name.bracketed || !name.tags.is_empty();
        self.apply(name)
    }

    /// Sort tags in ordinal order, renaming the file.
    pub fn sort_tags(&mut self) -> Result<()> {
        let mut name = self.name.clone();
        name.tags.sort();
        self.apply(name)
    }

    /// Remove a tag, renaming the file. Absent tags surface
    /// [`Error::TagNotFound`]; nothing is renamed in that case.
    pub fn remove_tag(&mut self, tag: &str) -> Result<()> {
        let mut name = self.name.clone();
        name.tags.remove(tag)?;
        self.apply(name)
    }

    /// Set or clear the priority. The old priority tag (if any) is removed
    /// and the new one appended, so at most one priority token is ever
    /// present; the whole exchange is a single rename.
    pub fn set_priority(&mut self, priority: Option<Priority>) -> Result<()> {
        let mut name = self.name.clone();
        if let Some(current) = derived_priority(&name.tags) {
            name.tags.remove(current.as_tag())?;
        }
        if let Some(new) = priority {
            name.tags.append(new.as_tag());
            name.bracketed = true;
        }
        self.apply(name)
    }

    /// Mark the task done: clear the priority, append the `done` tag, and
    /// move the file into the `completed/` subdirectory (created on demand).
    ///
    /// The in-place rename commits before the move, so if the move fails the
    /// record still matches what is on disk: a `done`-tagged file in the
    /// working directory.
    pub fn complete(&mut self) -> Result<()> {
        let mut name = self.name.clone();
        if let Some(current) = derived_priority(&name.tags) {
            name.tags.remove(current.as_tag())?;
        }
        name.tags.append(DONE_TAG);
        name.bracketed = true;
        self.apply(name)?;

        let completed = self.dir.join(COMPLETED_DIR);
        fs::create_dir_all(&completed).map_err(|e| Error::io(&completed, e))?;
        let target = completed.join(self.file_name());
        fs::rename(&self.path, &target).map_err(|e| Error::Rename {
            from: self.path.clone(),
            to: target.clone(),
            source: e,
        })?;
        debug!(from = %self.path.display(), to = %target.display(), "completed task");
        self.dir = completed;
        self.path = target;
        Ok(())
    }

    /// Read the file contents at the current on-disk identity.
    pub fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))
    }

    /// Rename to `name` and commit it. On failure neither the record nor the
    /// filesystem changes; renaming to the identical path is a no-op.
    fn apply(&mut self, name: TaskName) -> Result<()> {
        let new_path = self.dir.join(name.encode());
        if new_path != self.path {
            fs::rename(&self.path, &new_path).map_err(|e| Error::Rename {
                from: self.path.clone(),
                to: new_path.clone(),
                source: e,
            })?;
            debug!(from = %self.path.display(), to = %new_path.display(), "renamed task");
            self.path = new_path;
        }
        self.name = name;
        Ok(())
    }
}

fn derived_priority(tags: &TagSet) -> Option<Priority> {
    Priority::ALL.into_iter().find(|p| tags.contains(p.as_tag()))
}
