//! Version-control auto-commit hook.
//!
//! When the task directory is git-tracked, every shell command is followed
//! by a commit of whatever renames it caused, so the filename history
//! doubles as a task-change journal.

use std::process::{Command, Stdio};

use tracing::debug;

/// Whether the current directory is inside a git work tree.
pub fn is_tracked() -> bool {
    Command::new("git")
        .arg("rev-parse")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Stage and commit any pending changes in the current directory. A clean
/// tree is a no-op.
pub fn commit_changes(message: &str) {
    let status = Command::new("git")
        .args(["status", "--porcelain=v2", "--", "."])
        .output();
    let dirty = match status {
        Ok(output) => !output.stdout.trim_ascii().is_empty(),
        Err(err) => {
            debug!(%err, "git status failed");
            return;
        }
    };
    if !dirty {
        return;
    }

    debug!("staging changes");
    if let Err(err) = Command::new("git").args(["add", "."]).output() {
        debug!(%err, "git add failed");
        return;
    }

    debug!(message, "committing");
    match Command::new("git").args(["commit", "-m", message]).output() {
        Ok(output) if !output.status.success() => {
            eprintln!("git error: {}", String::from_utf8_lossy(&output.stderr));
        }
        Ok(_) => {}
        Err(err) => debug!(%err, "git commit failed"),
    }
}
