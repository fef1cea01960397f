//! The fixed priority enumeration and its tag tokens.

use std::fmt;

use crate::error::{Error, Result};

/// Task urgency, encoded as a distinguished tag inside the filename bracket.
///
/// `Inbox` is the landing bucket for freshly created tasks and ranks ahead
/// of `1-now` when deriving a task's priority from its tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Inbox,
    Now,
    Next,
    Soon,
    Later,
    Someday,
    Waiting,
}

impl Priority {
    /// All priorities in rank order, most urgent first. This is both the
    /// derivation scan order and the report display order.
    pub const ALL: [Priority; 7] = [
        Priority::Inbox,
        Priority::Now,
        Priority::Next,
        Priority::Soon,
        Priority::Later,
        Priority::Someday,
        Priority::Waiting,
    ];

    /// The tag token this priority is stored as.
    pub fn as_tag(self) -> &'static str {
        match self {
            Priority::Inbox => "inbox",
            Priority::Now => "1-now",
            Priority::Next => "2-next",
            Priority::Soon => "3-soon",
            Priority::Later => "4-later",
            Priority::Someday => "5-someday",
            Priority::Waiting => "6-waiting",
        }
    }

    /// Parse a user-supplied priority key. Accepts the shorthand digits
    /// (`1`..`6`), `inbox`, and the full tag tokens.
    pub fn from_key(key: &str) -> Result<Priority> {
        match key {
            "inbox" => Ok(Priority::Inbox),
            "1" | "1-now" => Ok(Priority::Now),
            "2" | "2-next" => Ok(Priority::Next),
            "3" | "3-soon" => Ok(Priority::Soon),
            "4" | "4-later" => Ok(Priority::Later),
            "5" | "5-someday" => Ok(Priority::Someday),
            "6" | "6-waiting" => Ok(Priority::Waiting),
            _ => Err(Error::InvalidPriority {
                input: key.to_string(),
            }),
        }
    }

    /// Whether `tag` is one of the enumerated priority tokens.
    pub fn from_tag(tag: &str) -> Option<Priority> {
        Priority::ALL.into_iter().find(|p| p.as_tag() == tag)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}
