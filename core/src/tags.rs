//! Ordered, duplicate-rejecting tag collection.
//!
//! `TagSet` is a pure value type: it never touches the filesystem. The
//! [`Task`](crate::task::Task) type pairs every tag mutation with the rename
//! side effect, so all persistence funnels through one place.

use crate::error::{Error, Result};

/// Insertion-ordered set of whitespace-free label tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag, unless it is already present. Returns whether the set
    /// changed.
    pub fn append(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.contains(&tag) {
            false
        } else {
            self.tags.push(tag);
            true
        }
    }

    /// Append each novel tag in order, skipping duplicates (both against the
    /// existing set and within `items` itself). Returns whether anything was
    /// added.
    pub fn extend<I, S>(&mut self, items: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut changed = false;
        for item in items {
            changed |= self.append(item);
        }
        changed
    }

    /// In-place ordinal sort.
    pub fn sort(&mut self) {
        self.tags.sort();
    }

    /// Remove a tag. Absent tags are an error the caller must see, never a
    /// silent no-op.
    pub fn remove(&mut self, tag: &str) -> Result<()> {
        match self.tags.iter().position(|t| t == tag) {
            Some(idx) => {
                self.tags.remove(idx);
                Ok(())
            }
            None => Err(Error::TagNotFound {
                tag: tag.to_string(),
            }),
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Space-joined form, as serialized inside the filename bracket.
    pub fn joined(&self) -> String {
        self.tags.join(" ")
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        set.extend(iter);
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn append_rejects_duplicates() {
        let mut tags = TagSet::new();
        assert!(tags.append("one"));
        assert!(!tags.append("one"));
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn extend_preserves_order_and_skips_duplicates() {
        let mut tags: TagSet = ["boring"].into_iter().collect();
        assert!(tags.extend(["and", "boring", "new", "and"]));
        assert_eq!(tags.joined(), "boring and new");
    }

    #[test]
    fn extend_with_nothing_new_reports_unchanged() {
        let mut tags: TagSet = ["a", "b"].into_iter().collect();
        assert!(!tags.extend(["b", "a"]));
    }

    #[test]
    fn sort_is_ordinal() {
        let mut tags: TagSet = ["zoo", "bar", "apple", "Bar"].into_iter().collect();
        tags.sort();
        assert_eq!(tags.joined(), "Bar apple bar zoo");
    }

    #[test]
    fn remove_missing_tag_is_an_error() {
        let mut tags: TagSet = ["here"].into_iter().collect();
        assert!(matches!(
            tags.remove("gone"),
            Err(Error::TagNotFound { .. })
        ));
        tags.remove("here").unwrap();
        assert!(tags.is_empty());
    }
}
