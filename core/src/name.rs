//! The filename codec: `<title>[<tag> <tag> ...].<ext>`.
//!
//! This grammar is the durable wire format of the whole system, so decoding
//! is *total*: every filename maps to some record via deterministic rules,
//! and `encode(decode(name)) == name` for any name. Ambiguity is resolved,
//! never raised:
//!
//! - The tag bracket is the **last** `[`..`]` pair in the name, so titles may
//!   themselves contain brackets.
//! - With a bracket, the extension starts at the first dot after `]` and
//!   runs to the end (`a[b].tar.gz` keeps `ext = "tar.gz"`).
//! - Without a bracket, the extension boundary is the **final** dot, never
//!   the first, so titles containing periods are not truncated.
//! - An extension of `Some("")` (trailing dot) and `None` (no dot) are
//!   distinct and both round-trip.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

use crate::tags::TagSet;

static TAGGED: LazyLock<Regex> = LazyLock::new(|| {
    match Regex::new(r"^(?P<title>.*)\[(?P<tags>.*?)\](?:\.(?P<ext>.*))?$") {
        Ok(re) => re,
        // The pattern is a compile-time constant.
        Err(err) => unreachable!("tag pattern failed to compile: {err}"),
    }
});

/// Decoded form of a task filename.
///
/// `bracketed` records whether the name carries a tag bracket. It starts
/// false only for names that never had one, and once a tag has been added it
/// stays true forever: removing the last tag leaves an empty `[]` rather
/// than dropping the bracket, so untouched bracket-free names stay
/// byte-identical while touched ones keep their bracket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskName {
    pub title: String,
    pub tags: TagSet,
    pub ext: Option<String>,
    pub bracketed: bool,
}

impl TaskName {
    /// Decode a filename. Total: never fails.
    pub fn parse(name: &str) -> TaskName {
        if let Some(caps) = TAGGED.captures(name) {
            return TaskName {
                title: caps["title"].to_string(),
                tags: caps["tags"].split_whitespace().collect(),
                ext: caps.name("ext").map(|m| m.as_str().to_string()),
                bracketed: true,
            };
        }
        // No bracket: split at the final dot, if any.
        let (title, ext) = match name.rfind('.') {
            Some(idx) => (&name[..idx], Some(name[idx + 1..].to_string())),
            None => (name, None),
        };
        TaskName {
            title: title.to_string(),
            tags: TagSet::new(),
            ext,
            bracketed: false,
        }
    }

    /// Serialize back into a filename.
    pub fn encode(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)?;
        if self.bracketed || !self.tags.is_empty() {
            write!(f, "[{}]", self.tags.joined())?;
        }
        if let Some(ext) = &self.ext {
            write!(f, ".{ext}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tags(name: &TaskName) -> Vec<&str> {
        name.tags.iter().collect()
    }

    #[test]
    fn parses_title_with_and_without_tags() {
        assert_eq!(
            TaskName::parse("This is a cool title.md").title,
            "This is a cool title"
        );
        assert_eq!(TaskName::parse("This a[title with tags].md").title, "This a");
    }

    #[test]
    fn bare_title_has_no_extension() {
        let name = TaskName::parse("This is some thing");
        assert_eq!(name.title, "This is some thing");
        assert_eq!(name.ext, None);
        assert!(!name.bracketed);
    }

    #[test]
    fn parses_tags() {
        assert_eq!(tags(&TaskName::parse("no tags here.fnord")), Vec::<&str>::new());
        assert_eq!(tags(&TaskName::parse("some[one].fnord")), vec!["one"]);
        assert_eq!(
            tags(&TaskName::parse("more[more tags are here].fnord")),
            vec!["more", "tags", "are", "here"]
        );
    }

    #[test]
    fn empty_bracket_is_empty_tags_but_bracketed() {
        let name = TaskName::parse("Buy milk[].md");
        assert!(name.tags.is_empty());
        assert!(name.bracketed);
        assert_eq!(name.encode(), "Buy milk[].md");
    }

    #[test]
    fn extension_empty_and_absent_are_distinct() {
        assert_eq!(TaskName::parse("title").ext, None);
        assert_eq!(TaskName::parse("title.").ext, Some(String::new()));
        assert_eq!(TaskName::parse("title.foo").ext, Some("foo".to_string()));
        assert_eq!(TaskName::parse("title.").encode(), "title.");
        assert_eq!(TaskName::parse("title").encode(), "title");
    }

    #[test]
    fn extension_after_bracket_keeps_inner_dots() {
        let name = TaskName::parse("backup[archive].tar.gz");
        assert_eq!(name.ext, Some("tar.gz".to_string()));
        assert_eq!(name.encode(), "backup[archive].tar.gz");
    }

    #[test]
    fn title_periods_split_at_final_dot() {
        let name = TaskName::parse("v1.2 release notes.md");
        assert_eq!(name.title, "v1.2 release notes");
        assert_eq!(name.ext, Some("md".to_string()));
    }

    #[test]
    fn bracket_is_the_last_pair() {
        let name = TaskName::parse("weird [sic] title[real tag].md");
        assert_eq!(name.title, "weird [sic] title");
        assert_eq!(tags(&name), vec!["real", "tag"]);
        assert_eq!(name.encode(), "weird [sic] title[real tag].md");
    }

    #[test]
    fn round_trips_accepted_names() {
        for original in [
            "foo bar [bang quux].md",
            "zippy",
            "doo dah [whoop de doo].quux",
            "Buy milk[2-next].md",
            "plain.txt",
            "dotted.title.txt",
            "trailing[tags].",
            "mid]bracket[a b]",
        ] {
            assert_eq!(TaskName::parse(original).encode(), original);
        }
    }
}
