//! Dotted field-path selection over scanned entries.
//!
//! `.2.1` selects field 1 of the message in field 2 and everything below it.

use std::ops::Deref;

use eyre::{eyre, Result};

use crate::inspect::entry::Entry;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery(Vec<u32>);

impl Deref for SelectQuery {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl SelectQuery {
    /// Parses a path such as `.2.1` or `2.1`. The empty string and `.` select
    /// everything.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.strip_prefix('.').unwrap_or(input);
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let path = trimmed
            .split('.')
            .map(|component| component.parse::<u32>().map_err(|e| eyre!(e)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self(path))
    }
}

/// True when the query is a prefix of the entry's path.
pub fn is_selected(entry: &Entry, query: &SelectQuery) -> bool {
    entry.path.starts_with(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::entry::{EntryPath, EntryValue};

    fn err(input: &str) -> String {
        SelectQuery::parse(input).unwrap_err().to_string()
    }

    #[test]
    fn parse_empty_selects_everything() {
        assert!(SelectQuery::parse("").unwrap().is_empty());
        assert!(SelectQuery::parse(".").unwrap().is_empty());
    }

    #[test]
    fn parse_with_and_without_leading_dot() {
        assert_eq!(&*SelectQuery::parse("1").unwrap(), &[1]);
        assert_eq!(&*SelectQuery::parse(".1").unwrap(), &[1]);
        assert_eq!(&*SelectQuery::parse("1.2").unwrap(), &[1, 2]);
        assert_eq!(&*SelectQuery::parse(".1.2").unwrap(), &[1, 2]);
        assert_eq!(&*SelectQuery::parse("3.3").unwrap(), &[3, 3]);
    }

    #[test]
    fn parse_reports_integer_errors() {
        assert_eq!(err("1.2_3"), "invalid digit found in string");
        assert_eq!(err("1.2 3"), "invalid digit found in string");
        assert_eq!(err("2_3"), "invalid digit found in string");
        assert_eq!(err("2 3"), "invalid digit found in string");
    }

    #[test]
    fn parse_rejects_empty_components() {
        for input in [".1..2", ".1.", "..", "..1"] {
            assert_eq!(err(input), "cannot parse integer from empty string");
        }
    }

    #[test]
    fn selection_is_a_path_prefix() {
        let entry = Entry {
            path: EntryPath::from_slice(&[1, 2, 3]),
            value: EntryValue::Varint(1),
        };
        let selects = |q: &str| is_selected(&entry, &SelectQuery::parse(q).unwrap());

        assert!(selects(""));
        assert!(selects(".1"));
        assert!(selects(".1.2"));
        assert!(selects(".1.2.3"));
        assert!(!selects(".1.2.3.4"));
        assert!(!selects(".5"));
    }
}
