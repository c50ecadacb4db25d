//! Requested targets and components.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Split a free-form name list into a set.
///
/// Commas, semicolons and whitespace are equivalent delimiters; empty
/// tokens are dropped and case is preserved.
pub fn parse_name_list(data: &str) -> BTreeSet<String> {
    data.split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// What the user asked to build.
///
/// Both sets empty means "build everything".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedSet {
    /// Target library names.
    pub targets: BTreeSet<String>,
    /// Component names, taken verbatim.
    pub components: BTreeSet<String>,
}

impl RequestedSet {
    /// Build a request from the raw option strings.
    pub fn parse(targets: &str, components: &str) -> Self {
        RequestedSet {
            targets: parse_name_list(targets),
            components: parse_name_list(components),
        }
    }

    /// Request specific components only.
    pub fn components<I, S>(components: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequestedSet {
            targets: BTreeSet::new(),
            components: components.into_iter().map(Into::into).collect(),
        }
    }

    /// Request specific target libraries only.
    pub fn targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequestedSet {
            targets: targets.into_iter().map(Into::into).collect(),
            components: BTreeSet::new(),
        }
    }

    /// Nothing requested.
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty() && self.components.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_name_list("").is_empty());
        assert!(parse_name_list(" ,; ").is_empty());
    }

    #[test]
    fn test_delimiters_are_equivalent() {
        assert_eq!(parse_name_list("a,b;c d"), set(&["a", "b", "c", "d"]));
        assert_eq!(parse_name_list("a;b"), parse_name_list("a, b"));
        assert_eq!(parse_name_list("a\tb\nc"), set(&["a", "b", "c"]));
    }

    #[test]
    fn test_empty_tokens_dropped_and_duplicates_merged() {
        assert_eq!(parse_name_list(",,xncbi;;xncbi, ,xser,"), set(&["xncbi", "xser"]));
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(parse_name_list("Core core"), set(&["Core", "core"]));
    }

    #[test]
    fn test_requested_set() {
        let req = RequestedSet::parse("xncbi", "");
        assert_eq!(req.targets, set(&["xncbi"]));
        assert!(req.components.is_empty());
        assert!(!req.is_empty());
        assert!(RequestedSet::parse("", " ; ").is_empty());
    }
}
