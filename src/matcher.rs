//! Header predicates.
//!
//! A [`HeaderMatcher`] decides, once per header field, whether that column is
//! kept. It is consulted only while the header row is evaluated; data rows are
//! projected from the resulting [`ColumnSet`](crate::ColumnSet).

use std::collections::HashSet;

use regex::bytes::Regex;

use crate::error::ExtractError;

/// Decides whether a header field names a wanted column.
pub trait HeaderMatcher {
    fn matches(&self, field: &[u8]) -> bool;
}

impl<F: Fn(&[u8]) -> bool> HeaderMatcher for F {
    fn matches(&self, field: &[u8]) -> bool {
        self(field)
    }
}

/// Selects fields in which the pattern matches anywhere.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    /// Compile one pattern, or several as an alternation.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, ExtractError> {
        let regex = match patterns {
            [] => return Err(ExtractError::NoPatterns),
            [single] => Regex::new(single.as_ref())?,
            many => {
                let joined = many
                    .iter()
                    .map(|p| format!("(?:{})", p.as_ref()))
                    .collect::<Vec<_>>()
                    .join("|");
                Regex::new(&joined)?
            }
        };
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl HeaderMatcher for RegexMatcher {
    fn matches(&self, field: &[u8]) -> bool {
        self.regex.is_match(field)
    }
}

/// Selects fields equal to one of a list of column names.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    names: HashSet<Vec<u8>>,
}

impl ExactMatcher {
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, ExtractError> {
        if names.is_empty() {
            return Err(ExtractError::NoPatterns);
        }
        Ok(Self {
            names: names
                .iter()
                .map(|n| n.as_ref().as_bytes().to_vec())
                .collect(),
        })
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl HeaderMatcher for ExactMatcher {
    fn matches(&self, field: &[u8]) -> bool {
        self.names.contains(field)
    }
}

/// How `-s` arguments are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Each argument is a regular expression searched within the field.
    Regex,
    /// Each argument is a complete column name.
    Exact,
}

impl MatchMode {
    /// Columns the [`ColumnSet`](crate::ColumnSet) can hold before growing.
    ///
    /// A regex may select any number of columns, so it starts wide; a name
    /// list usually picks a few near the front.
    pub fn initial_column_capacity(self) -> usize {
        match self {
            MatchMode::Regex => 4096,
            MatchMode::Exact => 64,
        }
    }
}

/// Build the matcher for `mode` from the raw `-s` arguments.
pub fn build_matcher<S: AsRef<str>>(
    mode: MatchMode,
    patterns: &[S],
) -> Result<Box<dyn HeaderMatcher>, ExtractError> {
    Ok(match mode {
        MatchMode::Regex => Box::new(RegexMatcher::new(patterns)?),
        MatchMode::Exact => Box::new(ExactMatcher::new(patterns)?),
    })
}
