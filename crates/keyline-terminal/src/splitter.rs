//! Splitting a long-command line into a name and an optional parameter.

use regex::Regex;

use keyline_types::error::{KeylineError, Result};

/// Pattern used by [`RegexSplitter::new`]: a run of non-space characters,
/// any number of spaces, then the remainder of the line.
const DEFAULT_PATTERN: &str = r"(?s)([^ ]+) *(.*)";

/// A long-command line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub name: &'a str,
    pub param: Option<&'a str>,
}

/// Extracts a leading command name and a trailing parameter from text.
pub trait LineSplitter {
    /// Split `line`, or `None` if no name can be extracted.
    fn split<'a>(&self, line: &'a str) -> Option<SplitLine<'a>>;
}

/// [`LineSplitter`] backed by a regular expression with two capture groups:
/// the name and the parameter.
#[derive(Debug, Clone)]
pub struct RegexSplitter {
    pattern: Regex,
}

impl RegexSplitter {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(DEFAULT_PATTERN).expect("hardcoded regex"),
        }
    }

    /// Use a custom pattern. It must have at least two capture groups.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| KeylineError::InvalidArgument(format!("invalid split pattern: {e}")))?;
        if pattern.captures_len() < 3 {
            return Err(KeylineError::InvalidArgument(
                "split pattern needs a name group and a parameter group".to_string(),
            ));
        }
        Ok(Self { pattern })
    }
}

impl Default for RegexSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSplitter for RegexSplitter {
    fn split<'a>(&self, line: &'a str) -> Option<SplitLine<'a>> {
        let caps = self.pattern.captures(line)?;
        let name = caps.get(1)?.as_str();
        if name.is_empty() {
            return None;
        }
        let param = caps
            .get(2)
            .map(|m| m.as_str().trim_end_matches([' ', '\r', '\n']))
            .filter(|p| !p.is_empty());
        Some(SplitLine { name, param })
    }
}
