//! Error types surfaced by this crate.
//!
//! Each failure kind is its own struct carrying a human-readable message and the offending
//! fragment, with a hand-written [`Display`] impl, gathered under one [`Error`] enum so callers
//! can propagate failures with `?`.

use std::fmt::{Display, Formatter};

/// A label pattern violated the dialect described in
/// [label_pattern_to_regex](crate::label_pattern::label_pattern_to_regex).
#[derive(Debug, Clone)]
pub struct InvalidLabelPattern {
    pub pattern: String,
    pub message: String,
}

impl InvalidLabelPattern {
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl Display for InvalidLabelPattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvalidLabelPattern: {} (pattern: {:?})",
            self.message, self.pattern
        )
    }
}

/// A line of a grammar did not conform to `LABEL: <pattern> # description`.
#[derive(Debug, Clone)]
pub struct InvalidGrammarLine {
    pub line: String,
    pub message: String,
}

impl InvalidGrammarLine {
    pub fn new(line: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line: line.into(),
            message: message.into(),
        }
    }
}

impl Display for InvalidGrammarLine {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InvalidGrammarLine: {} (line: {:?})",
            self.message, self.line
        )
    }
}

/// A [Rule](crate::rule::Rule) was applied to an empty tree.
#[derive(Debug, Clone)]
pub struct EmptyInputTree {
    pub rule_label: String,
}

impl Display for EmptyInputTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EmptyInputTree: rule {:?} was applied to a tree with no children",
            self.rule_label
        )
    }
}

/// A [ParseString](crate::parse_string::ParseString) failed its internal `_verify` check: either
/// an engine bug, or a caller-supplied custom transformer that broke the encoding contract.
#[derive(Debug, Clone)]
pub struct ParseStringCorruption {
    pub parse_string: String,
    pub message: String,
}

impl ParseStringCorruption {
    pub fn new(parse_string: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            parse_string: parse_string.into(),
            message: message.into(),
        }
    }
}

impl Display for ParseStringCorruption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ParseStringCorruption: {}:\n  {}",
            self.message, self.parse_string
        )
    }
}

/// The union of every error this crate can return.
#[derive(Debug, Clone)]
pub enum Error {
    InvalidLabelPattern(InvalidLabelPattern),
    InvalidGrammarLine(InvalidGrammarLine),
    EmptyInputTree(EmptyInputTree),
    ParseStringCorruption(ParseStringCorruption),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidLabelPattern(e) => Display::fmt(e, f),
            Error::InvalidGrammarLine(e) => Display::fmt(e, f),
            Error::EmptyInputTree(e) => Display::fmt(e, f),
            Error::ParseStringCorruption(e) => Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Error {}

impl From<InvalidLabelPattern> for Error {
    fn from(e: InvalidLabelPattern) -> Self {
        Error::InvalidLabelPattern(e)
    }
}

impl From<InvalidGrammarLine> for Error {
    fn from(e: InvalidGrammarLine) -> Self {
        Error::InvalidGrammarLine(e)
    }
}

impl From<EmptyInputTree> for Error {
    fn from(e: EmptyInputTree) -> Self {
        Error::EmptyInputTree(e)
    }
}

impl From<ParseStringCorruption> for Error {
    fn from(e: ParseStringCorruption) -> Self {
        Error::ParseStringCorruption(e)
    }
}
