//! [`ParseString`]: the string-encoded working representation of a partial parse.
//!
//! A `ParseString` interleaves angle-bracketed label atoms (`<DT>`, `<NN>`, …) with brace-
//! delimited grouping markers (`{`, `}`). A [`Rule`](crate::rule::Rule) transforms this encoding
//! with a single regex substitution that wraps newly recognized spans in braces; converting back
//! to a [`Tree`] reconstitutes the grouping those braces describe.

use crate::error::ParseStringCorruption;
use crate::tree::{Node, Tree};
use crate::util::Trace;
use once_cell::sync::Lazy;
use regex::Regex;

static TAG_SPLITTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}<>]+").unwrap());
static QUANTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\d+(,\d*)?\}").unwrap());
static NON_BRACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^{}]+").unwrap());
static GROUP_SPLITTER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").unwrap());

/// The string-encoded working representation of a partial parse of one tree's immediate children.
pub struct ParseString {
    parse_string: String,
    pieces: Vec<Node>,
    root_label: String,
    debug_level: usize,
}

impl ParseString {
    /// Build a `ParseString` from the immediate children of `tree`. Nothing is grouped yet.
    pub fn new(tree: Tree, debug_level: usize) -> Self {
        let root_label = tree.label;
        let pieces = tree.children;
        let labels: Vec<&str> = pieces.iter().map(|p| p.label().unwrap_or("")).collect();
        let parse_string = format!("<{}>", labels.join("><"));
        Self {
            parse_string,
            pieces,
            root_label,
            debug_level,
        }
    }

    /// The current string encoding, for tracing or inspection.
    pub fn as_str(&self) -> &str {
        &self.parse_string
    }

    /// Apply a transformer (typically a [`Rule`](crate::rule::Rule)'s substitution) to the string
    /// encoding. The transformer may only add and remove braces; it must never change the
    /// sequence of label atoms.
    pub fn apply_transform(
        &mut self,
        transformer: impl Fn(&str) -> String,
    ) -> Result<(), ParseStringCorruption> {
        let mut s = transformer(&self.parse_string);
        s = s.replace("{}", "");

        if self.debug_level >= 2 {
            self.verify(&s, self.debug_level >= 3)?;
        }

        self.parse_string = s;
        Ok(())
    }

    /// Validate that `s` is a well-formed encoding of `self.pieces`: solely `<label>` atoms and
    /// balanced, non-nested braces, and (if `check_labels`) that the labels in `s` exactly match
    /// `self.pieces`' labels in order.
    fn verify(&self, s: &str, check_labels: bool) -> Result<(), ParseStringCorruption> {
        if !is_well_formed_encoding(s) {
            return Err(ParseStringCorruption::new(
                s,
                "not composed solely of <label> atoms and braces",
            ));
        }
        if !has_balanced_non_nested_braces(s) {
            return Err(ParseStringCorruption::new(
                s,
                "braces are unbalanced or nested",
            ));
        }
        if check_labels {
            let found: Vec<&str> = tag_splitter(s);
            let expected: Vec<&str> = self.pieces.iter().map(|p| p.label().unwrap_or("")).collect();
            if found != expected {
                return Err(ParseStringCorruption::new(s, "label sequence changed"));
            }
        }
        Ok(())
    }

    /// Convert this `ParseString` back to a [`Tree`], wrapping every grouped span in a new subtree
    /// labeled `group_label`.
    pub fn to_tree(&self, group_label: &str) -> Result<Tree, ParseStringCorruption> {
        if self.debug_level >= 1 {
            self.verify(&self.parse_string, true)?;
        }

        let mut collected = Vec::with_capacity(self.pieces.len());
        let mut index = 0;
        let mut in_group = false;

        for piece in GROUP_SPLITTER.split(&self.parse_string) {
            let length = piece.matches('<').count();
            let subsequence = self.pieces[index..index + length].to_vec();

            if in_group {
                collected.push(Node::Tree(Tree::new(group_label, subsequence)));
            } else {
                collected.extend(subsequence);
            }

            index += length;
            in_group = !in_group;
        }

        Ok(Tree::new(self.root_label.clone(), collected))
    }

    /// Emit the before/after state of a transform at the given trace level, mirroring the
    /// tracing contract of [`Rule::parse`](crate::rule::Rule::parse).
    pub fn trace(&self, trace: Trace, heading: &str) {
        trace.normal(format!("# {heading}:"));
        trace.verbose(format!("  {}", self.as_str()));
    }
}

/// Split `s` on brace/angle-bracket delimiters, returning only the non-empty label fragments,
/// in order. Used to extract the sequence of labels encoded by a `ParseString`.
fn tag_splitter(s: &str) -> Vec<&str> {
    TAG_SPLITTER
        .split(s)
        .filter(|fragment| !fragment.is_empty())
        .collect()
}

/// Whether `s` consists solely of `<label>` atoms interspersed with `{`/`}` delimiters: no stray
/// characters outside of angle brackets or braces.
fn is_well_formed_encoding(s: &str) -> bool {
    let mut in_atom = false;
    for c in s.chars() {
        match c {
            '<' if !in_atom => in_atom = true,
            '>' if in_atom => in_atom = false,
            '{' | '}' if !in_atom => {}
            _ if in_atom => {}
            _ => return false,
        }
    }
    !in_atom
}

/// Whether `s` contains balanced and non-nested curly braces.
///
/// Approach: strip counted-quantifier spans, strip every non-brace character, then repeatedly
/// remove adjacent `{}` pairs; if nothing is left, the braces were balanced and not nested.
fn has_balanced_non_nested_braces(s: &str) -> bool {
    let without_quantifiers = QUANTIFIER.replace_all(s, "");
    let braces_only = NON_BRACE.replace_all(&without_quantifiers, "");
    // A single pass of removing adjacent "{}" pairs: nested braces like "{{}}" leave a residual
    // "{}" behind rather than vanishing, which is how this distinguishes balanced-but-nested
    // from balanced-and-flat without a full parse.
    braces_only.replace("{}", "").is_empty()
}
