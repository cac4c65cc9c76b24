//! [`Parser`]: an ordered grammar of [`Rule`]s, applied in sequence for a configurable number of
//! loops, producing a shallow [`Tree`] over a sequence of [`Token`]s.

use crate::error::Error;
use crate::rule::Rule;
use crate::token::Token;
use crate::tree::Tree;
use crate::util::Trace;

/// A grammar-based parser: a sequence of [`Rule`]s with label patterns over token and tree
/// labels, executed in declared order.
///
/// Each rule adds at most one level of grouping per loop; the maximum depth of a parsed tree is
/// `1 + loop_count * rules.len()`.
pub struct Parser {
    pub rules: Vec<Rule>,
    pub root_label: String,
    pub loop_count: usize,
    pub trace_level: usize,
}

impl Parser {
    /// Build a parser from a multi-line grammar string: one rule per non-empty, non-comment line
    /// (lines whose first non-whitespace character is `#` are skipped).
    pub fn new(
        grammar: &str,
        root_label: impl Into<String>,
        loop_count: usize,
        trace_level: usize,
    ) -> Result<Self, Error> {
        let rules = grammar
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(Rule::from_string)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            root_label: root_label.into(),
            loop_count,
            trace_level,
        })
    }

    /// Parse a sequence of tokens, applying every rule once per loop, in order. Returns the
    /// resulting tree; tree depth is bounded by `1 + loop_count * rules.len()`.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Tree, Error> {
        let mut tree = Tree::from_tokens(self.root_label.clone(), tokens);
        let trace = Trace::from(self.trace_level);

        for _ in 0..self.loop_count {
            for rule in &self.rules {
                tree = rule.parse(tree, trace)?;
            }
        }

        Ok(tree)
    }
}

impl std::fmt::Display for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Parser with {} rules:", self.rules.len())?;
        for rule in &self.rules {
            writeln!(f, "{}", rule)?;
        }
        Ok(())
    }
}
