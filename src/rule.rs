//! [`Rule`]: a (pattern, group-label, description) triple that groups a contiguous run of
//! already-labeled tokens or trees into one new labeled subtree.

use crate::error::{EmptyInputTree, Error, InvalidGrammarLine, InvalidLabelPattern};
use crate::label_pattern::compile_label_pattern;
use crate::parse_string::ParseString;
use crate::token::{as_label, is_label};
use crate::tree::Tree;
use crate::util::Trace;
use once_cell::sync::Lazy;
use regex::Regex;

/// Splits a ParseString encoding on `{`/`}` boundaries into alternating not-yet-grouped and
/// already-grouped spans (braces are non-nested, so the spans strictly alternate starting with a
/// not-yet-grouped one). Used by [`Rule::substitute`] to restrict matching to ungrouped spans.
static GROUP_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}]").unwrap());

/// The behavior a [`Rule`] applies to its matched spans.
///
/// The reference implementation shared this behavior across a class hierarchy of chunk/strip/
/// merge/split rule variants; here it is a single struct with a tag instead, since the definitive
/// design only needs the wrap-in-braces behavior. A future `Strip`/`Split`/`Merge` variant is a
/// new match arm on this enum, not a new type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// Wrap every matched span in braces, creating a new group.
    Chunk,
}

/// A regular-expression-based rule that finds and labels groups of labeled tokens and trees.
pub struct Rule {
    pub pattern: String,
    pub label: String,
    pub description: Option<String>,
    pub kind: RuleKind,
    compiled: Regex,
}

impl Rule {
    /// Construct a new rule from a label pattern, a group label, and an optional description.
    /// The label must already be in canonical form (see [`as_label`]).
    pub fn new(
        pattern: impl Into<String>,
        label: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, Error> {
        let pattern = pattern.into();
        let label = label.into();

        if pattern.is_empty() {
            return Err(InvalidLabelPattern::new(pattern, "empty pattern").into());
        }
        if label.is_empty() {
            return Err(InvalidLabelPattern::new(&label, "empty rule label").into());
        }
        if !is_label(&label) {
            return Err(InvalidLabelPattern::new(
                &label,
                format!("rule label is not canonical, expected {:?}", as_label(&label)),
            )
            .into());
        }

        let compiled = compile_label_pattern(&pattern)?;

        Ok(Self {
            pattern,
            label,
            description,
            kind: RuleKind::Chunk,
            compiled,
        })
    }

    /// Apply this rule's substitution to a `ParseString`'s encoding: non-overlapping, left-to-
    /// right matches, each wrapped in braces.
    ///
    /// The spec's between-groups constraint (a match may only lie in a not-yet-grouped region)
    /// is, in the source, a lookahead assertion appended to the compiled pattern. The `regex`
    /// crate has no look-around support, so it's reproduced procedurally instead: split the
    /// encoding on brace boundaries (braces are non-nested, so the spans strictly alternate
    /// not-yet-grouped/already-grouped) and run the substitution only within the not-yet-grouped
    /// spans, leaving already-grouped spans untouched.
    fn substitute(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut already_grouped = false;

        for span in GROUP_BOUNDARY.split(s) {
            if already_grouped {
                out.push('{');
                out.push_str(span);
                out.push('}');
            } else {
                out.push_str(&self.compiled.replace_all(span, "{${0}}"));
            }
            already_grouped = !already_grouped;
        }

        out
    }

    /// Parse `tree`, deepening it by at most one level: tokens and trees matching this rule's
    /// pattern are grouped under a new subtree labeled `self.label`.
    pub fn parse(&self, tree: Tree, trace: Trace) -> Result<Tree, Error> {
        if tree.is_empty() {
            return Err(EmptyInputTree {
                rule_label: self.label.clone(),
            }
            .into());
        }

        // Full verification on `to_tree()` is always on; the heavier per-transform checks
        // (levels 2/3) are reserved for debugging a custom transformer and are not wired to
        // trace verbosity, which only controls what gets printed.
        let mut parse_string = ParseString::new(tree, 1);

        parse_string.trace(trace, "Input");

        parse_string
            .apply_transform(|s| self.substitute(s))
            .map_err(Error::from)?;

        if trace.is_verbose() {
            trace.normal(format!(
                "# {} ({:?}):",
                self.description.as_deref().unwrap_or(&self.label),
                self.pattern
            ));
        } else if trace.is_enabled() {
            trace.normal(format!("# {}:", self.description.as_deref().unwrap_or(&self.label)));
            parse_string.trace(trace, "Result");
        }

        parse_string.to_tree(&self.label).map_err(Error::from)
    }

    /// Parse one grammar line of the form `LABEL: <pattern> # description`.
    ///
    /// The historical enclosing-braces form `LABEL: {<pattern>} # description` is also accepted:
    /// the braces are stripped before the pattern is compiled. The unenclosed form is canonical
    /// (see DESIGN.md); both are equivalent.
    pub fn from_string(line: &str) -> Result<Self, Error> {
        let (label, rest) = line
            .split_once(':')
            .ok_or_else(|| InvalidGrammarLine::new(line, "missing ':' separating label from pattern"))?;

        let (pattern, description) = match rest.split_once('#') {
            Some((pattern, description)) => (pattern.trim(), Some(description.trim().to_string())),
            None => (rest.trim(), None),
        };

        let label = label.trim();
        let mut pattern = pattern.trim();

        if pattern.starts_with('{') && pattern.ends_with('}') && pattern.len() >= 2 {
            pattern = &pattern[1..pattern.len() - 1];
        }

        if label.is_empty() {
            return Err(InvalidGrammarLine::new(line, "missing rule label").into());
        }
        if pattern.is_empty() {
            return Err(InvalidGrammarLine::new(line, "empty pattern").into());
        }

        Rule::new(pattern, as_label(label), description)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(d) => write!(f, "<Rule: {} / {} # {}>", self.pattern, self.label, d),
            None => write!(f, "<Rule: {} / {}>", self.pattern, self.label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use crate::tree::{Node, Tree};

    fn labeled_tree(labels: &[&str]) -> Tree {
        let children = labels
            .iter()
            .enumerate()
            .map(|(i, l)| Node::Token(Token::new(format!("w{i}"), Some(l), None, Some(i))))
            .collect();
        Tree::new("ROOT", children)
    }

    #[test]
    fn noun_phrase_chunking() {
        let rule = Rule::new("<DT>?<JJ>*<NN.*>+", "NP", None).unwrap();
        let tree = labeled_tree(&["DT", "JJ", "NN", "NN", "VBD", "DT", "NN"]);
        let result = rule.parse(tree, Trace::from(0)).unwrap();
        assert_eq!(
            format!("{}", result),
            "(ROOT (NP w0/DT w1/JJ w2/NN w3/NN) w4/VBD (NP w5/DT w6/NN))"
        );
    }

    #[test]
    fn substitute_only_matches_within_not_yet_grouped_spans() {
        // Direct test of the between-groups restriction in `Rule::substitute`: a pattern that
        // would match straight across an existing `{…}` group if the string were searched as one
        // blob must instead match only the still-ungrouped spans on either side of it.
        let rule = Rule::new("<NN>+", "NP", None).unwrap();
        let s = rule.substitute("<NN>{<DT>}<NN><NN>");
        assert_eq!(s, "{<NN>}{<DT>}{<NN><NN>}");
    }

    #[test]
    fn matches_do_not_cross_into_or_merge_existing_groups() {
        // A second rule applied to a tree that already contains an (NP …) group from a prior
        // rule must not match across the group boundary or re-open it — this is the
        // between-groups constraint from spec 4.3, here enforced procedurally rather than by a
        // lookahead the `regex` crate cannot compile.
        let first = Rule::new("<DT><NN>", "NP", None).unwrap();
        let tree = labeled_tree(&["DT", "NN", "IN", "DT", "NN"]);
        let once_grouped = first.parse(tree, Trace::from(0)).unwrap();
        assert_eq!(
            format!("{}", once_grouped),
            "(ROOT (NP w0/DT w1/NN) w2/IN (NP w3/DT w4/NN))"
        );

        // A rule whose pattern would match straight through an `NP` group's label atom plus its
        // neighbor must only match the still-ungrouped `IN` token, not reach into the group.
        let second = Rule::new("<IN><NP>", "PP", None).unwrap();
        let regrouped = second.parse(once_grouped, Trace::from(0)).unwrap();
        assert_eq!(
            format!("{}", regrouped),
            "(ROOT (NP w0/DT w1/NN) (PP w2/IN (NP w3/DT w4/NN)))"
        );
    }

    #[test]
    fn empty_tree_is_an_error() {
        let rule = Rule::new("<DT>", "NP", None).unwrap();
        let tree = Tree::new("ROOT", vec![]);
        assert!(rule.parse(tree, Trace::from(0)).is_err());
    }

    #[test]
    fn from_string_parses_unenclosed_form() {
        let rule = Rule::from_string("NP: <DT>?<NN.*>+ # determiner + nouns").unwrap();
        assert_eq!(rule.label, "NP");
        assert_eq!(rule.pattern, "<DT>?<NN.*>+");
        assert_eq!(rule.description.as_deref(), Some("determiner + nouns"));
    }

    #[test]
    fn from_string_parses_braced_form() {
        let rule = Rule::from_string("NP: {<DT>?<NN.*>+}").unwrap();
        assert_eq!(rule.pattern, "<DT>?<NN.*>+");
    }

    #[test]
    fn from_string_rejects_two_disjoint_braced_patterns() {
        // Scenario E: two braced spans on one line is not a single valid label pattern.
        let result = Rule::from_string("X: {<foo>} {<bar>}");
        assert!(result.is_err());
    }

    #[test]
    fn from_string_rejects_missing_label() {
        assert!(Rule::from_string(": <DT>").is_err());
    }

    #[test]
    fn counted_quantifier_groups_runs() {
        let rule = Rule::new("<N.*>{4,}", "GROUP", None).unwrap();
        let tree = labeled_tree(&["NN", "NN", "NN", "NN", "VBD", "NN", "NN", "NN", "NN", "VBD"]);
        let result = rule.parse(tree, Trace::from(0)).unwrap();
        let groups = result
            .children
            .iter()
            .filter(|c| matches!(c, Node::Tree(t) if t.label == "GROUP"))
            .count();
        assert_eq!(groups, 2);
    }
}
