//! Compiles the restricted *label pattern* dialect into a standard regex operating over the
//! [`ParseString`](crate::parse_string::ParseString) encoding.
//!
//! A label pattern differs from an ordinary regex in three ways:
//! - `<` and `>` act as parentheses, so `<NN>+` matches one or more repetitions of the whole
//!   `<NN>` atom, not `<NN` followed by repeated `>`.
//! - Whitespace is ignored everywhere.
//! - Inside `<…>`, `.` means "any character that is not `<`, `>`, `{` or `}`", so `<NN.*>`
//!   matches any label starting with `NN`.

use crate::error::InvalidLabelPattern;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::Mutex;

/// The character class matched by a bare label atom: anything that isn't a delimiter.
pub const LABEL_CHARS: &str = r"[^{}<>]";

static QUANTIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\d+(,\d*)?\}").unwrap());
static ANGLE_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<|>").unwrap());

/// Process-wide cache of compiled label-pattern regexes, keyed by the original (pre-translation)
/// pattern string, guarded for concurrent use as recommended in the concurrency model.
static COMPILED_CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Translate a label pattern into a standard regex string over the ParseString encoding, validate
/// it along the way, and return the resulting source (not yet compiled).
pub fn label_pattern_to_regex(label_pattern: &str) -> Result<String, InvalidLabelPattern> {
    let no_whitespace: String = label_pattern.chars().filter(|c| !c.is_whitespace()).collect();

    validate_angle_brackets(&no_whitespace)?;
    validate_no_stray_braces(&no_whitespace)?;

    let parenthesized = no_whitespace.replace('<', "(<(").replace('>', ")>)");

    Ok(replace_dots_outside_quantifiers(&parenthesized))
}

/// Compile a label pattern to a [`Regex`], consulting and populating the process-wide cache.
pub fn compile_label_pattern(label_pattern: &str) -> Result<Regex, InvalidLabelPattern> {
    if let Some(cached) = COMPILED_CACHE.lock().unwrap().get(label_pattern) {
        return Ok(cached.clone());
    }

    let source = label_pattern_to_regex(label_pattern)?;
    let regex = Regex::new(&source)
        .map_err(|err| InvalidLabelPattern::new(label_pattern, format!("invalid regex: {err}")))?;

    COMPILED_CACHE
        .lock()
        .unwrap()
        .insert(label_pattern.to_string(), regex.clone());
    Ok(regex)
}

/// Check that every `<` has a matching, non-nested `>` and vice versa.
fn validate_angle_brackets(pattern: &str) -> Result<(), InvalidLabelPattern> {
    let mut depth = 0i32;
    for m in ANGLE_BRACKETS.find_iter(pattern) {
        match m.as_str() {
            "<" => {
                if depth != 0 {
                    return Err(InvalidLabelPattern::new(
                        pattern,
                        "nested '<' inside a label atom",
                    ));
                }
                depth += 1;
            }
            ">" => {
                if depth != 1 {
                    return Err(InvalidLabelPattern::new(
                        pattern,
                        "unmatched '>' with no preceding '<'",
                    ));
                }
                depth -= 1;
            }
            _ => unreachable!(),
        }
    }
    if depth != 0 {
        return Err(InvalidLabelPattern::new(pattern, "unmatched '<' with no closing '>'"));
    }
    Ok(())
}

/// Characters permitted outside of `<…>`: regex operators, grouping parens, and alternation.
/// Everything else outside an atom (bare letters, `.`, stray punctuation) is rejected, since only
/// atoms and operators are allowed there.
const OUTSIDE_ATOM_OPERATORS: &str = "?*+|()";

/// Check that every `{` / `}` outside of `<…>` belongs to a counted quantifier `{m}`, `{m,}` or
/// `{m,n}`, and that no other disallowed character appears outside of a label atom.
fn validate_no_stray_braces(pattern: &str) -> Result<(), InvalidLabelPattern> {
    let mut in_atom = false;
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '<' => {
                in_atom = true;
                i += 1;
            }
            '>' => {
                in_atom = false;
                i += 1;
            }
            '{' if !in_atom => {
                let rest: String = chars[i..].iter().collect();
                match QUANTIFIER.find(&rest) {
                    Some(m) if m.start() == 0 => i += m.end(),
                    _ => {
                        return Err(InvalidLabelPattern::new(
                            pattern,
                            "stray '{' outside of a counted quantifier",
                        ))
                    }
                }
            }
            '}' if !in_atom => {
                return Err(InvalidLabelPattern::new(
                    pattern,
                    "stray '}' outside of a counted quantifier",
                ))
            }
            c if !in_atom && !OUTSIDE_ATOM_OPERATORS.contains(c) => {
                return Err(InvalidLabelPattern::new(
                    pattern,
                    format!("disallowed character {c:?} outside of a label atom"),
                ))
            }
            _ => i += 1,
        }
    }
    Ok(())
}

/// Replace every `.` that is not part of a `{m,n}`-style quantifier span with [`LABEL_CHARS`].
fn replace_dots_outside_quantifiers(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let chars: Vec<char> = pattern.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '{' {
            let rest: String = chars[i..].iter().collect();
            if let Some(m) = QUANTIFIER.find(&rest) {
                if m.start() == 0 {
                    out.push_str(&rest[..m.end()]);
                    i += m.end();
                    continue;
                }
            }
        }
        if chars[i] == '.' {
            out.push_str(LABEL_CHARS);
        } else {
            out.push(chars[i]);
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(labels: &[&str]) -> String {
        format!("<{}>", labels.join("><"))
    }

    #[test]
    fn atom_matches_exact_label() {
        let re = compile_label_pattern("<DT>").unwrap();
        assert!(re.is_match(&encode(&["DT"])));
        assert!(!re.is_match(&encode(&["NN"])));
    }

    #[test]
    fn dot_matches_any_non_delimiter_char_inside_atom() {
        let re = compile_label_pattern("<NN.*>").unwrap();
        assert!(re.is_match(&encode(&["NNS"])));
        assert!(re.is_match(&encode(&["NN"])));
        assert!(!re.is_match(&encode(&["VB"])));
    }

    #[test]
    fn quantifier_outside_atom_is_preserved() {
        let re = compile_label_pattern("<N.*>{4,}").unwrap();
        assert!(re.is_match(&encode(&["NN", "NN", "NN", "NN"])));
        assert!(!re.is_match(&encode(&["NN", "NN", "NN"])));
    }

    #[test]
    fn whitespace_is_ignored() {
        let a = label_pattern_to_regex("<DT> | <NN>").unwrap();
        let b = label_pattern_to_regex("<DT>|<NN>").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn alternation_inside_atom_stays_inside() {
        let re = compile_label_pattern("<NP|PP>").unwrap();
        assert!(re.is_match(&encode(&["NP"])));
        assert!(re.is_match(&encode(&["PP"])));
        assert!(!re.is_match(&encode(&["VP"])));
    }

    #[test]
    fn quantifier_after_atom_scopes_over_whole_atom() {
        let re = compile_label_pattern("<DT>?<NN>").unwrap();
        assert!(re.is_match(&encode(&["DT", "NN"])));
        assert!(re.is_match(&encode(&["NN"])));
    }

    #[test]
    fn stray_brace_is_rejected() {
        assert!(label_pattern_to_regex("<DT>}<NN>").is_err());
    }

    #[test]
    fn unbalanced_angle_brackets_are_rejected() {
        assert!(label_pattern_to_regex("<DT").is_err());
        assert!(label_pattern_to_regex("DT>").is_err());
    }

    #[test]
    fn dot_outside_atom_is_rejected() {
        assert!(label_pattern_to_regex("<DT>.<NN>").is_err());
    }

    #[test]
    fn compiled_regex_is_cached() {
        let a = compile_label_pattern("<DT>?<NN.*>+").unwrap();
        let b = compile_label_pattern("<DT>?<NN.*>+").unwrap();
        assert_eq!(a.as_str(), b.as_str());
    }
}
