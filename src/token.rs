//! [`Token`]: the immutable unit of input produced by a [`Lexer`](crate::lexer::Lexer) and
//! consumed by a [`Parser`](crate::parser::Parser).

use once_cell::sync::Lazy;
use regex::Regex;

/// A single word-like unit of input, together with the label assigned to it by a lexer.
///
/// Tokens are immutable after construction: lexing never mutates a `Token` in place, it produces
/// a new, labeled copy (see [`Lexer::lex_token`](crate::lexer::Lexer::lex_token)).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    /// The raw text of this token.
    pub value: String,
    /// The label assigned by a lexer, canonicalized via [`as_label`]. `None` until lexed, or if
    /// no lexer rule matched.
    pub label: Option<String>,
    /// One-based line number in the original text, if known.
    pub start_line: Option<usize>,
    /// Zero-based position of this token within its line or stream, if known.
    pub pos: Option<usize>,
}

impl Token {
    /// Construct a new token. `label`, if given, is canonicalized with [`as_label`].
    pub fn new(
        value: impl Into<String>,
        label: Option<&str>,
        start_line: Option<usize>,
        pos: Option<usize>,
    ) -> Self {
        Self {
            value: value.into(),
            label: label.map(as_label),
            start_line,
            pos,
        }
    }

    /// Return a copy of this token with its label set to `label` (canonicalized).
    pub fn with_label(&self, label: &str) -> Self {
        Self {
            label: Some(as_label(label)),
            ..self.clone()
        }
    }

    /// Build tokens from `(value, label)` pairs; `pos` is assigned as the pair's index.
    pub fn from_value_label_pairs<'a, I>(pairs: I) -> Vec<Token>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        pairs
            .into_iter()
            .enumerate()
            .map(|(pos, (value, label))| Token::new(value, Some(label), None, Some(pos)))
            .collect()
    }

    /// Build tokens from a `(line_no, line_text)` iterator, splitting each line with `splitter`.
    /// Line numbers are expected to be one-based.
    pub fn from_numbered_lines<'a, I, S>(numbered_lines: I, splitter: S) -> Vec<Token>
    where
        I: IntoIterator<Item = (usize, &'a str)>,
        S: Fn(&str) -> Vec<&str>,
    {
        let mut tokens = Vec::new();
        for (start_line, line) in numbered_lines {
            for (pos, value) in splitter(line).into_iter().enumerate() {
                tokens.push(Token::new(value, None, Some(start_line), Some(pos)));
            }
        }
        tokens
    }

    /// Build tokens from a raw string: split on newlines, then split each line with `splitter`.
    /// Line numbers are one-based.
    pub fn from_string<S>(text: &str, splitter: S) -> Vec<Token>
    where
        S: Fn(&str) -> Vec<&str>,
    {
        let numbered_lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));
        Token::from_numbered_lines(numbered_lines, splitter)
    }
}

/// The default line splitter: split on runs of ASCII whitespace, as `str::split_whitespace` does.
pub fn whitespace_splitter(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

static NON_LABEL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Z0-9-]+").unwrap());
static REPEATED_DASH: Lazy<Regex> = Lazy::new(|| Regex::new(r"-{2,}").unwrap());
static LEADING_JUNK: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9-]+").unwrap());

/// Return a string derived from `s` for use as a label. Labels are strings made only of uppercase
/// ASCII letters, digits and dash separators; they do not start with a digit or dash and do not
/// end with a dash.
pub fn as_label(s: impl AsRef<str>) -> String {
    let upper = s.as_ref().to_uppercase();
    let dashed = NON_LABEL_CHARS.replace_all(&upper, "-");
    let collapsed = REPEATED_DASH.replace_all(&dashed, "-");
    let trimmed = LEADING_JUNK.replace(&collapsed, "");
    trimmed.trim_end_matches('-').to_string()
}

/// Whether `s` is already in canonical label form, i.e. `as_label(s) == s` and `s` is non-empty.
pub fn is_label(s: &str) -> bool {
    !s.is_empty() && as_label(s) == s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_case_and_punctuation() {
        assert_eq!(as_label("noun phrase"), "NOUN-PHRASE");
        assert_eq!(as_label("np's"), "NP-S");
    }

    #[test]
    fn strips_leading_digits_and_dashes() {
        assert_eq!(as_label("42nd"), "ND");
        assert_eq!(as_label("--DT"), "DT");
    }

    #[test]
    fn strips_trailing_dashes() {
        assert_eq!(as_label("DT--"), "DT");
    }

    #[test]
    fn collapses_internal_dashes() {
        assert_eq!(as_label("A   B"), "A-B");
    }

    #[test]
    fn is_label_accepts_canonical_forms() {
        assert!(is_label("DT"));
        assert!(is_label("NN-PL"));
        assert!(!is_label("nn"));
        assert!(!is_label(""));
        assert!(!is_label("-DT"));
    }

    #[test]
    fn from_string_splits_lines_and_words() {
        let tokens = Token::from_string("The dog\nran fast", whitespace_splitter);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[0].value, "The");
        assert_eq!(tokens[0].start_line, Some(1));
        assert_eq!(tokens[0].pos, Some(0));
        assert_eq!(tokens[2].value, "ran");
        assert_eq!(tokens[2].start_line, Some(2));
        assert_eq!(tokens[2].pos, Some(0));
    }

    #[test]
    fn from_value_label_pairs_assigns_positions() {
        let tokens = Token::from_value_label_pairs(vec![("the", "DT"), ("dog", "NN")]);
        assert_eq!(tokens[0].label.as_deref(), Some("DT"));
        assert_eq!(tokens[1].pos, Some(1));
    }
}
