//! [`Lexer`]: assigns a label to each already-split [`Token`] by trying a list of regexes in
//! order and keeping the first match.

use crate::error::{Error, InvalidLabelPattern};
use crate::token::{whitespace_splitter, Token};
use regex::Regex;

/// A sequence of `(pattern, label)` rules, each compiled eagerly at construction, tried in order
/// against each token's raw text.
///
/// A token that matches no pattern is not an error: it is returned with `label` left as `None`,
/// mirroring the reference lexer's "unknown tokens pass through unlabeled" behavior.
pub struct Lexer {
    rules: Vec<(Regex, String)>,
}

impl Lexer {
    /// Build a lexer from `(pattern, label)` pairs. Every pattern is compiled immediately, so
    /// construction fails atomically if any pattern is not a valid regex.
    pub fn new<'a, I>(rules: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let rules = rules
            .into_iter()
            .map(|(pattern, label)| {
                let compiled = Regex::new(pattern)
                    .map_err(|err| InvalidLabelPattern::new(pattern, format!("invalid regex: {err}")))?;
                Ok((compiled, label.to_string()))
            })
            .collect::<Result<Vec<_>, InvalidLabelPattern>>()?;

        Ok(Self { rules })
    }

    /// Label a single token: the label of the first rule whose pattern matches starting at the
    /// beginning of the token's value (the reference lexer compiles each rule with `re.compile(
    /// regexp).match`, which anchors at the start of the string but not its end), or `None` if no
    /// rule matches. A pattern unanchored on the right, like `dog`, still labels `"doghouse"` but
    /// not `"hotdog"`.
    pub fn lex_token(&self, token: &Token) -> Token {
        for (pattern, label) in &self.rules {
            if pattern.find(&token.value).map_or(false, |m| m.start() == 0) {
                return token.with_label(label);
            }
        }
        token.clone()
    }

    /// Label every token in `tokens`, in place order, leaving already-labeled tokens untouched.
    pub fn lex_tokens(&self, tokens: Vec<Token>) -> Vec<Token> {
        tokens
            .into_iter()
            .map(|t| if t.label.is_some() { t } else { self.lex_token(&t) })
            .collect()
    }

    /// Split `text` into tokens with `splitter` and label them.
    pub fn lex_string<S>(&self, text: &str, splitter: S) -> Vec<Token>
    where
        S: Fn(&str) -> Vec<&str>,
    {
        self.lex_tokens(Token::from_string(text, splitter))
    }

    /// Convenience over [`lex_string`](Self::lex_string) using [`whitespace_splitter`].
    pub fn lex_words(&self, text: &str) -> Vec<Token> {
        self.lex_string(text, whitespace_splitter)
    }

    /// Label tokens from several independent texts (e.g. separate sentences), each restarting
    /// its own line numbering.
    pub fn lex_strings<'a, I, S>(&self, texts: I, splitter: S) -> Vec<Vec<Token>>
    where
        I: IntoIterator<Item = &'a str>,
        S: Fn(&str) -> Vec<&str> + Copy,
    {
        texts.into_iter().map(|text| self.lex_string(text, splitter)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_matching_rule_wins() {
        let lexer = Lexer::new(vec![(r"^\d+$", "CD"), (r"^[A-Z]", "NNP"), (r".*", "NN")]).unwrap();
        let tokens = lexer.lex_words("The 3 Dogs ran");
        let labels: Vec<&str> = tokens.iter().map(|t| t.label.as_deref().unwrap()).collect();
        assert_eq!(labels, vec!["NNP", "CD", "NNP", "NN"]);
    }

    #[test]
    fn match_is_anchored_at_the_start_not_searched_anywhere() {
        // "(dog)$" would match "hotdog" if searched anywhere (it ends in "dog"), but `re.match`
        // requires the match to begin at index 0, which "hotdog" does not.
        let lexer = Lexer::new(vec![(r"(dog)$", "ANIMAL")]).unwrap();
        let tokens = lexer.lex_words("dog hotdog");
        assert_eq!(tokens[0].label.as_deref(), Some("ANIMAL"));
        assert_eq!(tokens[1].label, None);
    }

    #[test]
    fn unmatched_tokens_keep_no_label() {
        let lexer = Lexer::new(vec![(r"^\d+$", "CD")]).unwrap();
        let tokens = lexer.lex_words("3 dogs");
        assert_eq!(tokens[0].label.as_deref(), Some("CD"));
        assert_eq!(tokens[1].label, None);
    }

    #[test]
    fn already_labeled_tokens_are_left_alone() {
        let lexer = Lexer::new(vec![(r".*", "NN")]).unwrap();
        let pre_labeled = Token::new("dog", Some("PRELABELED"), None, None);
        let relabeled = lexer.lex_tokens(vec![pre_labeled.clone()]);
        assert_eq!(relabeled[0].label, pre_labeled.label);
    }

    #[test]
    fn invalid_pattern_fails_construction() {
        assert!(Lexer::new(vec![("(unclosed", "X")]).is_err());
    }

    #[test]
    fn lex_strings_restarts_line_numbers_per_text() {
        let lexer = Lexer::new(vec![(r".*", "TOK")]).unwrap();
        let batches = lexer.lex_strings(vec!["a b", "c"], whitespace_splitter);
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0][0].start_line, Some(1));
        assert_eq!(batches[1][0].start_line, Some(1));
    }
}
