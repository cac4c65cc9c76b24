//! A regex-driven lexer and shallow parser that labels and groups token sequences.
//!
//! # Overview
//!
//! Many shallow-parsing tasks (part-of-speech chunking, log-line structuring, simple markup)
//! don't need a full grammar-driven recursive descent parser: a small cascade of regex-shaped
//! rules over a flat sequence of already-labeled tokens is enough to build a useful tree. This
//! crate splits that work into two stages:
//!
//! - A [`Lexer`] assigns a label to each token by trying a list of `(pattern, label)` rules in
//!   order and keeping the first match. Tokens that match nothing keep `label = None`; this is
//!   never an error.
//! - A [`Parser`] applies an ordered [`Rule`] cascade to a tree of labeled tokens. Each rule
//!   groups contiguous runs of labels matching a restricted regex dialect (a *label pattern*,
//!   see [`label_pattern`]) into a new labeled subtree, one grouping level per application.
//!
//! Internally, each [`Rule`] application works by encoding a tree's immediate children as a flat
//! string of `<LABEL>` atoms (see [`ParseString`](parse_string::ParseString)), so that "group
//! this span" reduces to an ordinary regex substitution that wraps the span in braces.
//!
//! # Example
//!
//! ```
//! use pygmars::{Lexer, Parser, Token};
//!
//! let lexer = Lexer::new(vec![
//!     (r"^(the|a)$", "DT"),
//!     (r"^(small|yellow)$", "JJ"),
//!     (r"^(dog|cat|box)$", "NN"),
//!     (r"^(ran|sat|chased)$", "VBD"),
//! ])
//! .unwrap();
//!
//! let tokens = lexer.lex_words("the small dog chased a cat");
//!
//! let parser = Parser::new("NP: <DT>?<JJ>*<NN>+", "S", 1, 0).unwrap();
//! let tree = parser.parse(tokens).unwrap();
//!
//! assert_eq!(
//!     format!("{}", tree),
//!     "(S (NP the/DT small/JJ dog/NN) chased/VBD (NP a/DT cat/NN))"
//! );
//! ```
//!
//! Chained rules build deeper trees, one grouping level per rule per loop:
//!
//! ```
//! use pygmars::Parser;
//!
//! let grammar = "\
//!     NP: <DT>?<JJ>*<NN>*\n\
//!     VP: <VBD><NP>\n\
//! ";
//! let parser = Parser::new(grammar, "S", 1, 0).unwrap();
//! assert_eq!(parser.rules.len(), 2);
//! ```

mod error;
mod label_pattern;
mod lexer;
pub mod parse_string;
mod parser;
mod rule;
mod token;
mod tree;
mod util;

pub use error::{EmptyInputTree, Error, InvalidGrammarLine, InvalidLabelPattern, ParseStringCorruption};
pub use label_pattern::{compile_label_pattern, label_pattern_to_regex};
pub use lexer::Lexer;
pub use parse_string::ParseString;
pub use parser::Parser;
pub use rule::{Rule, RuleKind};
pub use token::{as_label, is_label, whitespace_splitter, Token};
pub use tree::{Node, Tree};
pub use util::Trace;
