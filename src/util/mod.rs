//! Small ambient utilities shared across the crate: a leveled trace printer used by
//! [`crate::parse_string::ParseString`], [`crate::rule::Rule`] and [`crate::parser::Parser`] to
//! describe, step by step, how a tree is being grouped.
//!
//! Rather than reaching for an external logging facade, tracing here is a plain numeric level
//! (`0..=3`) carried directly on the component it describes, and only ever prints to stdout when
//! the caller opted in by raising that level above zero.

mod trace;

pub use trace::Trace;
