//! Whole-string matching for a small regular expression language: literals,
//! concatenation, `|`, `*`, `+`, `?` and parentheses.
//!
//! A pattern goes through a table driven parser ([`ast::parser`]), is built
//! into an NFA by Thompson construction ([`automata::compiler`]), and is
//! matched by a depth first search over the automaton ([`executor`]).
//!
//! ```
//! use regex_table::Regex;
//!
//! let re = Regex::new("(ab)+|c?").unwrap();
//! assert!(re.is_match("abab"));
//! assert!(re.is_match(""));
//! assert!(!re.is_match("aba"));
//! ```

pub mod ast;
pub mod automata;
pub mod errors;
pub mod executor;
pub mod regex;

pub use crate::errors::Error;
pub use crate::executor::ExecutorType;
pub use crate::regex::{Regex, RegexBuilder};
