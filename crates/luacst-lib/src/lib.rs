//! Resilient lexer and lossless concrete syntax tree parser for Lua.
//!
//! Parsing never fails: every input yields a tree covering all of its bytes,
//! plus diagnostics for whatever could not be parsed.
//!
//! # Example
//!
//! ```
//! use luacst_lib::parser::parse;
//!
//! let source = "local x = 1\nprint(x +)";
//! let parse = parse(source);
//!
//! assert_eq!(parse.syntax().to_string(), source);
//! eprintln!("{}", parse.diagnostics().render(source));
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod highlight;
pub mod parser;
pub mod resolve;

pub use diagnostics::{Diagnostics, DiagnosticsPrinter, Severity};
pub use parser::{BareExpressionPolicy, Parse, ParserBuilder, parse};

/// Errors from tree edits. Parsing itself reports problems as diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Rename target is not a single valid identifier.
    #[error("'{0}' is not a valid name")]
    InvalidName(String),

    #[error("node is not a name declaration")]
    NotADeclaration,
}

pub type Result<T> = std::result::Result<T, Error>;
