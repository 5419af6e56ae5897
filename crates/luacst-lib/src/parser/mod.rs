//! Parser infrastructure for Lua.
//!
//! # Architecture
//!
//! This parser produces a lossless concrete syntax tree (CST) via Rowan's green tree builder.
//! Key design decisions borrowed from rust-analyzer:
//!
//! - Zero-copy lexing: tokens carry spans, text sliced only when building tree nodes
//! - Event-based construction: the grammar records start/token/finish events, and
//!   trivia is inserted when the events are replayed into the tree
//! - `precede` wraps an already-finished node, which turns left recursion into loops
//! - Rollback to a marker restores the cursor, the event list, and the diagnostics,
//!   which is how call statements are told apart from assignments
//!
//! # Recovery Strategy
//!
//! The parser is resilient: it always produces a tree that covers every byte of input.
//!
//! 1. Invalid characters get wrapped in their own `SyntaxKind::Error` nodes
//! 2. Missing expected tokens emit a diagnostic but don't consume (parent may handle)
//! 3. Input the top-level block cannot consume ends up in one `Garbage` node
//! 4. On recursion limit, remaining input goes into single Error node
//!
//! Nothing is fatal. Every problem is a diagnostic next to a complete tree.

pub mod ast;
pub mod cst;
pub mod lexer;

mod core;
mod dump;
mod grammar;
mod invariants;
mod printer;

#[cfg(test)]
mod tests;

pub use cst::{LuaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken, TokenSet, token_sets};
pub use printer::TreePrinter;

pub use core::Parser;

use crate::diagnostics::Diagnostics;
use lexer::lex;

/// What to do with a statement that is only an expression, such as a stray `a.b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BareExpressionPolicy {
    /// Keep it as an `ExpressionStatement` node and report that it is not a statement.
    #[default]
    ExpressionStatement,
    /// Parse it as an assignment and report the missing `=`.
    RequireAssignment,
}

/// Parse result containing the green tree and its diagnostics.
///
/// The tree is always complete. Error nodes in the tree mark recovery points.
#[derive(Debug, Clone)]
pub struct Parse {
    green: rowan::GreenNode,
    diagnostics: Diagnostics,
}

impl Parse {
    pub fn green(&self) -> &rowan::GreenNode {
        &self.green
    }

    /// Creates a typed view over the immutable green tree.
    /// This is cheap: SyntaxNode is a thin wrapper with parent pointers.
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    pub fn tree(&self) -> ast::Chunk {
        ast::Chunk::cast(self.syntax()).expect("parser always produces a Chunk")
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn printer(&self) -> TreePrinter {
        TreePrinter::new(self.syntax())
    }
}

/// Parses `source` with default settings.
pub fn parse(source: &str) -> Parse {
    ParserBuilder::new(source).parse()
}

/// Parser configuration.
///
/// ```
/// use luacst_lib::parser::{BareExpressionPolicy, ParserBuilder};
///
/// let parse = ParserBuilder::new("a.b")
///     .with_bare_expressions(BareExpressionPolicy::RequireAssignment)
///     .parse();
/// assert_eq!(parse.diagnostics().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ParserBuilder<'src> {
    source: &'src str,
    recursion_limit: Option<u32>,
    bare_expressions: BareExpressionPolicy,
}

impl<'src> ParserBuilder<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            recursion_limit: Some(core::DEFAULT_RECURSION_LIMIT),
            bare_expressions: BareExpressionPolicy::default(),
        }
    }

    /// Set nesting depth limit. None = infinite.
    ///
    /// Past the limit, the rest of the input becomes a single `Error` node.
    /// Without a limit, pathological nesting can exhaust the stack.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_bare_expressions(mut self, policy: BareExpressionPolicy) -> Self {
        self.bare_expressions = policy;
        self
    }

    pub fn parse(self) -> Parse {
        let tokens = lex(self.source);
        tracing::debug!(
            bytes = self.source.len(),
            tokens = tokens.len(),
            "parsing chunk"
        );

        let (green, diagnostics) = Parser::new(self.source, tokens)
            .with_recursion_limit(self.recursion_limit)
            .with_bare_expressions(self.bare_expressions)
            .parse();

        tracing::debug!(diagnostics = diagnostics.len(), "parsed chunk");
        Parse { green, diagnostics }
    }
}
