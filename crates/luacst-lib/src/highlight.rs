//! Token-level highlighting categories.
//!
//! The mapping from token kind to category is a fixed table; nothing here looks
//! at the tree. Quoted strings are split so that escape sequences get their own
//! spans.

use std::ops::Range;

use serde::Serialize;

use crate::parser::cst::{SyntaxKind, token_sets};
use crate::parser::lexer::{EscapeKind, lex, string_escapes, token_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightCategory {
    Keyword,
    String,
    /// `true`, `false`, `nil`
    Constant,
    Number,
    Comment,
    Operator,
    Parentheses,
    Brackets,
    Braces,
    DoubleColon,
    Semicolon,
    Colon,
    Comma,
    Dot,
    Ellipsis,
    Identifier,
    ValidEscape,
    InvalidEscape,
}

impl HighlightCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Constant => "constant",
            Self::Number => "number",
            Self::Comment => "comment",
            Self::Operator => "operator",
            Self::Parentheses => "parentheses",
            Self::Brackets => "brackets",
            Self::Braces => "braces",
            Self::DoubleColon => "double_colon",
            Self::Semicolon => "semicolon",
            Self::Colon => "colon",
            Self::Comma => "comma",
            Self::Dot => "dot",
            Self::Ellipsis => "ellipsis",
            Self::Identifier => "identifier",
            Self::ValidEscape => "valid_escape",
            Self::InvalidEscape => "invalid_escape",
        }
    }
}

impl std::fmt::Display for HighlightCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a token kind. Whitespace, newlines and invalid characters have none.
///
/// Constants are checked before keywords, so `nil` is a constant.
pub const fn category(kind: SyntaxKind) -> Option<HighlightCategory> {
    use SyntaxKind::*;

    if token_sets::CONSTANTS.contains(kind) {
        return Some(HighlightCategory::Constant);
    }
    if token_sets::KEYWORDS.contains(kind) {
        return Some(HighlightCategory::Keyword);
    }
    if token_sets::OPERATORS.contains(kind) {
        return Some(HighlightCategory::Operator);
    }
    if token_sets::NUMBERS.contains(kind) {
        return Some(HighlightCategory::Number);
    }
    if token_sets::COMMENTS.contains(kind) {
        return Some(HighlightCategory::Comment);
    }
    if token_sets::STRINGS.contains(kind) {
        return Some(HighlightCategory::String);
    }

    let category = match kind {
        ParenOpen | ParenClose => HighlightCategory::Parentheses,
        BracketOpen | BracketClose => HighlightCategory::Brackets,
        BraceOpen | BraceClose => HighlightCategory::Braces,
        DoubleColon => HighlightCategory::DoubleColon,
        Semicolon => HighlightCategory::Semicolon,
        Colon => HighlightCategory::Colon,
        Comma => HighlightCategory::Comma,
        Dot => HighlightCategory::Dot,
        Ellipsis => HighlightCategory::Ellipsis,
        Ident => HighlightCategory::Identifier,
        _ => return None,
    };
    Some(category)
}

/// Highlighted byte range of the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub range: Range<usize>,
    pub category: HighlightCategory,
}

impl HighlightSpan {
    fn new(range: Range<usize>, category: HighlightCategory) -> Self {
        Self { range, category }
    }
}

/// Highlights `source` token by token, in source order.
pub fn highlight(source: &str) -> Vec<HighlightSpan> {
    let mut spans = Vec::new();

    for token in lex(source) {
        let Some(category) = category(token.kind) else {
            continue;
        };
        let range = Range::<usize>::from(token.span);

        if matches!(
            token.kind,
            SyntaxKind::SingleQuotedString | SyntaxKind::DoubleQuotedString
        ) {
            split_escapes(token_text(source, &token), range.start, &mut spans);
        } else {
            spans.push(HighlightSpan::new(range, category));
        }
    }

    spans
}

/// Emits string text around escapes, offsetting token-relative ranges by `base`.
fn split_escapes(text: &str, base: usize, spans: &mut Vec<HighlightSpan>) {
    let mut cursor = 0;
    for escape in string_escapes(text) {
        if escape.range.start > cursor {
            spans.push(HighlightSpan::new(
                base + cursor..base + escape.range.start,
                HighlightCategory::String,
            ));
        }
        let category = match escape.kind {
            EscapeKind::Valid => HighlightCategory::ValidEscape,
            EscapeKind::Invalid => HighlightCategory::InvalidEscape,
        };
        spans.push(HighlightSpan::new(
            base + escape.range.start..base + escape.range.end,
            category,
        ));
        cursor = escape.range.end;
    }
    if cursor < text.len() {
        spans.push(HighlightSpan::new(
            base + cursor..base + text.len(),
            HighlightCategory::String,
        ));
    }
}
