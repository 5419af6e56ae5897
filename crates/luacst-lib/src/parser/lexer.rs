//! Lexer for Lua.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//! The token stream always covers the whole input: concatenating every token's text
//! reproduces the source byte for byte.
//!
//! ## Error handling
//!
//! Characters no rule recognizes become `InvalidChar` tokens, one per Unicode scalar,
//! so the parser can wrap each stray character in its own error node.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output:
/// - Splits runs of lexer errors into one `InvalidChar` token per character
/// - Classifies lexer-internal `Comment` tokens as line or block comments
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    push_invalid_chars(source, start..lexer.span().start, &mut tokens);
                }

                let span = lexer.span();
                let kind = if kind == SyntaxKind::Comment {
                    classify_comment(&source[span.clone()])
                } else {
                    kind
                };
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    push_invalid_chars(source, start..source.len(), &mut tokens);
                }
                break;
            }
        }
    }

    tokens
}

fn push_invalid_chars(source: &str, range: Range<usize>, tokens: &mut Vec<Token>) {
    let start = range.start;
    for (offset, c) in source[range].char_indices() {
        let begin = start + offset;
        tokens.push(Token::new(
            SyntaxKind::InvalidChar,
            range_to_text_range(begin..begin + c.len_utf8()),
        ));
    }
}

fn classify_comment(text: &str) -> SyntaxKind {
    if long_bracket_level(&text[2..]).is_some() {
        SyntaxKind::BlockComment
    } else {
        SyntaxKind::LineComment
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Level of an opening long bracket (`[`, `=`*, `[`) at the start of `text`.
fn long_bracket_level(text: &str) -> Option<usize> {
    let rest = text.strip_prefix('[')?;
    let level = rest.bytes().take_while(|&b| b == b'=').count();
    (rest.as_bytes().get(level) == Some(&b'[')).then_some(level)
}

/// Byte length of a long-bracket body plus its closing bracket, or of the rest
/// of the input when the bracket is never closed.
fn long_bracket_body_len(remainder: &str, level: usize) -> usize {
    let close = format!("]{}]", "=".repeat(level));
    remainder
        .find(&close)
        .map_or(remainder.len(), |at| at + close.len())
}

pub(super) fn lex_long_string(lex: &mut logos::Lexer<'_, SyntaxKind>) -> bool {
    let level = lex.slice().len() - 2;
    let len = long_bracket_body_len(lex.remainder(), level);
    lex.bump(len);
    true
}

/// Runs after `--`. Consumes a long-bracket body or the rest of the line.
pub(super) fn lex_comment(lex: &mut logos::Lexer<'_, SyntaxKind>) -> bool {
    let remainder = lex.remainder();
    let len = match long_bracket_level(remainder) {
        Some(level) => {
            let open = level + 2;
            open + long_bracket_body_len(&remainder[open..], level)
        }
        None => remainder
            .find(['\n', '\r'])
            .unwrap_or(remainder.len()),
    };
    lex.bump(len);
    true
}

/// Runs after the opening quote. Stops after the matching quote, or before an
/// unescaped line break when the string is unfinished.
pub(super) fn lex_quoted_string(lex: &mut logos::Lexer<'_, SyntaxKind>) -> bool {
    let quote = lex.slice().as_bytes()[0];
    let bytes = lex.remainder().as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => {
                i += 1;
                // Escaped CRLF counts as a single line break.
                if bytes.get(i) == Some(&b'\r') && bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                if i < bytes.len() {
                    i += utf8_len(bytes[i]);
                }
            }
            b'\n' | b'\r' => break,
            b if b == quote => {
                i += 1;
                break;
            }
            b => i += utf8_len(b),
        }
    }
    lex.bump(i.min(bytes.len()));
    true
}

fn utf8_len(first: u8) -> usize {
    match first {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

/// Whether a string token carries its closing delimiter.
pub fn is_terminated_string(kind: SyntaxKind, text: &str) -> bool {
    match kind {
        SyntaxKind::SingleQuotedString | SyntaxKind::DoubleQuotedString => {
            let quote = text.as_bytes()[0];
            text.len() >= 2 && text.as_bytes()[text.len() - 1] == quote && !ends_escaped(text)
        }
        SyntaxKind::LongString => long_bracket_closed(text),
        _ => true,
    }
}

/// Whether a block comment token carries its closing bracket.
pub fn is_terminated_comment(kind: SyntaxKind, text: &str) -> bool {
    match kind {
        SyntaxKind::BlockComment => long_bracket_closed(&text[2..]),
        _ => true,
    }
}

fn long_bracket_closed(text: &str) -> bool {
    let Some(level) = long_bracket_level(text) else {
        return false;
    };
    let close = format!("]{}]", "=".repeat(level));
    text.len() >= 2 * (level + 2) && text.ends_with(&close)
}

/// The final quote is escaped when preceded by an odd run of backslashes.
fn ends_escaped(text: &str) -> bool {
    let body = &text.as_bytes()[1..text.len() - 1];
    body.iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 1
}

/// Validity of an escape sequence inside a quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeKind {
    Valid,
    Invalid,
}

/// Escape sequence found in a quoted string token; `range` is relative to the token text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escape {
    pub range: Range<usize>,
    pub kind: EscapeKind,
}

/// Classifies every backslash escape in the text of a quoted string token.
///
/// Long strings have no escapes; pass only single- or double-quoted token text.
pub fn string_escapes(text: &str) -> Vec<Escape> {
    let bytes = text.as_bytes();
    let mut escapes = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        let start = i;
        let (len, valid) = escape_at(&bytes[i + 1..]);
        i += 1 + len;
        escapes.push(Escape {
            range: start..i,
            kind: if valid {
                EscapeKind::Valid
            } else {
                EscapeKind::Invalid
            },
        });
    }
    escapes
}

/// Length (after the backslash) and validity of the escape starting at `rest`.
fn escape_at(rest: &[u8]) -> (usize, bool) {
    let Some(&first) = rest.first() else {
        return (0, false);
    };
    match first {
        b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' | b'"' | b'\'' | b'z' => (1, true),
        b'\n' => (1 + usize::from(rest.get(1) == Some(&b'\r')), true),
        b'\r' => (1 + usize::from(rest.get(1) == Some(&b'\n')), true),
        b'x' => {
            let digits = rest[1..]
                .iter()
                .take(2)
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
            (1 + digits, digits == 2)
        }
        b'0'..=b'9' => {
            let digits = rest.iter().take(3).take_while(|b| b.is_ascii_digit()).count();
            let value = rest[..digits]
                .iter()
                .fold(0u32, |acc, b| acc * 10 + u32::from(b - b'0'));
            (digits, value <= 255)
        }
        b'u' => {
            if rest.get(1) != Some(&b'{') {
                return (1, false);
            }
            let digits = rest[2..]
                .iter()
                .take_while(|b| b.is_ascii_hexdigit())
                .count();
            let closed = rest.get(2 + digits) == Some(&b'}');
            let value = std::str::from_utf8(&rest[2..2 + digits])
                .ok()
                .and_then(|hex| u64::from_str_radix(hex, 16).ok());
            let valid = closed && digits > 0 && value.is_some_and(|v| v <= 0x7FFF_FFFF);
            (2 + digits + usize::from(closed), valid)
        }
        other => (utf8_len(other), false),
    }
}
