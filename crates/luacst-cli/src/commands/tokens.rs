use std::fmt::Write;

use luacst_lib::parser::lexer::{lex, token_text};
use serde::Serialize;

use super::source::SourceInput;
use super::{OutputFormat, to_json};

pub struct TokensArgs {
    pub source: SourceInput,
    pub spans: bool,
    pub format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct TokenRecord<'s> {
    kind: String,
    start: u32,
    end: u32,
    text: &'s str,
}

pub fn run(args: TokensArgs) {
    let source = args.source.load_or_exit();
    match args.format {
        OutputFormat::Text => print!("{}", render_tokens(&source, args.spans)),
        OutputFormat::Json => println!("{}", render_tokens_json(&source)),
    }
}

/// One line per token, trivia included.
pub fn render_tokens(source: &str, spans: bool) -> String {
    let mut out = String::new();
    for token in lex(source) {
        let text = token_text(source, &token);
        if spans {
            let start = u32::from(token.span.start());
            let end = u32::from(token.span.end());
            let _ = writeln!(out, "{:?} [{start}..{end}] {text:?}", token.kind);
        } else {
            let _ = writeln!(out, "{:?} {text:?}", token.kind);
        }
    }
    out
}

fn token_records(source: &str) -> Vec<TokenRecord<'_>> {
    lex(source)
        .into_iter()
        .map(|token| TokenRecord {
            kind: format!("{:?}", token.kind),
            start: token.span.start().into(),
            end: token.span.end().into(),
            text: token_text(source, &token),
        })
        .collect()
}

pub fn render_tokens_json(source: &str) -> String {
    to_json(&token_records(source))
}
