use std::fmt::Write;

use luacst_lib::highlight::highlight;

use super::source::SourceInput;
use super::{OutputFormat, to_json};

pub struct HighlightArgs {
    pub source: SourceInput,
    pub format: OutputFormat,
}

pub fn run(args: HighlightArgs) {
    let source = args.source.load_or_exit();
    match args.format {
        OutputFormat::Text => print!("{}", render_highlight(&source)),
        OutputFormat::Json => println!("{}", to_json(&highlight(&source))),
    }
}

/// `start..end category "text"` per highlighted span.
pub fn render_highlight(source: &str) -> String {
    let mut out = String::new();
    for span in highlight(source) {
        let text = &source[span.range.clone()];
        let _ = writeln!(
            out,
            "{}..{} {} {text:?}",
            span.range.start, span.range.end, span.category
        );
    }
    out
}
