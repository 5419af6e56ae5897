use luacst_lib::parse;

use super::source::SourceInput;

pub struct TreeArgs {
    pub source: SourceInput,
    pub trivia: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let source = args.source.load_or_exit();
    print!("{}", render_tree(&source, args.trivia, args.spans));
}

pub fn render_tree(source: &str, trivia: bool, spans: bool) -> String {
    parse(source)
        .printer()
        .with_trivia(trivia)
        .with_spans(spans)
        .dump()
}
