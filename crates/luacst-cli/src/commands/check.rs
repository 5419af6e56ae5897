use luacst_lib::{Parse, parse};

use super::source::SourceInput;
use super::{OutputFormat, to_json};

pub struct CheckArgs {
    pub source: SourceInput,
    pub color: bool,
    pub format: OutputFormat,
}

pub fn run(args: CheckArgs) {
    let source = args.source.load_or_exit();
    let parse = parse(&source);
    tracing::debug!(
        diagnostics = parse.diagnostics().len(),
        "checked {}",
        args.source.display_name()
    );

    match args.format {
        OutputFormat::Json => println!("{}", render_json(&parse)),
        OutputFormat::Text => {
            if !parse.is_valid() {
                let name = args.source.display_name();
                eprint!("{}", render_text(&parse, &source, &name, args.color));
            }
        }
    }

    if !parse.is_valid() {
        std::process::exit(1);
    }

    // Silent on success (like cargo check)
}

pub fn render_text(parse: &Parse, source: &str, name: &str, color: bool) -> String {
    parse
        .diagnostics()
        .printer(source)
        .path(name)
        .colored(color)
        .render()
}

pub fn render_json(parse: &Parse) -> String {
    to_json(&parse.diagnostics().sorted())
}
