//! Command builders for the CLI.
//!
//! Every command reads one Lua source, from a file, stdin, or `-s`.

use clap::Command;

use super::args::*;

fn with_source_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg()).arg(source_text_arg())
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("luacst")
        .about("Inspect Lua tokens, syntax trees and diagnostics")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(tokens_command())
        .subcommand(tree_command())
        .subcommand(check_command())
        .subcommand(highlight_command())
}

pub fn tokens_command() -> Command {
    let cmd = Command::new("tokens")
        .about("List the tokens of a source file")
        .override_usage(
            "\
  luacst tokens <FILE>
  luacst tokens -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  luacst tokens init.lua              # one token per line
  luacst tokens init.lua --spans      # with byte ranges
  luacst tokens -s 'x = 1' --format json"#,
        )
        .arg(spans_arg())
        .arg(format_arg());

    with_source_args(cmd)
}

pub fn tree_command() -> Command {
    let cmd = Command::new("tree")
        .about("Show the concrete syntax tree")
        .override_usage(
            "\
  luacst tree <FILE>
  luacst tree -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  luacst tree init.lua                # significant tokens only
  luacst tree init.lua --trivia       # lossless, with whitespace and comments
  cat init.lua | luacst tree - --spans"#,
        )
        .arg(trivia_arg())
        .arg(spans_arg());

    with_source_args(cmd)
}

/// Exits with status 1 when the source has errors. Silent on success in text format.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Report syntax errors")
        .override_usage(
            "\
  luacst check <FILE>
  luacst check -s <TEXT>",
        )
        .after_help(
            r#"EXAMPLES:
  luacst check init.lua
  luacst check init.lua --format json
  luacst check -s 'if x then' --color never"#,
        )
        .arg(color_arg())
        .arg(format_arg());

    with_source_args(cmd)
}

pub fn highlight_command() -> Command {
    let cmd = Command::new("highlight")
        .about("Show the highlight category of every token")
        .override_usage(
            "\
  luacst highlight <FILE>
  luacst highlight -s <TEXT>",
        )
        .arg(format_arg());

    with_source_args(cmd)
}
