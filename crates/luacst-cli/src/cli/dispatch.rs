//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::OutputFormat;
use crate::commands::check::CheckArgs;
use crate::commands::highlight::HighlightArgs;
use crate::commands::source::SourceInput;
use crate::commands::tokens::TokensArgs;
use crate::commands::tree::TreeArgs;

pub struct TokensParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub spans: bool,
    pub format: OutputFormat,
}

impl TokensParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            spans: m.get_flag("spans"),
            format: parse_format(m),
        }
    }
}

impl From<TokensParams> for TokensArgs {
    fn from(p: TokensParams) -> Self {
        Self {
            source: SourceInput::new(p.source_path, p.source_text),
            spans: p.spans,
            format: p.format,
        }
    }
}

pub struct TreeParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub trivia: bool,
    pub spans: bool,
}

impl TreeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            trivia: m.get_flag("trivia"),
            spans: m.get_flag("spans"),
        }
    }
}

impl From<TreeParams> for TreeArgs {
    fn from(p: TreeParams) -> Self {
        Self {
            source: SourceInput::new(p.source_path, p.source_text),
            trivia: p.trivia,
            spans: p.spans,
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub color: ColorChoice,
    pub format: OutputFormat,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            color: parse_color(m),
            format: parse_format(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source: SourceInput::new(p.source_path, p.source_text),
            color: p.color.should_colorize(),
            format: p.format,
        }
    }
}

pub struct HighlightParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub format: OutputFormat,
}

impl HighlightParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            format: parse_format(m),
        }
    }
}

impl From<HighlightParams> for HighlightArgs {
    fn from(p: HighlightParams) -> Self {
        Self {
            source: SourceInput::new(p.source_path, p.source_text),
            format: p.format,
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_format(m: &ArgMatches) -> OutputFormat {
    m.get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or_default()
}
