pub mod check;
pub mod highlight;
pub mod source;
pub mod tokens;
pub mod tree;


/// Report format for commands that print structured data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Pretty JSON, or exit with an error.
fn to_json(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("error: failed to serialize output: {e}");
        std::process::exit(1);
    })
}
