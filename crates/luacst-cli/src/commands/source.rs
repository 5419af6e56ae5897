//! Loading the Lua source a command works on.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("source required (positional FILE or --source)")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read {}: {source}", .path.display())]
    File { path: PathBuf, source: io::Error },
}

/// Where the source comes from: a file, stdin (`-`), or inline text.
#[derive(Debug, Clone, Default)]
pub struct SourceInput {
    path: Option<PathBuf>,
    text: Option<String>,
}

impl SourceInput {
    pub fn new(path: Option<PathBuf>, text: Option<String>) -> Self {
        Self { path, text }
    }

    fn is_stdin(path: &Path) -> bool {
        path.as_os_str() == "-"
    }

    pub fn load(&self) -> Result<String, SourceError> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        let Some(path) = &self.path else {
            return Err(SourceError::Missing);
        };

        if Self::is_stdin(path) {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(SourceError::Stdin)?;
            return Ok(buf);
        }

        fs::read_to_string(path).map_err(|source| SourceError::File {
            path: path.clone(),
            source,
        })
    }

    /// Name shown in diagnostics.
    pub fn display_name(&self) -> String {
        match &self.path {
            Some(path) if self.text.is_none() && !Self::is_stdin(path) => {
                path.display().to_string()
            }
            Some(_) if self.text.is_none() => "<stdin>".to_string(),
            _ => "<source>".to_string(),
        }
    }

    pub fn load_or_exit(&self) -> String {
        self.load().unwrap_or_else(|e| {
            eprintln!("error: {e}");
            std::process::exit(1);
        })
    }
}
