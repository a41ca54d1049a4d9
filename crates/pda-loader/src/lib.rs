//! Automaton file loaders.
//!
//! Every format is first parsed into an [`AutomatonDocument`], which is then
//! converted through [`pda_core::AutomatonBuilder`], so validation rules are
//! identical whatever the source format.
//!
//! | Extension | Format |
//! |-----------|--------|
//! | `.yaml`, `.yml` | YAML document |
//! | `.json` | JSON document |
//! | `.txt`, `.pda`, `.ascii` | ASCII mini-language ([`ascii`]) |
//! | `.csv` | CSV transition table with `#META` rows ([`csv`]) |

pub mod ascii;
pub mod csv;
pub mod document;

use std::fmt;
use std::path::{Path, PathBuf};

use pda_core::{Automaton, DefinitionError};
use tracing::{debug, info};

pub use document::{AutomatonDocument, TransitionDocument};

/// Error type for loading automaton files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "unsupported file format '{0}' (use .yaml, .yml, .json, .txt, .pda, .ascii or .csv)"
    )]
    UnsupportedFormat(String),
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("only one initial stack symbol is supported, got {0}")]
    MultipleInitialStackSymbols(usize),
    #[error("invalid automaton: {0}")]
    Definition(#[from] DefinitionError),
}

/// Source format of an automaton file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
    Ascii,
    Csv,
}

impl Format {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            "txt" | "pda" | "ascii" => Ok(Format::Ascii),
            "csv" => Ok(Format::Csv),
            _ => Err(LoadError::UnsupportedFormat(format!(".{ext}"))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Yaml => "yaml",
            Format::Json => "json",
            Format::Ascii => "ascii",
            Format::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Parse `text` in the given format into an unvalidated document.
pub fn parse_document(text: &str, format: Format) -> Result<AutomatonDocument, LoadError> {
    match format {
        Format::Yaml => AutomatonDocument::from_yaml(text),
        Format::Json => AutomatonDocument::from_json(text),
        Format::Ascii => ascii::parse(text),
        Format::Csv => csv::parse(text),
    }
}

/// Parse and validate `text` in the given format.
pub fn parse_str(text: &str, format: Format) -> Result<Automaton, LoadError> {
    parse_document(text, format)?.into_automaton()
}

/// Load and validate an automaton file, detecting the format from its extension.
pub fn load_automaton(path: impl AsRef<Path>) -> Result<Automaton, LoadError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    debug!(path = %path.display(), %format, "loading automaton");

    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let automaton = parse_str(&text, format)?;

    info!(
        path = %path.display(),
        states = automaton.states().len(),
        transitions = automaton.transitions().len(),
        "automaton loaded"
    );
    Ok(automaton)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_formats() {
        assert_eq!(Format::from_path(Path::new("a.yaml")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.YML")).unwrap(), Format::Yaml);
        assert_eq!(Format::from_path(Path::new("a.json")).unwrap(), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.pda")).unwrap(), Format::Ascii);
        assert_eq!(Format::from_path(Path::new("a.csv")).unwrap(), Format::Csv);
    }

    #[test]
    fn reject_unknown_extension() {
        let err = Format::from_path(Path::new("automaton.xml")).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ref e) if e == ".xml"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_automaton("/nonexistent/automaton.yaml").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
