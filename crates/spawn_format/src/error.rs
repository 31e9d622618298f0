//! Error and diagnostic types for spawn_format.

use std::path::PathBuf;
use thiserror::Error;

/// File-level failures.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The monster catalog could not be read.
    #[error("failed to load monster catalog {path:?}: {source}")]
    CatalogLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spawn file could not be read.
    #[error("failed to load map file {path:?}: {source}")]
    MapLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A spawn file could not be written.
    #[error("failed to save map file {path:?}: {source}")]
    MapSave {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, FormatError>;

/// What went wrong with a single line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarningKind {
    /// The line matched no record shape and was skipped.
    MalformedLine(String),
    /// A record's map number differs from the one in the file name.
    MapNumberMismatch { expected: u16, found: u16 },
    /// A catalog kind code outside {0,1,2} was replaced by Creature.
    CoercedKind { monster_id: u32, code: u32 },
}

/// Per-line diagnostic. Parsing continues past every warning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineWarning {
    /// 1-based line number
    pub line: usize,
    pub text: String,
    pub kind: WarningKind,
}

impl LineWarning {
    pub fn new(line: usize, text: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            line,
            text: text.into(),
            kind,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.kind, WarningKind::MalformedLine(_))
    }
}

impl std::fmt::Display for LineWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            WarningKind::MalformedLine(reason) => {
                write!(f, "line {}: skipping malformed line ({}): {}", self.line, reason, self.text)
            }
            WarningKind::MapNumberMismatch { expected, found } => write!(
                f,
                "line {}: map number {} does not match file map number {}",
                self.line, found, expected
            ),
            WarningKind::CoercedKind { monster_id, code } => write!(
                f,
                "line {}: invalid attribute {} for monster {}, using Monster",
                self.line, code, monster_id
            ),
        }
    }
}
