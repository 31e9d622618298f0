//! Error types for editing operations.

use spawn_format::FormatError;
use thiserror::Error;

use super::MapId;

/// A requested mutation was rejected. The document is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("coordinate ({x}, {y}) is outside the 0-255 map grid")]
    InvalidCoordinate { x: i32, y: i32 },

    #[error("invalid direction {0}, expected -1 or 1-8")]
    InvalidDirection(i32),

    #[error("no placement at index {0}")]
    PlacementNotFound(usize),

    #[error("no map is open")]
    NoActiveMap,

    #[error("no monster selected")]
    NoMonsterSelected,

    #[error("unknown monster id {0}")]
    UnknownMonster(u32),
}

/// Undo or redo was requested with an empty stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Document store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("map {0} is not loaded")]
    NotLoaded(MapId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Preferences file failures.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Any failure surfaced by [`EditorState`](super::EditorState).
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    History(#[from] HistoryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type EditorResult<T> = Result<T, EditorError>;
