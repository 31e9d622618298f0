//! Core editor types and state management.
//!
//! This module contains the central `EditorState` and supporting types
//! that form the foundation of the editor.

pub mod editor_state;
mod document;
mod error;
mod history;
mod preferences;
mod session;
mod store;

pub use editor_state::EditorState;
pub use document::{
    PlacementRow, PlacementSpec, PlacementUpdate, SpawnDocument, DEFAULT_PICK_RADIUS,
    MONSTER_ROWS_HEADER, NPC_ROWS_HEADER,
};
pub use error::{EditError, EditorError, EditorResult, HistoryError, PreferencesError, StoreError};
pub use history::{Snapshot, UndoHistory};
pub use preferences::{EditorPreferences, ROOT_ENV_VAR};
pub use session::{Brush, EditorSession, MonsterSelection, PlacementSelection};
pub use store::{DocumentStore, ExitDecision, MapId};
