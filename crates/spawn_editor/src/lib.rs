//! Spawn Map Editor
//!
//! Editing core for MonsterSetBase spawn maps: which monsters and NPCs
//! appear where on each game map.
//!
//! ## Features
//!
//! - **Document Store**: Lazily loaded per-map documents with dirty tracking
//! - **Placement Tool**: Click to place a spawn, drag to place a spawn area
//! - **Undo/Redo**: Bounded snapshot history per map
//! - **Catalog Edits**: Kind changes reclassify placements in every open map
//! - **Canvas Transform**: Grid/pixel conversion under zoom and scroll
//!
//! ## Architecture
//!
//! ```text
//! Pointer Input → PlacementTool → ToolAction → EditorState → SpawnDocument
//! ```
//!
//! Every mutation of a document records a snapshot for undo.

pub mod assets;
pub mod core;
pub mod tools;
pub mod viewport;

// Re-export commonly used types
pub use core::{
    Brush, DocumentStore, EditError, EditorError, EditorPreferences, EditorResult, EditorSession,
    EditorState, ExitDecision, HistoryError, MapId, MonsterSelection, PlacementRow,
    PlacementSelection, PlacementSpec, PlacementUpdate, SpawnDocument, StoreError, UndoHistory,
};

pub use tools::{PlacementTool, Tool, ToolAction, ToolResult};

pub use viewport::{CanvasTransform, Marker, ViewportState};

pub use assets::{MapImage, MapImageResolver};

/// Editor version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor name
pub const NAME: &str = "Spawn Map Editor";
