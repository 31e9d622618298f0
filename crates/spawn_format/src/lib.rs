//! Spawn Format - MonsterSetBase file handling
//!
//! This crate reads the monster definition table and reads and writes the
//! per-map spawn files used by the spawn editor.
//!
//! # Features
//!
//! - Quote-aware catalog tokenizer and monster definition parser
//! - Sectioned spawn file decoder with a tolerant legacy path
//! - Fixed-width spawn file encoder
//! - Per-line diagnostics instead of hard failures
//!
//! # Example
//!
//! ```ignore
//! use spawn_format::prelude::*;
//!
//! let catalog = CatalogParser::load("Monster/Monster.txt")?.catalog;
//! let decoded = SpawnCodec::load("MonsterSetBase/003 - Noria.txt", &catalog, Some(3))?;
//! SpawnCodec::save("MonsterSetBase/003 - Noria.txt", &decoded.placements, &catalog)?;
//! ```

pub mod catalog;
pub mod codec;
pub mod error;
pub mod kind;
pub mod map_file;
pub mod placement;
pub mod tokenizer;

pub mod prelude {
    pub use crate::catalog::{
        CatalogListing, CatalogParse, CatalogParser, MonsterCatalog, MonsterDefinition,
        MonsterStats, MonsterUpdate, UNKNOWN_MONSTER_NAME,
    };
    pub use crate::codec::{DecodedSpawns, SpawnCodec};
    pub use crate::error::{FormatError, LineWarning, Result, WarningKind};
    pub use crate::kind::MonsterKind;
    pub use crate::map_file::{list_maps, MapFileName};
    pub use crate::placement::{is_valid_direction, GridPoint, SpawnPlacement, GRID_MAX, NO_DIRECTION};
}

pub use prelude::*;
