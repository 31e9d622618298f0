//! Monster definition table (`Monster.txt`).
//!
//! Each record line starts with a numeric id and carries a quoted display
//! name followed by fixed numeric columns. Only lines with at least 17
//! tokens carry combat stats and a kind; shorter records keep the default
//! Creature kind and are reported as unresolved.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FormatError, LineWarning, Result, WarningKind};
use crate::kind::MonsterKind;
use crate::tokenizer::{first_quoted, parse_digits, tokenize_catalog_line};

/// Name reported for ids missing from the catalog.
pub const UNKNOWN_MONSTER_NAME: &str = "Unknown";

/// Minimum token count for a record line.
const MIN_RECORD_TOKENS: usize = 3;
/// Minimum token count for a record that carries stats and a kind.
const MIN_STATS_TOKENS: usize = 17;

mod column {
    pub const RATE: usize = 1;
    pub const NAME: usize = 2;
    pub const LEVEL: usize = 3;
    pub const HP: usize = 4;
    pub const MP: usize = 5;
    pub const MIN_DAMAGE: usize = 6;
    pub const MAX_DAMAGE: usize = 7;
    pub const DEFENSE: usize = 8;
    pub const MAGIC_DEFENSE: usize = 9;
    pub const ATTACK_RATE: usize = 10;
    pub const SUCCESS: usize = 11;
    pub const MOVE_RANGE: usize = 12;
    pub const ATTACK_TYPE: usize = 13;
    pub const VIEW_RANGE: usize = 14;
    pub const ATTACK_RANGE: usize = 15;
    pub const MOVE_SPEED: usize = 16;
    pub const ATTACK_SPEED: usize = 17;
    pub const REGEN_TIME: usize = 18;
    pub const ATTRIBUTE: usize = 19;
    pub const ITEM_RATE: usize = 20;
    pub const MONEY_RATE: usize = 21;
    pub const MAX_ITEM_LEVEL: usize = 22;
    pub const RESIST_WIND: usize = 23;
    pub const RESIST_POISON: usize = 24;
    pub const RESIST_ICE: usize = 25;
    pub const RESIST_WATER: usize = 26;
    pub const RESIST_FIRE: usize = 27;
    pub const ELEMENT: usize = 28;
    pub const MIN_ELEMENT: usize = 29;
    pub const MAX_ELEMENT: usize = 30;
    pub const ELEMENT_DEFENSE: usize = 31;
}

/// Combat attributes of a monster.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterStats {
    pub rate: u32,
    pub level: u32,
    pub hp: u32,
    pub mp: u32,
    pub min_damage: u32,
    pub max_damage: u32,
    pub defense: u32,
    pub magic_defense: u32,
    pub attack_rate: u32,
    pub success: u32,
    pub move_range: u32,
    /// Absent when the column is not a plain number.
    pub attack_type: Option<u32>,
    pub view_range: u32,
    pub attack_range: u32,
    pub move_speed: u32,
    pub attack_speed: u32,
    pub regen_time: u32,
    /// Raw attribute column; absent when missing or not a plain number.
    pub attribute: Option<u32>,
    pub item_rate: u32,
    pub money_rate: u32,
    pub max_item_level: u32,
    pub resist_wind: u32,
    pub resist_poison: u32,
    pub resist_ice: u32,
    pub resist_water: u32,
    pub resist_fire: u32,
    pub element: u32,
    pub min_element: u32,
    pub max_element: u32,
    pub element_defense: u32,
}

impl MonsterStats {
    fn from_tokens(tokens: &[String]) -> Self {
        let num = |index: usize| {
            tokens
                .get(index)
                .and_then(|t| parse_digits(t))
                .unwrap_or(0)
        };
        let opt = |index: usize| tokens.get(index).and_then(|t| parse_digits(t));

        Self {
            rate: num(column::RATE),
            level: num(column::LEVEL),
            hp: num(column::HP),
            mp: num(column::MP),
            min_damage: num(column::MIN_DAMAGE),
            max_damage: num(column::MAX_DAMAGE),
            defense: num(column::DEFENSE),
            magic_defense: num(column::MAGIC_DEFENSE),
            attack_rate: num(column::ATTACK_RATE),
            success: num(column::SUCCESS),
            move_range: num(column::MOVE_RANGE),
            attack_type: opt(column::ATTACK_TYPE),
            view_range: num(column::VIEW_RANGE),
            attack_range: num(column::ATTACK_RANGE),
            move_speed: num(column::MOVE_SPEED),
            attack_speed: num(column::ATTACK_SPEED),
            regen_time: num(column::REGEN_TIME),
            attribute: opt(column::ATTRIBUTE),
            item_rate: num(column::ITEM_RATE),
            money_rate: num(column::MONEY_RATE),
            max_item_level: num(column::MAX_ITEM_LEVEL),
            resist_wind: num(column::RESIST_WIND),
            resist_poison: num(column::RESIST_POISON),
            resist_ice: num(column::RESIST_ICE),
            resist_water: num(column::RESIST_WATER),
            resist_fire: num(column::RESIST_FIRE),
            element: num(column::ELEMENT),
            min_element: num(column::MIN_ELEMENT),
            max_element: num(column::MAX_ELEMENT),
            element_defense: num(column::ELEMENT_DEFENSE),
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterDefinition {
    pub id: u32,
    pub display_name: String,
    pub kind: MonsterKind,
    /// False when the attribute column was missing and `kind` is the default.
    pub kind_resolved: bool,
    /// Present only for records with enough columns.
    pub stats: Option<MonsterStats>,
}

impl MonsterDefinition {
    pub fn new(id: u32, display_name: impl Into<String>, kind: MonsterKind) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            kind,
            kind_resolved: true,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: MonsterStats) -> Self {
        self.stats = Some(stats);
        self
    }
}

/// Replacement values for an explicit stats edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonsterUpdate {
    pub display_name: String,
    pub kind: MonsterKind,
    pub stats: MonsterStats,
}

/// Catalog entries split for list display, each group sorted by id.
#[derive(Debug, Default)]
pub struct CatalogListing<'a> {
    pub npcs: Vec<&'a MonsterDefinition>,
    pub monsters: Vec<&'a MonsterDefinition>,
}

/// All known monster definitions keyed by id.
#[derive(Clone, Debug, Default)]
pub struct MonsterCatalog {
    entries: BTreeMap<u32, MonsterDefinition>,
}

impl MonsterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition, replacing any previous one with the same id.
    pub fn insert(&mut self, definition: MonsterDefinition) -> Option<MonsterDefinition> {
        self.entries.insert(definition.id, definition)
    }

    pub fn get(&self, id: u32) -> Option<&MonsterDefinition> {
        self.entries.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Kind of a monster id; unknown ids are Creatures.
    pub fn kind_of(&self, id: u32) -> MonsterKind {
        self.entries.get(&id).map(|d| d.kind).unwrap_or_default()
    }

    /// Display name of a monster id, or `"Unknown"`.
    pub fn name_of(&self, id: u32) -> &str {
        self.entries
            .get(&id)
            .map(|d| d.display_name.as_str())
            .unwrap_or(UNKNOWN_MONSTER_NAME)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterDefinition> {
        self.entries.values()
    }

    /// Case-insensitive search over names and id digits.
    pub fn search(&self, text: &str) -> CatalogListing<'_> {
        let needle = text.to_lowercase();
        let mut listing = CatalogListing::default();

        for definition in self.entries.values() {
            let matches = needle.is_empty()
                || definition.display_name.to_lowercase().contains(&needle)
                || definition.id.to_string().contains(&needle);
            if !matches {
                continue;
            }
            if definition.kind.is_npc() {
                listing.npcs.push(definition);
            } else {
                listing.monsters.push(definition);
            }
        }

        listing
    }

    /// Apply an explicit stats edit. Returns the previous kind, or `None`
    /// when the id is not in the catalog.
    pub fn update(&mut self, id: u32, update: MonsterUpdate) -> Option<MonsterKind> {
        let definition = self.entries.get_mut(&id)?;
        let previous = definition.kind;

        definition.display_name = update.display_name;
        definition.kind = update.kind;
        definition.kind_resolved = true;
        let mut stats = update.stats;
        stats.attribute = Some(update.kind.code() as u32);
        definition.stats = Some(stats);

        log::info!("Updated monster {} ({} -> {})", id, previous, update.kind);
        Some(previous)
    }
}

/// Result of parsing a catalog.
#[derive(Debug, Default)]
pub struct CatalogParse {
    pub catalog: MonsterCatalog,
    pub warnings: Vec<LineWarning>,
}

/// Parser for the monster definition table.
pub struct CatalogParser;

impl CatalogParser {
    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<CatalogParse> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FormatError::CatalogLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let parsed = Self::parse(&content);
        log::info!(
            "Loaded {} monster definitions from {:?}",
            parsed.catalog.len(),
            path
        );
        Ok(parsed)
    }

    /// Parse catalog text. Never fails; unusable lines are skipped.
    pub fn parse(text: &str) -> CatalogParse {
        let mut parsed = CatalogParse::default();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            if line.trim().is_empty() || line.starts_with("//") {
                continue;
            }

            match Self::parse_record(line, line_no, &mut parsed.warnings) {
                Some(definition) => {
                    if let Some(previous) = parsed.catalog.insert(definition) {
                        log::debug!("Monster {} redefined on line {}", previous.id, line_no);
                    }
                }
                None => log::debug!("Skipping catalog line {}: {}", line_no, line.trim()),
            }
        }

        parsed
    }

    fn parse_record(
        line: &str,
        line_no: usize,
        warnings: &mut Vec<LineWarning>,
    ) -> Option<MonsterDefinition> {
        let tokens = tokenize_catalog_line(line);
        if tokens.len() < MIN_RECORD_TOKENS {
            return None;
        }
        let id = parse_digits(&tokens[0])?;

        let display_name = match first_quoted(line) {
            Some(name) => name.to_string(),
            None => tokens[column::NAME].trim_matches('"').to_string(),
        };

        let mut definition = MonsterDefinition {
            id,
            display_name,
            kind: MonsterKind::Creature,
            kind_resolved: false,
            stats: None,
        };

        if tokens.len() >= MIN_STATS_TOKENS {
            let stats = MonsterStats::from_tokens(&tokens);
            if let Some(code) = stats.attribute {
                definition.kind_resolved = true;
                definition.kind = match code {
                    0..=2 => MonsterKind::from_code(code as i64).unwrap_or_default(),
                    _ => {
                        let warning = LineWarning::new(
                            line_no,
                            line.trim(),
                            WarningKind::CoercedKind { monster_id: id, code },
                        );
                        log::warn!("{}", warning);
                        warnings.push(warning);
                        MonsterKind::Creature
                    }
                };
            }
            definition.stats = Some(stats);
        }

        Some(definition)
    }
}
