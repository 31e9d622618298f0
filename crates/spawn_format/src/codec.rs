//! MonsterSetBase spawn file codec.
//!
//! A spawn file is a sequence of sections:
//!
//! ```text
//! 0
//! //Monster  MapNumber  Range  PositionX  PositionY  Direction
//! 240        3          0      120        130        3          //Guard
//! end
//! 1
//! //Monster  MapNumber  Range  BeginPosX  BeginPosY  EndPosX  EndPosY  Direction  Quantity
//! 7          3          20     100        120        110      130      -1         5   //Bull Fighter
//! end
//! ```
//!
//! Section `0` holds NPCs, section `1` holds monsters and traps. Records
//! outside any section are accepted in the six-column shape for older files.

use std::path::Path;

use crate::catalog::MonsterCatalog;
use crate::error::{FormatError, LineWarning, Result, WarningKind};
use crate::kind::MonsterKind;
use crate::placement::{GridPoint, SpawnPlacement};
use crate::tokenizer::record_tokens;

const NPC_MARKER: &str = "0";
const MONSTER_MARKER: &str = "1";
const END_MARKER: &str = "end";

const NPC_FIELDS: usize = 6;
const MONSTER_FIELDS: usize = 9;

const BANNER_WIDTH: usize = 137;
const NPC_HEADER: &str =
    "//Monster      MapNumber      Range      PositionX      PositionY      Direction      Comment";
const MONSTER_HEADER: &str = "//Monster      MapNumber      Range      BeginPosX      BeginPosY      EndPosX      EndPosY      Direction      Quantity      Comment";

/// Decoder state between lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    None,
    Npc,
    Monster,
}

/// Placements read from a spawn file, in file order.
#[derive(Clone, Debug, Default)]
pub struct DecodedSpawns {
    pub placements: Vec<SpawnPlacement>,
    pub warnings: Vec<LineWarning>,
}

impl DecodedSpawns {
    /// Count of lines that were skipped.
    pub fn skipped_lines(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_malformed()).count()
    }
}

/// Reader and writer for spawn files.
pub struct SpawnCodec;

impl SpawnCodec {
    /// Read and decode a spawn file.
    pub fn load(
        path: impl AsRef<Path>,
        catalog: &MonsterCatalog,
        expected_map: Option<u16>,
    ) -> Result<DecodedSpawns> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| FormatError::MapLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let decoded = Self::decode_for_map(&content, catalog, expected_map);
        log::info!(
            "Loaded {} placements from {:?} ({} warnings)",
            decoded.placements.len(),
            path,
            decoded.warnings.len()
        );
        Ok(decoded)
    }

    /// Encode placements and write them to a spawn file.
    pub fn save(
        path: impl AsRef<Path>,
        placements: &[SpawnPlacement],
        catalog: &MonsterCatalog,
    ) -> Result<()> {
        let path = path.as_ref();
        let text = Self::encode(placements, catalog);
        std::fs::write(path, text).map_err(|source| FormatError::MapSave {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Saved {} placements to {:?}", placements.len(), path);
        Ok(())
    }

    /// Decode spawn file text without map number validation.
    pub fn decode(text: &str, catalog: &MonsterCatalog) -> DecodedSpawns {
        Self::decode_for_map(text, catalog, None)
    }

    /// Decode spawn file text. When `expected_map` is given, records with a
    /// different map number are kept but reported.
    pub fn decode_for_map(
        text: &str,
        catalog: &MonsterCatalog,
        expected_map: Option<u16>,
    ) -> DecodedSpawns {
        let mut decoded = DecodedSpawns::default();
        let mut section = Section::None;

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            if line == NPC_MARKER {
                section = Section::Npc;
                continue;
            }
            if line == MONSTER_MARKER {
                section = Section::Monster;
                continue;
            }
            if line.eq_ignore_ascii_case(END_MARKER) {
                section = Section::None;
                continue;
            }

            match Self::decode_record(line, section, catalog) {
                Ok(placement) => {
                    if let Some(expected) = expected_map {
                        if placement.map_number != expected {
                            let warning = LineWarning::new(
                                line_no,
                                line,
                                WarningKind::MapNumberMismatch {
                                    expected,
                                    found: placement.map_number,
                                },
                            );
                            log::warn!("{}", warning);
                            decoded.warnings.push(warning);
                        }
                    }
                    decoded.placements.push(placement);
                }
                Err(reason) => {
                    let warning = LineWarning::new(line_no, line, WarningKind::MalformedLine(reason));
                    log::warn!("{}", warning);
                    decoded.warnings.push(warning);
                }
            }
        }

        decoded
    }

    fn decode_record(
        line: &str,
        section: Section,
        catalog: &MonsterCatalog,
    ) -> std::result::Result<SpawnPlacement, String> {
        let tokens = record_tokens(line);

        match section {
            Section::Npc if tokens.len() >= NPC_FIELDS => {
                Self::decode_point(&tokens, MonsterKind::Npc)
            }
            Section::Monster if tokens.len() >= MONSTER_FIELDS => {
                let monster_id = field::<u32>(&tokens, 0)?;
                let kind = match catalog.kind_of(monster_id) {
                    MonsterKind::Trap => MonsterKind::Trap,
                    MonsterKind::Npc
                    | MonsterKind::Creature
                    | MonsterKind::Swarm
                    | MonsterKind::Event => MonsterKind::Creature,
                };
                let placement = SpawnPlacement {
                    monster_id,
                    map_number: field(&tokens, 1)?,
                    range: field(&tokens, 2)?,
                    position: grid_field(&tokens, 3)?,
                    area_end: grid_field(&tokens, 5)?,
                    direction: field(&tokens, 7)?,
                    quantity: field(&tokens, 8)?,
                    kind,
                };
                Ok(placement.normalized())
            }
            Section::None if tokens.len() >= NPC_FIELDS => {
                let monster_id = field::<u32>(&tokens, 0)?;
                Self::decode_point(&tokens, catalog.kind_of(monster_id))
            }
            Section::Npc => Err(format!("expected {} fields, found {}", NPC_FIELDS, tokens.len())),
            Section::Monster => Err(format!(
                "expected {} fields, found {}",
                MONSTER_FIELDS,
                tokens.len()
            )),
            Section::None => Err(format!(
                "expected at least {} fields outside a section, found {}",
                NPC_FIELDS,
                tokens.len()
            )),
        }
    }

    fn decode_point(tokens: &[&str], kind: MonsterKind) -> std::result::Result<SpawnPlacement, String> {
        let position = grid_field(tokens, 3)?;
        let placement = SpawnPlacement {
            monster_id: field(tokens, 0)?,
            map_number: field(tokens, 1)?,
            range: field(tokens, 2)?,
            position,
            area_end: position,
            direction: field(tokens, 5)?,
            quantity: 1,
            kind,
        };
        Ok(placement.normalized())
    }

    /// Encode placements: NPCs under section `0`, everything else under
    /// section `1`, each in document order.
    pub fn encode(placements: &[SpawnPlacement], catalog: &MonsterCatalog) -> String {
        let mut npcs = Vec::new();
        let mut monsters = Vec::new();
        for placement in placements {
            match placement.kind {
                MonsterKind::Npc => npcs.push(placement),
                MonsterKind::Trap
                | MonsterKind::Creature
                | MonsterKind::Swarm
                | MonsterKind::Event => monsters.push(placement),
            }
        }

        let banner = format!("//{}", "=".repeat(BANNER_WIDTH));

        let mut lines = vec![
            banner.clone(),
            "// NPCS".to_string(),
            banner.clone(),
            NPC_MARKER.to_string(),
            NPC_HEADER.to_string(),
        ];
        lines.extend(npcs.into_iter().map(|p| {
            format!(
                "{:<14}{:<14}{:<12}{:<14}{:<14}{:<14}//{}",
                p.monster_id,
                p.map_number,
                p.range,
                p.position.x,
                p.position.y,
                p.direction,
                catalog.name_of(p.monster_id)
            )
        }));
        lines.push(END_MARKER.to_string());
        lines.push(String::new());

        lines.extend([
            banner.clone(),
            "// MONSTERS".to_string(),
            banner,
            MONSTER_MARKER.to_string(),
            MONSTER_HEADER.to_string(),
        ]);
        lines.extend(monsters.into_iter().map(|p| {
            format!(
                "{:<14}{:<14}{:<12}{:<14}{:<14}{:<14}{:<14}{:<14}{:<14}//{}",
                p.monster_id,
                p.map_number,
                p.range,
                p.position.x,
                p.position.y,
                p.area_end.x,
                p.area_end.y,
                p.direction,
                p.quantity,
                catalog.name_of(p.monster_id)
            )
        }));
        lines.push(END_MARKER.to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

fn field<T: std::str::FromStr>(tokens: &[&str], index: usize) -> std::result::Result<T, String> {
    let token = tokens
        .get(index)
        .ok_or_else(|| format!("missing field {}", index + 1))?;
    token
        .parse()
        .map_err(|_| format!("invalid number '{}' in field {}", token, index + 1))
}

/// Read two consecutive fields as a grid point.
fn grid_field(tokens: &[&str], index: usize) -> std::result::Result<GridPoint, String> {
    let x: i32 = field(tokens, index)?;
    let y: i32 = field(tokens, index + 1)?;
    GridPoint::checked(x, y).ok_or_else(|| format!("coordinate ({}, {}) outside 0-255", x, y))
}
