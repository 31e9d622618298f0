//! One map's spawn set and its edit operations.
//!
//! Every mutation validates its input first, then records the previous
//! placement list in the document history and marks the document dirty.
//! A rejected mutation leaves the document untouched.

use spawn_format::{
    is_valid_direction, GridPoint, MapFileName, MonsterCatalog, MonsterKind, SpawnPlacement,
    NO_DIRECTION,
};

use super::{EditError, HistoryError, UndoHistory};
use crate::viewport::CanvasTransform;

/// Default pick radius in canvas pixels.
pub const DEFAULT_PICK_RADIUS: f32 = 8.0;

/// Requested new placement, coordinates unchecked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSpec {
    pub monster_id: u32,
    pub position: (i32, i32),
    /// `None` for a single-cell placement
    pub area_end: Option<(i32, i32)>,
    pub range: u32,
    pub direction: i32,
    pub quantity: u32,
}

impl PlacementSpec {
    pub fn point(monster_id: u32, x: i32, y: i32) -> Self {
        Self {
            monster_id,
            position: (x, y),
            area_end: None,
            range: 0,
            direction: NO_DIRECTION,
            quantity: 1,
        }
    }

    pub fn with_area(mut self, end_x: i32, end_y: i32) -> Self {
        self.area_end = Some((end_x, end_y));
        self
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_direction(mut self, direction: i32) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }
}

/// Field changes for an existing placement; `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementUpdate {
    pub monster_id: Option<u32>,
    pub position: Option<(i32, i32)>,
    pub area_end: Option<(i32, i32)>,
    pub range: Option<u32>,
    pub direction: Option<i32>,
    pub quantity: Option<u32>,
}

/// A row of the placement list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementRow {
    Header(&'static str),
    Entry {
        index: usize,
        kind: MonsterKind,
        label: String,
    },
}

pub const NPC_ROWS_HEADER: &str = "=== NPCs ===";
pub const MONSTER_ROWS_HEADER: &str = "=== Monsters & Traps ===";

fn checked_point((x, y): (i32, i32)) -> Result<GridPoint, EditError> {
    GridPoint::checked(x, y).ok_or(EditError::InvalidCoordinate { x, y })
}

fn checked_direction(direction: i32) -> Result<i32, EditError> {
    if is_valid_direction(direction) {
        Ok(direction)
    } else {
        Err(EditError::InvalidDirection(direction))
    }
}

/// Spawn placements of one map file.
#[derive(Clone, Debug)]
pub struct SpawnDocument {
    file: MapFileName,
    placements: Vec<SpawnPlacement>,
    dirty: bool,
    history: UndoHistory,
}

impl SpawnDocument {
    pub fn new(file: MapFileName) -> Self {
        Self::from_placements(file, Vec::new())
    }

    /// Wrap placements read from disk. The document starts clean.
    pub fn from_placements(file: MapFileName, placements: Vec<SpawnPlacement>) -> Self {
        Self {
            file,
            placements,
            dirty: false,
            history: UndoHistory::new(),
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history = UndoHistory::with_capacity(limit);
        self
    }

    pub fn file(&self) -> &MapFileName {
        &self.file
    }

    pub fn file_name(&self) -> &str {
        &self.file.file_name
    }

    pub fn map_number(&self) -> u16 {
        self.file.map_number
    }

    pub fn map_name(&self) -> &str {
        &self.file.map_name
    }

    /// Placements in save order.
    pub fn placements(&self) -> &[SpawnPlacement] {
        &self.placements
    }

    pub fn placement(&self, index: usize) -> Option<&SpawnPlacement> {
        self.placements.get(index)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    fn record(&mut self, label: String) {
        self.history.record(self.placements.clone(), label);
        self.dirty = true;
    }

    /// Append a placement. Returns its index.
    pub fn add_placement(
        &mut self,
        spec: &PlacementSpec,
        catalog: &MonsterCatalog,
    ) -> Result<usize, EditError> {
        let position = checked_point(spec.position)?;
        let area_end = match spec.area_end {
            Some(end) => checked_point(end)?,
            None => position,
        };
        let direction = checked_direction(spec.direction)?;

        let placement = SpawnPlacement {
            monster_id: spec.monster_id,
            map_number: self.file.map_number,
            range: spec.range,
            position,
            area_end,
            direction,
            quantity: spec.quantity,
            kind: catalog.kind_of(spec.monster_id),
        }
        .normalized();

        let name = catalog.name_of(spec.monster_id);
        self.record(format!("Add {}", name));
        log::debug!("Added {} at {} on {}", name, position, self.file.file_name);

        self.placements.push(placement);
        Ok(self.placements.len() - 1)
    }

    /// Change fields of one placement. Moving a single-cell placement
    /// without a new area end moves the whole cell.
    pub fn update_placement(
        &mut self,
        index: usize,
        update: &PlacementUpdate,
        catalog: &MonsterCatalog,
    ) -> Result<(), EditError> {
        let current = self
            .placements
            .get(index)
            .ok_or(EditError::PlacementNotFound(index))?;
        let mut updated = current.clone();

        if let Some(position) = update.position {
            updated.position = checked_point(position)?;
            if !current.is_area() && update.area_end.is_none() {
                updated.area_end = updated.position;
            }
        }
        if let Some(end) = update.area_end {
            updated.area_end = checked_point(end)?;
        }
        if let Some(direction) = update.direction {
            updated.direction = checked_direction(direction)?;
        }
        if let Some(monster_id) = update.monster_id {
            updated.monster_id = monster_id;
            updated.kind = catalog.kind_of(monster_id);
        }
        if let Some(range) = update.range {
            updated.range = range;
        }
        if let Some(quantity) = update.quantity {
            updated.quantity = quantity;
        }
        updated.normalize();

        self.record(format!("Update {}", catalog.name_of(updated.monster_id)));
        self.placements[index] = updated;
        Ok(())
    }

    pub fn remove_placement(
        &mut self,
        index: usize,
        catalog: &MonsterCatalog,
    ) -> Result<SpawnPlacement, EditError> {
        let monster_id = self
            .placements
            .get(index)
            .map(|p| p.monster_id)
            .ok_or(EditError::PlacementNotFound(index))?;

        self.record(format!("Remove {}", catalog.name_of(monster_id)));
        Ok(self.placements.remove(index))
    }

    /// Placements accepted by `filter`, with their indices, in order.
    pub fn list_placements<'a, F>(
        &'a self,
        filter: F,
    ) -> impl Iterator<Item = (usize, &'a SpawnPlacement)> + 'a
    where
        F: Fn(&SpawnPlacement) -> bool + 'a,
    {
        self.placements
            .iter()
            .enumerate()
            .filter(move |(_, p)| filter(p))
    }

    /// Closest placement whose canvas position lies within `radius` pixels
    /// of `(px, py)`. The earlier placement wins a tie.
    pub fn nearest_placement(
        &self,
        px: f32,
        py: f32,
        transform: &CanvasTransform,
        radius: f32,
    ) -> Option<usize> {
        let mut nearest = None;
        let mut best = f32::INFINITY;

        for (index, placement) in self.placements.iter().enumerate() {
            let [sx, sy] = transform.to_pixel(placement.position);
            let dist = ((px - sx).powi(2) + (py - sy).powi(2)).sqrt();
            if dist <= radius && dist < best {
                best = dist;
                nearest = Some(index);
            }
        }

        nearest
    }

    /// Apply a catalog kind change to every placement of `monster_id`.
    /// Not recorded in history. Returns the number of changed placements.
    pub fn reclassify(&mut self, monster_id: u32, kind: MonsterKind) -> usize {
        let mut changed = 0;
        for placement in self.placements.iter_mut().filter(|p| p.monster_id == monster_id) {
            let before = placement.clone();
            placement.kind = kind;
            placement.normalize();
            if *placement != before {
                changed += 1;
            }
        }

        if changed > 0 {
            self.dirty = true;
            log::info!(
                "Reclassified {} placements of monster {} as {} in {}",
                changed,
                monster_id,
                kind,
                self.file.file_name
            );
        }
        changed
    }

    /// List rows grouped NPCs first, then monsters and traps, filtered by
    /// `search`. A group header is present whenever the group is non-empty.
    pub fn placement_rows(&self, catalog: &MonsterCatalog, search: &str) -> Vec<PlacementRow> {
        let needle = search.trim().to_lowercase();
        let (npcs, others): (Vec<_>, Vec<_>) = self
            .placements
            .iter()
            .enumerate()
            .partition(|(_, p)| p.kind.is_npc());

        let mut rows = Vec::new();

        if !npcs.is_empty() {
            rows.push(PlacementRow::Header(NPC_ROWS_HEADER));
            for (index, p) in npcs {
                let name = catalog.name_of(p.monster_id);
                let matches = needle.is_empty()
                    || matches_common(name, p.monster_id, &needle)
                    || "npc".contains(needle.as_str());
                if matches {
                    rows.push(PlacementRow::Entry {
                        index,
                        kind: p.kind,
                        label: format!("{} at ({}, {})", name, p.position.x, p.position.y),
                    });
                }
            }
        }

        if !others.is_empty() {
            rows.push(PlacementRow::Header(MONSTER_ROWS_HEADER));
            for (index, p) in others {
                let name = catalog.name_of(p.monster_id);
                let matches = needle.is_empty()
                    || matches_common(name, p.monster_id, &needle)
                    || (p.kind == MonsterKind::Trap && needle.contains("trap"))
                    || (p.kind != MonsterKind::Trap && needle.contains("monster"));
                if matches {
                    rows.push(PlacementRow::Entry {
                        index,
                        kind: p.kind,
                        label: format!(
                            "[{}] {} - Qty: {} - Area: {} to {}",
                            p.kind.label(),
                            name,
                            p.quantity,
                            p.position,
                            p.area_end
                        ),
                    });
                }
            }
        }

        rows
    }

    /// Restore the state before the last mutation. Returns its label.
    pub fn undo(&mut self) -> Result<String, HistoryError> {
        let label = self.history.undo(&mut self.placements)?;
        self.dirty = true;
        Ok(label)
    }

    pub fn redo(&mut self) -> Result<String, HistoryError> {
        let label = self.history.redo(&mut self.placements)?;
        self.dirty = true;
        Ok(label)
    }
}

fn matches_common(name: &str, monster_id: u32, needle: &str) -> bool {
    name.to_lowercase().contains(needle) || monster_id.to_string().contains(needle)
}
