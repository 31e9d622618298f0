//! Selection and brush state of an editing session.

use spawn_format::{MonsterKind, NO_DIRECTION};

use super::MapId;

/// Currently selected catalog entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonsterSelection {
    #[default]
    None,
    Monster(u32),
}

impl MonsterSelection {
    pub fn id(&self) -> Option<u32> {
        match self {
            Self::None => None,
            Self::Monster(id) => Some(*id),
        }
    }
}

/// Currently selected placement of the active document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlacementSelection {
    #[default]
    None,
    Placement(usize),
}

impl PlacementSelection {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::None => None,
            Self::Placement(index) => Some(*index),
        }
    }
}

/// Values applied to new placements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Brush {
    pub quantity: u32,
    pub range: u32,
    pub direction: i32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            quantity: 1,
            range: 30,
            direction: NO_DIRECTION,
        }
    }
}

/// Session state driven by the UI.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    pub active_map: Option<MapId>,
    pub monster: MonsterSelection,
    pub placement: PlacementSelection,
    pub brush: Brush,
    pub hide_placements: bool,
}

impl EditorSession {
    pub fn new(brush: Brush) -> Self {
        Self {
            brush,
            ..Default::default()
        }
    }

    /// Select a catalog entry. NPCs always spawn alone.
    pub fn select_monster(&mut self, monster_id: u32, kind: MonsterKind) {
        self.monster = MonsterSelection::Monster(monster_id);
        if kind.is_npc() {
            self.brush.quantity = 1;
        }
    }

    pub fn clear_monster(&mut self) {
        self.monster = MonsterSelection::None;
    }

    pub fn select_placement(&mut self, index: usize) {
        self.placement = PlacementSelection::Placement(index);
    }

    pub fn clear_placement(&mut self) {
        self.placement = PlacementSelection::None;
    }

    /// Switch the active map. Returns the map being left, if any.
    pub fn activate_map(&mut self, id: MapId) -> Option<MapId> {
        self.placement = PlacementSelection::None;
        let previous = self.active_map.replace(id);
        previous.filter(|prev| Some(prev) != self.active_map.as_ref())
    }

    pub fn toggle_hide_placements(&mut self) -> bool {
        self.hide_placements = !self.hide_placements;
        self.hide_placements
    }
}
