//! Spawn placements on the logical map grid.

use serde::{Deserialize, Serialize};

use crate::kind::MonsterKind;

/// Direction value meaning "no preferred direction".
pub const NO_DIRECTION: i32 = -1;

/// Largest logical coordinate on either axis.
pub const GRID_MAX: i32 = 255;

/// Check a direction value against {-1, 1..=8}.
pub fn is_valid_direction(direction: i32) -> bool {
    direction == NO_DIRECTION || (1..=8).contains(&direction)
}

/// A cell on the fixed 0-255 map grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u8,
    pub y: u8,
}

impl GridPoint {
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Build a point from untrusted integers; `None` if either is outside [0,255].
    pub fn checked(x: i32, y: i32) -> Option<Self> {
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        Some(Self { x, y })
    }

    /// Component-wise minimum and maximum of two corners.
    pub fn span(a: GridPoint, b: GridPoint) -> (GridPoint, GridPoint) {
        (
            GridPoint::new(a.x.min(b.x), a.y.min(b.y)),
            GridPoint::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    /// Center of the rectangle spanned by two corners, rounded down.
    pub fn midpoint(a: GridPoint, b: GridPoint) -> GridPoint {
        let mid = |p: u8, q: u8| ((p as u16 + q as u16) / 2) as u8;
        GridPoint::new(mid(a.x, b.x), mid(a.y, b.y))
    }
}

impl std::fmt::Display for GridPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One spawn entry of a map file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnPlacement {
    pub monster_id: u32,
    pub map_number: u16,
    /// Wander range, meaningful for area placements only.
    pub range: u32,
    pub position: GridPoint,
    /// Equal to `position` for point placements.
    pub area_end: GridPoint,
    pub direction: i32,
    pub quantity: u32,
    /// Selects the section the placement is written to.
    pub kind: MonsterKind,
}

impl SpawnPlacement {
    /// A single-cell placement.
    pub fn point(monster_id: u32, map_number: u16, position: GridPoint, kind: MonsterKind) -> Self {
        Self {
            monster_id,
            map_number,
            range: 0,
            position,
            area_end: position,
            direction: NO_DIRECTION,
            quantity: 1,
            kind,
        }
        .normalized()
    }

    pub fn with_area(mut self, area_end: GridPoint) -> Self {
        self.area_end = area_end;
        self.normalized()
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
        self.normalized()
    }

    /// Whether the placement covers more than one cell.
    pub fn is_area(&self) -> bool {
        self.position != self.area_end
    }

    /// Enforce the placement invariants: quantity is at least 1, and NPCs
    /// occupy a single cell with quantity 1.
    pub fn normalize(&mut self) {
        if self.kind.is_npc() {
            self.area_end = self.position;
            self.quantity = 1;
        }
        if self.quantity == 0 {
            self.quantity = 1;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }
}
