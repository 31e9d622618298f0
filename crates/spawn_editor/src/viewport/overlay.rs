//! Marker layout for drawing placements over the map image.

use spawn_format::{MonsterKind, SpawnPlacement};

use super::CanvasTransform;
use crate::core::{MonsterSelection, PlacementSelection};

pub const MARKER_RADIUS: f32 = 4.0;
pub const SELECTED_MARKER_RADIUS: f32 = 6.0;

const HIGHLIGHT_OUTLINE: &str = "white";
const DEFAULT_OUTLINE: &str = "black";

/// One placement as drawn on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
    pub index: usize,
    pub monster_id: u32,
    pub kind: MonsterKind,
    /// Canvas position of the placement's first cell
    pub center: [f32; 2],
    pub radius: f32,
    pub color: &'static str,
    pub outline: &'static str,
    /// Canvas corners of the spawn area, drawn in `color`
    pub area: Option<[[f32; 2]; 2]>,
}

/// Lay out markers for `placements` under `transform`. Placements that are
/// selected, or share the selected monster id, are drawn larger.
pub fn build_markers(
    placements: &[SpawnPlacement],
    transform: &CanvasTransform,
    placement: PlacementSelection,
    monster: MonsterSelection,
) -> Vec<Marker> {
    placements
        .iter()
        .enumerate()
        .map(|(index, p)| {
            let highlighted = placement.index() == Some(index) || monster.id() == Some(p.monster_id);
            let area = (!p.kind.is_npc() && p.is_area())
                .then(|| [transform.to_pixel(p.position), transform.to_pixel(p.area_end)]);

            Marker {
                index,
                monster_id: p.monster_id,
                kind: p.kind,
                center: transform.to_pixel(p.position),
                radius: if highlighted { SELECTED_MARKER_RADIUS } else { MARKER_RADIUS },
                color: p.kind.color(),
                outline: if highlighted { HIGHLIGHT_OUTLINE } else { DEFAULT_OUTLINE },
                area,
            }
        })
        .collect()
}
