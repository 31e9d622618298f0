//! Tool trait and input types.

use spawn_format::GridPoint;

use crate::core::{MonsterSelection, SpawnDocument};
use crate::viewport::CanvasTransform;

/// Edit requested by a completed gesture, in grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolAction {
    SelectPlacement(usize),
    PlacePoint(GridPoint),
    /// Corners in gesture order, not normalized
    PlaceArea { start: GridPoint, end: GridPoint },
}

/// Result of tool operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolResult {
    /// No action taken
    None,
    /// Tool handled the input, continue
    Handled,
    /// Tool completed a gesture
    Completed(ToolAction),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    /// Aborts a drag in progress
    Right,
}

/// Mouse event for tool input. Positions are canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct MouseEvent {
    pub position: [f32; 2],
    pub button: Option<MouseButton>,
    pub pressed: bool,
}

impl MouseEvent {
    pub fn press(x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            button: Some(MouseButton::Left),
            pressed: true,
        }
    }

    pub fn right_press(x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            button: Some(MouseButton::Right),
            pressed: true,
        }
    }

    pub fn release(x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            button: Some(MouseButton::Left),
            pressed: false,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            position: [x, y],
            button: None,
            pressed: false,
        }
    }
}

/// Read-only view of editor state handed to tools.
#[derive(Clone, Copy, Debug)]
pub struct ToolContext<'a> {
    pub document: Option<&'a SpawnDocument>,
    pub transform: CanvasTransform,
    pub monster: MonsterSelection,
    pub pick_radius: f32,
    pub drag_threshold: f32,
}

/// A tool for canvas interaction.
pub trait Tool {
    /// Handle mouse button press/release.
    fn on_mouse_button(&mut self, _event: &MouseEvent, _ctx: &ToolContext<'_>) -> ToolResult {
        ToolResult::None
    }

    /// Handle mouse movement.
    fn on_mouse_move(&mut self, _event: &MouseEvent, _ctx: &ToolContext<'_>) -> ToolResult {
        ToolResult::None
    }

    /// Abort any gesture in progress.
    fn cancel(&mut self) {}
}
