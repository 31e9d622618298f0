//! Pointer tool for picking and placing spawns.

use spawn_format::GridPoint;

use super::{MouseButton, MouseEvent, Tool, ToolAction, ToolContext, ToolResult};
use crate::core::MonsterSelection;

/// Click to pick or place a single spawn, drag to place an area.
#[derive(Debug, Default)]
pub struct PlacementTool {
    /// Start of the drag (if in progress)
    drag_start: Option<[f32; 2]>,
    /// Grid cell under the drag start, fixed at press time
    start_cell: GridPoint,
    /// Current mouse position during the drag
    drag_current: [f32; 2],
    /// Whether the pointer moved past the drag threshold
    is_dragging: bool,
}

impl PlacementTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.drag_start.is_some()
    }

    /// Rectangle to preview while dragging, as `[min, max]` canvas corners.
    pub fn drag_rect(&self) -> Option<[[f32; 2]; 2]> {
        let start = self.drag_start.filter(|_| self.is_dragging)?;
        let end = self.drag_current;
        Some([
            [start[0].min(end[0]), start[1].min(end[1])],
            [start[0].max(end[0]), start[1].max(end[1])],
        ])
    }

    fn begin(&mut self, event: &MouseEvent, ctx: &ToolContext<'_>) -> ToolResult {
        let Some(document) = ctx.document else {
            return ToolResult::None;
        };

        let [x, y] = event.position;
        if let Some(index) = document.nearest_placement(x, y, &ctx.transform, ctx.pick_radius) {
            return ToolResult::Completed(ToolAction::SelectPlacement(index));
        }

        if ctx.monster == MonsterSelection::None {
            return ToolResult::None;
        }

        self.drag_start = Some(event.position);
        self.start_cell = ctx.transform.to_logical(event.position[0], event.position[1]);
        self.drag_current = event.position;
        self.is_dragging = false;
        ToolResult::Handled
    }

    fn finish(&mut self, event: &MouseEvent, ctx: &ToolContext<'_>) -> ToolResult {
        let Some(start) = self.drag_start.take() else {
            return ToolResult::None;
        };
        self.is_dragging = false;

        let end = event.position;
        let dx = (end[0] - start[0]).abs();
        let dy = (end[1] - start[1]).abs();

        let action = if dx < ctx.drag_threshold && dy < ctx.drag_threshold {
            ToolAction::PlacePoint(ctx.transform.to_logical(end[0], end[1]))
        } else {
            ToolAction::PlaceArea {
                start: self.start_cell,
                end: ctx.transform.to_logical(end[0], end[1]),
            }
        };
        ToolResult::Completed(action)
    }
}

impl Tool for PlacementTool {
    fn on_mouse_button(&mut self, event: &MouseEvent, ctx: &ToolContext<'_>) -> ToolResult {
        match (event.button, event.pressed) {
            (Some(MouseButton::Left), true) => self.begin(event, ctx),
            (Some(MouseButton::Left), false) => self.finish(event, ctx),
            (Some(MouseButton::Right), true) if self.is_active() => {
                self.cancel();
                ToolResult::Handled
            }
            _ => ToolResult::None,
        }
    }

    fn on_mouse_move(&mut self, event: &MouseEvent, ctx: &ToolContext<'_>) -> ToolResult {
        self.drag_current = event.position;

        if let Some(start) = self.drag_start {
            let dx = (event.position[0] - start[0]).abs();
            let dy = (event.position[1] - start[1]).abs();

            if dx >= ctx.drag_threshold || dy >= ctx.drag_threshold {
                self.is_dragging = true;
            }

            ToolResult::Handled
        } else {
            ToolResult::None
        }
    }

    fn cancel(&mut self) {
        self.drag_start = None;
        self.is_dragging = false;
    }
}
