//! Editor tools for user interaction.
//!
//! Tools turn pointer input on the map canvas into selections and
//! placement requests. They only read editor state; the caller applies the
//! returned action.

mod tool;
mod placement_tool;

pub use tool::{Tool, ToolAction, ToolContext, ToolResult, MouseEvent, MouseButton};
pub use placement_tool::PlacementTool;
