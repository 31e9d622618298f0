//! Map canvas geometry and marker layout.

mod overlay;
mod transform;
mod viewport_state;

pub use overlay::{build_markers, Marker, MARKER_RADIUS, SELECTED_MARKER_RADIUS};
pub use transform::CanvasTransform;
pub use viewport_state::{ViewportState, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};
