//! Viewport state and configuration.

use super::CanvasTransform;

/// Zoom factor applied per zoom step.
pub const ZOOM_STEP: f32 = 1.2;
pub const MIN_ZOOM: f32 = 0.1;
pub const MAX_ZOOM: f32 = 5.0;

/// Map canvas state.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportState {
    // Map image size in pixels
    pub image_width: u32,
    pub image_height: u32,

    // Visible canvas size
    pub width: u32,
    pub height: u32,

    pub scale: f32,
    /// Scroll offset as fractions of the image size
    pub scroll: [f32; 2],
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

impl ViewportState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image_width: width,
            image_height: height,
            width,
            height,
            scale: 1.0,
            scroll: [0.0, 0.0],
        }
    }

    /// Update canvas size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Show a new map image, fitted to the canvas with the scroll reset.
    pub fn set_image(&mut self, image_width: u32, image_height: u32) {
        self.image_width = image_width;
        self.image_height = image_height;
        self.scale = CanvasTransform::fit_scale(self.width, self.height, image_width, image_height);
        self.scroll = [0.0, 0.0];
    }

    pub fn zoom_in(&mut self) {
        self.set_zoom(self.scale * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.set_zoom(self.scale / ZOOM_STEP);
    }

    pub fn reset_zoom(&mut self) {
        self.set_zoom(1.0);
    }

    pub fn set_zoom(&mut self, scale: f32) {
        self.scale = scale.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Scroll to the given fractions of the image size.
    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.scroll = [x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)];
    }

    /// Displayed image size in pixels at the current scale.
    pub fn scaled_image_size(&self) -> [f32; 2] {
        [
            self.image_width as f32 * self.scale,
            self.image_height as f32 * self.scale,
        ]
    }

    /// Transform for the current state. Recompute after every change.
    pub fn transform(&self) -> CanvasTransform {
        CanvasTransform::new(self.image_width, self.image_height, self.scale)
            .with_scroll(self.scroll[0], self.scroll[1])
    }
}
