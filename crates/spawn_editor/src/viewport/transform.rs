//! Conversion between canvas pixels and the logical map grid.
//!
//! The logical X axis runs along the image height and the logical Y axis
//! along the image width, so a map point `(lx, ly)` sits at image pixel
//! `(ly / 255 * W, lx / 255 * H)`.

use spawn_format::GridPoint;

const GRID_SPAN: f32 = 255.0;

/// Affine map between canvas pixels and grid cells for one viewport state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransform {
    pub image_width: f32,
    pub image_height: f32,
    pub scale: f32,
    /// Horizontal scroll as a fraction of the image width
    pub scroll_x: f32,
    /// Vertical scroll as a fraction of the image height
    pub scroll_y: f32,
}

impl CanvasTransform {
    pub fn new(image_width: u32, image_height: u32, scale: f32) -> Self {
        Self {
            image_width: image_width as f32,
            image_height: image_height as f32,
            scale,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f32, scroll_y: f32) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    fn is_degenerate(&self) -> bool {
        self.image_width <= 0.0 || self.image_height <= 0.0 || self.scale <= 0.0
    }

    /// Canvas pixel to grid cell, rounded and clamped to the grid.
    pub fn to_logical(&self, px: f32, py: f32) -> GridPoint {
        if self.is_degenerate() {
            return GridPoint::new(0, 0);
        }

        let raw_x = px / self.scale + self.scroll_x * self.image_width;
        let raw_y = py / self.scale + self.scroll_y * self.image_height;

        let to_cell = |raw: f32, extent: f32| {
            (raw * GRID_SPAN / extent).round().clamp(0.0, GRID_SPAN) as u8
        };
        GridPoint::new(
            to_cell(raw_y, self.image_height),
            to_cell(raw_x, self.image_width),
        )
    }

    /// Grid cell to canvas pixel.
    pub fn to_pixel(&self, point: GridPoint) -> [f32; 2] {
        if self.is_degenerate() {
            return [0.0, 0.0];
        }

        let raw_x = point.y as f32 * self.image_width / GRID_SPAN;
        let raw_y = point.x as f32 * self.image_height / GRID_SPAN;

        [
            (raw_x - self.scroll_x * self.image_width) * self.scale,
            (raw_y - self.scroll_y * self.image_height) * self.scale,
        ]
    }

    /// Largest scale, capped at 1, at which the whole image fits the canvas.
    pub fn fit_scale(canvas_width: u32, canvas_height: u32, image_width: u32, image_height: u32) -> f32 {
        if image_width == 0 || image_height == 0 {
            return 1.0;
        }
        let sx = canvas_width as f32 / image_width as f32;
        let sy = canvas_height as f32 / image_height as f32;
        sx.min(sy).min(1.0)
    }
}
