//! Map image assets.

mod map_images;

pub use map_images::{MapImage, MapImageResolver, BLANK_HEIGHT, BLANK_WIDTH};
