//! Map background image lookup.
//!
//! Images live in one directory and are matched to maps by name. When no
//! image is found the editor shows a blank canvas of the default size.

use std::path::{Path, PathBuf};

/// Maps whose image names do not follow the usual pattern.
const NAME_EXCEPTIONS: &[(&str, &str)] = &[
    ("Kanturu 1", "Kanturu_Ruins.png"),
    ("Kanturu 2", "Kanturu_Relics.png"),
];

pub const BLANK_WIDTH: u32 = 800;
pub const BLANK_HEIGHT: u32 = 600;

/// Background for one map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapImage {
    /// `None` for the blank canvas
    pub path: Option<PathBuf>,
    pub width: u32,
    pub height: u32,
}

impl MapImage {
    pub fn blank() -> Self {
        Self {
            path: None,
            width: BLANK_WIDTH,
            height: BLANK_HEIGHT,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.path.is_none()
    }
}

/// Finds the image file for a map name.
#[derive(Clone, Debug)]
pub struct MapImageResolver {
    images_dir: PathBuf,
}

impl MapImageResolver {
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    /// Candidate file names in lookup order.
    pub fn candidates(map_name: &str) -> Vec<String> {
        let raw = map_name.trim().to_string();
        let base = raw.replace(' ', "_");

        let mut names: Vec<String> = NAME_EXCEPTIONS
            .iter()
            .filter(|(name, _)| *name == map_name)
            .map(|(_, file)| file.to_string())
            .collect();

        for stem in [&base, &raw] {
            names.push(format!("{}.png", stem));
            names.push(format!("{}.png", stem.to_lowercase()));
            names.push(format!("{}.png", stem.to_uppercase()));
        }
        names
    }

    /// First existing image for `map_name`, falling back to any `.png`
    /// whose name contains the underscored map name.
    pub fn find(&self, map_name: &str) -> Option<PathBuf> {
        let direct = Self::candidates(map_name)
            .into_iter()
            .map(|name| self.images_dir.join(name))
            .find(|path| path.is_file());
        if direct.is_some() {
            return direct;
        }

        let needle = map_name.trim().replace(' ', "_").to_lowercase();
        let entries = match std::fs::read_dir(&self.images_dir) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("Cannot scan {:?}: {}", self.images_dir, e);
                return None;
            }
        };

        let mut matches: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| {
                        let lower = n.to_lowercase();
                        lower.ends_with(".png") && lower.contains(&needle)
                    })
                    .unwrap_or(false)
            })
            .collect();
        matches.sort();
        matches.into_iter().next()
    }

    /// Image path and size for `map_name`, or the blank canvas.
    pub fn resolve(&self, map_name: &str) -> MapImage {
        let Some(path) = self.find(map_name) else {
            log::warn!(
                "No image found for map '{}', expected {:?}",
                map_name,
                self.images_dir.join(format!("{}.png", map_name.trim().replace(' ', "_")))
            );
            return MapImage::blank();
        };

        match image::image_dimensions(&path) {
            Ok((width, height)) => {
                log::info!("Map image {:?} ({}x{})", path, width, height);
                MapImage {
                    path: Some(path),
                    width,
                    height,
                }
            }
            Err(e) => {
                log::warn!("Failed to read map image {:?}: {}", path, e);
                MapImage::blank()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_candidate_order() {
        assert_eq!(
            MapImageResolver::candidates("Devil Square"),
            vec![
                "Devil_Square.png",
                "devil_square.png",
                "DEVIL_SQUARE.png",
                "Devil Square.png",
                "devil square.png",
                "DEVIL SQUARE.png",
            ]
        );
        assert_eq!(MapImageResolver::candidates("Kanturu 1")[0], "Kanturu_Ruins.png");
    }

    #[test]
    fn test_resolve_reads_dimensions() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("Lorencia.png"), 32, 16);

        let image = MapImageResolver::new(dir.path()).resolve("Lorencia");
        assert_eq!(image.width, 32);
        assert_eq!(image.height, 16);
        assert!(!image.is_blank());
    }

    #[test]
    fn test_scan_fallback() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("map_lost_tower_v2.png"), 4, 4);

        let found = MapImageResolver::new(dir.path()).find("Lost Tower");
        assert_eq!(found, Some(dir.path().join("map_lost_tower_v2.png")));
    }

    #[test]
    fn test_missing_image_is_blank_canvas() {
        let dir = TempDir::new().unwrap();
        let image = MapImageResolver::new(dir.path()).resolve("Atlans");
        assert_eq!(image, MapImage::blank());
        assert_eq!((image.width, image.height), (800, 600));

        let nowhere = MapImageResolver::new(dir.path().join("missing"));
        assert!(nowhere.resolve("Atlans").is_blank());
    }
}
