//! Editor preferences and settings.
//!
//! Persistent settings that survive editor restarts. Stored as TOML:
//!
//! ```toml
//! data_root = "/srv/muserver/Data"
//! catalog_file = "Monster/Monster.txt"
//! spawn_dir = "MonsterSetBase"
//! images_dir = "Images"
//! default_range = 30
//! history_limit = 20
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::PreferencesError;

/// Environment variable overriding `data_root`.
pub const ROOT_ENV_VAR: &str = "SPAWN_EDITOR_ROOT";

/// Editor preferences and settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    // Data locations, relative paths resolve against `data_root`
    pub data_root: PathBuf,
    pub catalog_file: PathBuf,
    pub spawn_dir: PathBuf,
    pub images_dir: PathBuf,

    // Canvas
    pub canvas_width: u32,
    pub canvas_height: u32,

    // Brush defaults
    pub default_range: u32,
    pub default_quantity: u32,

    // Editing
    pub history_limit: usize,
    pub pick_radius: f32,
    pub drag_threshold: f32,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("."),
            catalog_file: PathBuf::from("Monster/Monster.txt"),
            spawn_dir: PathBuf::from("MonsterSetBase"),
            images_dir: PathBuf::from("Images"),

            canvas_width: 800,
            canvas_height: 600,

            default_range: 30,
            default_quantity: 1,

            history_limit: 20,
            pick_radius: 8.0,
            drag_threshold: 5.0,
        }
    }
}

impl EditorPreferences {
    /// Load preferences from a file.
    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let content = std::fs::read_to_string(path)?;
        let prefs = toml::from_str(&content)?;
        log::info!("Loaded preferences from {:?}", path);
        Ok(prefs)
    }

    /// Load from `path` or the default location. A missing file yields the
    /// defaults. `SPAWN_EDITOR_ROOT` is applied last.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PreferencesError> {
        let path = path.map(Path::to_path_buf).or_else(Self::default_path);

        let mut prefs = match path {
            Some(path) if path.exists() => Self::load(&path)?,
            Some(path) => {
                log::debug!("No preferences at {:?}, using defaults", path);
                Self::default()
            }
            None => Self::default(),
        };

        if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
            prefs.data_root = PathBuf::from(root);
            log::info!("Data root from env: {:?}", prefs.data_root);
        }

        Ok(prefs)
    }

    /// Save preferences to a file.
    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Saved preferences to {:?}", path);
        Ok(())
    }

    /// Get the default preferences path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("spawn_editor");
            p.push("preferences.toml");
            p
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.data_root.join(&self.catalog_file)
    }

    pub fn spawn_path(&self) -> PathBuf {
        self.data_root.join(&self.spawn_dir)
    }

    pub fn images_path(&self) -> PathBuf {
        self.data_root.join(&self.images_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("preferences.toml");

        let prefs = EditorPreferences {
            data_root: PathBuf::from("/data"),
            default_range: 12,
            ..Default::default()
        };
        prefs.save(&path).unwrap();

        let loaded = EditorPreferences::load(&path).unwrap();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "history_limit = 5\n").unwrap();

        let loaded = EditorPreferences::load(&path).unwrap();
        assert_eq!(loaded.history_limit, 5);
        assert_eq!(loaded.default_range, 30);
        assert_eq!(loaded.catalog_path(), PathBuf::from("./Monster/Monster.txt"));
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.toml");
        std::fs::write(&path, "history_limit = \"many\"\n").unwrap();

        assert!(matches!(
            EditorPreferences::load(&path),
            Err(PreferencesError::Parse(_))
        ));
    }
}
