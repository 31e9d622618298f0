//! Spawn file naming: `"<map number> - <Map Name>.txt"`.

use std::path::Path;

const NAME_SEPARATOR: &str = " - ";
const SPAWN_EXTENSION: &str = "txt";
const EVENT_PREFIX: &str = "Event";

/// Parsed spawn file name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MapFileName {
    pub file_name: String,
    /// Numeric prefix, 0 when it does not parse.
    pub map_number: u16,
    /// Text after the separator without extension; the whole stem when there
    /// is no separator.
    pub map_name: String,
}

impl MapFileName {
    pub fn parse(file_name: &str) -> Self {
        let stem = file_name
            .strip_suffix(".txt")
            .or_else(|| file_name.strip_suffix(".TXT"))
            .unwrap_or(file_name);

        let (map_number, map_name) = match stem.split_once(NAME_SEPARATOR) {
            Some((number, name)) => (number.trim().parse().unwrap_or(0), name.to_string()),
            None => (0, stem.to_string()),
        };

        Self {
            file_name: file_name.to_string(),
            map_number,
            map_name,
        }
    }
}

/// Spawn file names in `dir`, sorted. Event files are left out.
pub fn list_maps(dir: impl AsRef<Path>) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in std::fs::read_dir(dir.as_ref())? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let is_txt = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(SPAWN_EXTENSION))
            .unwrap_or(false);
        if !is_txt {
            continue;
        }
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if !name.starts_with(EVENT_PREFIX) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}
