//! In-memory cache of open spawn documents.
//!
//! Documents stay cached after the active map changes, so unsaved edits on
//! one map survive switching to another. Nothing reaches disk until an
//! explicit save.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use spawn_format::{list_maps, MapFileName, MonsterCatalog, MonsterKind, SpawnCodec};

use super::{SpawnDocument, StoreError};

/// Identifier of a map: its spawn file name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MapId(pub String);

impl MapId {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self(file_name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MapId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MapId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What to do with a modified document on exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitDecision {
    Save,
    Discard,
}

/// Cache of spawn documents keyed by map id.
#[derive(Debug)]
pub struct DocumentStore {
    spawn_dir: PathBuf,
    documents: BTreeMap<MapId, SpawnDocument>,
    history_limit: usize,
}

impl DocumentStore {
    pub fn new(spawn_dir: impl Into<PathBuf>) -> Self {
        Self {
            spawn_dir: spawn_dir.into(),
            documents: BTreeMap::new(),
            history_limit: super::UndoHistory::DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn spawn_dir(&self) -> &Path {
        &self.spawn_dir
    }

    pub fn path_of(&self, id: &MapId) -> PathBuf {
        self.spawn_dir.join(id.as_str())
    }

    /// Spawn files available on disk.
    pub fn list_maps(&self) -> Result<Vec<MapId>, StoreError> {
        Ok(list_maps(&self.spawn_dir)?.into_iter().map(MapId).collect())
    }

    pub fn is_loaded(&self, id: &MapId) -> bool {
        self.documents.contains_key(id)
    }

    /// The cached document, decoding it from disk on first access.
    pub fn get(
        &mut self,
        id: &MapId,
        catalog: &MonsterCatalog,
    ) -> Result<&mut SpawnDocument, StoreError> {
        if !self.documents.contains_key(id) {
            let document = self.load(id, catalog)?;
            self.documents.insert(id.clone(), document);
        }
        self.documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotLoaded(id.clone()))
    }

    fn load(&self, id: &MapId, catalog: &MonsterCatalog) -> Result<SpawnDocument, StoreError> {
        let file = MapFileName::parse(id.as_str());
        let decoded = SpawnCodec::load(self.path_of(id), catalog, Some(file.map_number))?;
        if decoded.skipped_lines() > 0 {
            log::warn!("{}: skipped {} malformed lines", id, decoded.skipped_lines());
        }
        Ok(SpawnDocument::from_placements(file, decoded.placements)
            .with_history_limit(self.history_limit))
    }

    /// Cache a document that has no file yet. Replaces any cached one.
    pub fn insert(&mut self, id: MapId, document: SpawnDocument) {
        self.documents.insert(id, document);
    }

    pub fn document(&self, id: &MapId) -> Option<&SpawnDocument> {
        self.documents.get(id)
    }

    pub fn document_mut(&mut self, id: &MapId) -> Option<&mut SpawnDocument> {
        self.documents.get_mut(id)
    }

    /// Encode and write one document, clearing only its dirty flag.
    pub fn save(&mut self, id: &MapId, catalog: &MonsterCatalog) -> Result<(), StoreError> {
        let path = self.path_of(id);
        let document = self
            .documents
            .get_mut(id)
            .ok_or_else(|| StoreError::NotLoaded(id.clone()))?;

        SpawnCodec::save(&path, document.placements(), catalog)?;
        document.mark_saved();
        Ok(())
    }

    pub fn mark_dirty(&mut self, id: &MapId) -> Result<(), StoreError> {
        self.documents
            .get_mut(id)
            .map(SpawnDocument::mark_dirty)
            .ok_or_else(|| StoreError::NotLoaded(id.clone()))
    }

    pub fn is_dirty(&self, id: &MapId) -> bool {
        self.documents.get(id).map_or(false, SpawnDocument::is_dirty)
    }

    /// Ids of documents with unsaved changes, sorted.
    pub fn dirty_ids(&self) -> Vec<MapId> {
        self.documents
            .iter()
            .filter(|(_, doc)| doc.is_dirty())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Drop a cached document and its unsaved edits.
    pub fn discard(&mut self, id: &MapId) -> bool {
        let removed = self.documents.remove(id);
        if let Some(doc) = &removed {
            if doc.is_dirty() {
                log::info!("Discarded unsaved changes to {}", id);
            }
        }
        removed.is_some()
    }

    /// Apply a catalog kind change to every cached document.
    pub fn reclassify(&mut self, monster_id: u32, kind: MonsterKind) -> usize {
        self.documents
            .values_mut()
            .map(|doc| doc.reclassify(monster_id, kind))
            .sum()
    }

    /// Save or discard each modified document per `decisions`. Returns the
    /// ids that are still modified and therefore block exit.
    pub fn resolve_exit(
        &mut self,
        decisions: &BTreeMap<MapId, ExitDecision>,
        catalog: &MonsterCatalog,
    ) -> Result<Vec<MapId>, StoreError> {
        for id in self.dirty_ids() {
            match decisions.get(&id) {
                Some(ExitDecision::Save) => self.save(&id, catalog)?,
                Some(ExitDecision::Discard) => {
                    self.discard(&id);
                }
                None => {}
            }
        }
        Ok(self.dirty_ids())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlacementSpec;
    use spawn_format::MonsterDefinition;
    use tempfile::TempDir;

    fn catalog() -> MonsterCatalog {
        let mut catalog = MonsterCatalog::new();
        catalog.insert(MonsterDefinition::new(7, "Bull Fighter", MonsterKind::Creature));
        catalog
    }

    fn store_with_maps() -> (TempDir, DocumentStore) {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("000 - Lorencia.txt"),
            "1\n7 0 10 20 20 30 30 -1 2\nend\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("003 - Noria.txt"), "1\nend\n").unwrap();
        let store = DocumentStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_get_caches_edits_across_switches() {
        let (_dir, mut store) = store_with_maps();
        let catalog = catalog();
        let lorencia = MapId::from("000 - Lorencia.txt");
        let noria = MapId::from("003 - Noria.txt");

        let doc = store.get(&lorencia, &catalog).unwrap();
        assert_eq!(doc.len(), 1);
        doc.add_placement(&PlacementSpec::point(7, 1, 1), &catalog).unwrap();

        store.get(&noria, &catalog).unwrap();
        assert_eq!(store.get(&lorencia, &catalog).unwrap().len(), 2);
        assert_eq!(store.dirty_ids(), vec![lorencia.clone()]);
        assert!(!store.is_dirty(&noria));
    }

    #[test]
    fn test_save_clears_only_that_flag() {
        let (dir, mut store) = store_with_maps();
        let catalog = catalog();
        let lorencia = MapId::from("000 - Lorencia.txt");
        let noria = MapId::from("003 - Noria.txt");

        store.get(&lorencia, &catalog).unwrap();
        store.get(&noria, &catalog).unwrap();
        store.mark_dirty(&lorencia).unwrap();
        store.mark_dirty(&noria).unwrap();

        store.save(&noria, &catalog).unwrap();
        assert_eq!(store.dirty_ids(), vec![lorencia]);

        let written = std::fs::read_to_string(dir.path().join("003 - Noria.txt")).unwrap();
        assert!(written.contains("// MONSTERS"));
    }

    #[test]
    fn test_missing_documents() {
        let (_dir, mut store) = store_with_maps();
        let catalog = catalog();
        let ghost = MapId::from("099 - Ghost.txt");

        assert!(matches!(store.save(&ghost, &catalog), Err(StoreError::NotLoaded(_))));
        assert!(matches!(store.mark_dirty(&ghost), Err(StoreError::NotLoaded(_))));
        assert!(matches!(store.get(&ghost, &catalog), Err(StoreError::Format(_))));
        assert!(!store.is_loaded(&ghost));
    }

    #[test]
    fn test_resolve_exit() {
        let (_dir, mut store) = store_with_maps();
        let catalog = catalog();
        let lorencia = MapId::from("000 - Lorencia.txt");
        let noria = MapId::from("003 - Noria.txt");

        store.get(&lorencia, &catalog).unwrap();
        store.get(&noria, &catalog).unwrap();
        store.mark_dirty(&lorencia).unwrap();
        store.mark_dirty(&noria).unwrap();

        let mut decisions = BTreeMap::new();
        decisions.insert(lorencia.clone(), ExitDecision::Discard);
        let blocking = store.resolve_exit(&decisions, &catalog).unwrap();
        assert_eq!(blocking, vec![noria.clone()]);
        assert!(!store.is_loaded(&lorencia));

        decisions.insert(noria.clone(), ExitDecision::Save);
        assert!(store.resolve_exit(&decisions, &catalog).unwrap().is_empty());
    }

    #[test]
    fn test_list_maps() {
        let (_dir, store) = store_with_maps();
        assert_eq!(
            store.list_maps().unwrap(),
            vec![MapId::from("000 - Lorencia.txt"), MapId::from("003 - Noria.txt")]
        );
    }
}
