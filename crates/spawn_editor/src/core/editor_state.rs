//! Central editor state - single source of truth.
//!
//! All editor data flows through `EditorState`. The UI forwards pointer
//! events and commands here and reads markers, rows and labels back.

use std::collections::BTreeMap;

use spawn_format::{CatalogParser, GridPoint, MonsterCatalog, MonsterUpdate, SpawnPlacement};

use super::{
    Brush, DocumentStore, EditError, EditorPreferences, EditorResult, EditorSession, ExitDecision,
    MapId, PlacementRow, PlacementSpec, PlacementUpdate, SpawnDocument,
};
use crate::assets::{MapImage, MapImageResolver};
use crate::tools::{MouseEvent, PlacementTool, Tool, ToolAction, ToolContext, ToolResult};
use crate::viewport::{build_markers, Marker, ViewportState};

/// Central editor state.
pub struct EditorState {
    catalog: MonsterCatalog,
    store: DocumentStore,
    pub viewport: ViewportState,
    pub session: EditorSession,
    preferences: EditorPreferences,
    tool: PlacementTool,
    images: MapImageResolver,
    map_image: MapImage,
}

fn tool_context<'a>(
    store: &'a DocumentStore,
    session: &EditorSession,
    viewport: &ViewportState,
    preferences: &EditorPreferences,
) -> ToolContext<'a> {
    ToolContext {
        document: session.active_map.as_ref().and_then(|id| store.document(id)),
        transform: viewport.transform(),
        monster: session.monster,
        pick_radius: preferences.pick_radius,
        drag_threshold: preferences.drag_threshold,
    }
}

impl EditorState {
    /// Create the editor and load the catalog named by `preferences`. An
    /// unreadable catalog leaves the editor with an empty one.
    pub fn new(preferences: EditorPreferences) -> Self {
        let catalog = match CatalogParser::load(preferences.catalog_path()) {
            Ok(parsed) => parsed.catalog,
            Err(e) => {
                log::warn!("{}; continuing with an empty catalog", e);
                MonsterCatalog::new()
            }
        };
        Self::with_catalog(catalog, preferences)
    }

    pub fn with_catalog(catalog: MonsterCatalog, preferences: EditorPreferences) -> Self {
        let store = DocumentStore::new(preferences.spawn_path())
            .with_history_limit(preferences.history_limit);
        let brush = Brush {
            quantity: preferences.default_quantity.max(1),
            range: preferences.default_range,
            ..Default::default()
        };

        Self {
            catalog,
            store,
            viewport: ViewportState::new(preferences.canvas_width, preferences.canvas_height),
            session: EditorSession::new(brush),
            images: MapImageResolver::new(preferences.images_path()),
            preferences,
            tool: PlacementTool::new(),
            map_image: MapImage::blank(),
        }
    }

    pub fn catalog(&self) -> &MonsterCatalog {
        &self.catalog
    }

    pub fn preferences(&self) -> &EditorPreferences {
        &self.preferences
    }

    pub fn map_image(&self) -> &MapImage {
        &self.map_image
    }

    pub fn list_maps(&self) -> EditorResult<Vec<MapId>> {
        Ok(self.store.list_maps()?)
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Make `id` the active map, loading it on first access. The history of
    /// the map being left is cleared; its placements stay cached.
    pub fn open_map(&mut self, id: impl Into<MapId>) -> EditorResult<()> {
        let id = id.into();
        self.tool.cancel();

        let map_name = self.store.get(&id, &self.catalog)?.map_name().to_string();

        if let Some(previous) = self.session.activate_map(id.clone()) {
            if let Some(doc) = self.store.document_mut(&previous) {
                doc.clear_history();
            }
        }

        self.map_image = self.images.resolve(&map_name);
        self.viewport
            .set_image(self.map_image.width, self.map_image.height);
        log::info!("Opened map {}", id);
        Ok(())
    }

    pub fn active_map(&self) -> Option<&MapId> {
        self.session.active_map.as_ref()
    }

    pub fn active_document(&self) -> Option<&SpawnDocument> {
        self.active_map().and_then(|id| self.store.document(id))
    }

    fn active_document_mut(&mut self) -> Result<&mut SpawnDocument, EditError> {
        let id = self.session.active_map.as_ref().ok_or(EditError::NoActiveMap)?;
        self.store.document_mut(id).ok_or(EditError::NoActiveMap)
    }

    pub fn document(&self, id: &MapId) -> Option<&SpawnDocument> {
        self.store.document(id)
    }

    pub fn save_active(&mut self) -> EditorResult<()> {
        let id = self.active_map().cloned().ok_or(EditError::NoActiveMap)?;
        self.save(&id)
    }

    pub fn save(&mut self, id: &MapId) -> EditorResult<()> {
        Ok(self.store.save(id, &self.catalog)?)
    }

    pub fn is_dirty(&self, id: &MapId) -> bool {
        self.store.is_dirty(id)
    }

    pub fn dirty_maps(&self) -> Vec<MapId> {
        self.store.dirty_ids()
    }

    /// Drop unsaved edits of a map. An active map is reloaded from disk
    /// with an empty history.
    pub fn discard(&mut self, id: &MapId) -> bool {
        let discarded = self.store.discard(id);
        self.reload_active();
        discarded
    }

    /// Apply save-or-discard decisions before exit. Returns the maps that
    /// still have unsaved changes.
    pub fn resolve_exit(
        &mut self,
        decisions: &BTreeMap<MapId, ExitDecision>,
    ) -> EditorResult<Vec<MapId>> {
        let blocking = self.store.resolve_exit(decisions, &self.catalog)?;
        self.reload_active();
        Ok(blocking)
    }

    /// Bring the active map back into the store after it was evicted. A map
    /// that can no longer be read is closed.
    fn reload_active(&mut self) {
        let Some(id) = self.session.active_map.clone() else {
            return;
        };
        if self.store.is_loaded(&id) {
            return;
        }

        self.tool.cancel();
        self.session.clear_placement();
        match self.store.get(&id, &self.catalog) {
            Ok(_) => log::info!("Reloaded {} from disk", id),
            Err(e) => {
                log::warn!("{}; closing {}", e, id);
                self.session.active_map = None;
            }
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn select_monster(&mut self, monster_id: u32) -> Result<(), EditError> {
        let kind = self
            .catalog
            .get(monster_id)
            .map(|d| d.kind)
            .ok_or(EditError::UnknownMonster(monster_id))?;
        self.session.select_monster(monster_id, kind);
        Ok(())
    }

    pub fn select_placement(&mut self, index: usize) -> Result<(), EditError> {
        let doc = self.active_document().ok_or(EditError::NoActiveMap)?;
        if index >= doc.len() {
            return Err(EditError::PlacementNotFound(index));
        }
        self.session.select_placement(index);
        Ok(())
    }

    pub fn selected_placement(&self) -> Option<&SpawnPlacement> {
        let index = self.session.placement.index()?;
        self.active_document()?.placement(index)
    }

    // ========================================================================
    // Pointer input
    // ========================================================================

    pub fn pointer_down(&mut self, x: f32, y: f32) -> EditorResult<ToolResult> {
        let result = {
            let ctx = tool_context(&self.store, &self.session, &self.viewport, &self.preferences);
            self.tool.on_mouse_button(&MouseEvent::press(x, y), &ctx)
        };
        self.apply(result)
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> ToolResult {
        let ctx = tool_context(&self.store, &self.session, &self.viewport, &self.preferences);
        self.tool.on_mouse_move(&MouseEvent::moved(x, y), &ctx)
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> EditorResult<ToolResult> {
        let result = {
            let ctx = tool_context(&self.store, &self.session, &self.viewport, &self.preferences);
            self.tool.on_mouse_button(&MouseEvent::release(x, y), &ctx)
        };
        self.apply(result)
    }

    pub fn pointer_cancel(&mut self) {
        self.tool.cancel();
    }

    /// Canvas rectangle of the drag in progress.
    pub fn drag_preview(&self) -> Option<[[f32; 2]; 2]> {
        self.tool.drag_rect()
    }

    fn apply(&mut self, result: ToolResult) -> EditorResult<ToolResult> {
        let ToolResult::Completed(action) = result else {
            return Ok(result);
        };

        match action {
            ToolAction::SelectPlacement(index) => self.session.select_placement(index),
            ToolAction::PlacePoint(position) => {
                self.place(position, None)?;
            }
            ToolAction::PlaceArea { start, end } => {
                let monster_id = self.session.monster.id().ok_or(EditError::NoMonsterSelected)?;
                if self.catalog.kind_of(monster_id).is_npc() {
                    self.place(GridPoint::midpoint(start, end), None)?;
                } else {
                    let (min, max) = GridPoint::span(start, end);
                    self.place(min, Some(max))?;
                }
            }
        }
        Ok(result)
    }

    /// Add a placement of the selected monster with the brush settings.
    fn place(&mut self, position: GridPoint, area_end: Option<GridPoint>) -> EditorResult<usize> {
        let monster_id = self.session.monster.id().ok_or(EditError::NoMonsterSelected)?;
        let brush = self.session.brush;

        let mut spec = PlacementSpec::point(monster_id, position.x.into(), position.y.into())
            .with_range(brush.range)
            .with_direction(brush.direction)
            .with_quantity(brush.quantity);
        if let Some(end) = area_end {
            spec = spec.with_area(end.x.into(), end.y.into());
        }

        let index = self.add_placement(&spec)?;
        match area_end {
            Some(end) => log::info!("Added spawn area {} to {}", position, end),
            None => log::info!("Added spawn at {}", position),
        }
        Ok(index)
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Add a placement to the active map. The monster must be in the catalog.
    pub fn add_placement(&mut self, spec: &PlacementSpec) -> EditorResult<usize> {
        if !self.catalog.contains(spec.monster_id) {
            return Err(EditError::UnknownMonster(spec.monster_id).into());
        }
        let id = self.session.active_map.as_ref().ok_or(EditError::NoActiveMap)?;
        let doc = self.store.document_mut(id).ok_or(EditError::NoActiveMap)?;
        Ok(doc.add_placement(spec, &self.catalog)?)
    }

    pub fn update_placement(&mut self, index: usize, update: &PlacementUpdate) -> EditorResult<()> {
        if let Some(monster_id) = update.monster_id {
            if !self.catalog.contains(monster_id) {
                return Err(EditError::UnknownMonster(monster_id).into());
            }
        }
        let id = self.session.active_map.as_ref().ok_or(EditError::NoActiveMap)?;
        let doc = self.store.document_mut(id).ok_or(EditError::NoActiveMap)?;
        Ok(doc.update_placement(index, update, &self.catalog)?)
    }

    /// Remove the selected placement. `Ok(None)` when nothing is selected.
    pub fn delete_selected(&mut self) -> EditorResult<Option<SpawnPlacement>> {
        let Some(index) = self.session.placement.index() else {
            return Ok(None);
        };
        let id = self.session.active_map.as_ref().ok_or(EditError::NoActiveMap)?;
        let doc = self.store.document_mut(id).ok_or(EditError::NoActiveMap)?;
        let removed = doc.remove_placement(index, &self.catalog)?;
        self.session.clear_placement();
        Ok(Some(removed))
    }

    pub fn undo(&mut self) -> EditorResult<String> {
        let label = self.active_document_mut()?.undo()?;
        self.session.clear_placement();
        log::info!("Undo: {}", label);
        Ok(label)
    }

    pub fn redo(&mut self) -> EditorResult<String> {
        let label = self.active_document_mut()?.redo()?;
        self.session.clear_placement();
        log::info!("Redo: {}", label);
        Ok(label)
    }

    pub fn undo_label(&self) -> Option<&str> {
        self.active_document()?.history().undo_description()
    }

    pub fn redo_label(&self) -> Option<&str> {
        self.active_document()?.history().redo_description()
    }

    /// Replace a monster's name, stats and kind. A kind change reclassifies
    /// its placements in every open map. Returns the number reclassified.
    pub fn update_monster(&mut self, monster_id: u32, update: MonsterUpdate) -> EditorResult<usize> {
        let kind = update.kind;
        let previous = self
            .catalog
            .update(monster_id, update)
            .ok_or(EditError::UnknownMonster(monster_id))?;

        if self.session.monster.id() == Some(monster_id) {
            self.session.select_monster(monster_id, kind);
        }

        if previous == kind {
            return Ok(0);
        }
        Ok(self.store.reclassify(monster_id, kind))
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Markers for the active map, empty while placements are hidden.
    pub fn markers(&self) -> Vec<Marker> {
        if self.session.hide_placements {
            return Vec::new();
        }
        let Some(doc) = self.active_document() else {
            return Vec::new();
        };
        build_markers(
            doc.placements(),
            &self.viewport.transform(),
            self.session.placement,
            self.session.monster,
        )
    }

    pub fn placement_rows(&self, search: &str) -> Vec<PlacementRow> {
        self.active_document()
            .map(|doc| doc.placement_rows(&self.catalog, search))
            .unwrap_or_default()
    }

    pub fn toggle_hide_placements(&mut self) -> bool {
        self.session.toggle_hide_placements()
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.viewport.reset_zoom();
    }

    pub fn scroll_to(&mut self, x: f32, y: f32) {
        self.viewport.scroll_to(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EditorError, HistoryError, MonsterSelection, PlacementSelection};
    use spawn_format::{MapFileName, MonsterDefinition, MonsterKind, MonsterStats};
    use tempfile::TempDir;

    const NORIA: &str = "003 - Noria.txt";
    const DEVIAS: &str = "002 - Devias.txt";

    fn catalog() -> MonsterCatalog {
        let mut catalog = MonsterCatalog::new();
        catalog.insert(MonsterDefinition::new(7, "Bull Fighter", MonsterKind::Creature));
        catalog.insert(MonsterDefinition::new(100, "Lance", MonsterKind::Trap));
        catalog.insert(MonsterDefinition::new(240, "Guard", MonsterKind::Npc));
        catalog
    }

    /// Editor with two empty maps cached and Noria open on a 510x510 image
    /// at scale 1, so canvas `(px, py)` is cell `(py / 2, px / 2)`.
    fn editor(dir: &TempDir) -> EditorState {
        let preferences = EditorPreferences {
            data_root: dir.path().to_path_buf(),
            ..Default::default()
        };
        let mut state = EditorState::with_catalog(catalog(), preferences);
        for name in [NORIA, DEVIAS] {
            state
                .store
                .insert(MapId::from(name), SpawnDocument::new(MapFileName::parse(name)));
        }
        state.open_map(NORIA).unwrap();
        state.viewport.set_image(510, 510);
        state
    }

    #[test]
    fn test_click_places_single_cell() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.select_monster(7).unwrap();

        state.pointer_down(100.0, 200.0).unwrap();
        let result = state.pointer_up(100.0, 200.0).unwrap();
        assert_eq!(
            result,
            ToolResult::Completed(ToolAction::PlacePoint(GridPoint::new(100, 50)))
        );

        let doc = state.active_document().unwrap();
        assert_eq!(doc.len(), 1);
        let placement = &doc.placements()[0];
        assert_eq!(placement.position, GridPoint::new(100, 50));
        assert_eq!(placement.area_end, placement.position);
        assert_eq!(placement.map_number, 3);
        assert_eq!(placement.range, 30);
        assert!(doc.is_dirty());
        assert_eq!(state.undo_label(), Some("Add Bull Fighter"));
    }

    #[test]
    fn test_drag_places_area() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.select_monster(7).unwrap();

        state.pointer_down(60.0, 100.0).unwrap();
        state.pointer_move(20.0, 40.0);
        assert_eq!(state.drag_preview(), Some([[20.0, 40.0], [60.0, 100.0]]));
        state.pointer_up(20.0, 40.0).unwrap();

        let placement = &state.active_document().unwrap().placements()[0];
        assert_eq!(placement.position, GridPoint::new(20, 10));
        assert_eq!(placement.area_end, GridPoint::new(50, 30));
        assert!(state.drag_preview().is_none());
    }

    #[test]
    fn test_npc_drag_places_center_cell() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.session.brush.quantity = 5;
        state.select_monster(240).unwrap();
        assert_eq!(state.session.brush.quantity, 1);

        state.pointer_down(20.0, 40.0).unwrap();
        state.pointer_move(60.0, 100.0);
        state.pointer_up(60.0, 100.0).unwrap();

        let placement = &state.active_document().unwrap().placements()[0];
        assert_eq!(placement.position, GridPoint::new(35, 20));
        assert_eq!(placement.area_end, GridPoint::new(35, 20));
        assert_eq!(placement.quantity, 1);
    }

    #[test]
    fn test_press_near_placement_selects_it() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.select_monster(7).unwrap();
        state.pointer_down(100.0, 200.0).unwrap();
        state.pointer_up(100.0, 200.0).unwrap();

        state.pointer_down(103.0, 198.0).unwrap();
        assert_eq!(state.session.placement, PlacementSelection::Placement(0));
        assert_eq!(state.selected_placement().map(|p| p.monster_id), Some(7));
        assert_eq!(state.active_document().unwrap().len(), 1);
    }

    #[test]
    fn test_gesture_without_monster_does_nothing() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);

        assert_eq!(state.pointer_down(100.0, 100.0).unwrap(), ToolResult::None);
        assert_eq!(state.pointer_up(100.0, 100.0).unwrap(), ToolResult::None);
        assert!(state.active_document().unwrap().is_empty());
    }

    #[test]
    fn test_selection_errors() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);

        assert_eq!(state.select_monster(999), Err(EditError::UnknownMonster(999)));
        assert_eq!(state.session.monster, MonsterSelection::None);
        assert_eq!(state.select_placement(0), Err(EditError::PlacementNotFound(0)));

        let mut closed = EditorState::with_catalog(catalog(), EditorPreferences::default());
        assert_eq!(closed.select_placement(0), Err(EditError::NoActiveMap));
        assert!(matches!(
            closed.add_placement(&PlacementSpec::point(7, 1, 1)),
            Err(EditorError::Edit(EditError::NoActiveMap))
        ));
        assert!(matches!(
            closed.undo(),
            Err(EditorError::Edit(EditError::NoActiveMap))
        ));
        assert!(closed.markers().is_empty());
        assert!(closed.placement_rows("").is_empty());
    }

    #[test]
    fn test_add_rejects_unknown_monster() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);

        let result = state.add_placement(&PlacementSpec::point(999, 1, 1));
        assert!(matches!(
            result,
            Err(EditorError::Edit(EditError::UnknownMonster(999)))
        ));
        assert!(state.active_document().unwrap().is_empty());
    }

    #[test]
    fn test_delete_selected_and_undo() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.add_placement(&PlacementSpec::point(7, 10, 10)).unwrap();
        state.add_placement(&PlacementSpec::point(100, 20, 20)).unwrap();

        assert_eq!(state.delete_selected().unwrap(), None);

        state.select_placement(0).unwrap();
        let removed = state.delete_selected().unwrap().unwrap();
        assert_eq!(removed.monster_id, 7);
        assert_eq!(state.session.placement, PlacementSelection::None);
        assert_eq!(state.active_document().unwrap().len(), 1);

        assert_eq!(state.undo().unwrap(), "Remove Bull Fighter");
        assert_eq!(state.active_document().unwrap().len(), 2);
        assert_eq!(state.redo_label(), Some("Remove Bull Fighter"));
        assert_eq!(state.redo().unwrap(), "Remove Bull Fighter");
        assert_eq!(state.active_document().unwrap().len(), 1);
    }

    #[test]
    fn test_switching_maps_clears_history_of_left_map() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.add_placement(&PlacementSpec::point(7, 10, 10)).unwrap();
        assert!(state.undo_label().is_some());

        state.open_map(DEVIAS).unwrap();
        assert_eq!(state.active_map(), Some(&MapId::from(DEVIAS)));

        state.open_map(NORIA).unwrap();
        assert_eq!(state.active_document().unwrap().len(), 1);
        assert!(state.undo_label().is_none());
        assert!(matches!(
            state.undo(),
            Err(EditorError::History(HistoryError::NothingToUndo))
        ));
        assert!(state.is_dirty(&MapId::from(NORIA)));
    }

    #[test]
    fn test_update_monster_reclassifies_every_open_map() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.add_placement(&PlacementSpec::point(7, 10, 10)).unwrap();
        state.open_map(DEVIAS).unwrap();
        state
            .add_placement(&PlacementSpec::point(7, 30, 30).with_area(40, 40).with_quantity(4))
            .unwrap();
        state.select_monster(7).unwrap();
        state.session.brush.quantity = 3;

        let update = MonsterUpdate {
            display_name: "Bull Keeper".to_string(),
            kind: MonsterKind::Npc,
            stats: MonsterStats::default(),
        };
        assert_eq!(state.update_monster(7, update.clone()).unwrap(), 2);
        assert_eq!(state.catalog().name_of(7), "Bull Keeper");
        assert_eq!(state.session.brush.quantity, 1);

        let devias = state.active_document().unwrap();
        assert_eq!(devias.placements()[0].kind, MonsterKind::Npc);
        assert_eq!(devias.placements()[0].area_end, GridPoint::new(30, 30));
        let noria = state.document(&MapId::from(NORIA)).unwrap();
        assert_eq!(noria.placements()[0].kind, MonsterKind::Npc);

        assert_eq!(state.update_monster(7, update).unwrap(), 0);
        assert!(matches!(
            state.update_monster(
                999,
                MonsterUpdate {
                    display_name: String::new(),
                    kind: MonsterKind::Creature,
                    stats: MonsterStats::default(),
                }
            ),
            Err(EditorError::Edit(EditError::UnknownMonster(999)))
        ));
    }

    #[test]
    fn test_markers_follow_hide_toggle() {
        let dir = TempDir::new().unwrap();
        let mut state = editor(&dir);
        state.add_placement(&PlacementSpec::point(7, 100, 50)).unwrap();

        let markers = state.markers();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].center, [100.0, 200.0]);

        assert!(state.toggle_hide_placements());
        assert!(state.markers().is_empty());
        assert!(!state.toggle_hide_placements());

        state.zoom_in();
        assert!((state.viewport.scale - 1.2).abs() < 1e-6);
        state.reset_zoom();
        state.scroll_to(0.5, 2.0);
        assert_eq!(state.viewport.scroll, [0.5, 1.0]);
    }
}
