use super::{ColumnDefinition, ColumnPreferences};
use crate::drag::{reorder_by_id, DragHandler, DragSession, ItemGeometry};
use crate::storage::PreferenceStore;
use std::collections::HashSet;

/// Storage key for the holdings table column preferences.
pub const COLUMN_PREFERENCES_KEY: &str = "holdings-table-columns";

/// Column order and visibility for a table, with pinned leading columns.
pub struct ColumnLayout {
    definitions: Vec<ColumnDefinition>,
    prefs: ColumnPreferences,
    store: Option<PreferenceStore<ColumnPreferences>>,
    drag: DragSession,
}

impl ColumnLayout {
    /// Build the layout from stored preferences, falling back to the
    /// definitions' defaults.
    pub fn new(
        definitions: Vec<ColumnDefinition>,
        store: Option<PreferenceStore<ColumnPreferences>>,
    ) -> Self {
        let defaults = ColumnPreferences::defaults(&definitions);
        let mut prefs = match &store {
            Some(store) => store.load(defaults),
            None => defaults,
        };
        prefs.reconcile(&definitions);
        Self {
            definitions,
            prefs,
            store,
            drag: DragSession::default(),
        }
    }

    pub fn with_drop_zone_ratio(mut self, ratio: f32) -> Self {
        self.drag = DragSession::new(ratio);
        self
    }

    pub fn preferences(&self) -> &ColumnPreferences {
        &self.prefs
    }

    pub fn definition(&self, id: &str) -> Option<&ColumnDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn is_pinned(&self, id: &str) -> bool {
        self.definition(id).is_some_and(|d| d.always_visible)
    }

    /// Pinned columns always report visible, whatever is stored.
    pub fn is_visible(&self, id: &str) -> bool {
        match self.definition(id) {
            Some(def) if def.always_visible => true,
            Some(def) => self
                .prefs
                .visibility
                .get(id)
                .copied()
                .unwrap_or(def.default_visible),
            None => false,
        }
    }

    pub fn ordered_columns(&self) -> Vec<&ColumnDefinition> {
        self.prefs
            .order
            .iter()
            .filter_map(|id| self.definition(id))
            .collect()
    }

    pub fn visible_columns(&self) -> Vec<&ColumnDefinition> {
        self.ordered_columns()
            .into_iter()
            .filter(|d| self.is_visible(&d.id))
            .collect()
    }

    /// Ids that take part in drag reordering, in display order.
    pub fn movable_ids(&self) -> Vec<&str> {
        self.prefs
            .order
            .iter()
            .map(String::as_str)
            .filter(|id| !self.is_pinned(id))
            .collect()
    }

    /// Flip a column's visibility. Pinned and unknown columns are refused.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        let default_visible = match self.definition(id) {
            Some(def) if !def.always_visible => def.default_visible,
            _ => return false,
        };
        let entry = self
            .prefs
            .visibility
            .entry(id.to_string())
            .or_insert(default_visible);
        *entry = !*entry;
        self.persist();
        true
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    /// Begin dragging `id`; pinned and unknown columns cannot be lifted.
    pub fn drag_start(&mut self, id: &str) -> bool {
        if self.definition(id).is_none() || self.is_pinned(id) {
            return false;
        }
        self.drag.start(id);
        true
    }

    pub fn drag_over(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        pointer_x: f32,
        geometry: &dyn ItemGeometry,
    ) {
        let over_id = over_id.filter(|id| !self.is_pinned(id));
        let bounds = over_id.and_then(|id| geometry.bounds_of(id));
        self.drag.over(active_id, over_id, pointer_x, bounds);
    }

    /// Finish a drag, moving `active_id` to `over_id`'s slot among the movable columns.
    pub fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> bool {
        self.drag.end();
        let pinned: HashSet<String> = self
            .definitions
            .iter()
            .filter(|d| d.always_visible)
            .map(|d| d.id.clone())
            .collect();
        if pinned.contains(active_id) || over_id.is_some_and(|id| pinned.contains(id)) {
            return false;
        }
        let moved = reorder_by_id(
            &mut self.prefs.order,
            active_id,
            over_id,
            |id| id.as_str(),
            |id| pinned.contains(id),
        );
        if moved {
            self.prefs.splice_pinned(&self.definitions);
            self.persist();
        }
        moved
    }

    /// Back to definition defaults, dropping the stored preferences.
    pub fn reset_to_defaults(&mut self) {
        self.prefs = ColumnPreferences::defaults(&self.definitions);
        self.drag.end();
        if let Some(store) = &self.store {
            store.clear();
        }
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            store.persist(&self.prefs);
        }
    }
}

impl DragHandler for ColumnLayout {
    fn lifted(&self) -> Option<&str> {
        self.drag.lifted()
    }

    fn on_drag_start(&mut self, active_id: &str) {
        self.drag_start(active_id);
    }

    fn on_drag_over(
        &mut self,
        active_id: &str,
        over_id: Option<&str>,
        pointer_x: f32,
        geometry: &dyn ItemGeometry,
    ) {
        self.drag_over(active_id, over_id, pointer_x, geometry);
    }

    fn on_drag_end(&mut self, active_id: &str, over_id: Option<&str>) {
        self.drag_end(active_id, over_id);
    }
}
