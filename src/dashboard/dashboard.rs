use crate::dashboard::layout::{calculate_layout, rows, LayoutConfig, WidgetPlacement, WidgetWidth};
use crate::dashboard::widgets::{Widget, WidgetAction, WidgetRegistry};
use crate::drag::{array_move, DragHandler, DragSession, ItemGeometry};
use crate::holdings::Holding;
use crate::storage::PreferenceStore;
use eframe::egui;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Storage key for the home dashboard widget list.
pub const DASHBOARD_PREFERENCES_KEY: &str = "home-dashboard-widgets";

/// Notifications for the page hosting the dashboard.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardEvent {
    WidgetsChanged(Vec<String>),
    WidgetRemoved(String),
}

pub type DashboardCallback = Arc<dyn Fn(DashboardEvent) + Send + Sync>;

/// Context shared with widgets at render time.
pub struct DashboardContext<'a> {
    pub holdings: &'a [Holding],
    pub today: chrono::NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredWidget {
    pub id: String,
    #[serde(default)]
    pub width: WidgetWidth,
}

/// Persisted dashboard widget list, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardPreferences {
    #[serde(default)]
    pub widgets: Vec<StoredWidget>,
}

pub struct Dashboard {
    registry: WidgetRegistry,
    layout: LayoutConfig,
    placements: Vec<WidgetPlacement>,
    runtime: HashMap<String, Box<dyn Widget>>,
    drag: DragSession,
    store: Option<PreferenceStore<DashboardPreferences>>,
    event_cb: Option<DashboardCallback>,
}

impl Dashboard {
    pub fn new(
        registry: WidgetRegistry,
        layout: LayoutConfig,
        store: Option<PreferenceStore<DashboardPreferences>>,
        event_cb: Option<DashboardCallback>,
    ) -> Self {
        let stored = store.as_ref().and_then(|s| match s.try_load() {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::debug!(error = %e, "using default dashboard widgets");
                None
            }
        });
        let mut dashboard = Self {
            registry,
            layout,
            placements: Vec::new(),
            runtime: HashMap::new(),
            drag: DragSession::default(),
            store,
            event_cb,
        };
        dashboard.placements = match stored {
            Some(prefs) => dashboard.placements_from(&prefs),
            None => dashboard.default_placements(),
        };
        calculate_layout(&mut dashboard.placements, &dashboard.layout);
        dashboard
    }

    pub fn with_drop_zone_ratio(mut self, ratio: f32) -> Self {
        self.drag = DragSession::new(ratio);
        self
    }

    fn default_placements(&self) -> Vec<WidgetPlacement> {
        self.registry
            .default_enabled()
            .iter()
            .filter_map(|id| self.placement_for(id, WidgetWidth::default()))
            .collect()
    }

    fn placements_from(&self, prefs: &DashboardPreferences) -> Vec<WidgetPlacement> {
        let mut seen = HashSet::new();
        prefs
            .widgets
            .iter()
            .filter(|w| seen.insert(w.id.clone()))
            .filter_map(|w| {
                let placement = self.placement_for(&w.id, w.width);
                if placement.is_none() {
                    tracing::debug!(widget = %w.id, "dropping unknown stored dashboard widget");
                }
                placement
            })
            .collect()
    }

    fn placement_for(&self, id: &str, width: WidgetWidth) -> Option<WidgetPlacement> {
        self.registry
            .get(id)
            .map(|d| WidgetPlacement::new(d.id(), d.title(), width))
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn placements(&self) -> &[WidgetPlacement] {
        &self.placements
    }

    pub fn rows(&self) -> Vec<&[WidgetPlacement]> {
        rows(&self.placements)
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn enabled_ids(&self) -> Vec<String> {
        self.placements.iter().map(|p| p.id.clone()).collect()
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        self.placements.iter().any(|p| p.id == id)
    }

    pub fn preferences(&self) -> DashboardPreferences {
        DashboardPreferences {
            widgets: self
                .placements
                .iter()
                .map(|p| StoredWidget {
                    id: p.id.clone(),
                    width: p.width,
                })
                .collect(),
        }
    }

    /// Replace the enabled widgets with `ids`, in that order.
    ///
    /// Widgets that stay keep their width; new ones start at one third.
    /// Unknown and repeated ids are skipped.
    pub fn set_enabled_widgets<S: AsRef<str>>(&mut self, ids: &[S]) {
        let previous: HashMap<String, WidgetWidth> = self
            .placements
            .iter()
            .map(|p| (p.id.clone(), p.width))
            .collect();
        let mut seen = HashSet::new();
        let placements: Vec<WidgetPlacement> = ids
            .iter()
            .map(|s| s.as_ref())
            .filter(|id| seen.insert(id.to_string()))
            .filter_map(|id| {
                let width = previous.get(id).copied().unwrap_or_default();
                self.placement_for(id, width)
            })
            .collect();
        let enabled: HashSet<String> = placements.iter().map(|p| p.id.clone()).collect();
        self.placements = placements;
        self.runtime.retain(|id, _| enabled.contains(id));
        self.commit();
    }

    /// Enable `id` at the end of the dashboard, or disable it if already shown.
    pub fn toggle_widget(&mut self, id: &str) {
        if !self.registry.contains(id) {
            return;
        }
        let mut ids = self.enabled_ids();
        if let Some(pos) = ids.iter().position(|existing| existing == id) {
            ids.remove(pos);
        } else {
            ids.push(id.to_string());
        }
        self.set_enabled_widgets(&ids);
    }

    pub fn remove_widget(&mut self, id: &str) {
        if !self.is_enabled(id) {
            return;
        }
        self.emit(DashboardEvent::WidgetRemoved(id.to_string()));
        let ids: Vec<String> = self
            .enabled_ids()
            .into_iter()
            .filter(|existing| existing != id)
            .collect();
        self.set_enabled_widgets(&ids);
    }

    pub fn set_width(&mut self, id: &str, width: WidgetWidth) {
        let Some(placement) = self.placements.iter_mut().find(|p| p.id == id) else {
            return;
        };
        if placement.width == width {
            return;
        }
        placement.width = width;
        self.commit();
    }

    /// Back to the registry defaults, dropping the stored widget list.
    pub fn reset_to_defaults(&mut self) {
        self.drag.end();
        self.placements = self.default_placements();
        let enabled: HashSet<String> = self.enabled_ids().into_iter().collect();
        self.runtime.retain(|id, _| enabled.contains(id));
        calculate_layout(&mut self.placements, &self.layout);
        if let Some(store) = &self.store {
            store.clear();
        }
        self.emit(DashboardEvent::WidgetsChanged(self.enabled_ids()));
    }

    pub fn drag_start(&mut self, id: &str) -> bool {
        if !self.is_enabled(id) {
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
        let bounds = over_id.and_then(|id| geometry.bounds_of(id));
        self.drag.over(active_id, over_id, pointer_x, bounds);
    }

    /// Finish a drag, moving `active_id` to `over_id`'s index.
    pub fn drag_end(&mut self, active_id: &str, over_id: Option<&str>) -> bool {
        self.drag.end();
        let Some(over_id) = over_id else {
            return false;
        };
        if over_id == active_id {
            return false;
        }
        let from = self.placements.iter().position(|p| p.id == active_id);
        let to = self.placements.iter().position(|p| p.id == over_id);
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        array_move(&mut self.placements, from, to);
        self.commit();
        true
    }

    /// Draw one widget's content, creating its instance on first use.
    pub fn render_widget(
        &mut self,
        id: &str,
        ui: &mut egui::Ui,
        ctx: &DashboardContext<'_>,
    ) -> Option<WidgetAction> {
        if !self.runtime.contains_key(id) {
            let widget = self.registry.create(id)?;
            self.runtime.insert(id.to_string(), widget);
        }
        self.runtime.get_mut(id)?.render(ui, ctx)
    }

    fn commit(&mut self) {
        calculate_layout(&mut self.placements, &self.layout);
        if let Some(store) = &self.store {
            store.persist(&self.preferences());
        }
        self.emit(DashboardEvent::WidgetsChanged(self.enabled_ids()));
    }

    fn emit(&self, event: DashboardEvent) {
        if let Some(cb) = &self.event_cb {
            (cb)(event);
        }
    }
}

impl DragHandler for Dashboard {
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
