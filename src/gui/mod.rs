mod customize_dialog;
mod dashboard_view;
mod holdings_table;

pub use customize_dialog::CustomizeDialog;
pub use dashboard_view::DashboardView;
pub use holdings_table::HoldingsTable;

use crate::columns::{ColumnLayout, COLUMN_PREFERENCES_KEY};
use crate::dashboard::{
    Dashboard, DashboardCallback, DashboardContext, DashboardEvent, WidgetAction, WidgetRegistry,
    DASHBOARD_PREFERENCES_KEY,
};
use crate::holdings::{holdings_columns, mock_holdings, HoldingAction};
use crate::settings::Settings;
use crate::storage::{PreferenceStore, StorageBackend};
use eframe::egui;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Home,
    Holdings,
}

pub struct DashboardApp {
    page: Page,
    dashboard: Dashboard,
    dashboard_view: DashboardView,
    holdings: HoldingsTable,
    customize: CustomizeDialog,
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(settings: &Settings, backend: Arc<dyn StorageBackend>) -> Self {
        let on_event: DashboardCallback = Arc::new(|event: DashboardEvent| match event {
            DashboardEvent::WidgetsChanged(ids) => {
                tracing::debug!(widgets = ?ids, "dashboard widgets changed")
            }
            DashboardEvent::WidgetRemoved(id) => {
                tracing::info!(widget = %id, "dashboard widget removed")
            }
        });
        let dashboard = Dashboard::new(
            WidgetRegistry::with_defaults(),
            settings.layout,
            Some(PreferenceStore::new(backend.clone(), DASHBOARD_PREFERENCES_KEY)),
            Some(on_event),
        )
        .with_drop_zone_ratio(settings.drop_zone_ratio);
        let columns = ColumnLayout::new(
            holdings_columns(),
            Some(PreferenceStore::new(backend, COLUMN_PREFERENCES_KEY)),
        )
        .with_drop_zone_ratio(settings.drop_zone_ratio);
        Self {
            page: Page::Home,
            dashboard,
            dashboard_view: DashboardView::default(),
            holdings: HoldingsTable::new(columns),
            customize: CustomizeDialog::default(),
            status: None,
        }
    }

    fn handle_widget_action(&mut self, action: WidgetAction) {
        match action {
            WidgetAction::OpenHoldings => self.page = Page::Holdings,
            WidgetAction::Trade(symbol) => {
                self.handle_holding_action(HoldingAction::Trade(symbol));
            }
            WidgetAction::ViewDetail(symbol) => {
                self.handle_holding_action(HoldingAction::ViewDetail(symbol));
            }
        }
    }

    fn handle_holding_action(&mut self, action: HoldingAction) {
        let message = match &action {
            HoldingAction::Trade(symbol) => format!("Trade ticket requested for {symbol}"),
            HoldingAction::ViewDetail(symbol) => format!("Position detail requested for {symbol}"),
        };
        tracing::info!(?action, "holding action");
        self.status = Some(message);
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.selectable_value(&mut self.page, Page::Home, "Home");
                ui.selectable_value(&mut self.page, Page::Holdings, "Holdings");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Customize").clicked() {
                        self.customize.open = !self.customize.open;
                    }
                });
            });
        });

        if let Some(status) = &self.status {
            let mut dismiss = false;
            egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(status.as_str());
                    if ui.small_button("Dismiss").clicked() {
                        dismiss = true;
                    }
                });
            });
            if dismiss {
                self.status = None;
            }
        }

        let mut widget_action = None;
        let mut holding_action = None;
        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Home => {
                let today = chrono::Local::now().date_naive();
                let widget_ctx = DashboardContext {
                    holdings: mock_holdings(),
                    today,
                };
                egui::ScrollArea::vertical().show(ui, |ui| {
                    widget_action = self.dashboard_view.ui(ui, &mut self.dashboard, &widget_ctx);
                });
            }
            Page::Holdings => {
                holding_action = self.holdings.ui(ui, mock_holdings());
            }
        });

        self.customize
            .ui(ctx, &mut self.dashboard, &mut self.holdings.columns);

        if let Some(action) = widget_action {
            self.handle_widget_action(action);
        }
        if let Some(action) = holding_action {
            self.handle_holding_action(action);
        }
    }
}
