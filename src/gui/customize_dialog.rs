use crate::columns::ColumnLayout;
use crate::dashboard::{Dashboard, WidgetWidth};
use eframe::egui;

/// Window for choosing dashboard widgets and holdings columns.
#[derive(Default)]
pub struct CustomizeDialog {
    pub open: bool,
}

impl CustomizeDialog {
    pub fn ui(&mut self, ctx: &egui::Context, dashboard: &mut Dashboard, columns: &mut ColumnLayout) {
        if !self.open {
            return;
        }
        let mut open = self.open;
        egui::Window::new("Customize")
            .open(&mut open)
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.heading("Dashboard widgets");
                    Self::widgets_section(ui, dashboard);
                    ui.separator();
                    ui.heading("Holdings columns");
                    Self::columns_section(ui, columns);
                });
            });
        self.open = open;
    }

    fn widgets_section(ui: &mut egui::Ui, dashboard: &mut Dashboard) {
        let catalog: Vec<(String, String)> = dashboard
            .registry()
            .descriptors()
            .map(|d| (d.id().to_string(), d.title().to_string()))
            .collect();
        for (id, title) in catalog {
            ui.horizontal(|ui| {
                let mut enabled = dashboard.is_enabled(&id);
                if ui.checkbox(&mut enabled, title.as_str()).changed() {
                    dashboard.toggle_widget(&id);
                }
                let current = dashboard
                    .placements()
                    .iter()
                    .find(|p| p.id == id)
                    .map(|p| p.width);
                if let Some(current) = current {
                    for width in WidgetWidth::ALL {
                        if ui.selectable_label(current == width, width.label()).clicked() {
                            dashboard.set_width(&id, width);
                        }
                    }
                }
            });
        }
        if ui.button("Reset dashboard").clicked() {
            dashboard.reset_to_defaults();
        }
    }

    fn columns_section(ui: &mut egui::Ui, columns: &mut ColumnLayout) {
        let defs: Vec<(String, String, bool)> = columns
            .ordered_columns()
            .into_iter()
            .map(|d| {
                let label = if d.label.is_empty() {
                    d.id.clone()
                } else {
                    d.label.clone()
                };
                (d.id.clone(), label, d.always_visible)
            })
            .collect();
        for (id, label, pinned) in defs {
            let mut visible = columns.is_visible(&id);
            let response = ui.add_enabled(!pinned, egui::Checkbox::new(&mut visible, label.as_str()));
            let response = if pinned {
                response.on_disabled_hover_text("Always shown")
            } else {
                response
            };
            if response.changed() {
                columns.toggle_visibility(&id);
            }
        }
        ui.label("Drag column headers in the table to reorder them.");
        if ui.button("Reset columns").clicked() {
            columns.reset_to_defaults();
        }
    }
}
