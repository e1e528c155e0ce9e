use crate::columns::{ColumnDefinition, ColumnLayout};
use crate::drag::{dispatch_frame, DragFrame, DropPosition, ItemBounds};
use crate::holdings::{apply_query, cell_text, Holding, HoldingAction, HoldingsQuery, SortDirection};
use eframe::egui;
use std::collections::HashMap;

/// Holdings report with a customizable, drag-reorderable column header.
pub struct HoldingsTable {
    pub columns: ColumnLayout,
    query: HoldingsQuery,
    header_rects: HashMap<String, egui::Rect>,
}

#[derive(Default)]
struct HeaderInput {
    drag: DragFrame,
    sort_by: Option<String>,
}

impl HoldingsTable {
    pub fn new(columns: ColumnLayout) -> Self {
        Self {
            columns,
            query: HoldingsQuery::default(),
            header_rects: HashMap::new(),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, holdings: &[Holding]) -> Option<HoldingAction> {
        ui.horizontal(|ui| {
            ui.label("Search");
            ui.add(
                egui::TextEdit::singleline(&mut self.query.search)
                    .hint_text("Symbol or description"),
            );
        });
        ui.add_space(4.0);

        let visible: Vec<ColumnDefinition> =
            self.columns.visible_columns().into_iter().cloned().collect();
        let rows = apply_query(holdings, &self.query);
        let mut input = HeaderInput::default();
        let mut header_rects = HashMap::new();
        let mut action = None;

        egui::ScrollArea::both().show(ui, |ui| {
            egui::Grid::new("holdings_table")
                .striped(true)
                .num_columns(visible.len())
                .show(ui, |ui| {
                    for column in &visible {
                        let response = self.header_cell(ui, column, &mut input);
                        header_rects.insert(column.id.clone(), response.rect);
                    }
                    ui.end_row();

                    for holding in &rows {
                        for column in &visible {
                            if column.id == "actions" {
                                ui.horizontal(|ui| {
                                    if ui.small_button("Trade").clicked() {
                                        action = Some(HoldingAction::Trade(holding.symbol.clone()));
                                    }
                                    if ui.small_button("Details").clicked() {
                                        action =
                                            Some(HoldingAction::ViewDetail(holding.symbol.clone()));
                                    }
                                });
                            } else {
                                ui.label(cell_text(holding, &column.id));
                            }
                        }
                        ui.end_row();
                    }
                });
            if rows.is_empty() {
                ui.weak("No holdings match the search.");
            }
        });
        self.header_rects = header_rects;
        self.apply_header_input(ui, input);
        action
    }

    fn header_cell(
        &self,
        ui: &mut egui::Ui,
        column: &ColumnDefinition,
        input: &mut HeaderInput,
    ) -> egui::Response {
        let mut text = column.label.clone();
        if let Some((key, dir)) = &self.query.sort {
            if column.sort_key.as_deref() == Some(key.as_str()) {
                text.push_str(match dir {
                    SortDirection::Ascending => " ⏶",
                    SortDirection::Descending => " ⏷",
                });
            }
        }
        let pinned = column.always_visible;
        let lifted = self.columns.drag().lifted() == Some(column.id.as_str());
        let rich = if lifted {
            egui::RichText::new(text).strong().color(ui.visuals().selection.stroke.color)
        } else {
            egui::RichText::new(text).strong()
        };
        let sense = if pinned {
            egui::Sense::click()
        } else {
            egui::Sense::click_and_drag()
        };
        let response = ui.add(egui::Label::new(rich).sense(sense));
        if response.clicked() {
            if let Some(key) = &column.sort_key {
                input.sort_by = Some(key.clone());
            }
        }
        if !pinned {
            if response.drag_started() {
                input.drag.started = Some(column.id.clone());
            }
            if response.drag_stopped() {
                input.drag.stopped = Some(column.id.clone());
            }
        }
        response
    }

    fn apply_header_input(&mut self, ui: &egui::Ui, mut input: HeaderInput) {
        if let Some(key) = input.sort_by {
            self.query.sort_by(&key);
        }
        let pointer = ui.ctx().pointer_interact_pos();
        input.drag.pointer_x = pointer.map(|pos| pos.x);
        input.drag.hovered = pointer.and_then(|pos| self.hit_test(pos));
        let geometry: HashMap<String, ItemBounds> = self
            .header_rects
            .iter()
            .map(|(id, rect)| (id.clone(), ItemBounds::new(rect.left(), rect.width())))
            .collect();
        if dispatch_frame(&mut self.columns, &input.drag, &geometry) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            self.paint_indicator(ui);
        }
    }

    /// Header under the pointer, matched on x so a drop anywhere in the column counts.
    fn hit_test(&self, pos: egui::Pos2) -> Option<String> {
        self.header_rects
            .iter()
            .find(|(_, rect)| rect.x_range().contains(pos.x))
            .map(|(id, _)| id.clone())
    }

    fn paint_indicator(&self, ui: &egui::Ui) {
        let Some(indicator) = self.columns.drag().indicator() else {
            return;
        };
        let Some(rect) = self.header_rects.get(&indicator.over_id) else {
            return;
        };
        let x = match indicator.position {
            DropPosition::Before => rect.left() - 2.0,
            DropPosition::After => rect.right() + 2.0,
        };
        ui.painter().line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            egui::Stroke::new(2.0, ui.visuals().selection.stroke.color),
        );
    }
}
