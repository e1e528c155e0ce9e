use crate::dashboard::{Dashboard, DashboardContext, WidgetAction, WidgetPlacement, WidgetWidth};
use crate::drag::{dispatch_frame, DragFrame, DropPosition, ItemBounds};
use eframe::egui;
use std::collections::HashMap;

const MIN_WIDGET_WIDTH: f32 = 120.0;

/// Renders the home dashboard grid and feeds pointer drags back into it.
#[derive(Default)]
pub struct DashboardView {
    rects: HashMap<String, egui::Rect>,
}

#[derive(Default)]
struct FrameInput {
    drag: DragFrame,
    remove: Option<String>,
    resize: Option<(String, WidgetWidth)>,
}

impl DashboardView {
    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        dashboard: &mut Dashboard,
        ctx: &DashboardContext<'_>,
    ) -> Option<WidgetAction> {
        if dashboard.placements().is_empty() {
            self.rects.clear();
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.weak("No widgets enabled. Use Customize to add some.");
            });
            return None;
        }

        let rows: Vec<Vec<WidgetPlacement>> =
            dashboard.rows().into_iter().map(|row| row.to_vec()).collect();
        let layout = *dashboard.layout_config();
        let spacing = ui.spacing().item_spacing.x;
        let full_width = ui.available_width();
        let mut input = FrameInput::default();
        let mut clicked = None;
        let mut rects = HashMap::new();

        for row in &rows {
            ui.horizontal_top(|ui| {
                for placement in row {
                    let width = (full_width * layout.fraction(placement.width) - spacing)
                        .max(MIN_WIDGET_WIDTH);
                    let lifted = dashboard.drag().lifted() == Some(placement.id.as_str());
                    let stroke = if lifted {
                        egui::Stroke::new(2.0, ui.visuals().selection.stroke.color)
                    } else {
                        ui.visuals().widgets.noninteractive.bg_stroke
                    };
                    let response = ui.allocate_ui_with_layout(
                        egui::vec2(width, 0.0),
                        egui::Layout::top_down(egui::Align::LEFT),
                        |ui| {
                            egui::Frame::group(ui.style())
                                .stroke(stroke)
                                .show(ui, |ui| {
                                    ui.set_width(width - 16.0);
                                    Self::header(ui, placement, &mut input);
                                    ui.separator();
                                    dashboard.render_widget(&placement.id, ui, ctx)
                                })
                                .inner
                        },
                    );
                    if clicked.is_none() {
                        clicked = response.inner;
                    }
                    rects.insert(placement.id.clone(), response.response.rect);
                }
            });
            ui.add_space(spacing);
        }
        self.rects = rects;

        let pointer = ui.ctx().pointer_interact_pos();
        input.drag.pointer_x = pointer.map(|pos| pos.x);
        input.drag.hovered = pointer.and_then(|pos| self.hit_test(pos));
        if dispatch_frame(dashboard, &input.drag, &self.geometry()) {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            self.paint_indicator(ui, dashboard);
        }
        if let Some(id) = &input.remove {
            dashboard.remove_widget(id);
        }
        if let Some((id, width)) = &input.resize {
            dashboard.set_width(id, *width);
        }
        clicked
    }

    fn header(ui: &mut egui::Ui, placement: &WidgetPlacement, input: &mut FrameInput) {
        ui.horizontal(|ui| {
            let handle = ui
                .add(egui::Label::new("≡").sense(egui::Sense::drag()))
                .on_hover_text("Drag to reorder");
            if handle.drag_started() {
                input.drag.started = Some(placement.id.clone());
            }
            if handle.drag_stopped() {
                input.drag.stopped = Some(placement.id.clone());
            }
            ui.strong(&placement.title);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Remove widget").clicked() {
                    input.remove = Some(placement.id.clone());
                }
                if ui
                    .small_button(placement.width.label())
                    .on_hover_text("Change width")
                    .clicked()
                {
                    input.resize = Some((placement.id.clone(), placement.width.next()));
                }
            });
        });
    }

    fn hit_test(&self, pos: egui::Pos2) -> Option<String> {
        self.rects
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(id, _)| id.clone())
    }

    fn geometry(&self) -> HashMap<String, ItemBounds> {
        self.rects
            .iter()
            .map(|(id, rect)| (id.clone(), ItemBounds::new(rect.left(), rect.width())))
            .collect()
    }

    fn paint_indicator(&self, ui: &egui::Ui, dashboard: &Dashboard) {
        let Some(indicator) = dashboard.drag().indicator() else {
            return;
        };
        let Some(rect) = self.rects.get(&indicator.over_id) else {
            return;
        };
        let x = match indicator.position {
            DropPosition::Before => rect.left() - 3.0,
            DropPosition::After => rect.right() + 3.0,
        };
        ui.painter().line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
            egui::Stroke::new(3.0, ui.visuals().selection.stroke.color),
        );
    }
}
