use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use eframe::egui;

struct OpenOrder {
    symbol: &'static str,
    side: &'static str,
    quantity: u32,
    limit: f64,
    status: &'static str,
}

pub struct OrderStatusWidget {
    orders: Vec<OpenOrder>,
}

impl Default for OrderStatusWidget {
    fn default() -> Self {
        Self {
            orders: vec![
                OpenOrder {
                    symbol: "AAPL",
                    side: "Buy",
                    quantity: 25,
                    limit: 182.50,
                    status: "Open",
                },
                OpenOrder {
                    symbol: "BND",
                    side: "Sell",
                    quantity: 100,
                    limit: 73.10,
                    status: "Partially filled",
                },
            ],
        }
    }
}

impl Widget for OrderStatusWidget {
    fn render(&mut self, ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        if self.orders.is_empty() {
            ui.weak("No open orders");
            return None;
        }
        let mut clicked = None;
        for order in &self.orders {
            ui.horizontal(|ui| {
                if ui.link(order.symbol).clicked() {
                    clicked = Some(WidgetAction::Trade(order.symbol.to_string()));
                }
                ui.label(format!("{} {} @ {:.2}", order.side, order.quantity, order.limit));
                ui.weak(order.status);
            });
        }
        clicked
    }
}
