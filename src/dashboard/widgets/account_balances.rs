use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use crate::holdings::total_market_value;
use eframe::egui;

pub struct AccountBalancesWidget {
    cash: f64,
    margin_buying_power: f64,
}

impl Default for AccountBalancesWidget {
    fn default() -> Self {
        Self {
            cash: 18_425.37,
            margin_buying_power: 36_850.74,
        }
    }
}

impl Widget for AccountBalancesWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let securities = total_market_value(ctx.holdings);
        egui::Grid::new("account_balances_grid")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("Total account value");
                ui.strong(format!("${:.2}", securities + self.cash));
                ui.end_row();
                ui.label("Securities");
                ui.label(format!("${securities:.2}"));
                ui.end_row();
                ui.label("Cash & sweep");
                ui.label(format!("${:.2}", self.cash));
                ui.end_row();
                ui.label("Margin buying power");
                ui.label(format!("${:.2}", self.margin_buying_power));
                ui.end_row();
            });
        None
    }
}
