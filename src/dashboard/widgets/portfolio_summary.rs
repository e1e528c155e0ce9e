use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use crate::holdings::{apply_query, total_market_value, HoldingsQuery, SortDirection};
use eframe::egui;

/// Largest positions by market value.
pub struct PortfolioSummaryWidget {
    count: usize,
}

impl Default for PortfolioSummaryWidget {
    fn default() -> Self {
        Self { count: 5 }
    }
}

impl Widget for PortfolioSummaryWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let mut clicked = None;
        let total = total_market_value(ctx.holdings);
        let query = HoldingsQuery {
            search: String::new(),
            sort: Some(("market_value".into(), SortDirection::Descending)),
        };
        for holding in apply_query(ctx.holdings, &query).into_iter().take(self.count) {
            ui.horizontal(|ui| {
                if ui.link(&holding.symbol).clicked() {
                    clicked = Some(WidgetAction::ViewDetail(holding.symbol.clone()));
                }
                let weight = if total > 0.0 {
                    holding.market_value() / total * 100.0
                } else {
                    0.0
                };
                ui.label(format!("${:.2}", holding.market_value()));
                ui.weak(format!("{weight:.1}%"));
            });
        }
        if ui.button("View all holdings").clicked() {
            clicked = Some(WidgetAction::OpenHoldings);
        }
        clicked
    }
}
