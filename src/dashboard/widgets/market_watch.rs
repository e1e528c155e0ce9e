use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use eframe::egui;

struct Quote {
    symbol: &'static str,
    last: f64,
    change_pct: f64,
}

pub struct MarketWatchWidget {
    quotes: Vec<Quote>,
}

impl Default for MarketWatchWidget {
    fn default() -> Self {
        Self {
            quotes: vec![
                Quote {
                    symbol: "SPY",
                    last: 512.36,
                    change_pct: 0.42,
                },
                Quote {
                    symbol: "QQQ",
                    last: 438.17,
                    change_pct: 0.78,
                },
                Quote {
                    symbol: "DIA",
                    last: 389.05,
                    change_pct: -0.15,
                },
                Quote {
                    symbol: "IWM",
                    last: 201.44,
                    change_pct: -0.61,
                },
            ],
        }
    }
}

impl Widget for MarketWatchWidget {
    fn render(&mut self, ui: &mut egui::Ui, _ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        let mut clicked = None;
        egui::Grid::new("market_watch_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for quote in &self.quotes {
                    if ui.link(quote.symbol).clicked() {
                        clicked = Some(WidgetAction::Trade(quote.symbol.to_string()));
                    }
                    ui.label(format!("{:.2}", quote.last));
                    let color = if quote.change_pct >= 0.0 {
                        egui::Color32::from_rgb(64, 170, 90)
                    } else {
                        egui::Color32::from_rgb(200, 64, 64)
                    };
                    ui.colored_label(color, format!("{:+.2}%", quote.change_pct));
                    ui.end_row();
                }
            });
        clicked
    }
}
