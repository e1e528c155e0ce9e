use super::{Widget, WidgetAction};
use crate::dashboard::dashboard::DashboardContext;
use chrono::{Duration, NaiveDate};
use eframe::egui;

struct ActivityEntry {
    days_ago: i64,
    description: &'static str,
    amount: f64,
}

pub struct RecentActivityWidget {
    entries: Vec<ActivityEntry>,
}

impl Default for RecentActivityWidget {
    fn default() -> Self {
        Self {
            entries: vec![
                ActivityEntry {
                    days_ago: 1,
                    description: "Dividend received VTI",
                    amount: 182.44,
                },
                ActivityEntry {
                    days_ago: 3,
                    description: "Bought 10 MSFT @ 412.80",
                    amount: -4_128.00,
                },
                ActivityEntry {
                    days_ago: 6,
                    description: "Electronic funds transfer",
                    amount: 5_000.00,
                },
                ActivityEntry {
                    days_ago: 9,
                    description: "Sold 15 TSLA @ 181.10",
                    amount: 2_716.50,
                },
            ],
        }
    }
}

impl RecentActivityWidget {
    fn date_for(today: NaiveDate, days_ago: i64) -> NaiveDate {
        today
            .checked_sub_signed(Duration::days(days_ago))
            .unwrap_or(today)
    }
}

impl Widget for RecentActivityWidget {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction> {
        egui::Grid::new("recent_activity_grid")
            .num_columns(3)
            .striped(true)
            .show(ui, |ui| {
                for entry in &self.entries {
                    let date = Self::date_for(ctx.today, entry.days_ago);
                    ui.weak(date.format("%m/%d/%Y").to_string());
                    ui.label(entry.description);
                    ui.label(format!("{:+.2}", entry.amount));
                    ui.end_row();
                }
            });
        None
    }
}
