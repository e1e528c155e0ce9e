use crate::dashboard::dashboard::DashboardContext;
use eframe::egui;
use hashlink::LinkedHashMap;
use std::sync::Arc;

mod account_balances;
mod market_watch;
mod order_status;
mod portfolio_summary;
mod recent_activity;

pub use account_balances::AccountBalancesWidget;
pub use market_watch::MarketWatchWidget;
pub use order_status::OrderStatusWidget;
pub use portfolio_summary::PortfolioSummaryWidget;
pub use recent_activity::RecentActivityWidget;

/// Something a widget asks the host page to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetAction {
    Trade(String),
    ViewDetail(String),
    OpenHoldings,
}

/// Widget trait implemented by all dashboard widgets.
pub trait Widget: Send {
    fn render(&mut self, ui: &mut egui::Ui, ctx: &DashboardContext<'_>) -> Option<WidgetAction>;
}

/// Catalog entry for a dashboard widget.
#[derive(Clone)]
pub struct WidgetDescriptor {
    id: String,
    title: String,
    default_enabled: bool,
    ctor: Arc<dyn Fn() -> Box<dyn Widget> + Send + Sync>,
}

impl WidgetDescriptor {
    pub fn new<T: Widget + Default + 'static>(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            default_enabled: true,
            ctor: Arc::new(|| Box::new(T::default()) as Box<dyn Widget>),
        }
    }

    pub fn enabled_by_default(mut self, enabled: bool) -> Self {
        self.default_enabled = enabled;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn default_enabled(&self) -> bool {
        self.default_enabled
    }

    pub fn create(&self) -> Box<dyn Widget> {
        (self.ctor)()
    }
}

impl std::fmt::Debug for WidgetDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("default_enabled", &self.default_enabled)
            .finish()
    }
}

/// Ordered catalog of the widgets the dashboard can show.
#[derive(Clone, Default)]
pub struct WidgetRegistry {
    map: LinkedHashMap<String, WidgetDescriptor>,
}

impl WidgetRegistry {
    pub fn with_defaults() -> Self {
        let mut reg = Self::default();
        reg.register(WidgetDescriptor::new::<AccountBalancesWidget>(
            "account_balances",
            "Account Balances",
        ));
        reg.register(WidgetDescriptor::new::<PortfolioSummaryWidget>(
            "portfolio_summary",
            "Top Holdings",
        ));
        reg.register(WidgetDescriptor::new::<MarketWatchWidget>(
            "market_watch",
            "Market Watch",
        ));
        reg.register(WidgetDescriptor::new::<RecentActivityWidget>(
            "recent_activity",
            "Recent Activity",
        ));
        reg.register(
            WidgetDescriptor::new::<OrderStatusWidget>("order_status", "Order Status")
                .enabled_by_default(false),
        );
        reg
    }

    /// Add or replace a descriptor. Replacing keeps the original position.
    pub fn register(&mut self, descriptor: WidgetDescriptor) {
        if let Some(existing) = self.map.get_mut(descriptor.id()) {
            *existing = descriptor;
        } else {
            self.map.insert(descriptor.id.clone(), descriptor);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.map.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&WidgetDescriptor> {
        self.map.get(id)
    }

    pub fn create(&self, id: &str) -> Option<Box<dyn Widget>> {
        self.map.get(id).map(WidgetDescriptor::create)
    }

    pub fn ids(&self) -> Vec<String> {
        self.map.keys().cloned().collect()
    }

    pub fn descriptors(&self) -> impl Iterator<Item = &WidgetDescriptor> {
        self.map.values()
    }

    /// Ids enabled on a fresh dashboard, in catalog order.
    pub fn default_enabled(&self) -> Vec<String> {
        self.map
            .values()
            .filter(|d| d.default_enabled)
            .map(|d| d.id.clone())
            .collect()
    }
}
