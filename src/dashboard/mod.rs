pub mod dashboard;
pub mod layout;
pub mod widgets;

pub use dashboard::{
    Dashboard, DashboardCallback, DashboardContext, DashboardEvent, DashboardPreferences,
    DASHBOARD_PREFERENCES_KEY,
};
pub use layout::{calculate_layout, LayoutConfig, WidgetPlacement, WidgetWidth, WidthUnits};
pub use widgets::{WidgetAction, WidgetDescriptor, WidgetRegistry};
