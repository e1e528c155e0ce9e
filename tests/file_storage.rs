use std::sync::Arc;
use tempfile::tempdir;
use wealth_dashboard::columns::{ColumnLayout, COLUMN_PREFERENCES_KEY};
use wealth_dashboard::dashboard::{
    Dashboard, DashboardPreferences, LayoutConfig, WidgetRegistry, WidgetWidth,
    DASHBOARD_PREFERENCES_KEY,
};
use wealth_dashboard::holdings::holdings_columns;
use wealth_dashboard::storage::{FileStorage, PreferenceStore, StorageBackend};

fn open_dashboard(backend: Arc<dyn StorageBackend>) -> Dashboard {
    Dashboard::new(
        WidgetRegistry::with_defaults(),
        LayoutConfig::default(),
        Some(PreferenceStore::new(backend, DASHBOARD_PREFERENCES_KEY)),
        None,
    )
}

#[test]
fn dashboard_survives_reopen() {
    let dir = tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()).unwrap());

    let mut dashboard = open_dashboard(backend.clone());
    dashboard.set_width("market_watch", WidgetWidth::Full);
    dashboard.toggle_widget("order_status");
    dashboard.remove_widget("recent_activity");
    assert!(dashboard.drag_end("order_status", Some("account_balances")));
    let saved = dashboard.preferences();

    assert!(dir.path().join("home-dashboard-widgets.json").exists());

    let reopened = open_dashboard(backend);
    assert_eq!(reopened.preferences(), saved);
    assert_eq!(reopened.enabled_ids(), dashboard.enabled_ids());
    assert_eq!(reopened.placements(), dashboard.placements());
}

#[test]
fn unknown_stored_widgets_are_skipped() {
    let dir = tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()).unwrap());
    backend
        .set_item(
            DASHBOARD_PREFERENCES_KEY,
            r#"{"widgets":[{"id":"retired_widget","width":"full"},{"id":"market_watch","width":"half"},{"id":"market_watch"}]}"#,
        )
        .unwrap();

    let dashboard = open_dashboard(backend);
    assert_eq!(dashboard.enabled_ids(), vec!["market_watch".to_string()]);
    assert_eq!(dashboard.placements()[0].width, WidgetWidth::OneHalf);
}

#[test]
fn columns_survive_reopen() {
    let dir = tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()).unwrap());
    let store = PreferenceStore::new(backend.clone(), COLUMN_PREFERENCES_KEY);

    let mut layout = ColumnLayout::new(holdings_columns(), Some(store.clone()));
    layout.toggle_visibility("unrealized_gain_pct");
    assert!(layout.drag_end("price", Some("description")));

    let reopened = ColumnLayout::new(holdings_columns(), Some(store));
    assert_eq!(reopened.preferences(), layout.preferences());
    assert!(reopened.is_visible("unrealized_gain_pct"));
    assert_eq!(
        reopened.movable_ids().first().copied(),
        Some("price"),
    );
}

#[test]
fn clear_removes_the_file() {
    let dir = tempdir().unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()).unwrap());
    let store: PreferenceStore<DashboardPreferences> =
        PreferenceStore::new(backend, DASHBOARD_PREFERENCES_KEY);
    store.persist(&DashboardPreferences::default());
    assert!(store.try_load().unwrap().is_some());
    store.clear();
    assert!(store.try_load().unwrap().is_none());
}

#[test]
fn nested_directory_is_created() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let storage = FileStorage::new(&nested).unwrap();
    storage.set_item("k", "{}").unwrap();
    assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("{}"));
    assert!(nested.join("k.json").exists());
}

#[test]
fn stray_tmp_entry_does_not_lose_dashboard_changes() {
    let dir = tempdir().unwrap();
    std::fs::create_dir(dir.path().join("home-dashboard-widgets.json.tmp")).unwrap();
    let backend: Arc<dyn StorageBackend> = Arc::new(FileStorage::new(dir.path()).unwrap());

    let mut dashboard = open_dashboard(backend.clone());
    dashboard.toggle_widget("order_status");

    let reopened = open_dashboard(backend);
    assert_eq!(reopened.enabled_ids(), dashboard.enabled_ids());
    assert_eq!(reopened.enabled_ids().last().map(String::as_str), Some("order_status"));
}
