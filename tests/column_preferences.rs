use proptest::prelude::*;
use std::sync::Arc;
use wealth_dashboard::columns::{ColumnLayout, ColumnPreferences, COLUMN_PREFERENCES_KEY};
use wealth_dashboard::holdings::holdings_columns;
use wealth_dashboard::storage::{MemoryStorage, PreferenceStore, StorageBackend};

/// Backend whose reads and writes always fail.
struct BrokenStorage;

impl StorageBackend for BrokenStorage {
    fn get_item(&self, _key: &str) -> anyhow::Result<Option<String>> {
        anyhow::bail!("storage disabled")
    }

    fn set_item(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
        anyhow::bail!("quota exceeded")
    }

    fn remove_item(&self, _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("storage disabled")
    }
}

fn store_on(backend: Arc<dyn StorageBackend>) -> PreferenceStore<ColumnPreferences> {
    PreferenceStore::new(backend, COLUMN_PREFERENCES_KEY)
}

fn defaults() -> ColumnPreferences {
    ColumnPreferences::defaults(&holdings_columns())
}

#[test]
fn persist_then_load_round_trips() {
    let store = store_on(Arc::new(MemoryStorage::new()));
    let mut prefs = defaults();
    prefs.order.swap(3, 5);
    prefs.visibility.insert("price".into(), false);
    store.persist(&prefs);
    assert_eq!(store.load(defaults()), prefs);
}

#[test]
fn corrupt_blob_loads_defaults() {
    let backend = Arc::new(MemoryStorage::new());
    backend.set_item(COLUMN_PREFERENCES_KEY, "not json").unwrap();
    let store = store_on(backend.clone());
    assert_eq!(store.load(defaults()), defaults());

    let layout = ColumnLayout::new(holdings_columns(), Some(store));
    assert_eq!(layout.preferences(), &defaults());
    assert_eq!(
        backend.get_item(COLUMN_PREFERENCES_KEY).unwrap().as_deref(),
        Some("not json")
    );
}

#[test]
fn wrong_shape_loads_defaults() {
    let backend = Arc::new(MemoryStorage::new());
    backend
        .set_item(COLUMN_PREFERENCES_KEY, r#"{"order": "symbol"}"#)
        .unwrap();
    let store = store_on(backend);
    assert_eq!(store.load(defaults()), defaults());
}

#[test]
fn failing_backend_degrades_to_defaults() {
    let store = store_on(Arc::new(BrokenStorage));
    store.persist(&defaults());
    assert_eq!(store.load(defaults()), defaults());

    let mut layout = ColumnLayout::new(holdings_columns(), Some(store));
    assert!(layout.toggle_visibility("price"));
    assert!(!layout.is_visible("price"));
}

#[test]
fn dragging_onto_actions_is_rejected() {
    let mut layout = ColumnLayout::new(holdings_columns(), None);
    let before = layout.preferences().clone();
    assert!(layout.drag_start("price"));
    assert!(!layout.drag_end("price", Some("actions")));
    assert_eq!(layout.preferences(), &before);
}

#[test]
fn new_columns_merge_into_stale_preferences() {
    let backend: Arc<dyn StorageBackend> = Arc::new(MemoryStorage::new());
    let store = store_on(backend);
    let mut columns = holdings_columns();
    let added = columns.pop().unwrap();
    let stale = ColumnLayout::new(columns, Some(store.clone()));
    store.persist(stale.preferences());

    let layout = ColumnLayout::new(holdings_columns(), Some(store));
    assert_eq!(layout.preferences().order.last(), Some(&added.id));
    assert_eq!(layout.is_visible(&added.id), added.default_visible);
}

fn movable_ids() -> Vec<String> {
    holdings_columns()
        .into_iter()
        .filter(|c| !c.always_visible)
        .map(|c| c.id)
        .collect()
}

#[derive(Debug, Clone)]
enum Op {
    Drag(usize, usize),
    DragOntoPinned(usize),
    Toggle(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let n = holdings_columns().len();
    prop_oneof![
        (0..n, 0..n).prop_map(|(a, b)| Op::Drag(a, b)),
        (0..n).prop_map(Op::DragOntoPinned),
        (0..n).prop_map(Op::Toggle),
    ]
}

proptest! {
    #[test]
    fn pinned_columns_survive_any_edit_sequence(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let defs = holdings_columns();
        let ids: Vec<String> = defs.iter().map(|d| d.id.clone()).collect();
        let pinned: Vec<String> = defs.iter().filter(|d| d.always_visible).map(|d| d.id.clone()).collect();
        let mut layout = ColumnLayout::new(defs, None);

        for op in ops {
            match op {
                Op::Drag(a, b) => {
                    layout.drag_start(&ids[a]);
                    layout.drag_end(&ids[a], Some(ids[b].as_str()));
                }
                Op::DragOntoPinned(a) => {
                    layout.drag_start(&ids[a]);
                    layout.drag_end(&ids[a], Some(pinned[a % pinned.len()].as_str()));
                }
                Op::Toggle(a) => {
                    layout.toggle_visibility(&ids[a]);
                }
            }
        }

        let order = &layout.preferences().order;
        prop_assert_eq!(&order[..pinned.len()], &pinned[..]);
        for id in &pinned {
            prop_assert!(layout.is_visible(id));
            prop_assert!(!layout.movable_ids().contains(&id.as_str()));
        }
        let mut sorted_order = order.clone();
        sorted_order.sort();
        let mut sorted_ids = ids.clone();
        sorted_ids.sort();
        prop_assert_eq!(sorted_order, sorted_ids);
        let mut movable = layout.movable_ids().into_iter().map(String::from).collect::<Vec<_>>();
        movable.sort();
        let mut expected_movable = movable_ids();
        expected_movable.sort();
        prop_assert_eq!(movable, expected_movable);
    }
}
