use proptest::prelude::*;
use wealth_dashboard::dashboard::layout::{calculate_layout, LayoutConfig, WidgetPlacement, WidgetWidth};
use wealth_dashboard::dashboard::{Dashboard, WidgetRegistry};
use wealth_dashboard::drag::reorder_by_id;

fn placements(widths: &[WidgetWidth]) -> Vec<WidgetPlacement> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| WidgetPlacement::new(&format!("w{i}"), &format!("Widget {i}"), *w))
        .collect()
}

fn row_indices(items: &[WidgetPlacement]) -> Vec<usize> {
    items.iter().map(|p| p.row).collect()
}

fn width_strategy() -> impl Strategy<Value = WidgetWidth> {
    prop_oneof![
        Just(WidgetWidth::OneThird),
        Just(WidgetWidth::OneHalf),
        Just(WidgetWidth::Full),
    ]
}

#[test]
fn full_then_two_thirds() {
    let mut items = placements(&[WidgetWidth::Full, WidgetWidth::OneThird, WidgetWidth::OneThird]);
    calculate_layout(&mut items, &LayoutConfig::default());
    assert_eq!(row_indices(&items), vec![0, 1, 1]);
}

#[test]
fn three_halves_then_third() {
    let mut items = placements(&[
        WidgetWidth::OneHalf,
        WidgetWidth::OneHalf,
        WidgetWidth::OneHalf,
        WidgetWidth::OneThird,
    ]);
    calculate_layout(&mut items, &LayoutConfig::default());
    assert_eq!(row_indices(&items), vec![0, 0, 1, 1]);
}

#[test]
fn default_dashboard_uses_enabled_registry_entries() {
    let registry = WidgetRegistry::with_defaults();
    let expected = registry.default_enabled();
    let dashboard = Dashboard::new(registry, LayoutConfig::default(), None, None);
    assert_eq!(dashboard.enabled_ids(), expected);
    assert!(dashboard
        .placements()
        .iter()
        .all(|p| p.width == WidgetWidth::OneThird));
    assert_eq!(row_indices(dashboard.placements()), vec![0, 0, 0, 1]);
}

#[test]
fn empty_dashboard_is_valid() {
    let mut dashboard = Dashboard::new(
        WidgetRegistry::with_defaults(),
        LayoutConfig::default(),
        None,
        None,
    );
    dashboard.set_enabled_widgets::<&str>(&[]);
    assert!(dashboard.placements().is_empty());
    assert!(dashboard.rows().is_empty());
}

proptest! {
    #[test]
    fn rows_never_exceed_capacity(widths in prop::collection::vec(width_strategy(), 0..40)) {
        let cfg = LayoutConfig::default();
        let mut items = placements(&widths);
        calculate_layout(&mut items, &cfg);

        let mut expected_row = 0;
        let mut sum = 0.0_f32;
        for (idx, item) in items.iter().enumerate() {
            if idx > 0 && item.row != items[idx - 1].row {
                prop_assert_eq!(item.row, items[idx - 1].row + 1, "rows must be contiguous");
                expected_row += 1;
                sum = 0.0;
            }
            prop_assert_eq!(item.row, expected_row);
            sum += cfg.units(item.width);
            prop_assert!(sum <= cfg.row_capacity, "row {} holds {} units", item.row, sum);
        }
        if let Some(first) = items.first() {
            prop_assert_eq!(first.row, 0);
        }
    }

    #[test]
    fn recompute_is_idempotent(widths in prop::collection::vec(width_strategy(), 0..40)) {
        let cfg = LayoutConfig::default();
        let mut items = placements(&widths);
        calculate_layout(&mut items, &cfg);
        let first = items.clone();
        calculate_layout(&mut items, &cfg);
        prop_assert_eq!(first, items);
    }

    #[test]
    fn reorder_preserves_ids(
        len in 1usize..12,
        from in 0usize..12,
        to in 0usize..12,
    ) {
        let mut ids: Vec<String> = (0..len).map(|i| format!("w{i}")).collect();
        let active = format!("w{from}");
        let over = format!("w{to}");
        let mut before = ids.clone();
        reorder_by_id(&mut ids, &active, Some(over.as_str()), |id| id.as_str(), |_| false);
        let mut after = ids.clone();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }
}
