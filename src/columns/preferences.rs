use super::ColumnDefinition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Persisted column order and visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ColumnPreferences {
    pub order: Vec<String>,
    pub visibility: BTreeMap<String, bool>,
}

impl ColumnPreferences {
    /// Definition order with each column's default visibility.
    pub fn defaults(definitions: &[ColumnDefinition]) -> Self {
        let mut prefs = Self {
            order: definitions.iter().map(|d| d.id.clone()).collect(),
            visibility: definitions
                .iter()
                .map(|d| (d.id.clone(), d.default_visible))
                .collect(),
        };
        prefs.splice_pinned(definitions);
        prefs
    }

    /// Bring stored preferences in line with the current column set.
    ///
    /// Unknown ids are dropped, duplicates collapse to their first occurrence,
    /// new columns are inserted after their nearest known predecessor and take
    /// their default visibility, and pinned columns lead the order.
    pub fn reconcile(&mut self, definitions: &[ColumnDefinition]) {
        let known: HashSet<&str> = definitions.iter().map(|d| d.id.as_str()).collect();

        let mut seen = HashSet::new();
        let before = self.order.len();
        self.order
            .retain(|id| known.contains(id.as_str()) && seen.insert(id.clone()));
        if self.order.len() != before {
            tracing::debug!(
                dropped = before - self.order.len(),
                "dropped stale column ids from stored order"
            );
        }
        self.visibility.retain(|id, _| known.contains(id.as_str()));

        for (def_idx, def) in definitions.iter().enumerate() {
            if !self.order.iter().any(|id| id == &def.id) {
                let insert_at = definitions[..def_idx]
                    .iter()
                    .rev()
                    .find_map(|prev| self.order.iter().position(|id| id == &prev.id))
                    .map(|pos| pos + 1)
                    .unwrap_or(0);
                self.order.insert(insert_at, def.id.clone());
            }
            self.visibility
                .entry(def.id.clone())
                .or_insert(def.default_visible);
        }

        self.splice_pinned(definitions);
    }

    /// Move pinned columns to the front, in definition order.
    pub(crate) fn splice_pinned(&mut self, definitions: &[ColumnDefinition]) {
        let pinned: Vec<String> = definitions
            .iter()
            .filter(|d| d.always_visible)
            .map(|d| d.id.clone())
            .collect();
        if pinned.is_empty() || self.order.starts_with(&pinned) {
            return;
        }
        let rest: Vec<String> = std::mem::take(&mut self.order)
            .into_iter()
            .filter(|id| !pinned.contains(id))
            .collect();
        self.order = pinned.into_iter().chain(rest).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definitions() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("actions", "").pinned().unsortable(),
            ColumnDefinition::new("symbol", "Symbol").pinned(),
            ColumnDefinition::new("qty", "Quantity"),
            ColumnDefinition::new("price", "Price"),
            ColumnDefinition::new("weight", "Weight").hidden_by_default(),
        ]
    }

    #[test]
    fn defaults_follow_definitions() {
        let prefs = ColumnPreferences::defaults(&definitions());
        assert_eq!(prefs.order, vec!["actions", "symbol", "qty", "price", "weight"]);
        assert_eq!(prefs.visibility.get("weight"), Some(&false));
        assert_eq!(prefs.visibility.get("qty"), Some(&true));
    }

    #[test]
    fn current_preferences_reconcile_to_themselves() {
        let defs = definitions();
        let mut prefs = ColumnPreferences::defaults(&defs);
        prefs.order = vec!["actions", "symbol", "price", "weight", "qty"]
            .into_iter()
            .map(String::from)
            .collect();
        prefs.visibility.insert("qty".into(), false);
        let expected = prefs.clone();
        prefs.reconcile(&defs);
        assert_eq!(prefs, expected);
    }

    #[test]
    fn stale_ids_dropped_and_new_columns_merged() {
        let defs = definitions();
        let mut prefs = ColumnPreferences {
            order: vec!["actions", "symbol", "price", "gone", "price"]
                .into_iter()
                .map(String::from)
                .collect(),
            visibility: BTreeMap::from([("gone".to_string(), true), ("price".to_string(), false)]),
        };
        prefs.reconcile(&defs);
        assert_eq!(prefs.order, vec!["actions", "symbol", "qty", "price", "weight"]);
        assert!(!prefs.visibility.contains_key("gone"));
        assert_eq!(prefs.visibility.get("price"), Some(&false));
        assert_eq!(prefs.visibility.get("weight"), Some(&false));
    }

    #[test]
    fn pinned_columns_are_moved_to_front() {
        let defs = definitions();
        let mut prefs = ColumnPreferences::defaults(&defs);
        prefs.order = vec!["qty", "symbol", "price", "actions", "weight"]
            .into_iter()
            .map(String::from)
            .collect();
        prefs.reconcile(&defs);
        assert_eq!(prefs.order, vec!["actions", "symbol", "qty", "price", "weight"]);
    }

    #[test]
    fn serialized_shape() {
        let prefs = ColumnPreferences::defaults(&definitions()[..3]);
        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(json["order"][2], "qty");
        assert_eq!(json["visibility"]["symbol"], true);
    }
}
