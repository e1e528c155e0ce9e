pub mod layout;
pub mod preferences;

pub use layout::{ColumnLayout, COLUMN_PREFERENCES_KEY};
pub use preferences::ColumnPreferences;

/// A column the holdings table knows how to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub id: String,
    pub label: String,
    /// Field used by the table's sort routine; `None` for columns that cannot be sorted.
    pub sort_key: Option<String>,
    pub default_visible: bool,
    /// Pinned columns can never be hidden or moved.
    pub always_visible: bool,
}

impl ColumnDefinition {
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            sort_key: Some(id.to_string()),
            default_visible: true,
            always_visible: false,
        }
    }

    pub fn pinned(mut self) -> Self {
        self.always_visible = true;
        self.default_visible = true;
        self
    }

    pub fn hidden_by_default(mut self) -> Self {
        self.default_visible = false;
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sort_key = None;
        self
    }
}
