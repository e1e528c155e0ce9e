use crate::dashboard::layout::LayoutConfig;
use crate::drag::DEFAULT_DROP_ZONE_RATIO;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Log this crate at `debug` and let `RUST_LOG` override the filter.
    #[serde(default)]
    pub debug_logging: bool,
    /// Where layout preference files are written; see [`Settings::storage_dir`].
    #[serde(default)]
    pub storage_dir: Option<String>,
    /// Row capacity and width units for the home dashboard grid.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Share of a hovered item's width that counts as a before/after drop zone.
    #[serde(default = "default_drop_zone_ratio")]
    pub drop_zone_ratio: f32,
    /// Initial inner size of the main window in points.
    #[serde(default = "default_window_size")]
    pub window_size: Option<(f32, f32)>,
}

fn default_drop_zone_ratio() -> f32 {
    DEFAULT_DROP_ZONE_RATIO
}

fn default_window_size() -> Option<(f32, f32)> {
    Some((1200.0, 800.0))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            storage_dir: None,
            layout: LayoutConfig::default(),
            drop_zone_ratio: default_drop_zone_ratio(),
            window_size: default_window_size(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Directory for preference files, preferring the configured one.
    pub fn storage_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage_dir {
            return PathBuf::from(dir);
        }
        dirs_next::config_dir()
            .map(|dir| dir.join("wealth_dashboard"))
            .unwrap_or_else(|| PathBuf::from("prefs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"debug_logging": true}"#).unwrap();
        assert!(settings.debug_logging);
        assert_eq!(settings.layout, LayoutConfig::default());
        assert_eq!(settings.drop_zone_ratio, DEFAULT_DROP_ZONE_RATIO);
    }

    #[test]
    fn layout_units_are_configurable() {
        let settings: Settings =
            serde_json::from_str(r#"{"layout": {"row_capacity": 4.0, "units": {"one_half": 2.0}}}"#)
                .unwrap();
        assert_eq!(settings.layout.row_capacity, 4.0);
        assert_eq!(settings.layout.units.one_half, 2.0);
        assert_eq!(settings.layout.units.one_third, 1.0);
    }

    #[test]
    fn configured_storage_dir_wins() {
        let settings = Settings {
            storage_dir: Some("/tmp/prefs".into()),
            ..Default::default()
        };
        assert_eq!(settings.storage_dir(), PathBuf::from("/tmp/prefs"));
    }
}
