use serde::{Deserialize, Serialize};

fn default_row_capacity() -> f32 {
    3.0
}

/// Fractional width of a dashboard widget within a row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum WidgetWidth {
    #[default]
    #[serde(rename = "third")]
    OneThird,
    #[serde(rename = "half")]
    OneHalf,
    #[serde(rename = "full")]
    Full,
}

impl WidgetWidth {
    pub const ALL: [WidgetWidth; 3] = [WidgetWidth::OneThird, WidgetWidth::OneHalf, WidgetWidth::Full];

    pub fn label(&self) -> &'static str {
        match self {
            WidgetWidth::OneThird => "1/3",
            WidgetWidth::OneHalf => "1/2",
            WidgetWidth::Full => "Full",
        }
    }

    /// Cycle third -> half -> full -> third.
    pub fn next(self) -> Self {
        match self {
            WidgetWidth::OneThird => WidgetWidth::OneHalf,
            WidgetWidth::OneHalf => WidgetWidth::Full,
            WidgetWidth::Full => WidgetWidth::OneThird,
        }
    }
}

/// Mapping from [`WidgetWidth`] to packing units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WidthUnits {
    #[serde(default = "WidthUnits::default_one_third")]
    pub one_third: f32,
    #[serde(default = "WidthUnits::default_one_half")]
    pub one_half: f32,
    #[serde(default = "WidthUnits::default_full")]
    pub full: f32,
}

impl WidthUnits {
    fn default_one_third() -> f32 {
        1.0
    }

    fn default_one_half() -> f32 {
        1.5
    }

    fn default_full() -> f32 {
        3.0
    }

    pub fn units(&self, width: WidgetWidth) -> f32 {
        match width {
            WidgetWidth::OneThird => self.one_third,
            WidgetWidth::OneHalf => self.one_half,
            WidgetWidth::Full => self.full,
        }
    }
}

impl Default for WidthUnits {
    fn default() -> Self {
        Self {
            one_third: Self::default_one_third(),
            one_half: Self::default_one_half(),
            full: Self::default_full(),
        }
    }
}

/// Row capacity and the unit table used by [`calculate_layout`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct LayoutConfig {
    #[serde(default = "default_row_capacity")]
    pub row_capacity: f32,
    #[serde(default)]
    pub units: WidthUnits,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_capacity: default_row_capacity(),
            units: WidthUnits::default(),
        }
    }
}

impl LayoutConfig {
    pub fn units(&self, width: WidgetWidth) -> f32 {
        self.units.units(width)
    }

    /// Share of a row taken by `width`, clamped to `0.0..=1.0`.
    pub fn fraction(&self, width: WidgetWidth) -> f32 {
        if self.row_capacity <= 0.0 {
            return 1.0;
        }
        (self.units(width) / self.row_capacity).clamp(0.0, 1.0)
    }
}

/// Anything the layout calculator can place into a row.
pub trait Packable {
    fn width(&self) -> WidgetWidth;
    fn set_row(&mut self, row: usize);
}

/// A widget's position on the home dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetPlacement {
    pub id: String,
    pub title: String,
    pub width: WidgetWidth,
    pub row: usize,
}

impl WidgetPlacement {
    pub fn new(id: &str, title: &str, width: WidgetWidth) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            width,
            row: 0,
        }
    }
}

impl Packable for WidgetPlacement {
    fn width(&self) -> WidgetWidth {
        self.width
    }

    fn set_row(&mut self, row: usize) {
        self.row = row;
    }
}

/// Greedily pack `items` into rows in their current order.
///
/// A new row is started whenever the item would overflow a row that already
/// holds something, so an oversized item still gets a row of its own.
pub fn calculate_layout<T: Packable>(items: &mut [T], cfg: &LayoutConfig) {
    let mut current_row = 0;
    let mut width_sum = 0.0_f32;
    for item in items.iter_mut() {
        let units = cfg.units(item.width());
        if width_sum > 0.0 && width_sum + units > cfg.row_capacity {
            current_row += 1;
            width_sum = 0.0;
        }
        item.set_row(current_row);
        width_sum += units;
    }
}

/// Group consecutive placements sharing a row.
pub fn rows(placements: &[WidgetPlacement]) -> Vec<&[WidgetPlacement]> {
    let mut out = Vec::new();
    let mut start = 0;
    for idx in 1..=placements.len() {
        if idx == placements.len() || placements[idx].row != placements[start].row {
            if start < idx {
                out.push(&placements[start..idx]);
            }
            start = idx;
        }
    }
    out
}
