use crate::columns::ColumnDefinition;
use once_cell::sync::Lazy;
use std::cmp::Ordering;

/// A position in a brokerage account.
#[derive(Debug, Clone, PartialEq)]
pub struct Holding {
    pub symbol: String,
    pub description: String,
    pub quantity: f64,
    pub price: f64,
    pub cost_basis: f64,
}

impl Holding {
    pub fn new(symbol: &str, description: &str, quantity: f64, price: f64, cost_basis: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            description: description.to_string(),
            quantity,
            price,
            cost_basis,
        }
    }

    pub fn market_value(&self) -> f64 {
        self.quantity * self.price
    }

    pub fn unrealized_gain(&self) -> f64 {
        self.market_value() - self.cost_basis
    }

    pub fn unrealized_gain_pct(&self) -> f64 {
        if self.cost_basis == 0.0 {
            0.0
        } else {
            self.unrealized_gain() / self.cost_basis * 100.0
        }
    }
}

/// Row-level action requested from the holdings table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoldingAction {
    Trade(String),
    ViewDetail(String),
}

static MOCK_HOLDINGS: Lazy<Vec<Holding>> = Lazy::new(|| {
    vec![
        Holding::new("AAPL", "Apple Inc.", 120.0, 189.84, 17_250.00),
        Holding::new("MSFT", "Microsoft Corp.", 64.0, 415.50, 21_120.00),
        Holding::new("VTI", "Vanguard Total Stock Market ETF", 210.0, 262.18, 48_300.00),
        Holding::new("BND", "Vanguard Total Bond Market ETF", 330.0, 72.41, 25_410.00),
        Holding::new("JNJ", "Johnson & Johnson", 85.0, 151.02, 14_110.00),
        Holding::new("NVDA", "NVIDIA Corp.", 40.0, 903.56, 9_800.00),
        Holding::new("SCHD", "Schwab US Dividend Equity ETF", 150.0, 78.92, 11_640.00),
        Holding::new("TSLA", "Tesla Inc.", 25.0, 174.60, 6_025.00),
    ]
});

/// Demo positions shown by the holdings table and dashboard widgets.
pub fn mock_holdings() -> &'static [Holding] {
    &MOCK_HOLDINGS
}

pub fn total_market_value(holdings: &[Holding]) -> f64 {
    holdings.iter().map(Holding::market_value).sum()
}

/// Default column set of the holdings table.
pub fn holdings_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("actions", "").pinned().unsortable(),
        ColumnDefinition::new("symbol", "Symbol").pinned(),
        ColumnDefinition::new("description", "Description"),
        ColumnDefinition::new("quantity", "Quantity"),
        ColumnDefinition::new("price", "Price"),
        ColumnDefinition::new("market_value", "Market Value"),
        ColumnDefinition::new("cost_basis", "Cost Basis"),
        ColumnDefinition::new("unrealized_gain", "Unrealized G/L"),
        ColumnDefinition::new("unrealized_gain_pct", "G/L %").hidden_by_default(),
    ]
}

/// Display text of a holding for a column id.
pub fn cell_text(holding: &Holding, column_id: &str) -> String {
    match column_id {
        "symbol" => holding.symbol.clone(),
        "description" => holding.description.clone(),
        "quantity" => format!("{:.0}", holding.quantity),
        "price" => format!("${:.2}", holding.price),
        "market_value" => format!("${:.2}", holding.market_value()),
        "cost_basis" => format!("${:.2}", holding.cost_basis),
        "unrealized_gain" => format!("{:+.2}", holding.unrealized_gain()),
        "unrealized_gain_pct" => format!("{:+.2}%", holding.unrealized_gain_pct()),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Search text plus an optional sort column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoldingsQuery {
    pub search: String,
    pub sort: Option<(String, SortDirection)>,
}

impl HoldingsQuery {
    /// Sort by `key`, flipping direction if it is already the sort key.
    pub fn sort_by(&mut self, key: &str) {
        self.sort = match self.sort.take() {
            Some((current, dir)) if current == key => Some((current, dir.toggled())),
            _ => Some((key.to_string(), SortDirection::Ascending)),
        };
    }
}

fn compare(a: &Holding, b: &Holding, key: &str) -> Option<Ordering> {
    let ord = match key {
        "symbol" => a.symbol.cmp(&b.symbol),
        "description" => a.description.to_lowercase().cmp(&b.description.to_lowercase()),
        "quantity" => a.quantity.total_cmp(&b.quantity),
        "price" => a.price.total_cmp(&b.price),
        "market_value" => a.market_value().total_cmp(&b.market_value()),
        "cost_basis" => a.cost_basis.total_cmp(&b.cost_basis),
        "unrealized_gain" => a.unrealized_gain().total_cmp(&b.unrealized_gain()),
        "unrealized_gain_pct" => a.unrealized_gain_pct().total_cmp(&b.unrealized_gain_pct()),
        _ => return None,
    };
    Some(ord)
}

/// Filter by case-insensitive search on symbol and description, then sort.
///
/// Unknown sort keys keep the filtered rows in input order.
pub fn apply_query<'a>(rows: &'a [Holding], query: &HoldingsQuery) -> Vec<&'a Holding> {
    let needle = query.search.trim().to_lowercase();
    let mut out: Vec<&Holding> = rows
        .iter()
        .filter(|h| {
            needle.is_empty()
                || h.symbol.to_lowercase().contains(&needle)
                || h.description.to_lowercase().contains(&needle)
        })
        .collect();
    if let Some((key, dir)) = &query.sort {
        out.sort_by(|a, b| {
            let ord = compare(a, b, key).unwrap_or(Ordering::Equal);
            match dir {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(rows: &[&Holding]) -> Vec<String> {
        rows.iter().map(|h| h.symbol.clone()).collect()
    }

    #[test]
    fn search_matches_symbol_or_description() {
        let query = HoldingsQuery {
            search: "vanguard".into(),
            sort: None,
        };
        let rows = apply_query(mock_holdings(), &query);
        assert_eq!(symbols(&rows), vec!["VTI", "BND"]);

        let query = HoldingsQuery {
            search: " nvda ".into(),
            sort: None,
        };
        assert_eq!(symbols(&apply_query(mock_holdings(), &query)), vec!["NVDA"]);
    }

    #[test]
    fn sort_by_toggles_direction() {
        let mut query = HoldingsQuery::default();
        query.sort_by("price");
        let asc = apply_query(mock_holdings(), &query);
        assert_eq!(asc.first().map(|h| h.symbol.as_str()), Some("BND"));
        query.sort_by("price");
        let desc = apply_query(mock_holdings(), &query);
        assert_eq!(desc.first().map(|h| h.symbol.as_str()), Some("NVDA"));
        query.sort_by("symbol");
        assert_eq!(query.sort, Some(("symbol".into(), SortDirection::Ascending)));
    }

    #[test]
    fn unknown_sort_key_keeps_order() {
        let query = HoldingsQuery {
            search: String::new(),
            sort: Some(("actions".into(), SortDirection::Descending)),
        };
        let rows = apply_query(mock_holdings(), &query);
        assert_eq!(rows.len(), mock_holdings().len());
        assert_eq!(rows[0].symbol, "AAPL");
    }

    #[test]
    fn every_sortable_column_has_cell_text() {
        let holding = &mock_holdings()[0];
        for column in holdings_columns() {
            if column.sort_key.is_some() {
                assert!(!cell_text(holding, &column.id).is_empty(), "{}", column.id);
            }
        }
    }

    #[test]
    fn gain_math() {
        let h = Holding::new("X", "", 10.0, 12.0, 100.0);
        assert!((h.unrealized_gain() - 20.0).abs() < 1e-9);
        assert!((h.unrealized_gain_pct() - 20.0).abs() < 1e-9);
    }
}
