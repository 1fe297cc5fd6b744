use serde::{Deserialize, Serialize};

/// Overall totals across the filtered records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiTotals {
    pub sales: f64,
    pub discount: f64,
    pub profit: f64,
    pub quantity: i64,
}

/// Sales and profit summed for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month_number: u32,
    pub month_name: String,
    pub sales: f64,
    pub profit: f64,
}

/// Sales summed for one state, with its map code when the state is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSales {
    pub state: String,
    /// `None` when the name is not in the state registry
    pub code: Option<String>,
    pub sales: f64,
}

impl StateSales {
    /// Whether this row can be drawn on a map.
    pub fn is_plottable(&self) -> bool {
        self.code.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesTotal {
    pub key: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesProfitTotal {
    pub key: String,
    pub sales: f64,
    pub profit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityTotal {
    pub key: String,
    pub quantity: i64,
}

/// Every aggregated view computed for one (optional) year filter.
///
/// Ordering per view:
/// - `monthly_trend`: ascending month number
/// - `sub_categories`: ascending sales
/// - `top_customers`: ascending quantity, at most five rows
/// - everything else: ascending grouping key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateBundle {
    pub year: Option<i32>,
    pub kpis: KpiTotals,
    pub monthly_trend: Vec<MonthlyTotals>,
    pub states: Vec<StateSales>,
    pub regions: Vec<SalesTotal>,
    pub categories: Vec<SalesProfitTotal>,
    pub sub_categories: Vec<SalesProfitTotal>,
    pub segments: Vec<QuantityTotal>,
    pub ship_modes: Vec<QuantityTotal>,
    pub top_customers: Vec<QuantityTotal>,
}

impl AggregateBundle {
    /// States that have a map code, in rollup order.
    pub fn plottable_states(&self) -> impl Iterator<Item = &StateSales> {
        self.states.iter().filter(|s| s.is_plottable())
    }

    /// True when no record matched the filter.
    pub fn is_empty(&self) -> bool {
        self.monthly_trend.is_empty()
    }
}
