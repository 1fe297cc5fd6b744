use contracts::dashboards::d402_superstore::{
    AggregateBundle, KpiTotals, MonthlyTotals, QuantityTotal, SalesProfitTotal, SalesTotal,
    StateSales, TransactionRecord,
};
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::geo::state_code;

/// How many customers the ranking keeps.
pub const TOP_CUSTOMERS: usize = 5;

#[derive(Debug, Default, Clone, Copy)]
struct SalesProfit {
    sales: f64,
    profit: f64,
}

/// Bucket rows by `key` and fold each bucket with `fold`.
///
/// Buckets iterate in ascending key order; rows are folded in input order.
fn group_by<'a, K, A, F, G>(rows: &[&'a TransactionRecord], key: F, fold: G) -> BTreeMap<K, A>
where
    K: Ord,
    A: Default,
    F: Fn(&'a TransactionRecord) -> K,
    G: Fn(&mut A, &TransactionRecord),
{
    let mut groups: BTreeMap<K, A> = BTreeMap::new();
    for row in rows {
        fold(groups.entry(key(*row)).or_default(), *row);
    }
    groups
}

fn add_sales_profit(acc: &mut SalesProfit, r: &TransactionRecord) {
    acc.sales += r.line.sales;
    acc.profit += r.line.profit;
}

fn add_quantity(acc: &mut i64, r: &TransactionRecord) {
    *acc += r.line.quantity;
}

fn filter_by_year(records: &[TransactionRecord], year: Option<i32>) -> Vec<&TransactionRecord> {
    records
        .iter()
        .filter(|r| year.map_or(true, |y| r.period.year == y))
        .collect()
}

/// Computes every dashboard view over the records of `year` (all records when `None`).
///
/// Pure: the input is never modified and equal inputs give equal bundles.
pub fn aggregate(records: &[TransactionRecord], year: Option<i32>) -> AggregateBundle {
    let rows = filter_by_year(records, year);
    tracing::debug!(
        "Superstore: aggregating {} of {} records (year filter {:?})",
        rows.len(),
        records.len(),
        year
    );

    AggregateBundle {
        year,
        kpis: kpi_totals(&rows),
        monthly_trend: monthly_trend(&rows),
        states: state_sales(&rows),
        regions: region_sales(&rows),
        categories: category_totals(&rows),
        sub_categories: sub_category_totals(&rows),
        segments: quantity_by(&rows, |r| r.line.segment.as_str()),
        ship_modes: quantity_by(&rows, |r| r.line.ship_mode.as_str()),
        top_customers: top_customers(&rows, TOP_CUSTOMERS),
    }
}

/// Distinct order years, ascending.
pub fn available_years(records: &[TransactionRecord]) -> Vec<i32> {
    records
        .iter()
        .map(|r| r.period.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn kpi_totals(rows: &[&TransactionRecord]) -> KpiTotals {
    rows.iter().fold(KpiTotals::default(), |mut acc, r| {
        acc.sales += r.line.sales;
        acc.discount += r.line.discount;
        acc.profit += r.line.profit;
        acc.quantity += r.line.quantity;
        acc
    })
}

/// Keyed on (month_number, month_name), so BTreeMap order is calendar order.
fn monthly_trend(rows: &[&TransactionRecord]) -> Vec<MonthlyTotals> {
    group_by(
        rows,
        |r| (r.period.month_number, r.period.month_name.as_str()),
        add_sales_profit,
    )
    .into_iter()
    .map(|((month_number, month_name), acc)| MonthlyTotals {
        month_number,
        month_name: month_name.to_string(),
        sales: acc.sales,
        profit: acc.profit,
    })
    .collect()
}

fn state_sales(rows: &[&TransactionRecord]) -> Vec<StateSales> {
    group_by(rows, |r| r.line.state.as_str(), |acc: &mut f64, r| {
        *acc += r.line.sales
    })
    .into_iter()
    .map(|(state, sales)| {
        let code = state_code(state);
        if code.is_none() {
            tracing::warn!("Superstore: no map code for state '{}'", state);
        }
        StateSales {
            state: state.to_string(),
            code: code.map(str::to_string),
            sales,
        }
    })
    .collect()
}

fn region_sales(rows: &[&TransactionRecord]) -> Vec<SalesTotal> {
    group_by(rows, |r| r.line.region.as_str(), |acc: &mut f64, r| {
        *acc += r.line.sales
    })
    .into_iter()
    .map(|(key, sales)| SalesTotal {
        key: key.to_string(),
        sales,
    })
    .collect()
}

fn category_totals(rows: &[&TransactionRecord]) -> Vec<SalesProfitTotal> {
    sales_profit_by(rows, |r| r.line.category.as_str())
}

/// Ascending by sales; equal sales keep key order.
fn sub_category_totals(rows: &[&TransactionRecord]) -> Vec<SalesProfitTotal> {
    let mut totals = sales_profit_by(rows, |r| r.line.sub_category.as_str());
    totals.sort_by(|a, b| a.sales.total_cmp(&b.sales));
    totals
}

fn sales_profit_by<'a, F>(rows: &[&'a TransactionRecord], key: F) -> Vec<SalesProfitTotal>
where
    F: Fn(&'a TransactionRecord) -> &'a str,
{
    group_by(rows, key, add_sales_profit)
        .into_iter()
        .map(|(key, acc)| SalesProfitTotal {
            key: key.to_string(),
            sales: acc.sales,
            profit: acc.profit,
        })
        .collect()
}

fn quantity_by<'a, F>(rows: &[&'a TransactionRecord], key: F) -> Vec<QuantityTotal>
where
    F: Fn(&'a TransactionRecord) -> &'a str,
{
    group_by(rows, key, add_quantity)
        .into_iter()
        .map(|(key, quantity)| QuantityTotal {
            key: key.to_string(),
            quantity,
        })
        .collect()
}

/// The `limit` customers with the largest quantity, returned ascending.
///
/// Stable sort over name order, so on a tie at the cut the names that sort
/// later are kept.
fn top_customers(rows: &[&TransactionRecord], limit: usize) -> Vec<QuantityTotal> {
    let mut totals = quantity_by(rows, |r| r.line.customer_name.as_str());
    totals.sort_by_key(|t| t.quantity);
    let start = totals.len().saturating_sub(limit);
    totals.split_off(start)
}
