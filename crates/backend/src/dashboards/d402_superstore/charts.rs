use contracts::dashboards::d402_superstore::{
    AggregateBundle, ChartKind, ChartSpec, LayoutHints, LegendHint, Orientation, QuantityTotal,
    SalesProfitTotal, Series,
};

use crate::shared::format::format_currency_label;

/// Fixed colors. A metric keeps its color in every chart of a dashboard.
pub mod palette {
    pub const SALES: &str = "#264653";
    pub const PROFIT: &str = "#2a9d8f";
    pub const DISCOUNT: &str = "#f4a261";
    pub const QUANTITY: &str = "#e76f51";

    /// Area fills under the monthly lines
    pub const SALES_FILL: &str = "#00b4d8";
    pub const PROFIT_FILL: &str = "#e9c46a";

    /// Donut slices, cycled
    pub const CATEGORICAL: [&str; 5] = ["#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"];

    pub const MAP_SCALE: &str = "sunset";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Sales,
    Profit,
    Discount,
    Quantity,
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Sales => "Sales",
            Metric::Profit => "Profit",
            Metric::Discount => "Discount",
            Metric::Quantity => "Quantity",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Metric::Sales => palette::SALES,
            Metric::Profit => palette::PROFIT,
            Metric::Discount => palette::DISCOUNT,
            Metric::Quantity => palette::QUANTITY,
        }
    }
}

const HOVER_UNIFIED: &str = "x unified";
const DONUT_HOLE: f64 = 0.4;

fn metric_series(metric: Metric, categories: Vec<String>, values: Vec<f64>) -> Series {
    Series {
        name: metric.name().to_string(),
        categories,
        values,
        color: Some(metric.color().to_string()),
        ..Default::default()
    }
}

fn slice_colors(n: usize) -> Vec<String> {
    palette::CATEGORICAL
        .iter()
        .cycle()
        .take(n)
        .map(|c| c.to_string())
        .collect()
}

fn base_layout(height: u32) -> LayoutHints {
    LayoutHints {
        height: Some(height),
        hover_mode: Some(HOVER_UNIFIED.to_string()),
        transparent_background: true,
        ..Default::default()
    }
}

fn horizontal_legend(x: f64, y: f64) -> Option<LegendHint> {
    Some(LegendHint {
        horizontal: true,
        x,
        y,
    })
}

/// Turns a bundle into chart specs: four KPI cards, then one chart per view.
pub fn build(bundle: &AggregateBundle) -> Vec<ChartSpec> {
    let mut specs = kpi_cards(bundle);
    specs.push(monthly_trend_chart(bundle));
    specs.push(sales_map_chart(bundle));
    specs.push(region_donut(bundle));
    specs.push(category_chart(&bundle.categories));
    specs.push(sub_category_chart(&bundle.sub_categories));
    specs.push(segment_chart(&bundle.segments));
    specs.push(ship_mode_donut(&bundle.ship_modes));
    specs.push(top_customers_chart(&bundle.top_customers));
    specs
}

fn kpi_cards(bundle: &AggregateBundle) -> Vec<ChartSpec> {
    let kpis = &bundle.kpis;
    [
        ("kpi_sales", "Sales", Metric::Sales, kpis.sales, "$"),
        ("kpi_profit", "Profit", Metric::Profit, kpis.profit, "$"),
        ("kpi_discount", "Discount", Metric::Discount, kpis.discount, ""),
        (
            "kpi_quantity",
            "Total Quantities",
            Metric::Quantity,
            kpis.quantity as f64,
            "",
        ),
    ]
    .into_iter()
    .map(|(id, title, metric, value, prefix)| {
        let mut series = metric_series(metric, Vec::new(), vec![value]);
        series.text = vec![format_currency_label(value, prefix)];
        ChartSpec::new(id, ChartKind::Indicator, title).with_series(series)
    })
    .collect()
}

fn monthly_trend_chart(bundle: &AggregateBundle) -> ChartSpec {
    let months: Vec<String> = bundle
        .monthly_trend
        .iter()
        .map(|m| m.month_name.clone())
        .collect();

    let line = |metric: Metric, fill: &str, values: Vec<f64>| {
        let mut series = metric_series(metric, months.clone(), values);
        series.text = series
            .values
            .iter()
            .map(|v| format_currency_label(*v, ""))
            .collect();
        series.fill_color = Some(fill.to_string());
        series
    };

    let sales = line(
        Metric::Sales,
        palette::SALES_FILL,
        bundle.monthly_trend.iter().map(|m| m.sales).collect(),
    );
    let profit = line(
        Metric::Profit,
        palette::PROFIT_FILL,
        bundle.monthly_trend.iter().map(|m| m.profit).collect(),
    );

    ChartSpec::new("monthly_trend", ChartKind::LineArea, "Monthly Sales and Profit")
        .with_axes("Month", "Sales & Profit ($)")
        .with_series(sales)
        .with_series(profit)
        .with_layout(LayoutHints {
            show_legend: true,
            legend: horizontal_legend(0.8, -0.15),
            ..base_layout(400)
        })
}

/// Only states with a code are placed on the map.
fn sales_map_chart(bundle: &AggregateBundle) -> ChartSpec {
    let (mut codes, mut names, mut values) = (Vec::new(), Vec::new(), Vec::new());
    for state in bundle.plottable_states() {
        if let Some(code) = &state.code {
            codes.push(code.clone());
            names.push(state.state.clone());
            values.push(state.sales);
        }
    }

    let series = Series {
        name: "Total Sales".to_string(),
        categories: codes,
        values,
        hover_names: names,
        ..Default::default()
    };

    ChartSpec::new("sales_map", ChartKind::Choropleth, "Sales by State in the USA")
        .with_series(series)
        .with_layout(LayoutHints {
            color_scale: Some(palette::MAP_SCALE.to_string()),
            geo_scope: Some("usa".to_string()),
            ..base_layout(550)
        })
}

fn donut(id: &str, title: &str, mut series: Series, height: u32) -> ChartSpec {
    series.slice_colors = slice_colors(series.values.len());
    ChartSpec::new(id, ChartKind::Donut, title)
        .with_series(series)
        .with_layout(LayoutHints {
            height: Some(height),
            show_legend: true,
            hole: Some(DONUT_HOLE),
            transparent_background: true,
            ..Default::default()
        })
}

fn region_donut(bundle: &AggregateBundle) -> ChartSpec {
    let series = metric_series(
        Metric::Sales,
        bundle.regions.iter().map(|r| r.key.clone()).collect(),
        bundle.regions.iter().map(|r| r.sales).collect(),
    );
    donut("sales_by_region", "Sales by Region", series, 420)
}

fn sales_profit_series(rows: &[SalesProfitTotal]) -> (Series, Series) {
    let keys: Vec<String> = rows.iter().map(|r| r.key.clone()).collect();
    (
        metric_series(
            Metric::Sales,
            keys.clone(),
            rows.iter().map(|r| r.sales).collect(),
        ),
        metric_series(Metric::Profit, keys, rows.iter().map(|r| r.profit).collect()),
    )
}

fn category_chart(rows: &[SalesProfitTotal]) -> ChartSpec {
    let (sales, profit) = sales_profit_series(rows);
    ChartSpec::new(
        "category_sales_profit",
        ChartKind::GroupedBar,
        "Sales and Profit by Category",
    )
    .with_axes("Category", "Total Sales and Profit")
    .with_series(sales)
    .with_series(profit)
    .with_layout(LayoutHints {
        show_legend: true,
        legend: horizontal_legend(0.5, -0.15),
        ..base_layout(300)
    })
}

/// Rows arrive smallest first, so the largest bar renders on top.
fn sub_category_chart(rows: &[SalesProfitTotal]) -> ChartSpec {
    let (sales, profit) = sales_profit_series(rows);
    ChartSpec::new(
        "sub_category_sales_profit",
        ChartKind::GroupedBar,
        "Sales and Profit by Sub-Category",
    )
    .with_axes("Total Sales and Profit", "Sub-Category")
    .with_series(sales)
    .with_series(profit)
    .with_layout(LayoutHints {
        orientation: Orientation::Horizontal,
        ..base_layout(600)
    })
}

fn quantity_series(name: &str, rows: &[QuantityTotal]) -> Series {
    let mut series = metric_series(
        Metric::Quantity,
        rows.iter().map(|r| r.key.clone()).collect(),
        rows.iter().map(|r| r.quantity as f64).collect(),
    );
    series.name = name.to_string();
    series.text = rows.iter().map(|r| r.quantity.to_string()).collect();
    series
}

fn segment_chart(rows: &[QuantityTotal]) -> ChartSpec {
    ChartSpec::new(
        "orders_by_segment",
        ChartKind::Bar,
        "Orders wrt Customer Segment",
    )
    .with_axes("Segment", "Order Qty")
    .with_series(quantity_series("Orders", rows))
    .with_layout(base_layout(450))
}

fn ship_mode_donut(rows: &[QuantityTotal]) -> ChartSpec {
    let mut series = quantity_series("Orders", rows);
    series.text.clear();
    donut(
        "orders_by_ship_mode",
        "Order Breakdown w.r.t Shipping Mode",
        series,
        450,
    )
}

fn top_customers_chart(rows: &[QuantityTotal]) -> ChartSpec {
    ChartSpec::new("top_customers", ChartKind::Bar, "Top Customers")
        .with_axes("Ordered Quantity", "Customers Name")
        .with_series(quantity_series("Quantity", rows))
        .with_layout(LayoutHints {
            orientation: Orientation::Horizontal,
            ..base_layout(420)
        })
}
