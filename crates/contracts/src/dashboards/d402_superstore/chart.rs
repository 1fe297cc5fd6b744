use serde::{Deserialize, Serialize};

/// What kind of chart a spec describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Single headline number (KPI card)
    Indicator,
    /// Lines with markers and area fill to zero
    LineArea,
    Bar,
    GroupedBar,
    Donut,
    Choropleth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Categories on the x axis
    #[default]
    Vertical,
    /// Categories on the y axis
    Horizontal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendHint {
    pub horizontal: bool,
    pub x: f64,
    pub y: f64,
}

/// Presentation intent that does not belong to any single series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub orientation: Orientation,
    pub show_legend: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<LegendHint>,
    /// Inner radius fraction for donuts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_mode: Option<String>,
    /// Continuous color scale name for choropleths
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_scale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo_scope: Option<String>,
    pub transparent_background: bool,
}

/// One data series. `categories`, `values` and (when present) `text` and
/// `hover_names` run in parallel.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    /// On-chart annotation per point
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hover_names: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    /// Per-slice colors for donuts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slice_colors: Vec<String>,
}

/// Renderer-agnostic chart description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Stable identifier, e.g. "monthly_trend"
    pub id: String,
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<Series>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_axis_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis_title: Option<String>,
    pub layout: LayoutHints,
}

impl ChartSpec {
    pub fn new(id: &str, kind: ChartKind, title: &str) -> Self {
        Self {
            id: id.to_string(),
            kind,
            title: title.to_string(),
            series: Vec::new(),
            x_axis_title: None,
            y_axis_title: None,
            layout: LayoutHints::default(),
        }
    }

    pub fn with_axes(mut self, x: &str, y: &str) -> Self {
        self.x_axis_title = Some(x.to_string());
        self.y_axis_title = Some(y.to_string());
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_layout(mut self, layout: LayoutHints) -> Self {
        self.layout = layout;
        self
    }

    /// Series lookup by name, for consumers that pick a metric out of a
    /// multi-series chart (e.g. the Sales bars of a grouped bar chart).
    pub fn series_named(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }
}
