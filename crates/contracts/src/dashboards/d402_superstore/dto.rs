use serde::{Deserialize, Serialize};

use super::chart::ChartSpec;

/// Query for the superstore dashboard: `?year=2016`, or no filter at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardRequest {
    #[serde(default)]
    pub year: Option<i32>,
}

/// Full dashboard payload handed to the rendering side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Applied filter, `None` for all years
    pub year: Option<i32>,
    /// Years present in the dataset, ascending (for the year picker)
    pub available_years: Vec<i32>,
    pub charts: Vec<ChartSpec>,
}
