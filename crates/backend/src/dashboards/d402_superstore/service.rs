use anyhow::Result;
use contracts::dashboards::d402_superstore::{
    AggregateBundle, DashboardRequest, DashboardResponse, TransactionRecord,
};

use super::{aggregation, charts};
use crate::shared::data::get_dataset;

/// Aggregated views for the requested year over the shared dataset.
pub fn get_bundle(request: &DashboardRequest) -> Result<AggregateBundle> {
    let dataset = get_dataset()?;
    Ok(aggregation::aggregate(dataset.records(), request.year))
}

/// Chart specs for the requested year over the shared dataset.
pub fn get_dashboard(request: &DashboardRequest) -> Result<DashboardResponse> {
    let dataset = get_dataset()?;
    Ok(build_dashboard(dataset.records(), request.year))
}

pub fn get_available_years() -> Result<Vec<i32>> {
    let dataset = get_dataset()?;
    Ok(aggregation::available_years(dataset.records()))
}

/// Filter, aggregate and chart `records` in one go.
pub fn build_dashboard(records: &[TransactionRecord], year: Option<i32>) -> DashboardResponse {
    let bundle = aggregation::aggregate(records, year);
    if bundle.is_empty() {
        tracing::info!("Superstore: no records for year filter {:?}", year);
    }

    DashboardResponse {
        year,
        available_years: aggregation::available_years(records),
        charts: charts::build(&bundle),
    }
}
