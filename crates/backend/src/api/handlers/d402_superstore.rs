use axum::{extract::Query, http::StatusCode, Json};
use contracts::dashboards::d402_superstore::{AggregateBundle, DashboardRequest, DashboardResponse};

use crate::dashboards::d402_superstore::service;

/// GET /api/d402/dashboard?year=2016
pub async fn get_dashboard(
    Query(request): Query<DashboardRequest>,
) -> Result<Json<DashboardResponse>, StatusCode> {
    tracing::info!("D402 Dashboard: building charts for year {:?}", request.year);

    match service::get_dashboard(&request) {
        Ok(response) => {
            tracing::info!("D402 Dashboard: returning {} charts", response.charts.len());
            Ok(Json(response))
        }
        Err(e) => {
            tracing::error!("D402 Dashboard: failed to build dashboard: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d402/bundle?year=2016
pub async fn get_bundle(
    Query(request): Query<DashboardRequest>,
) -> Result<Json<AggregateBundle>, StatusCode> {
    match service::get_bundle(&request) {
        Ok(bundle) => Ok(Json(bundle)),
        Err(e) => {
            tracing::error!("D402 Dashboard: failed to aggregate: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/d402/years
pub async fn get_available_years() -> Result<Json<Vec<i32>>, StatusCode> {
    match service::get_available_years() {
        Ok(years) => {
            tracing::info!("D402 Dashboard: returning {} available years", years.len());
            Ok(Json(years))
        }
        Err(e) => {
            tracing::error!("D402 Dashboard: failed to get years: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
