use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::shared::logger::request_logger;

/// Every application route, wrapped in request logging and CORS
pub fn configure_routes() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // D402 Superstore dashboard
        .route(
            "/api/d402/years",
            get(handlers::d402_superstore::get_available_years),
        )
        .route(
            "/api/d402/bundle",
            get(handlers::d402_superstore::get_bundle),
        )
        .route(
            "/api/d402/dashboard",
            get(handlers::d402_superstore::get_dashboard),
        )
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_build() {
        let _router: Router = configure_routes();
    }
}
