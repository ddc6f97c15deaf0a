use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use client_cell::router::client_routes;
use shared_config::AppConfig;
use sync_cell::router::sync_routes;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    let api_v1 = Router::new()
        .merge(client_routes(state.clone()))
        .merge(appointment_routes(state.clone()))
        .merge(sync_routes(state));

    Router::new()
        .route("/", get(|| async { "Cadence Scheduling API is running!" }))
        .nest("/api/v1", api_v1)
}
