use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn sync_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/sync/clients", post(sync_clients))
        .route("/sync/appointments", post(sync_appointments))
        .with_state(config)
}
