use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use shared_config::AppConfig;

use crate::services::DataSyncService;

/// Manual trigger for the clients reconciliation run. The outcome is the
/// payload either way; a failed fetch shows up as `success: false`.
#[axum::debug_handler]
pub async fn sync_clients(State(config): State<Arc<AppConfig>>) -> Json<Value> {
    let service = DataSyncService::new(&config);
    let outcome = service.sync_clients().await;

    Json(json!({ "data": outcome }))
}

#[axum::debug_handler]
pub async fn sync_appointments(State(config): State<Arc<AppConfig>>) -> Json<Value> {
    let service = DataSyncService::new(&config);
    let outcome = service.sync_appointments().await;

    Json(json!({ "data": outcome }))
}
