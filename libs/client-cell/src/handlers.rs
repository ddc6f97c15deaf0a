use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{ClientSearchQuery, CreateClientRequest, UpdateClientRequest};
use crate::services::ClientService;

#[axum::debug_handler]
pub async fn list_clients(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<ClientSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let clients = service.list_clients(&query).await.map_err(AppError::from)?;
    let count = clients.len();

    Ok(Json(json!({
        "data": clients,
        "meta": {
            "page": query.page(),
            "per_page": query.per_page(),
            "count": count
        }
    })))
}

#[axum::debug_handler]
pub async fn get_client(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let client = service.get_client(client_id).await.map_err(AppError::from)?;

    Ok(Json(json!({ "data": client })))
}

#[axum::debug_handler]
pub async fn create_client(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = ClientService::new(&config);

    let client = service.create_client(request).await.map_err(AppError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "data": client,
            "message": "Client created successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn update_client(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
    Json(request): Json<UpdateClientRequest>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    let client = service
        .update_client(client_id, request)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({
        "data": client,
        "message": "Client updated successfully"
    })))
}

#[axum::debug_handler]
pub async fn delete_client(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = ClientService::new(&config);

    service.delete_client(client_id).await.map_err(AppError::from)?;

    Ok(Json(json!({ "message": "Client deleted successfully" })))
}
