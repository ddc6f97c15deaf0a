use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;
use sync_cell::services::outbound::{OutboundSyncService, SyncAction};

use crate::models::{
    AppointmentSearchQuery, CancelAppointmentQuery, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use crate::services::AppointmentService;

#[axum::debug_handler]
pub async fn list_appointments(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<AppointmentSearchQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointments = service
        .list_appointments(&query, Utc::now())
        .await
        .map_err(AppError::from)?;
    let count = appointments.len();

    Ok(Json(json!({
        "data": appointments,
        "meta": {
            "page": query.page(),
            "per_page": query.per_page(),
            "count": count
        }
    })))
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let appointment = service
        .get_appointment(appointment_id)
        .await
        .map_err(AppError::from)?;

    Ok(Json(json!({ "data": appointment })))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(client_id): Path<Uuid>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AppointmentService::new(&config);

    let created = service
        .create_for_client(client_id, request)
        .await
        .map_err(AppError::from)?;

    // The mutation is committed; a failed push is logged and reported by
    // the outbound service, never rolled back.
    let outbound = OutboundSyncService::new(&config);
    outbound
        .sync_appointment(
            &created.appointment,
            &created.client_external_id,
            SyncAction::Create,
        )
        .await;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "data": created.appointment,
            "message": "Appointment created successfully"
        })),
    ))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    Json(request): Json<UpdateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let updated = service
        .update_appointment(appointment_id, request)
        .await
        .map_err(AppError::from)?;

    let outbound = OutboundSyncService::new(&config);
    outbound
        .sync_appointment(
            &updated.appointment,
            &updated.client_external_id,
            SyncAction::Update,
        )
        .await;

    Ok(Json(json!({
        "data": updated.appointment,
        "message": "Appointment updated successfully"
    })))
}

/// DELETE cancels rather than destroys. The local transition commits
/// first; the outbound push only affects the user-facing message.
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(config): State<Arc<AppConfig>>,
    Path(appointment_id): Path<Uuid>,
    Query(query): Query<CancelAppointmentQuery>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(&config);

    let cancelled = service
        .cancel_appointment(appointment_id, query.cancellation_reason, Utc::now())
        .await
        .map_err(AppError::from)?;

    let outbound = OutboundSyncService::new(&config);
    let sync_result = outbound
        .sync_appointment(
            &cancelled.appointment,
            &cancelled.client_external_id,
            SyncAction::Cancel,
        )
        .await;

    let message = if sync_result.success {
        "Appointment cancelled successfully"
    } else {
        "Appointment cancelled locally, but external API sync failed"
    };

    Ok(Json(json!({
        "data": cancelled.appointment,
        "message": message
    })))
}
