use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;
use shared_models::appointment::{validate_appointment_fields, Appointment, AppointmentStatus};

use crate::models::{
    AppointmentError, AppointmentSearchQuery, AppointmentWithClient, CreateAppointmentRequest,
    UpdateAppointmentRequest,
};
use crate::services::lifecycle::{AppointmentLifecycleService, DEFAULT_CANCELLATION_REASON};

pub struct AppointmentService {
    store: StoreClient,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    pub async fn list_appointments(
        &self,
        query: &AppointmentSearchQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let offset = (query.page() - 1) * query.per_page();
        let mut path = format!(
            "/rest/v1/appointments?order=scheduled_at.asc&limit={}&offset={}",
            query.per_page(),
            offset
        );

        if let Some(status) = query.status {
            path.push_str(&format!("&status=eq.{}", status));
        }

        if query.upcoming == Some(true) {
            path.push_str(&format!(
                "&scheduled_at=gt.{}&status=eq.{}",
                urlencoding::encode(&now.to_rfc3339()),
                AppointmentStatus::Scheduled
            ));
        }

        debug!("Listing appointments: {}", path);

        self.store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::Store(e.to_string()))
    }

    pub async fn get_appointment(&self, id: Uuid) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);

        let result: Vec<Appointment> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::Store(e.to_string()))?;

        result.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    pub async fn create_for_client(
        &self,
        client_id: Uuid,
        request: CreateAppointmentRequest,
    ) -> Result<AppointmentWithClient, AppointmentError> {
        let client_external_id = self.client_external_id(client_id).await?;

        let errors = validate_appointment_fields(&request.appointment_type);
        if !errors.is_empty() {
            return Err(AppointmentError::Validation(errors.join(", ")));
        }

        let status = request.status.unwrap_or_default();
        let now = Utc::now();

        let mut appointment_data = json!({
            "external_id": Uuid::new_v4().to_string(),
            "client_id": client_id,
            "appointment_type": request.appointment_type,
            "scheduled_at": request.scheduled_at.to_rfc3339(),
            "status": status.to_string(),
            "notes": request.notes,
            "cancelled_at": null,
            "cancellation_reason": null,
            "created_at": now.to_rfc3339(),
            "updated_at": now.to_rfc3339()
        });

        // A record born cancelled still satisfies the invariant.
        if status == AppointmentStatus::Cancelled {
            appointment_data["cancelled_at"] = json!(now.to_rfc3339());
            appointment_data["cancellation_reason"] = json!(DEFAULT_CANCELLATION_REASON);
        }

        let result: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(appointment_data),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::Store(e.to_string()))?;

        let appointment = result
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::Store("Failed to create appointment".to_string()))?;

        debug!("Created appointment {}", appointment.external_id);

        Ok(AppointmentWithClient {
            appointment,
            client_external_id,
        })
    }

    pub async fn update_appointment(
        &self,
        id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<AppointmentWithClient, AppointmentError> {
        let current = self.get_appointment(id).await?;

        let appointment_type = request
            .appointment_type
            .as_deref()
            .unwrap_or(&current.appointment_type);
        let errors = validate_appointment_fields(appointment_type);
        if !errors.is_empty() {
            return Err(AppointmentError::Validation(errors.join(", ")));
        }

        let mut update_data = serde_json::Map::new();
        if let Some(appointment_type) = request.appointment_type {
            update_data.insert("appointment_type".to_string(), json!(appointment_type));
        }
        if let Some(scheduled_at) = request.scheduled_at {
            update_data.insert("scheduled_at".to_string(), json!(scheduled_at.to_rfc3339()));
        }
        if let Some(notes) = request.notes {
            update_data.insert("notes".to_string(), json!(notes));
        }

        // Status changes through this path are not gated by the lifecycle
        // machine, but the cancellation-field invariant still holds.
        if let Some(status) = request.status {
            update_data.insert("status".to_string(), json!(status.to_string()));
            if status == AppointmentStatus::Cancelled {
                if current.status != AppointmentStatus::Cancelled {
                    update_data.insert("cancelled_at".to_string(), json!(Utc::now().to_rfc3339()));
                    update_data.insert(
                        "cancellation_reason".to_string(),
                        json!(request
                            .cancellation_reason
                            .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string())),
                    );
                }
            } else {
                update_data.insert("cancelled_at".to_string(), Value::Null);
                update_data.insert("cancellation_reason".to_string(), Value::Null);
            }
        }

        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let appointment = self.patch_appointment(id, Value::Object(update_data)).await?;
        let client_external_id = self.client_external_id(appointment.client_id).await?;

        Ok(AppointmentWithClient {
            appointment,
            client_external_id,
        })
    }

    /// Guarded cancellation. The lifecycle service validates the
    /// transition and produces the complete field set, written as a
    /// single update.
    pub async fn cancel_appointment(
        &self,
        id: Uuid,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<AppointmentWithClient, AppointmentError> {
        let current = self.get_appointment(id).await?;

        let update = self.lifecycle.cancel(&current, reason, now)?;

        let update_data = json!({
            "status": update.status.to_string(),
            "cancelled_at": update.cancelled_at.to_rfc3339(),
            "cancellation_reason": update.cancellation_reason,
            "updated_at": now.to_rfc3339()
        });

        let appointment = self.patch_appointment(id, update_data).await?;
        let client_external_id = self.client_external_id(appointment.client_id).await?;

        Ok(AppointmentWithClient {
            appointment,
            client_external_id,
        })
    }

    async fn patch_appointment(
        &self,
        id: Uuid,
        update_data: Value,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", id);

        let result: Vec<Appointment> = self
            .store
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(update_data),
                Some(representation_headers()),
            )
            .await
            .map_err(|e| AppointmentError::Store(e.to_string()))?;

        result.into_iter().next().ok_or(AppointmentError::NotFound)
    }

    async fn client_external_id(&self, client_id: Uuid) -> Result<String, AppointmentError> {
        let path = format!(
            "/rest/v1/clients?id=eq.{}&select=id,external_id",
            client_id
        );

        let result: Vec<Value> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| AppointmentError::Store(e.to_string()))?;

        result
            .first()
            .and_then(|row| row.get("external_id"))
            .and_then(|value| value.as_str())
            .map(|s| s.to_string())
            .ok_or(AppointmentError::ClientNotFound)
    }
}

fn representation_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("Prefer", HeaderValue::from_static("return=representation"));
    headers
}
