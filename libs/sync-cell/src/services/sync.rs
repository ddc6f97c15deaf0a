use chrono::Utc;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{error, info};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::store::StoreClient;
use shared_models::appointment::{validate_appointment_fields, AppointmentStatus};
use shared_models::client::validate_client_fields;

use crate::models::{GatewayResponse, RemoteAppointment, RemoteClient, SyncOutcome};
use crate::services::gateway::ExternalApiClient;

/// Pulls remote collections and upserts them locally, one record at a
/// time. A failed fetch aborts the run; a failed record never does.
pub struct DataSyncService {
    store: StoreClient,
    gateway: ExternalApiClient,
}

impl DataSyncService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            store: StoreClient::new(config),
            gateway: ExternalApiClient::new(config),
        }
    }

    pub async fn sync_clients(&self) -> SyncOutcome {
        let response = self.gateway.fetch_clients().await;
        let records = match parse_collection(response, "clients") {
            Ok(records) => records,
            Err(outcome) => return outcome,
        };

        let mut synced_count = 0u32;
        let mut errors = Vec::new();

        for record in &records {
            match self.upsert_client(record).await {
                Ok(()) => synced_count += 1,
                Err(reason) => errors.push(format!("Client {}: {}", record_id(record), reason)),
            }
        }

        info!("Synced {} clients", synced_count);
        if !errors.is_empty() {
            error!("Sync errors: {}", errors.join("; "));
        }

        SyncOutcome::completed(synced_count, errors)
    }

    pub async fn sync_appointments(&self) -> SyncOutcome {
        let response = self.gateway.fetch_appointments().await;
        let records = match parse_collection(response, "appointments") {
            Ok(records) => records,
            Err(outcome) => return outcome,
        };

        let mut synced_count = 0u32;
        let mut errors = Vec::new();

        for record in &records {
            match self.upsert_appointment(record).await {
                Ok(()) => synced_count += 1,
                Err(reason) => {
                    errors.push(format!("Appointment {}: {}", record_id(record), reason))
                }
            }
        }

        info!("Synced {} appointments", synced_count);
        if !errors.is_empty() {
            error!("Sync errors: {}", errors.join("; "));
        }

        SyncOutcome::completed(synced_count, errors)
    }

    async fn upsert_client(&self, record: &Value) -> Result<(), String> {
        let remote: RemoteClient =
            serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;

        let name = remote.name.unwrap_or_default();
        let email = remote.email.unwrap_or_default();

        let validation_errors = validate_client_fields(&name, &email, remote.phone.as_deref());
        if !validation_errors.is_empty() {
            return Err(validation_errors.join(", "));
        }

        let client_data = json!({
            "external_id": remote.id,
            "name": name,
            "email": email,
            "phone": remote.phone,
            "updated_at": Utc::now().to_rfc3339()
        });

        let _rows: Vec<Value> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/clients?on_conflict=external_id",
                Some(client_data),
                Some(upsert_headers()),
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn upsert_appointment(&self, record: &Value) -> Result<(), String> {
        let remote: RemoteAppointment =
            serde_json::from_value(record.clone()).map_err(|e| e.to_string())?;

        // Owning client first. A record for an unknown client is skipped,
        // never backfilled with a placeholder.
        let client_id = self.find_client(remote.client_id.as_deref()).await?;

        let appointment_type = remote
            .appointment_type
            .unwrap_or_else(|| "Consultation".to_string());

        let mut validation_errors = validate_appointment_fields(&appointment_type);

        let status = match remote.status.as_deref() {
            None => AppointmentStatus::Scheduled,
            Some(value) => value.parse().unwrap_or_else(|_| {
                validation_errors.push("Status is not included in the list".to_string());
                AppointmentStatus::Scheduled
            }),
        };

        let scheduled_at = match remote.scheduled_at {
            Some(value) => value,
            None => {
                validation_errors.push("Scheduled at can't be blank".to_string());
                return Err(validation_errors.join(", "));
            }
        };

        if !validation_errors.is_empty() {
            return Err(validation_errors.join(", "));
        }

        let mut appointment_data = json!({
            "external_id": remote.id,
            "client_id": client_id,
            "appointment_type": appointment_type,
            "scheduled_at": scheduled_at.to_rfc3339(),
            "status": status.to_string(),
            "notes": remote.notes,
            "cancelled_at": null,
            "cancellation_reason": null,
            "updated_at": Utc::now().to_rfc3339()
        });

        // The remote payload carries no cancellation fields; keep the
        // local invariant intact either way.
        if status == AppointmentStatus::Cancelled {
            appointment_data["cancelled_at"] = json!(Utc::now().to_rfc3339());
            appointment_data["cancellation_reason"] = json!("Synced from external system");
        }

        let _rows: Vec<Value> = self
            .store
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments?on_conflict=external_id",
                Some(appointment_data),
                Some(upsert_headers()),
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn find_client(&self, client_external_id: Option<&str>) -> Result<Uuid, String> {
        let external_id = client_external_id.ok_or_else(|| "Client not found".to_string())?;

        let path = format!(
            "/rest/v1/clients?external_id=eq.{}&select=id",
            urlencoding::encode(external_id)
        );

        let rows: Vec<Value> = self
            .store
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| e.to_string())?;

        rows.first()
            .and_then(|row| row.get("id"))
            .and_then(|value| value.as_str())
            .and_then(|value| Uuid::parse_str(value).ok())
            .ok_or_else(|| "Client not found".to_string())
    }
}

fn parse_collection(response: GatewayResponse, kind: &str) -> Result<Vec<Value>, SyncOutcome> {
    if !response.success {
        let error = response
            .error
            .unwrap_or_else(|| "Unknown error".to_string());
        error!("Failed to fetch {}: {}", kind, error);
        return Err(SyncOutcome::fetch_failed(error));
    }

    match serde_json::from_value(response.data.unwrap_or(Value::Null)) {
        Ok(records) => Ok(records),
        Err(e) => {
            error!("Invalid {} payload: {}", kind, e);
            Err(SyncOutcome::fetch_failed(format!(
                "Invalid {} payload: {}",
                kind, e
            )))
        }
    }
}

fn record_id(record: &Value) -> &str {
    record
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
}

fn upsert_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Prefer",
        HeaderValue::from_static("resolution=merge-duplicates,return=representation"),
    );
    headers
}
