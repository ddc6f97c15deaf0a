use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub store_url: String,
    pub store_service_key: String,
    pub external_api_base_url: String,
    pub external_api_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            store_url: "http://localhost:54321".to_string(),
            store_service_key: "test-service-key".to_string(),
            external_api_base_url: "http://localhost:4010".to_string(),
            external_api_key: "test-external-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Point the store and the external API at wiremock servers.
    pub fn with_servers(store_url: &str, external_api_url: &str) -> Self {
        Self {
            store_url: store_url.to_string(),
            external_api_base_url: external_api_url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            store_url: self.store_url.clone(),
            store_service_key: self.store_service_key.clone(),
            external_api_base_url: self.external_api_base_url.clone(),
            external_api_key: self.external_api_key.clone(),
            sync_interval_seconds: 0,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Canned rows as the persistence API returns them.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn client_row(id: Uuid, external_id: &str, name: &str, email: &str) -> Value {
        json!({
            "id": id,
            "external_id": external_id,
            "name": name,
            "email": email,
            "phone": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn appointment_row(
        id: Uuid,
        external_id: &str,
        client_id: Uuid,
        scheduled_at: DateTime<Utc>,
        status: &str,
    ) -> Value {
        json!({
            "id": id,
            "external_id": external_id,
            "client_id": client_id,
            "appointment_type": "Consultation",
            "scheduled_at": scheduled_at.to_rfc3339(),
            "status": status,
            "notes": null,
            "cancelled_at": null,
            "cancellation_reason": null,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    pub fn cancelled_appointment_row(
        id: Uuid,
        external_id: &str,
        client_id: Uuid,
        scheduled_at: DateTime<Utc>,
        cancelled_at: DateTime<Utc>,
        reason: &str,
    ) -> Value {
        json!({
            "id": id,
            "external_id": external_id,
            "client_id": client_id,
            "appointment_type": "Consultation",
            "scheduled_at": scheduled_at.to_rfc3339(),
            "status": "cancelled",
            "notes": null,
            "cancelled_at": cancelled_at.to_rfc3339(),
            "cancellation_reason": reason,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }
}

/// Canned payloads as the external system of record returns them.
pub struct MockExternalResponses;

impl MockExternalResponses {
    pub fn remote_client(id: &str, name: &str, email: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "email": email,
            "phone": "+353861234567"
        })
    }

    pub fn remote_appointment(id: &str, client_id: &str, scheduled_at: &str) -> Value {
        json!({
            "id": id,
            "client_id": client_id,
            "appointment_type": "Checkup",
            "scheduled_at": scheduled_at,
            "status": "scheduled",
            "notes": "synced"
        })
    }
}
