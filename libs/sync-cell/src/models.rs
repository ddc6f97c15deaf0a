use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Uniform result of one external API exchange. Gateway calls never
/// return `Err`; every transport or HTTP failure lands here.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
}

impl GatewayResponse {
    pub fn ok(data: Option<Value>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(error: String, data: Option<Value>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error),
        }
    }
}

/// Result of one reconciliation run. `success` is false only when the
/// initial fetch (or collection-level parse) fails; per-record failures
/// are collected in `errors` and leave `success` true.
#[derive(Debug, Clone, Serialize)]
pub struct SyncOutcome {
    pub success: bool,
    pub synced_count: u32,
    pub errors: Vec<String>,
    pub error: Option<String>,
}

impl SyncOutcome {
    pub fn fetch_failed(error: String) -> Self {
        Self {
            success: false,
            synced_count: 0,
            errors: Vec::new(),
            error: Some(error),
        }
    }

    pub fn completed(synced_count: u32, errors: Vec<String>) -> Self {
        Self {
            success: true,
            synced_count,
            errors,
            error: None,
        }
    }
}

/// A client record as the external system returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteClient {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

/// An appointment record as the external system returns it. The
/// scheduled time arrives under `time` or `scheduled_at`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteAppointment {
    pub id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub appointment_type: Option<String>,
    #[serde(default, alias = "time")]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}
