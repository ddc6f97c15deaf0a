use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_models::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub appointment_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub appointment_type: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentSearchQuery {
    pub status: Option<AppointmentStatus>,
    pub upcoming: Option<bool>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl AppointmentSearchQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(20).clamp(1, 100)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CancelAppointmentQuery {
    pub cancellation_reason: Option<String>,
}

/// A mutated appointment together with its owner's external identifier,
/// which the outbound sync payload needs.
#[derive(Debug, Clone)]
pub struct AppointmentWithClient {
    pub appointment: Appointment,
    pub client_external_id: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Client not found")]
    ClientNotFound,

    #[error("Cannot cancel appointment: {0}")]
    CannotCancel(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::NotFound => AppError::NotFound("Appointment not found".to_string()),
            AppointmentError::ClientNotFound => AppError::NotFound("Client not found".to_string()),
            AppointmentError::CannotCancel(reason) => {
                AppError::BadRequest(format!("Failed to cancel appointment: {}", reason))
            }
            AppointmentError::Validation(msg) => AppError::ValidationError(msg),
            AppointmentError::Store(msg) => AppError::Database(msg),
        }
    }
}
