use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An appointment owned by a client. Invariant: `cancelled_at` and
/// `cancellation_reason` are set if and only if `status` is `Cancelled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub external_id: String,
    pub client_id: Uuid,
    pub appointment_type: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Closed status enumeration. Unknown values are deserialization errors,
/// never coerced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("{} is not a valid status", other)),
        }
    }
}

pub fn validate_appointment_fields(appointment_type: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if appointment_type.trim().is_empty() {
        errors.push("Appointment type can't be blank".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_snake_case() {
        let status: AppointmentStatus = serde_json::from_str("\"scheduled\"").unwrap();
        assert_eq!(status, AppointmentStatus::Scheduled);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"scheduled\"");
    }

    #[test]
    fn unknown_status_is_a_deserialization_error() {
        let result: Result<AppointmentStatus, _> = serde_json::from_str("\"booked\"");
        assert!(result.is_err());
    }

    #[test]
    fn status_parses_from_str() {
        assert_eq!(
            "cancelled".parse::<AppointmentStatus>().unwrap(),
            AppointmentStatus::Cancelled
        );
        assert!("booked".parse::<AppointmentStatus>().is_err());
    }

    #[test]
    fn terminal_statuses() {
        assert!(!AppointmentStatus::Scheduled.is_terminal());
        assert!(AppointmentStatus::Completed.is_terminal());
        assert!(AppointmentStatus::Cancelled.is_terminal());
    }

    #[test]
    fn blank_appointment_type_is_rejected() {
        assert_eq!(
            validate_appointment_fields("  "),
            vec!["Appointment type can't be blank".to_string()]
        );
        assert!(validate_appointment_fields("Consultation").is_empty());
    }
}
