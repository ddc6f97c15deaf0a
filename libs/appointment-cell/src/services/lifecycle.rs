use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::models::AppointmentError;

pub const DEFAULT_CANCELLATION_REASON: &str = "No reason provided";

/// State machine over appointment statuses. `scheduled` is initial;
/// `completed` and `cancelled` are terminal. The only guarded transition
/// is cancellation; completion happens through the generic update path.
pub struct AppointmentLifecycleService;

/// The full set of fields a cancellation writes. Applied as one store
/// update so the three fields change together or not at all.
#[derive(Debug, Clone)]
pub struct CancellationUpdate {
    pub status: AppointmentStatus,
    pub cancelled_at: DateTime<Utc>,
    pub cancellation_reason: String,
}

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn can_be_cancelled(&self, appointment: &Appointment, now: DateTime<Utc>) -> bool {
        appointment.status == AppointmentStatus::Scheduled && appointment.scheduled_at > now
    }

    /// Why a cancellation is blocked, if it is. The status check runs
    /// before the time check.
    pub fn cancellation_block_reason(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
    ) -> Option<String> {
        if appointment.status != AppointmentStatus::Scheduled {
            return Some(format!("appointment is already {}", appointment.status));
        }
        if appointment.scheduled_at <= now {
            return Some("appointment is in the past".to_string());
        }
        None
    }

    pub fn cancel(
        &self,
        appointment: &Appointment,
        reason: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<CancellationUpdate, AppointmentError> {
        debug!(
            "Validating cancellation of appointment {} ({})",
            appointment.external_id, appointment.status
        );

        if let Some(block_reason) = self.cancellation_block_reason(appointment, now) {
            warn!(
                "Cancellation blocked for appointment {}: {}",
                appointment.external_id, block_reason
            );
            return Err(AppointmentError::CannotCancel(block_reason));
        }

        Ok(CancellationUpdate {
            status: AppointmentStatus::Cancelled,
            cancelled_at: now,
            cancellation_reason: reason
                .unwrap_or_else(|| DEFAULT_CANCELLATION_REASON.to_string()),
        })
    }
}
