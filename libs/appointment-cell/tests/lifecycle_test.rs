use assert_matches::assert_matches;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use appointment_cell::models::AppointmentError;
use appointment_cell::services::lifecycle::{
    AppointmentLifecycleService, DEFAULT_CANCELLATION_REASON,
};
use shared_models::appointment::{Appointment, AppointmentStatus};

fn appointment(status: AppointmentStatus, scheduled_at: DateTime<Utc>) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        external_id: "apt-1".to_string(),
        client_id: Uuid::new_v4(),
        appointment_type: "Consultation".to_string(),
        scheduled_at,
        status,
        notes: None,
        cancelled_at: None,
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn cancelling_a_future_scheduled_appointment_sets_all_three_fields() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Scheduled, now + Duration::hours(2));

    let update = service
        .cancel(&appointment, Some("client request".to_string()), now)
        .expect("cancellation should succeed");

    assert_eq!(update.status, AppointmentStatus::Cancelled);
    assert_eq!(update.cancelled_at, now);
    assert_eq!(update.cancellation_reason, "client request");
}

#[test]
fn missing_reason_falls_back_to_the_default() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Scheduled, now + Duration::hours(2));

    let update = service.cancel(&appointment, None, now).expect("should succeed");

    assert_eq!(update.cancellation_reason, DEFAULT_CANCELLATION_REASON);
    assert_eq!(update.cancellation_reason, "No reason provided");
}

#[test]
fn past_appointments_cannot_be_cancelled() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Scheduled, now - Duration::minutes(1));

    let err = service.cancel(&appointment, None, now).unwrap_err();

    assert_matches!(err, AppointmentError::CannotCancel(reason) => {
        assert_eq!(reason, "appointment is in the past");
    });
}

#[test]
fn appointment_starting_exactly_now_counts_as_past() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Scheduled, now);

    assert!(!service.can_be_cancelled(&appointment, now));
}

#[test]
fn already_cancelled_appointments_are_rejected() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Cancelled, now + Duration::hours(2));

    let err = service.cancel(&appointment, None, now).unwrap_err();

    assert_matches!(err, AppointmentError::CannotCancel(reason) => {
        assert_eq!(reason, "appointment is already cancelled");
    });
}

#[test]
fn completed_appointments_are_rejected() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    let appointment = appointment(AppointmentStatus::Completed, now + Duration::hours(2));

    let err = service.cancel(&appointment, None, now).unwrap_err();

    assert_matches!(err, AppointmentError::CannotCancel(reason) => {
        assert_eq!(reason, "appointment is already completed");
    });
}

#[test]
fn status_is_checked_before_the_time() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();
    // Both preconditions fail; the status message wins.
    let appointment = appointment(AppointmentStatus::Cancelled, now - Duration::hours(2));

    let err = service.cancel(&appointment, None, now).unwrap_err();

    assert_matches!(err, AppointmentError::CannotCancel(reason) => {
        assert_eq!(reason, "appointment is already cancelled");
    });
}

#[test]
fn can_be_cancelled_mirrors_the_preconditions() {
    let service = AppointmentLifecycleService::new();
    let now = Utc::now();

    let future = appointment(AppointmentStatus::Scheduled, now + Duration::hours(1));
    assert!(service.can_be_cancelled(&future, now));
    assert!(service.cancellation_block_reason(&future, now).is_none());

    let completed = appointment(AppointmentStatus::Completed, now + Duration::hours(1));
    assert!(!service.can_be_cancelled(&completed, now));
}
