use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_utils::test_utils::TestConfig;
use sync_cell::services::outbound::{OutboundSyncService, SyncAction};

fn appointment(external_id: &str) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        external_id: external_id.to_string(),
        client_id: Uuid::new_v4(),
        appointment_type: "Consultation".to_string(),
        scheduled_at: now + Duration::days(3),
        status: AppointmentStatus::Scheduled,
        notes: Some("bring referral letter".to_string()),
        cancelled_at: None,
        cancellation_reason: None,
        created_at: now,
        updated_at: now,
    }
}

async fn service_for(server: &MockServer) -> OutboundSyncService {
    let config = TestConfig::with_servers("http://localhost:54321", &server.uri()).to_app_config();
    OutboundSyncService::new(&config)
}

#[tokio::test]
async fn create_action_posts_the_full_payload() {
    let server = MockServer::start().await;
    let appointment = appointment("apt-1");

    Mock::given(method("POST"))
        .and(path("/appointments"))
        .and(header("Authorization", "Bearer test-external-key"))
        .and(body_partial_json(json!({
            "id": "apt-1",
            "client_id": "cli-9",
            "appointment_type": "Consultation",
            "status": "scheduled",
            "notes": "bring referral letter"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = service_for(&server)
        .await
        .sync_appointment(&appointment, "cli-9", SyncAction::Create)
        .await;

    assert!(response.success);
}

#[tokio::test]
async fn update_action_puts_to_the_external_id() {
    let server = MockServer::start().await;
    let appointment = appointment("apt-2");

    Mock::given(method("PUT"))
        .and(path("/appointments/apt-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = service_for(&server)
        .await
        .sync_appointment(&appointment, "cli-9", SyncAction::Update)
        .await;

    assert!(response.success);
}

#[tokio::test]
async fn cancel_action_deletes_by_external_id() {
    let server = MockServer::start().await;
    let appointment = appointment("apt-3");

    Mock::given(method("DELETE"))
        .and(path("/appointments/apt-3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = service_for(&server)
        .await
        .sync_appointment(&appointment, "cli-9", SyncAction::Cancel)
        .await;

    assert!(response.success);
}

#[tokio::test]
async fn gateway_failure_is_surfaced_as_a_result_not_an_error() {
    let server = MockServer::start().await;
    let appointment = appointment("apt-4");

    Mock::given(method("DELETE"))
        .and(path("/appointments/apt-4"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let response = service_for(&server)
        .await
        .sync_appointment(&appointment, "cli-9", SyncAction::Cancel)
        .await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Server error: Service Unavailable")
    );
}
