use serde_json::json;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_models::appointment::Appointment;

use crate::models::GatewayResponse;
use crate::services::gateway::ExternalApiClient;

/// Which local mutation triggered the push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncAction {
    Create,
    Update,
    Cancel,
}

/// Pushes a locally mutated appointment to the external system. The
/// local write is already committed when this runs; a failed push is
/// reported to the caller, never compensated.
pub struct OutboundSyncService {
    gateway: ExternalApiClient,
}

impl OutboundSyncService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            gateway: ExternalApiClient::new(config),
        }
    }

    pub async fn sync_appointment(
        &self,
        appointment: &Appointment,
        client_external_id: &str,
        action: SyncAction,
    ) -> GatewayResponse {
        debug!(
            "Outbound sync ({:?}) for appointment {}",
            action, appointment.external_id
        );

        let appointment_data = json!({
            "id": appointment.external_id,
            "client_id": client_external_id,
            "appointment_type": appointment.appointment_type,
            "scheduled_at": appointment.scheduled_at.to_rfc3339(),
            "status": appointment.status.to_string(),
            "notes": appointment.notes
        });

        let response = match action {
            SyncAction::Create => self.gateway.create_appointment(appointment_data).await,
            SyncAction::Update => {
                self.gateway
                    .update_appointment(&appointment.external_id, appointment_data)
                    .await
            }
            SyncAction::Cancel => {
                self.gateway
                    .delete_appointment(&appointment.external_id)
                    .await
            }
        };

        if !response.success {
            warn!(
                "Failed to sync appointment {} with external API: {}",
                appointment.external_id,
                response.error.as_deref().unwrap_or("unknown error")
            );
        }

        response
    }
}
