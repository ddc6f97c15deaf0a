use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info, warn};

use shared_config::AppConfig;

use crate::models::SyncOutcome;
use crate::services::sync::DataSyncService;

/// Background runner for the periodic reconciliation jobs. Clients are
/// synced before appointments within a tick so appointment records can
/// resolve owners committed in the same pass.
pub struct SyncScheduler {
    config: Arc<AppConfig>,
}

impl SyncScheduler {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn spawn(self) -> Option<JoinHandle<()>> {
        if self.config.sync_interval_seconds == 0 {
            info!("Sync scheduler disabled (SYNC_INTERVAL_SECONDS=0)");
            return None;
        }

        info!(
            "Starting sync scheduler, interval {}s",
            self.config.sync_interval_seconds
        );

        Some(tokio::spawn(async move { self.run().await }))
    }

    async fn run(self) {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.config.sync_interval_seconds));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }

    pub async fn run_once(&self) {
        let service = DataSyncService::new(&self.config);

        info!("Starting clients sync job");
        report("Clients", &service.sync_clients().await);

        info!("Starting appointments sync job");
        report("Appointments", &service.sync_appointments().await);
    }
}

fn report(kind: &str, outcome: &SyncOutcome) {
    if outcome.success {
        info!(
            "{} sync job completed: {} records synced",
            kind, outcome.synced_count
        );
        if !outcome.errors.is_empty() {
            warn!("{} sync errors: {}", kind, outcome.errors.join("; "));
        }
    } else {
        error!(
            "{} sync job failed: {}",
            kind,
            outcome.error.as_deref().unwrap_or("unknown error")
        );
    }
}
