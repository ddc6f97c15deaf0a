pub mod gateway;
pub mod outbound;
pub mod scheduler;
pub mod sync;

pub use gateway::ExternalApiClient;
pub use outbound::OutboundSyncService;
pub use scheduler::SyncScheduler;
pub use sync::DataSyncService;
