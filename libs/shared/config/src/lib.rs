use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_service_key: String,
    pub external_api_base_url: String,
    pub external_api_key: String,
    pub sync_interval_seconds: u64,
}

const DEFAULT_SYNC_INTERVAL_SECONDS: u64 = 300;

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            store_url: env::var("STORE_URL")
                .unwrap_or_else(|_| {
                    warn!("STORE_URL not set, using empty value");
                    String::new()
                }),
            store_service_key: env::var("STORE_SERVICE_KEY")
                .unwrap_or_else(|_| {
                    warn!("STORE_SERVICE_KEY not set, using empty value");
                    String::new()
                }),
            external_api_base_url: env::var("EXTERNAL_API_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("EXTERNAL_API_BASE_URL not set, using empty value");
                    String::new()
                }),
            external_api_key: env::var("EXTERNAL_API_KEY")
                .unwrap_or_else(|_| {
                    warn!("EXTERNAL_API_KEY not set, using empty value");
                    String::new()
                }),
            sync_interval_seconds: env::var("SYNC_INTERVAL_SECONDS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or_else(|| {
                    warn!(
                        "SYNC_INTERVAL_SECONDS not set, defaulting to {}s",
                        DEFAULT_SYNC_INTERVAL_SECONDS
                    );
                    DEFAULT_SYNC_INTERVAL_SECONDS
                }),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.store_url.is_empty() && !self.store_service_key.is_empty()
    }

    pub fn is_external_api_configured(&self) -> bool {
        !self.external_api_base_url.is_empty() && !self.external_api_key.is_empty()
    }
}
