use crate::ports::ZoneSource;
use crate::services::DomainZone;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};
use zonewire_domain::{DomainError, ZoneConfig};

/// A zone that could not be loaded, with the reason.
#[derive(Debug, Clone)]
pub struct ZoneLoadFailure {
    pub location: String,
    pub error: DomainError,
}

#[derive(Debug, Default)]
pub struct LoadReport {
    pub zones: Vec<Arc<DomainZone>>,
    pub failures: Vec<ZoneLoadFailure>,
}

pub struct LoadZonesUseCase {
    source: Arc<dyn ZoneSource>,
}

impl LoadZonesUseCase {
    pub fn new(source: Arc<dyn ZoneSource>) -> Self {
        Self { source }
    }

    /// Loads every configured zone. One zone failing does not stop the others.
    pub async fn execute(&self, configs: &[ZoneConfig]) -> LoadReport {
        let results = join_all(configs.iter().map(|config| self.load_one(config))).await;

        let mut report = LoadReport::default();
        for (config, result) in configs.iter().zip(results) {
            match result {
                Ok(zone) => report.zones.push(Arc::new(zone)),
                Err(error) => {
                    warn!(source = %config.source, error = %error, "Failed to load zone");
                    report.failures.push(ZoneLoadFailure {
                        location: config.source.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            loaded = report.zones.len(),
            failed = report.failures.len(),
            "Zone loading finished"
        );
        report
    }

    pub async fn load_one(&self, config: &ZoneConfig) -> Result<DomainZone, DomainError> {
        let options = config.parse_options().map_err(DomainError::ConfigError)?;
        DomainZone::load(self.source.as_ref(), &config.source, options).await
    }
}
