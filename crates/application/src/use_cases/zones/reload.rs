use super::load::{LoadZonesUseCase, ZoneLoadFailure};
use crate::ports::ZoneSource;
use crate::services::{DomainServer, DomainZone, StagedReload, ZoneSet};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use zonewire_domain::{DomainError, ZoneConfig};

#[derive(Debug, Default)]
pub struct ReloadReport {
    pub reloaded: usize,
    pub added: usize,
    pub removed: usize,
    pub failures: Vec<ZoneLoadFailure>,
}

/// Re-reads every configured zone and swaps the server's zone set.
///
/// Zones that are still configured are reloaded in place; a failed reload keeps
/// the zone's previous records. Zones no longer configured are dropped. New
/// records only become visible once the resulting set is accepted: if it has
/// two zones with one origin, nothing changes.
pub struct ReloadZonesUseCase {
    server: Arc<DomainServer>,
    source: Arc<dyn ZoneSource>,
}

impl ReloadZonesUseCase {
    pub fn new(server: Arc<DomainServer>, source: Arc<dyn ZoneSource>) -> Self {
        Self { server, source }
    }

    #[instrument(skip(self, configs), fields(zones = configs.len()))]
    pub async fn execute(&self, configs: &[ZoneConfig]) -> Result<ReloadReport, DomainError> {
        let current: Vec<Arc<DomainZone>> = self.server.zones().iter().cloned().collect();
        let loader = LoadZonesUseCase::new(Arc::clone(&self.source));
        let mut report = ReloadReport::default();
        let mut next: Vec<Arc<DomainZone>> = Vec::with_capacity(configs.len());
        let mut staged: Vec<StagedReload<'_>> = Vec::new();

        for config in configs {
            let existing = match Self::find_existing(&current, config) {
                Ok(existing) => existing,
                Err(error) => {
                    report.failures.push(ZoneLoadFailure {
                        location: config.source.clone(),
                        error,
                    });
                    continue;
                }
            };

            match existing {
                // A zone listed twice is staged once; the set check below
                // rejects the duplicate.
                Some(zone) if next.iter().any(|kept| Arc::ptr_eq(kept, zone)) => {
                    next.push(Arc::clone(zone));
                }
                Some(zone) => {
                    match zone.stage_reload(self.source.as_ref()).await {
                        Ok(reload) => staged.push(reload),
                        Err(error) => report.failures.push(ZoneLoadFailure {
                            location: config.source.clone(),
                            error,
                        }),
                    }
                    next.push(Arc::clone(zone));
                }
                None => match loader.load_one(config).await {
                    Ok(zone) => {
                        report.added += 1;
                        next.push(Arc::new(zone));
                    }
                    Err(error) => {
                        warn!(source = %config.source, error = %error, "Failed to load zone");
                        report.failures.push(ZoneLoadFailure {
                            location: config.source.clone(),
                            error,
                        });
                    }
                },
            }
        }

        report.removed = current
            .iter()
            .filter(|zone| !next.iter().any(|kept| Arc::ptr_eq(kept, zone)))
            .count();

        let set = match ZoneSet::new(next) {
            Ok(set) => set,
            Err(e) => {
                warn!(error = %e, "Zone set rejected; keeping current zones and records");
                return Err(e.into());
            }
        };

        report.reloaded = staged.len();
        for reload in staged {
            reload.commit();
        }
        self.server.install(set);

        info!(
            reloaded = report.reloaded,
            added = report.added,
            removed = report.removed,
            failed = report.failures.len(),
            "Zones reloaded"
        );
        Ok(report)
    }

    /// The loaded zone this config entry refers to: same source and, when the
    /// entry names one, same origin.
    fn find_existing<'a>(
        zones: &'a [Arc<DomainZone>],
        config: &ZoneConfig,
    ) -> Result<Option<&'a Arc<DomainZone>>, DomainError> {
        let options = config.parse_options().map_err(DomainError::ConfigError)?;
        Ok(zones.iter().find(|zone| {
            zone.location() == Some(config.source.as_str())
                && options
                    .origin
                    .as_ref()
                    .map_or(true, |origin| origin == zone.origin())
        }))
    }
}
