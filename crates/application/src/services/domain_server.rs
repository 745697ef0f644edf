use super::domain_zone::DomainZone;
use arc_swap::ArcSwap;
use rustc_hash::FxHashSet;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use zonewire_domain::{
    BindingStrategy, ConfigurationError, DomainName, DomainQuery, DomainRecord, SocketBinding,
};

/// A validated set of zones with distinct origins, ordered deepest origin
/// first so the first suffix hit is the longest one.
#[derive(Debug, Default)]
pub struct ZoneSet {
    zones: Vec<Arc<DomainZone>>,
}

impl ZoneSet {
    pub fn new(zones: Vec<Arc<DomainZone>>) -> Result<Self, ConfigurationError> {
        let mut seen = FxHashSet::default();
        for zone in &zones {
            if !seen.insert(zone.origin().clone()) {
                return Err(ConfigurationError::AmbiguousOrigin(
                    zone.origin().to_string(),
                ));
            }
        }

        let mut zones = zones;
        zones.sort_by_key(|zone| std::cmp::Reverse(zone.origin().label_count()));
        Ok(Self { zones })
    }

    /// The zone whose origin is the longest suffix of `name`.
    pub fn select(&self, name: &DomainName) -> Option<&Arc<DomainZone>> {
        self.zones
            .iter()
            .find(|zone| name.is_subdomain_of(zone.origin()))
    }

    pub fn get(&self, origin: &DomainName) -> Option<&Arc<DomainZone>> {
        self.zones.iter().find(|zone| zone.origin() == origin)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DomainZone>> {
        self.zones.iter()
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// What the server found for one query.
#[derive(Debug, Clone, Default)]
pub struct ZoneAnswer {
    /// Origin of the zone that answered; `None` when no zone is authoritative.
    pub origin: Option<DomainName>,
    pub records: Vec<Arc<DomainRecord>>,
    pub name_exists: bool,
}

impl ZoneAnswer {
    pub fn is_authoritative(&self) -> bool {
        self.origin.is_some()
    }
}

/// Authoritative server over a replaceable set of zones.
///
/// Unicast and multicast servers differ only in `strategy`, which decides the
/// sockets the transport has to open.
pub struct DomainServer {
    zones: ArcSwap<ZoneSet>,
    strategy: BindingStrategy,
    listen: Vec<SocketAddr>,
    tcp: bool,
}

impl DomainServer {
    pub fn new(listen: Vec<SocketAddr>) -> Self {
        Self::with_strategy(BindingStrategy::Unicast, listen)
    }

    /// Server that also answers on the mDNS groups.
    pub fn multicast(listen: Vec<SocketAddr>) -> Self {
        Self::with_strategy(BindingStrategy::MulticastAndUnicast, listen)
    }

    pub fn with_strategy(strategy: BindingStrategy, listen: Vec<SocketAddr>) -> Self {
        Self {
            zones: ArcSwap::from_pointee(ZoneSet::default()),
            strategy,
            listen,
            tcp: true,
        }
    }

    pub fn with_tcp(mut self, tcp: bool) -> Self {
        self.tcp = tcp;
        self
    }

    pub fn strategy(&self) -> BindingStrategy {
        self.strategy
    }

    pub fn is_multicast(&self) -> bool {
        self.strategy.is_multicast()
    }

    pub fn required_bindings(&self) -> Vec<SocketBinding> {
        self.strategy.required_bindings(&self.listen, self.tcp)
    }

    /// Current zone set. Holding the returned `Arc` keeps that set alive
    /// across a concurrent `replace_zones`.
    pub fn zones(&self) -> Arc<ZoneSet> {
        self.zones.load_full()
    }

    /// Swaps in a new zone set. On `AmbiguousOrigin` the current set stays.
    pub fn replace_zones(&self, zones: Vec<Arc<DomainZone>>) -> Result<(), ConfigurationError> {
        match ZoneSet::new(zones) {
            Ok(set) => {
                self.install(set);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Zone set rejected; keeping current zones");
                Err(e)
            }
        }
    }

    /// Swaps in a set that was validated by `ZoneSet::new`.
    pub fn install(&self, set: ZoneSet) {
        let count = set.len();
        self.zones.store(Arc::new(set));
        info!(zones = count, "Zone set replaced");
    }

    pub fn answer(&self, query: &DomainQuery) -> ZoneAnswer {
        let zones = self.zones.load();
        let Some(zone) = zones.select(&query.name) else {
            return ZoneAnswer::default();
        };

        let lookup = zone.lookup(&query.name, &query.class, &query.record_type);
        ZoneAnswer {
            origin: Some(zone.origin().clone()),
            records: lookup.records,
            name_exists: lookup.name_exists,
        }
    }

    /// First record of `answer`.
    pub fn first_answer(&self, query: &DomainQuery) -> Option<Arc<DomainRecord>> {
        self.answer(query).records.into_iter().next()
    }
}
