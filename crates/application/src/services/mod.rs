pub mod domain_server;
pub mod domain_zone;

pub use domain_server::{DomainServer, ZoneAnswer, ZoneSet};
pub use domain_zone::{DomainZone, StagedReload, ZoneLookup};
