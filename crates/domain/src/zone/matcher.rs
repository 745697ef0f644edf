use super::snapshot::ZoneSnapshot;
use crate::dns_record::{DomainRecord, RecordClass, RecordType};
use crate::domain_name::DomainName;
use crate::query::Selector;
use std::fmt;
use std::sync::Arc;

/// Strategy for selecting records of one zone snapshot.
pub trait RecordMatcher: Send + Sync + fmt::Debug {
    fn match_records(
        &self,
        zone: &ZoneSnapshot,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> Vec<Arc<DomainRecord>>;

    /// Whether `name` exists in the zone, regardless of type. Lets the
    /// transport tell NODATA from NXDOMAIN.
    fn name_exists(&self, zone: &ZoneSnapshot, name: &DomainName) -> bool;
}

fn select(
    candidates: impl Iterator<Item = Arc<DomainRecord>>,
    class: &Selector<RecordClass>,
    record_type: &Selector<RecordType>,
) -> Vec<Arc<DomainRecord>> {
    candidates
        .filter(|r| class.matches(r.class()) && record_type.matches(r.record_type()))
        .collect()
}

/// Exact owner matching only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl RecordMatcher for ExactMatcher {
    fn match_records(
        &self,
        zone: &ZoneSnapshot,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> Vec<Arc<DomainRecord>> {
        select(zone.records_at(name).cloned(), class, record_type)
    }

    fn name_exists(&self, zone: &ZoneSnapshot, name: &DomainName) -> bool {
        zone.node_exists(name)
    }
}

/// Exact owner matching with RFC 4592 wildcard synthesis.
///
/// A name that exists in the zone (with records of any type, or as an empty
/// non-terminal) never matches a wildcard. Otherwise the closest encloser's
/// `*` child answers, if it exists.
///
/// An existing intermediate node is the closest encloser for everything
/// below it, so it blocks wildcards higher up: with `*.example.com.` and
/// `www.example.com.` in the zone, `x.www.example.com.` matches nothing
/// unless `*.www.example.com.` exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct WildcardMatcher;

impl WildcardMatcher {
    pub fn wildcard_owner(zone: &ZoneSnapshot, name: &DomainName) -> Option<DomainName> {
        if zone.node_exists(name) {
            return None;
        }
        for ancestor in name.ancestors_to(zone.origin()) {
            if let Ok(wildcard) = ancestor.wildcard_child() {
                if zone.has_records_at(&wildcard) {
                    return Some(wildcard);
                }
            }
            if zone.node_exists(&ancestor) {
                return None;
            }
        }
        None
    }
}

impl RecordMatcher for WildcardMatcher {
    fn match_records(
        &self,
        zone: &ZoneSnapshot,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> Vec<Arc<DomainRecord>> {
        if zone.node_exists(name) {
            return select(zone.records_at(name).cloned(), class, record_type);
        }
        match Self::wildcard_owner(zone, name) {
            Some(wildcard) => select(zone.records_at(&wildcard).cloned(), class, record_type),
            None => Vec::new(),
        }
    }

    fn name_exists(&self, zone: &ZoneSnapshot, name: &DomainName) -> bool {
        zone.node_exists(name) || Self::wildcard_owner(zone, name).is_some()
    }
}
