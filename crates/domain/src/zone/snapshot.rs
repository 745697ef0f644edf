use crate::dns_record::DomainRecord;
use crate::domain_name::DomainName;
use crate::errors::ParseError;
use crate::zone_file::ParsedZone;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::sync::Arc;

/// Immutable view of one zone's records.
///
/// Readers hold an `Arc<ZoneSnapshot>` for the whole of a lookup. Writers build
/// a fresh snapshot (or clone and extend one) and swap it in; a published
/// snapshot is never mutated.
#[derive(Debug, Clone)]
pub struct ZoneSnapshot {
    origin: DomainName,
    default_ttl: Option<u32>,
    records: Vec<Arc<DomainRecord>>,
    by_name: FxHashMap<DomainName, SmallVec<[usize; 4]>>,
    /// Owner names plus every ancestor between them and the origin, so empty
    /// non-terminals count as existing names.
    nodes: FxHashSet<DomainName>,
}

impl ZoneSnapshot {
    pub fn empty(origin: DomainName, default_ttl: Option<u32>) -> Self {
        Self {
            origin,
            default_ttl,
            records: Vec::new(),
            by_name: FxHashMap::default(),
            nodes: FxHashSet::default(),
        }
    }

    pub fn from_parsed(parsed: ParsedZone) -> Self {
        let mut snapshot = Self::empty(parsed.origin, parsed.default_ttl);
        for record in parsed.records {
            if record.name().is_subdomain_of(&snapshot.origin) {
                snapshot.push(record);
            }
        }
        snapshot
    }

    /// Adds a record. Returns `Ok(false)` when an identical record (same name,
    /// class, type and fields) is already present.
    pub fn insert(&mut self, record: DomainRecord) -> Result<bool, ParseError> {
        if !record.name().is_subdomain_of(&self.origin) {
            return Err(ParseError::malformed(
                0,
                format!("{} is outside zone {}", record.name(), self.origin),
            ));
        }
        Ok(self.push(record))
    }

    fn push(&mut self, record: DomainRecord) -> bool {
        let duplicate = self
            .records_at(record.name())
            .any(|existing| existing.same_data(&record));
        if duplicate {
            return false;
        }

        let name = record.name().clone();
        for ancestor in name.ancestors_to(&self.origin) {
            self.nodes.insert(ancestor);
        }
        self.nodes.insert(name.clone());

        let index = self.records.len();
        self.records.push(Arc::new(record));
        self.by_name.entry(name).or_default().push(index);
        true
    }

    pub fn origin(&self) -> &DomainName {
        &self.origin
    }

    pub fn default_ttl(&self) -> Option<u32> {
        self.default_ttl
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Arc<DomainRecord>] {
        &self.records
    }

    /// Records owned by exactly `name`, in insertion order.
    pub fn records_at<'a>(
        &'a self,
        name: &DomainName,
    ) -> impl Iterator<Item = &'a Arc<DomainRecord>> + 'a {
        self.by_name
            .get(name)
            .into_iter()
            .flat_map(move |indices| indices.iter().map(move |&i| &self.records[i]))
    }

    pub fn has_records_at(&self, name: &DomainName) -> bool {
        self.by_name.contains_key(name)
    }

    /// True for owner names and empty non-terminals.
    pub fn node_exists(&self, name: &DomainName) -> bool {
        self.nodes.contains(name)
    }
}
