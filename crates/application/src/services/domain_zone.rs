use crate::ports::ZoneSource;
use arc_swap::ArcSwap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{info, instrument, warn};
use zonewire_domain::{
    DomainError, DomainName, DomainRecord, ParseOptions, RecordClass, RecordMatcher, RecordType,
    Selector, WildcardMatcher, ZoneParser, ZoneSnapshot,
};

/// Result of one lookup, computed against a single snapshot.
#[derive(Debug, Clone, Default)]
pub struct ZoneLookup {
    pub records: Vec<Arc<DomainRecord>>,
    pub name_exists: bool,
}

/// One authoritative zone.
///
/// Queries read the current `ZoneSnapshot` without locking. Loads and inserts
/// take `writer`, build a new snapshot and publish it with a single swap, so a
/// lookup in flight keeps the snapshot it started with.
pub struct DomainZone {
    origin: DomainName,
    location: Option<String>,
    options: ParseOptions,
    snapshot: ArcSwap<ZoneSnapshot>,
    matcher: Arc<dyn RecordMatcher>,
    writer: Mutex<()>,
}

impl DomainZone {
    /// Empty zone. Records are added with `insert` or `replace_from_str`.
    pub fn new(origin: DomainName, default_ttl: Option<u32>) -> Self {
        let options = ParseOptions {
            origin: Some(origin.clone()),
            default_ttl,
        };
        Self {
            snapshot: ArcSwap::from_pointee(ZoneSnapshot::empty(origin.clone(), default_ttl)),
            origin,
            location: None,
            options,
            matcher: Arc::new(WildcardMatcher),
            writer: Mutex::new(()),
        }
    }

    /// Builds a zone from document text. The origin comes from `options` or,
    /// failing that, from the document.
    pub fn parse(text: &str, options: ParseOptions) -> Result<Self, DomainError> {
        let parsed = ZoneParser::new(options.clone()).parse(text)?;
        let origin = parsed.origin.clone();
        let snapshot = ZoneSnapshot::from_parsed(parsed);

        Ok(Self {
            options: ParseOptions {
                origin: Some(origin.clone()),
                default_ttl: options.default_ttl,
            },
            origin,
            location: None,
            snapshot: ArcSwap::from_pointee(snapshot),
            matcher: Arc::new(WildcardMatcher),
            writer: Mutex::new(()),
        })
    }

    /// Reads `location` through `source` and parses it.
    #[instrument(skip(source, options))]
    pub async fn load(
        source: &dyn ZoneSource,
        location: &str,
        options: ParseOptions,
    ) -> Result<Self, DomainError> {
        let text = source.read(location).await?;
        let mut zone = Self::parse(&text, options)?;
        zone.location = Some(location.to_string());

        info!(
            origin = %zone.origin,
            records = zone.record_count(),
            default_ttl = ?zone.options.default_ttl,
            "Zone loaded"
        );
        Ok(zone)
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn RecordMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn origin(&self) -> &DomainName {
        &self.origin
    }

    /// Where the zone was loaded from, if it came from a source.
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The snapshot queries currently see.
    pub fn snapshot(&self) -> Arc<ZoneSnapshot> {
        self.snapshot.load_full()
    }

    pub fn record_count(&self) -> usize {
        self.snapshot.load().len()
    }

    /// Every record matching the name, class and type, in insertion order.
    pub fn match_records(
        &self,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> Vec<Arc<DomainRecord>> {
        let snapshot = self.snapshot.load();
        self.matcher.match_records(&snapshot, name, class, record_type)
    }

    /// First record of `match_records`.
    pub fn first_match(
        &self,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> Option<Arc<DomainRecord>> {
        self.match_records(name, class, record_type).into_iter().next()
    }

    pub fn name_exists(&self, name: &DomainName) -> bool {
        let snapshot = self.snapshot.load();
        self.matcher.name_exists(&snapshot, name)
    }

    /// Matches and existence check against the same snapshot.
    pub fn lookup(
        &self,
        name: &DomainName,
        class: &Selector<RecordClass>,
        record_type: &Selector<RecordType>,
    ) -> ZoneLookup {
        let snapshot = self.snapshot.load();
        let records = self.matcher.match_records(&snapshot, name, class, record_type);
        let name_exists = !records.is_empty() || self.matcher.name_exists(&snapshot, name);
        ZoneLookup {
            records,
            name_exists,
        }
    }

    /// Adds one record. Returns `false` when an identical record was already
    /// present.
    pub async fn insert(&self, record: DomainRecord) -> Result<bool, DomainError> {
        let _guard = self.writer.lock().await;

        let mut next = ZoneSnapshot::clone(&self.snapshot.load());
        let added = next.insert(record)?;
        if added {
            self.snapshot.store(Arc::new(next));
        }
        Ok(added)
    }

    /// Parses `text` and replaces every record of the zone. On error the
    /// current records stay in place.
    pub async fn replace_from_str(&self, text: &str) -> Result<usize, DomainError> {
        let _guard = self.writer.lock().await;
        self.replace_locked(text)
    }

    /// Re-reads the zone from `source` and publishes the new records.
    /// Concurrent reloads of one zone run one after the other.
    pub async fn reload(&self, source: &dyn ZoneSource) -> Result<usize, DomainError> {
        Ok(self.stage_reload(source).await?.commit())
    }

    /// Reads and parses the zone's document without publishing it. The zone
    /// keeps serving its current records until the returned reload is
    /// committed; dropping it discards the new records.
    #[instrument(skip(self, source), fields(origin = %self.origin))]
    pub async fn stage_reload(
        &self,
        source: &dyn ZoneSource,
    ) -> Result<StagedReload<'_>, DomainError> {
        let location = self
            .location
            .as_deref()
            .ok_or_else(|| DomainError::ZoneNotFound(self.origin.to_string()))?;

        let guard = self.writer.lock().await;

        let parsed = match source.read(location).await {
            Ok(text) => ZoneParser::new(self.options.clone())
                .parse(&text)
                .map_err(DomainError::from),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(parsed) => Ok(StagedReload {
                zone: self,
                snapshot: ZoneSnapshot::from_parsed(parsed),
                _guard: guard,
            }),
            Err(e) => {
                warn!(error = %e, "Zone reload failed; keeping previous records");
                Err(e)
            }
        }
    }

    fn replace_locked(&self, text: &str) -> Result<usize, DomainError> {
        let parsed = ZoneParser::new(self.options.clone()).parse(text)?;
        let snapshot = ZoneSnapshot::from_parsed(parsed);
        let count = snapshot.len();
        self.snapshot.store(Arc::new(snapshot));
        Ok(count)
    }
}

/// Records read for a zone but not yet visible to queries. Holds the zone's
/// writer lock until it is committed or dropped.
pub struct StagedReload<'a> {
    zone: &'a DomainZone,
    snapshot: ZoneSnapshot,
    _guard: MutexGuard<'a, ()>,
}

impl StagedReload<'_> {
    pub fn record_count(&self) -> usize {
        self.snapshot.len()
    }

    /// Publishes the staged records and returns how many there are.
    pub fn commit(self) -> usize {
        let count = self.snapshot.len();
        self.zone.snapshot.store(Arc::new(self.snapshot));
        info!(origin = %self.zone.origin, records = count, "Zone reloaded");
        count
    }
}

impl fmt::Debug for DomainZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomainZone")
            .field("origin", &self.origin)
            .field("location", &self.location)
            .field("records", &self.record_count())
            .field("matcher", &self.matcher)
            .finish()
    }
}
