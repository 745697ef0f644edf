use crate::ports::RecordEncoder;
use crate::services::DomainServer;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;
use zonewire_domain::{DomainName, DomainQuery, DomainRecord, EncodingError};

/// A matched record left out of an answer because it could not be encoded.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    pub record: Arc<DomainRecord>,
    pub error: EncodingError,
}

#[derive(Debug, Clone, Default)]
pub struct QueryAnswer {
    /// Encoded resource records, in match order.
    pub records: Vec<Bytes>,
    /// Origin of the zone that answered; `None` when not authoritative.
    pub matched_origin: Option<DomainName>,
    /// The query name exists in the zone (NODATA rather than NXDOMAIN).
    pub name_exists: bool,
    pub skipped: Vec<SkippedRecord>,
}

impl QueryAnswer {
    pub fn is_authoritative(&self) -> bool {
        self.matched_origin.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct AnswerQueryUseCase {
    server: Arc<DomainServer>,
    encoder: Arc<dyn RecordEncoder>,
}

impl AnswerQueryUseCase {
    pub fn new(server: Arc<DomainServer>, encoder: Arc<dyn RecordEncoder>) -> Self {
        Self { server, encoder }
    }

    pub fn server(&self) -> &Arc<DomainServer> {
        &self.server
    }

    /// Matches the query and encodes every record it can. Records answered
    /// from a wildcard carry the query name as owner.
    pub fn execute(&self, query: &DomainQuery) -> QueryAnswer {
        let answer = self.server.answer(query);

        let mut records = Vec::with_capacity(answer.records.len());
        let mut skipped = Vec::new();

        for record in answer.records {
            let encoded = if record.is_wildcard() && record.name() != &query.name {
                self.encoder.encode(&record.with_owner(query.name.clone()))
            } else {
                self.encoder.encode(&record)
            };

            match encoded {
                Ok(bytes) => records.push(bytes),
                Err(error) => {
                    debug!(record = %record, error = %error, "Skipping unencodable record");
                    skipped.push(SkippedRecord { record, error });
                }
            }
        }

        QueryAnswer {
            records,
            matched_origin: answer.origin,
            name_exists: answer.name_exists,
            skipped,
        }
    }
}
