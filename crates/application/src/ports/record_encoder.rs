use bytes::Bytes;
use zonewire_domain::{DomainRecord, EncodingError};

/// Turns one record into its resource-record wire form.
pub trait RecordEncoder: Send + Sync {
    fn encode(&self, record: &DomainRecord) -> Result<Bytes, EncodingError>;
}
