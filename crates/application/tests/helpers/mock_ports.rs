#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use zonewire_application::ports::{RecordEncoder, ZoneSource};
use zonewire_domain::{DomainError, DomainName, DomainRecord, EncodingError};

/// In-memory zone documents keyed by location.
#[derive(Clone, Default)]
pub struct MockZoneSource {
    documents: Arc<RwLock<HashMap<String, String>>>,
    reads: Arc<AtomicUsize>,
}

impl MockZoneSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(self, location: &str, text: &str) -> Self {
        self.set_document(location, text);
        self
    }

    pub fn set_document(&self, location: &str, text: &str) {
        self.documents
            .write()
            .unwrap()
            .insert(location.to_string(), text.to_string());
    }

    pub fn remove_document(&self, location: &str) {
        self.documents.write().unwrap().remove(location);
    }

    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZoneSource for MockZoneSource {
    async fn read(&self, location: &str) -> Result<String, DomainError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.documents
            .read()
            .unwrap()
            .get(location)
            .cloned()
            .ok_or_else(|| DomainError::ZoneSourceUnavailable {
                location: location.to_string(),
                reason: "not found".to_string(),
            })
    }
}

/// Encodes a record as its presentation text. Unknown types fail the way the
/// wire codec does.
#[derive(Default)]
pub struct TextEncoder;

impl RecordEncoder for TextEncoder {
    fn encode(&self, record: &DomainRecord) -> Result<Bytes, EncodingError> {
        if !record.record_type().is_known() {
            return Err(EncodingError::UnsupportedRecordType(
                record.record_type().to_string(),
            ));
        }
        Ok(Bytes::from(record.to_string()))
    }
}

pub fn name(text: &str) -> DomainName {
    DomainName::from_fqdn(text).unwrap()
}

pub fn text_of(bytes: &Bytes) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}
