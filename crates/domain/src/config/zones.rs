use crate::domain_name::DomainName;
use crate::zone_file::{parse_time_literal, ParseOptions};
use serde::{Deserialize, Serialize};

/// One `[[zones]]` table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneConfig {
    /// Path, `file://` URL or `http(s)://` URL of the master file.
    pub source: String,

    /// Zone apex. Taken from the document (`$ORIGIN` or SOA owner) when absent.
    #[serde(default)]
    pub origin: Option<String>,

    /// Time literal used for records without a ttl when the file has no `$TTL`.
    #[serde(default)]
    pub default_ttl: Option<String>,
}

impl ZoneConfig {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            origin: None,
            default_ttl: None,
        }
    }

    pub fn parse_options(&self) -> Result<ParseOptions, String> {
        let origin = self
            .origin
            .as_deref()
            .map(DomainName::from_fqdn)
            .transpose()
            .map_err(|e| format!("zone {}: invalid origin: {}", self.source, e))?;

        let default_ttl = self
            .default_ttl
            .as_deref()
            .map(parse_time_literal)
            .transpose()
            .map_err(|e| format!("zone {}: {}", self.source, e))?;

        Ok(ParseOptions {
            origin,
            default_ttl,
        })
    }
}
