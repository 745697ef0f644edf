use async_trait::async_trait;
use tokio::fs;
use tracing::debug;
use zonewire_application::ports::ZoneSource;
use zonewire_domain::DomainError;

/// Reads zone files from local paths or `file://` URLs.
#[derive(Debug, Clone, Default)]
pub struct FileZoneSource;

impl FileZoneSource {
    pub fn new() -> Self {
        Self
    }

    fn path_of(location: &str) -> &str {
        location.strip_prefix("file://").unwrap_or(location)
    }
}

#[async_trait]
impl ZoneSource for FileZoneSource {
    async fn read(&self, location: &str) -> Result<String, DomainError> {
        let path = Self::path_of(location);
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::ZoneSourceUnavailable {
                location: location.to_string(),
                reason: e.to_string(),
            })?;
        debug!(path = %path, bytes = text.len(), "Zone file read");
        Ok(text)
    }
}
