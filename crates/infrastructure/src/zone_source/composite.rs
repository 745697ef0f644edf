use super::{FileZoneSource, HttpZoneSource};
use async_trait::async_trait;
use std::sync::Arc;
use zonewire_application::ports::ZoneSource;
use zonewire_domain::DomainError;

/// Picks a source by the location's scheme: `http(s)://` goes to the HTTP
/// source, `file://` and plain paths to the file source.
pub struct CompositeZoneSource {
    file: Arc<dyn ZoneSource>,
    http: Arc<dyn ZoneSource>,
}

impl CompositeZoneSource {
    pub fn new() -> Result<Self, DomainError> {
        Ok(Self::with_sources(
            Arc::new(FileZoneSource::new()),
            Arc::new(HttpZoneSource::new()?),
        ))
    }

    pub fn with_sources(file: Arc<dyn ZoneSource>, http: Arc<dyn ZoneSource>) -> Self {
        Self { file, http }
    }

    fn route(&self, location: &str) -> Result<&dyn ZoneSource, DomainError> {
        match location.split_once("://") {
            None => Ok(self.file.as_ref()),
            Some((scheme, _)) => match scheme.to_ascii_lowercase().as_str() {
                "file" => Ok(self.file.as_ref()),
                "http" | "https" => Ok(self.http.as_ref()),
                other => Err(DomainError::ZoneSourceUnavailable {
                    location: location.to_string(),
                    reason: format!("unsupported scheme '{}'", other),
                }),
            },
        }
    }
}

#[async_trait]
impl ZoneSource for CompositeZoneSource {
    async fn read(&self, location: &str) -> Result<String, DomainError> {
        self.route(location)?.read(location).await
    }
}
