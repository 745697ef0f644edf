use async_trait::async_trait;
use zonewire_domain::DomainError;

/// Fetches the text of a zone master file.
#[async_trait]
pub trait ZoneSource: Send + Sync {
    /// Reads the whole document at `location`. Failures are reported as
    /// `DomainError::ZoneSourceUnavailable`.
    async fn read(&self, location: &str) -> Result<String, DomainError>;
}
