use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use zonewire_application::ports::ZoneSource;
use zonewire_domain::DomainError;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches zone documents over `http://` and `https://`.
#[derive(Debug, Clone)]
pub struct HttpZoneSource {
    client: reqwest::Client,
}

impl HttpZoneSource {
    pub fn new() -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("zonewire/", env!("CARGO_PKG_VERSION"), " (zone-fetch)"))
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| DomainError::ConfigError(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ZoneSource for HttpZoneSource {
    async fn read(&self, location: &str) -> Result<String, DomainError> {
        let unavailable = |reason: String| DomainError::ZoneSourceUnavailable {
            location: location.to_string(),
            reason,
        };

        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| unavailable(format!("fetch error: {}", e)))?;

        if !response.status().is_success() {
            return Err(unavailable(format!("HTTP {}", response.status().as_u16())));
        }

        let text = response
            .text()
            .await
            .map_err(|e| unavailable(format!("read error: {}", e)))?;
        debug!(url = %location, bytes = text.len(), "Zone document fetched");
        Ok(text)
    }
}
