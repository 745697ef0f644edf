use std::sync::Arc;
use tracing::{info, warn};
use zonewire_application::ports::ZoneSource;
use zonewire_application::services::DomainServer;
use zonewire_application::use_cases::{AnswerQueryUseCase, LoadZonesUseCase, ReloadZonesUseCase};
use zonewire_domain::Config;
use zonewire_infrastructure::codec::WireRecordCodec;
use zonewire_infrastructure::dns::DnsQueryHandler;
use zonewire_infrastructure::zone_source::CompositeZoneSource;

pub struct DnsServices {
    pub server: Arc<DomainServer>,
    pub handler: Arc<DnsQueryHandler>,
    pub reload: Arc<ReloadZonesUseCase>,
}

impl DnsServices {
    /// Builds the server and loads every configured zone into it. Zones that
    /// fail to load are logged and left out; the server still starts.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let source: Arc<dyn ZoneSource> = Arc::new(CompositeZoneSource::new()?);

        let listen = vec![config.server.listen_address().map_err(anyhow::Error::msg)?];
        let server = Arc::new(
            DomainServer::with_strategy(config.server.binding_strategy(), listen)
                .with_tcp(config.server.tcp),
        );

        let report = LoadZonesUseCase::new(source.clone())
            .execute(&config.zones)
            .await;
        for failure in &report.failures {
            warn!(source = %failure.location, error = %failure.error, "Zone not served");
        }
        server.replace_zones(report.zones)?;

        let answer = Arc::new(AnswerQueryUseCase::new(
            server.clone(),
            Arc::new(WireRecordCodec::new()),
        ));
        let handler = Arc::new(DnsQueryHandler::new(answer));
        let reload = Arc::new(ReloadZonesUseCase::new(server.clone(), source));

        info!(
            zones = server.zones().len(),
            multicast = server.is_multicast(),
            "DNS services ready"
        );

        Ok(Self {
            server,
            handler,
            reload,
        })
    }
}
