use std::sync::Arc;
use tracing::{error, info, warn};
use zonewire_application::use_cases::ReloadZonesUseCase;
use zonewire_domain::Config;

/// Re-reads the configuration and reloads zones on every SIGHUP.
///
/// A bad configuration file or a rejected zone set leaves the served zones
/// as they were.
pub async fn watch_reload_signal<F>(reload: Arc<ReloadZonesUseCase>, load_config: F)
where
    F: Fn() -> anyhow::Result<Config>,
{
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut hangup = match signal(SignalKind::hangup()) {
            Ok(sig) => sig,
            Err(e) => {
                error!(error = %e, "Failed to install SIGHUP handler");
                return;
            }
        };

        while hangup.recv().await.is_some() {
            info!("Received SIGHUP, reloading zones");
            let config = match load_config() {
                Ok(config) => config,
                Err(e) => {
                    warn!(error = %e, "Configuration reload failed; keeping current zones");
                    continue;
                }
            };

            match reload.execute(&config.zones).await {
                Ok(report) => info!(
                    reloaded = report.reloaded,
                    added = report.added,
                    removed = report.removed,
                    failed = report.failures.len(),
                    "Zone reload finished"
                ),
                Err(e) => warn!(error = %e, "Zone reload rejected"),
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = (reload, load_config);
        std::future::pending::<()>().await;
    }
}
