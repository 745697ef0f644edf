use clap::Parser;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "zonewire")]
#[command(version)]
#[command(about = "Zonewire - authoritative DNS and multicast DNS server")]
pub struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    pub dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    pub bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Also answer multicast DNS queries on the mDNS groups
    #[arg(short = 'm', long)]
    pub multicast: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::load_config(&cli)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Zonewire v{}", env!("CARGO_PKG_VERSION"));

    let services = di::DnsServices::new(&config).await?;

    let reload = services.reload.clone();
    tokio::spawn(async move {
        server::watch_reload_signal(reload, move || bootstrap::load_config(&cli)).await;
    });

    let bindings = services.server.required_bindings();
    let dns_server = server::start_dns_server(bindings, services.handler.clone());

    tokio::select! {
        result = dns_server => {
            if let Err(e) = result {
                error!(error = %e, "DNS server error");
                return Err(e);
            }
        }
        _ = shutdown_signal() => {}
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for SIGINT or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
