use crate::Cli;
use zonewire_domain::{CliOverrides, Config};

pub fn cli_overrides(cli: &Cli) -> CliOverrides {
    CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        log_level: cli.log_level.clone(),
        multicast: cli.multicast,
    }
}

/// Loads and validates the configuration, applying command-line overrides.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = Config::load(cli.config.as_deref(), cli_overrides(cli))?;
    config.validate()?;
    Ok(config)
}
