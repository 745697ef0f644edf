use crate::binding::BindingStrategy;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_dns_port")]
    pub dns_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Also answer multicast DNS on the reserved mDNS groups.
    #[serde(default)]
    pub multicast: bool,

    #[serde(default = "default_true")]
    pub tcp: bool,
}

impl ServerConfig {
    pub fn binding_strategy(&self) -> BindingStrategy {
        if self.multicast {
            BindingStrategy::MulticastAndUnicast
        } else {
            BindingStrategy::Unicast
        }
    }

    pub fn listen_address(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .bind_address
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {}", self.bind_address, e))?;
        Ok(SocketAddr::new(ip, self.dns_port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            dns_port: default_dns_port(),
            bind_address: default_bind_address(),
            multicast: false,
            tcp: true,
        }
    }
}

fn default_dns_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_true() -> bool {
    true
}
