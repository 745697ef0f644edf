use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};

pub const MDNS_PORT: u16 = 5353;
pub const MDNS_IPV4_GROUP: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);
pub const MDNS_IPV6_GROUP: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);

/// Reserved mDNS group addresses (RFC 6762 §3).
pub const MDNS_GROUPS: [SocketAddr; 2] = [
    SocketAddr::V4(SocketAddrV4::new(MDNS_IPV4_GROUP, MDNS_PORT)),
    SocketAddr::V6(SocketAddrV6::new(MDNS_IPV6_GROUP, MDNS_PORT, 0, 0)),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    Udp,
    Tcp,
}

impl fmt::Display for TransportProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportProtocol::Udp => f.write_str("udp"),
            TransportProtocol::Tcp => f.write_str("tcp"),
        }
    }
}

/// One socket the transport layer must open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SocketBinding {
    pub address: SocketAddr,
    pub protocol: TransportProtocol,
    /// `address` is a multicast group to join rather than a local address.
    pub multicast_group: bool,
}

impl SocketBinding {
    pub fn unicast(address: SocketAddr, protocol: TransportProtocol) -> Self {
        Self {
            address,
            protocol,
            multicast_group: false,
        }
    }

    pub fn multicast(group: SocketAddr) -> Self {
        Self {
            address: group,
            protocol: TransportProtocol::Udp,
            multicast_group: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingStrategy {
    #[default]
    Unicast,
    MulticastAndUnicast,
}

impl BindingStrategy {
    pub fn is_multicast(&self) -> bool {
        matches!(self, BindingStrategy::MulticastAndUnicast)
    }

    /// Unicast UDP (and TCP when enabled) for every listen address, followed by
    /// the mDNS groups when multicast is enabled.
    pub fn required_bindings(&self, unicast: &[SocketAddr], tcp: bool) -> Vec<SocketBinding> {
        let mut bindings = Vec::with_capacity(unicast.len() * 2 + MDNS_GROUPS.len());

        for address in unicast {
            bindings.push(SocketBinding::unicast(*address, TransportProtocol::Udp));
            if tcp {
                bindings.push(SocketBinding::unicast(*address, TransportProtocol::Tcp));
            }
        }

        if self.is_multicast() {
            bindings.extend(MDNS_GROUPS.iter().copied().map(SocketBinding::multicast));
        }

        bindings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicast_only_bindings() {
        let listen: SocketAddr = "127.0.0.1:5300".parse().unwrap();
        let bindings = BindingStrategy::Unicast.required_bindings(&[listen], true);
        assert_eq!(
            bindings,
            vec![
                SocketBinding::unicast(listen, TransportProtocol::Udp),
                SocketBinding::unicast(listen, TransportProtocol::Tcp),
            ]
        );
    }

    #[test]
    fn test_multicast_adds_mdns_groups() {
        let bindings = BindingStrategy::MulticastAndUnicast.required_bindings(&[], false);
        let groups: Vec<String> = bindings.iter().map(|b| b.address.to_string()).collect();
        assert_eq!(groups, vec!["224.0.0.251:5353", "[ff02::fb]:5353"]);
        assert!(bindings
            .iter()
            .all(|b| b.multicast_group && b.protocol == TransportProtocol::Udp));
    }
}
