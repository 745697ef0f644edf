use socket2::{Domain, Protocol, Socket, Type};
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use tokio::net::{TcpListener, UdpSocket};

/// IP TTL / hop limit for mDNS traffic (RFC 6762 §11).
const MDNS_HOP_LIMIT: u32 = 255;

fn domain_for(addr: &SocketAddr) -> Domain {
    if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    }
}

pub fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain_for(&socket_addr), Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(UdpSocket::from_std(socket.into())?)
}

pub fn create_tcp_listener(socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain_for(&socket_addr), Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    Ok(TcpListener::from_std(socket.into())?)
}

/// Binds the group's port on the wildcard address and joins the group on the
/// default interface. Other mDNS responders on the host share the port.
pub fn create_multicast_socket(group: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain_for(&group), Type::DGRAM, Some(Protocol::UDP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;

    match group {
        SocketAddr::V4(group) => {
            socket.bind(&SocketAddr::from((Ipv4Addr::UNSPECIFIED, group.port())).into())?;
            socket.join_multicast_v4(group.ip(), &Ipv4Addr::UNSPECIFIED)?;
            socket.set_multicast_ttl_v4(MDNS_HOP_LIMIT)?;
            socket.set_multicast_loop_v4(true)?;
        }
        SocketAddr::V6(group) => {
            socket.set_only_v6(true)?;
            socket.bind(&SocketAddr::from((Ipv6Addr::UNSPECIFIED, group.port())).into())?;
            socket.join_multicast_v6(group.ip(), 0)?;
            socket.set_multicast_hops_v6(MDNS_HOP_LIMIT)?;
            socket.set_multicast_loop_v6(true)?;
        }
    }

    socket.set_nonblocking(true)?;
    Ok(UdpSocket::from_std(socket.into())?)
}
