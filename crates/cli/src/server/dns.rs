use super::sockets::{create_multicast_socket, create_tcp_listener, create_udp_socket};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinSet;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};
use zonewire_domain::{QueryPeer, SocketBinding, TransportProtocol};
use zonewire_infrastructure::dns::DnsQueryHandler;

const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);
/// Large enough for EDNS0 queries and mDNS packets with known answers.
const RECV_BUFFER_SIZE: usize = 9000;

/// Opens every binding and serves until one of the listeners fails.
pub async fn start_dns_server(
    bindings: Vec<SocketBinding>,
    handler: Arc<DnsQueryHandler>,
) -> anyhow::Result<()> {
    let mut join_set: JoinSet<()> = JoinSet::new();

    for binding in bindings {
        match (binding.protocol, binding.multicast_group) {
            (TransportProtocol::Udp, false) => {
                let socket = create_udp_socket(binding.address)?;
                join_set.spawn(run_udp_worker(socket, handler.clone(), None));
            }
            (TransportProtocol::Udp, true) => {
                let socket = create_multicast_socket(binding.address)?;
                join_set.spawn(run_udp_worker(socket, handler.clone(), Some(binding.address)));
            }
            (TransportProtocol::Tcp, _) => {
                let listener = create_tcp_listener(binding.address)?;
                join_set.spawn(run_tcp_listener(listener, handler.clone()));
            }
        }
        info!(
            address = %binding.address,
            protocol = %binding.protocol,
            multicast = binding.multicast_group,
            "Socket bound"
        );
    }

    info!(sockets = join_set.len(), "DNS server ready");

    while join_set.join_next().await.is_some() {}
    Ok(())
}

/// Serves one UDP socket. `group` is set for sockets joined to an mDNS group;
/// replies that are not unicast go back to that group.
async fn run_udp_worker(
    socket: UdpSocket,
    handler: Arc<DnsQueryHandler>,
    group: Option<SocketAddr>,
) {
    let mut recv_buf = vec![0u8; RECV_BUFFER_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::ConnectionReset => continue,
            Err(e) => {
                error!(error = %e, "UDP recv error");
                break;
            }
        };

        let peer = QueryPeer {
            address: from,
            multicast: group.is_some(),
        };
        let Some(reply) = handler.handle(&recv_buf[..n], peer, TransportProtocol::Udp) else {
            continue;
        };

        let target = match group {
            Some(group) if !reply.unicast => group,
            _ => from,
        };
        if let Err(e) = socket.send_to(&reply.bytes, target).await {
            debug!(target = %target, error = %e, "UDP send failed");
        }
    }
}

async fn run_tcp_listener(listener: TcpListener, handler: Arc<DnsQueryHandler>) {
    loop {
        match listener.accept().await {
            Ok((stream, from)) => {
                let handler = handler.clone();
                tokio::spawn(async move {
                    if let Err(e) = serve_tcp_connection(stream, from, handler).await {
                        debug!(peer = %from, error = %e, "TCP connection closed");
                    }
                });
            }
            Err(e) => {
                warn!(error = %e, "TCP accept failed");
            }
        }
    }
}

/// Answers length-prefixed queries until the client closes the connection
/// or stays idle past the timeout.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    from: SocketAddr,
    handler: Arc<DnsQueryHandler>,
) -> io::Result<()> {
    let peer = QueryPeer {
        address: from,
        multicast: false,
    };
    let mut frame = Vec::with_capacity(512);

    loop {
        let len = match timeout(TCP_IDLE_TIMEOUT, stream.read_u16()).await {
            Ok(Ok(len)) => len as usize,
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(()),
            Ok(Err(e)) => return Err(e),
            Err(_) => return Ok(()),
        };

        frame.resize(len, 0);
        timeout(TCP_IDLE_TIMEOUT, stream.read_exact(&mut frame))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "partial frame"))??;

        let Some(reply) = handler.handle(&frame, peer, TransportProtocol::Tcp) else {
            continue;
        };
        let Ok(reply_len) = u16::try_from(reply.bytes.len()) else {
            warn!(peer = %from, bytes = reply.bytes.len(), "TCP response too large");
            continue;
        };

        stream.write_u16(reply_len).await?;
        stream.write_all(&reply.bytes).await?;
    }
}
