use super::query_parser::{parse_query, query_id};
use super::wire_response::{
    build_error_response, build_response, response_code, ResponseMode, RCODE_FORMERR,
    RCODE_NOTIMP,
};
use std::sync::Arc;
use tracing::debug;
use zonewire_application::use_cases::AnswerQueryUseCase;
use zonewire_domain::{QueryPeer, TransportProtocol, MDNS_PORT};

/// A response and where it has to go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsReply {
    pub bytes: Vec<u8>,
    /// Send to the querier's address. When false the reply goes to the
    /// multicast group the query arrived on.
    pub unicast: bool,
}

/// Turns raw query messages into raw responses.
pub struct DnsQueryHandler {
    use_case: Arc<AnswerQueryUseCase>,
}

impl DnsQueryHandler {
    pub fn new(use_case: Arc<AnswerQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Answers one message. `None` means nothing is sent back: responses and
    /// garbage are dropped, and mDNS queries we have no records for stay silent.
    pub fn handle(
        &self,
        buf: &[u8],
        peer: QueryPeer,
        protocol: TransportProtocol,
    ) -> Option<DnsReply> {
        let Some(query) = parse_query(buf) else {
            return self.reject(buf, peer);
        };

        // A multicast query from a port other than 5353 is a one-shot legacy
        // query and gets a conventional unicast answer (RFC 6762 §6.7).
        let legacy_unicast = peer.multicast && peer.address.port() != MDNS_PORT;
        let mode = if peer.multicast && !legacy_unicast {
            ResponseMode::Multicast
        } else if protocol == TransportProtocol::Tcp {
            ResponseMode::Tcp
        } else {
            ResponseMode::Udp
        };

        let answer = self.use_case.execute(&query.to_domain_query(Some(peer)));

        debug!(
            name = %query.name,
            qtype = query.qtype,
            qclass = query.qclass,
            peer = %peer.address,
            multicast = peer.multicast,
            answers = answer.records.len(),
            skipped = answer.skipped.len(),
            rcode = response_code(&answer),
            "DNS query answered"
        );

        if peer.multicast && answer.is_empty() {
            return None;
        }

        Some(DnsReply {
            bytes: build_response(&query, buf, &answer, mode),
            unicast: mode != ResponseMode::Multicast || query.unicast_response,
        })
    }

    fn reject(&self, buf: &[u8], peer: QueryPeer) -> Option<DnsReply> {
        if peer.multicast || buf.len() < 3 || buf[2] & 0x80 != 0 {
            return None;
        }
        let id = query_id(buf)?;
        let opcode = (buf[2] >> 3) & 0x0F;
        let rcode = if opcode != 0 { RCODE_NOTIMP } else { RCODE_FORMERR };
        debug!(peer = %peer.address, rcode, "Rejecting unparseable query");
        Some(DnsReply {
            bytes: build_error_response(id, rcode),
            unicast: true,
        })
    }
}
