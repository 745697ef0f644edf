use zonewire_domain::{DomainName, DomainQuery, QueryPeer, RecordClass, RecordType, Selector};

const HEADER_LEN: usize = 12;
const OPT_TYPE: u16 = 41;
/// mDNS reuses the top bit of QCLASS as the "unicast response requested" flag.
const UNICAST_RESPONSE_BIT: u16 = 0x8000;

/// The parts of a DNS query message the server needs.
#[derive(Debug, Clone)]
pub struct ParsedQuery {
    pub id: u16,
    pub flags: u16,
    pub name: DomainName,
    pub qtype: u16,
    /// QCLASS with the mDNS unicast-response bit cleared.
    pub qclass: u16,
    /// The question carried the mDNS QU bit.
    pub unicast_response: bool,
    /// Byte offset in the original buffer where the question section ends.
    pub question_end: usize,
    /// UDP payload size advertised through EDNS0, at least 512.
    pub client_max_size: u16,
    pub has_edns: bool,
}

impl ParsedQuery {
    pub fn recursion_desired(&self) -> bool {
        self.flags & 0x0100 != 0
    }

    pub fn to_domain_query(&self, peer: Option<QueryPeer>) -> DomainQuery {
        let query = DomainQuery::new(
            self.name.clone(),
            Selector::<RecordClass>::from_wire_class(self.qclass),
            Selector::<RecordType>::from_wire_type(self.qtype),
        );
        match peer {
            Some(peer) => query.with_peer(peer),
            None => query,
        }
    }
}

/// Reads the ID of anything long enough to carry a header.
pub fn query_id(buf: &[u8]) -> Option<u16> {
    (buf.len() >= HEADER_LEN).then(|| u16::from_be_bytes([buf[0], buf[1]]))
}

/// Parses a standard query with exactly one question.
///
/// Returns `None` for:
///
/// * Buffer shorter than 17 bytes
/// * QR bit set (response, not query)
/// * Non-zero OPCODE
/// * QDCOUNT ≠ 1
/// * Compression pointer, extended label type or non-ASCII label in the QNAME
/// * EDNS0 OPT record with a version other than 0
pub fn parse_query(buf: &[u8]) -> Option<ParsedQuery> {
    if buf.len() < 17 {
        return None;
    }

    let id = u16::from_be_bytes([buf[0], buf[1]]);
    let flags = u16::from_be_bytes([buf[2], buf[3]]);

    if flags & 0xF800 != 0 {
        return None;
    }

    let qdcount = u16::from_be_bytes([buf[4], buf[5]]);
    let ancount = u16::from_be_bytes([buf[6], buf[7]]);
    let nscount = u16::from_be_bytes([buf[8], buf[9]]);
    let arcount = u16::from_be_bytes([buf[10], buf[11]]);

    if qdcount != 1 {
        return None;
    }

    let mut pos = HEADER_LEN;
    let mut text = String::new();

    loop {
        let label_len = *buf.get(pos)? as usize;
        pos += 1;
        if label_len == 0 {
            break;
        }
        if label_len & 0xC0 != 0 {
            return None;
        }
        let label = buf.get(pos..pos + label_len)?;
        // A literal dot would split into extra labels once the name is text.
        if !label.is_ascii() || label.contains(&b'.') {
            return None;
        }
        text.push_str(std::str::from_utf8(label).ok()?);
        text.push('.');
        pos += label_len;
    }

    let name = if text.is_empty() {
        DomainName::root()
    } else {
        DomainName::from_fqdn(&text).ok()?
    };

    let question = buf.get(pos..pos + 4)?;
    let qtype = u16::from_be_bytes([question[0], question[1]]);
    let raw_class = u16::from_be_bytes([question[2], question[3]]);
    pos += 4;

    let question_end = pos;
    let mut client_max_size: u16 = 512;
    let mut has_edns = false;

    // Known-answer records in mDNS queries can use compression; the OPT scan
    // only runs when the additional section directly follows the question.
    if arcount > 0 && ancount == 0 && nscount == 0 {
        let mut ar_pos = question_end;
        for _ in 0..arcount {
            if ar_pos >= buf.len() {
                break;
            }
            if buf[ar_pos] != 0x00 {
                break;
            }
            ar_pos += 1;

            if ar_pos + 10 > buf.len() {
                return None;
            }

            let rr_type = u16::from_be_bytes([buf[ar_pos], buf[ar_pos + 1]]);
            if rr_type == OPT_TYPE {
                has_edns = true;
                let udp_size = u16::from_be_bytes([buf[ar_pos + 2], buf[ar_pos + 3]]);
                client_max_size = udp_size.max(512);
                if !is_valid_edns_version(buf[ar_pos + 5]) {
                    return None;
                }
            }

            let rdlen = u16::from_be_bytes([buf[ar_pos + 8], buf[ar_pos + 9]]) as usize;
            ar_pos += 10 + rdlen;
        }
    }

    Some(ParsedQuery {
        id,
        flags,
        name,
        qtype,
        qclass: raw_class & !UNICAST_RESPONSE_BIT,
        unicast_response: raw_class & UNICAST_RESPONSE_BIT != 0,
        question_end,
        client_max_size,
        has_edns,
    })
}

fn is_valid_edns_version(version_byte: u8) -> bool {
    version_byte == 0
}
