use super::query_parser::ParsedQuery;
use zonewire_application::use_cases::QueryAnswer;

const HEADER_LEN: usize = 12;

const OPT_RECORD: [u8; 11] = [
    0x00, 0x00, 0x29, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub const RCODE_NOERROR: u8 = 0;
pub const RCODE_FORMERR: u8 = 1;
pub const RCODE_NXDOMAIN: u8 = 3;
pub const RCODE_NOTIMP: u8 = 4;
pub const RCODE_REFUSED: u8 = 5;

/// Size limits for the transports a response can leave on.
const UDP_LIMIT: usize = 512;
/// RFC 6762 §17.
const MULTICAST_LIMIT: usize = 9000;
const TCP_LIMIT: usize = u16::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseMode {
    Udp,
    Tcp,
    /// Multicast DNS: ID zero, no question section, never truncated.
    Multicast,
}

/// Response code for an answer: REFUSED outside our zones, NXDOMAIN for names
/// the zone does not have, NOERROR otherwise (including NODATA).
pub fn response_code(answer: &QueryAnswer) -> u8 {
    if !answer.is_authoritative() {
        RCODE_REFUSED
    } else if answer.records.is_empty() && !answer.name_exists {
        RCODE_NXDOMAIN
    } else {
        RCODE_NOERROR
    }
}

/// Builds the response message for `query` from already-encoded answer records.
///
/// Records that would push a UDP response past the client's limit (512 bytes,
/// or the EDNS0 payload size) are dropped and TC is set.
pub fn build_response(
    query: &ParsedQuery,
    query_buf: &[u8],
    answer: &QueryAnswer,
    mode: ResponseMode,
) -> Vec<u8> {
    let include_question = mode != ResponseMode::Multicast && query.question_end <= query_buf.len();
    let question = if include_question {
        &query_buf[HEADER_LEN..query.question_end]
    } else {
        &[][..]
    };
    let with_opt = query.has_edns && mode != ResponseMode::Multicast;
    let opt_size = if with_opt { OPT_RECORD.len() } else { 0 };

    let limit = match mode {
        ResponseMode::Udp if query.has_edns => query.client_max_size as usize,
        ResponseMode::Udp => UDP_LIMIT,
        ResponseMode::Multicast => MULTICAST_LIMIT,
        ResponseMode::Tcp => TCP_LIMIT,
    };

    let mut size = HEADER_LEN + question.len() + opt_size;
    let mut included = 0usize;
    for record in &answer.records {
        if size + record.len() > limit {
            break;
        }
        size += record.len();
        included += 1;
    }
    let truncated = included < answer.records.len() && mode == ResponseMode::Udp;

    let mut buf = Vec::with_capacity(size);
    let id = if mode == ResponseMode::Multicast {
        0
    } else {
        query.id
    };
    buf.extend_from_slice(&id.to_be_bytes());

    let mut flags_hi = 0x80u8;
    if answer.is_authoritative() {
        flags_hi |= 0x04;
    }
    if truncated {
        flags_hi |= 0x02;
    }
    if query.recursion_desired() && mode != ResponseMode::Multicast {
        flags_hi |= 0x01;
    }
    buf.push(flags_hi);
    buf.push(response_code(answer));

    let qdcount: u16 = if include_question { 1 } else { 0 };
    buf.extend_from_slice(&qdcount.to_be_bytes());
    buf.extend_from_slice(&(included as u16).to_be_bytes());
    buf.extend_from_slice(&0u16.to_be_bytes());
    buf.extend_from_slice(&(u16::from(with_opt)).to_be_bytes());

    buf.extend_from_slice(question);
    for record in answer.records.iter().take(included) {
        buf.extend_from_slice(record);
    }
    if with_opt {
        buf.extend_from_slice(&OPT_RECORD);
    }

    buf
}

/// Header-only response for messages that could not be answered.
pub fn build_error_response(id: u16, rcode: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_LEN);
    buf.extend_from_slice(&id.to_be_bytes());
    buf.push(0x80);
    buf.push(rcode);
    buf.extend_from_slice(&[0u8; 8]);
    buf
}
