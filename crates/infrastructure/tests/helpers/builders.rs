#![allow(dead_code)]
use std::sync::Arc;
use zonewire_application::services::{DomainServer, DomainZone};
use zonewire_application::use_cases::AnswerQueryUseCase;
use zonewire_domain::{DomainRecord, ParseOptions, ZoneParser};
use zonewire_infrastructure::codec::WireRecordCodec;
use zonewire_infrastructure::dns::DnsQueryHandler;

pub fn parse_records(text: &str) -> Vec<DomainRecord> {
    ZoneParser::new(ParseOptions::default())
        .parse(text)
        .unwrap()
        .records
}

/// Raw query message builder.
pub struct QueryBuilder {
    id: u16,
    flags: u16,
    name: String,
    qtype: u16,
    qclass: u16,
    opt_payload: Option<u16>,
}

impl QueryBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            id: 0x1234,
            flags: 0x0100,
            name: name.to_string(),
            qtype: 1,
            qclass: 1,
            opt_payload: None,
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub fn qtype(mut self, qtype: u16) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn qclass(mut self, qclass: u16) -> Self {
        self.qclass = qclass;
        self
    }

    pub fn edns(mut self, payload: u16) -> Self {
        self.opt_payload = Some(payload);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(&self.id.to_be_bytes());
        buf.extend_from_slice(&self.flags.to_be_bytes());
        buf.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
        buf.extend_from_slice(&u16::from(self.opt_payload.is_some()).to_be_bytes());
        for label in self.name.trim_end_matches('.').split('.') {
            if label.is_empty() {
                continue;
            }
            buf.push(label.len() as u8);
            buf.extend_from_slice(label.as_bytes());
        }
        buf.push(0x00);
        buf.extend_from_slice(&self.qtype.to_be_bytes());
        buf.extend_from_slice(&self.qclass.to_be_bytes());
        if let Some(payload) = self.opt_payload {
            buf.push(0x00); // root
            buf.extend_from_slice(&[0x00, 41]); // OPT
            buf.extend_from_slice(&payload.to_be_bytes());
            buf.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]); // ext rcode, version, flags
            buf.extend_from_slice(&[0x00, 0x00]); // rdlen
        }
        buf
    }
}

pub fn handler_for(zone_text: &str) -> DnsQueryHandler {
    let server = Arc::new(DomainServer::new(Vec::new()));
    server
        .replace_zones(vec![Arc::new(
            DomainZone::parse(zone_text, ParseOptions::default()).unwrap(),
        )])
        .unwrap();
    let use_case = AnswerQueryUseCase::new(server, Arc::new(WireRecordCodec::new()));
    DnsQueryHandler::new(Arc::new(use_case))
}

pub fn header_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes([buf[offset], buf[offset + 1]])
}
