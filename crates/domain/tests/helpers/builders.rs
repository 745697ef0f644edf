#![allow(dead_code)]
use zonewire_domain::{DomainName, DomainRecord, RecordClass, RecordField, RecordType};

pub fn name(text: &str) -> DomainName {
    DomainName::from_fqdn(text).unwrap()
}

pub struct RecordBuilder {
    name: DomainName,
    ttl: u32,
    class: RecordClass,
    record_type: RecordType,
    fields: Vec<RecordField>,
}

impl RecordBuilder {
    pub fn new(owner: &str) -> Self {
        Self {
            name: name(owner),
            ttl: 300,
            class: RecordClass::IN,
            record_type: RecordType::A,
            fields: vec![RecordField::Ipv4("192.0.2.1".parse().unwrap())],
        }
    }

    pub fn a(owner: &str, ip: &str) -> Self {
        Self::new(owner).ipv4(ip)
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn class(mut self, class: RecordClass) -> Self {
        self.class = class;
        self
    }

    pub fn ipv4(mut self, ip: &str) -> Self {
        self.record_type = RecordType::A;
        self.fields = vec![RecordField::Ipv4(ip.parse().unwrap())];
        self
    }

    pub fn ipv6(mut self, ip: &str) -> Self {
        self.record_type = RecordType::AAAA;
        self.fields = vec![RecordField::Ipv6(ip.parse().unwrap())];
        self
    }

    pub fn txt(mut self, parts: &[&str]) -> Self {
        self.record_type = RecordType::TXT;
        self.fields = parts.iter().map(|p| RecordField::text(*p)).collect();
        self
    }

    pub fn cname(mut self, target: &str) -> Self {
        self.record_type = RecordType::CNAME;
        self.fields = vec![RecordField::Name(name(target))];
        self
    }

    pub fn mx(mut self, preference: u64, exchange: &str) -> Self {
        self.record_type = RecordType::MX;
        self.fields = vec![
            RecordField::Integer(preference),
            RecordField::Name(name(exchange)),
        ];
        self
    }

    pub fn raw(mut self, record_type: RecordType, fields: Vec<RecordField>) -> Self {
        self.record_type = record_type;
        self.fields = fields;
        self
    }

    pub fn build(self) -> DomainRecord {
        DomainRecord::new(
            self.name,
            self.ttl,
            self.class,
            self.record_type,
            self.fields,
        )
        .unwrap()
    }
}
