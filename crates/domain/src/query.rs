use super::{DomainName, RecordClass, RecordType};
use std::net::SocketAddr;

/// Class or type constraint of a query. `Any` is the explicit wildcard
/// (QCLASS/QTYPE 255 on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    Any,
    Only(T),
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::Any => true,
            Selector::Only(expected) => expected == value,
        }
    }
}

impl<T> From<T> for Selector<T> {
    fn from(value: T) -> Self {
        Selector::Only(value)
    }
}

impl Selector<RecordClass> {
    pub fn from_wire_class(code: u16) -> Self {
        if code == 255 {
            Selector::Any
        } else {
            Selector::Only(RecordClass::from_u16(code))
        }
    }
}

impl Selector<RecordType> {
    pub fn from_wire_type(code: u16) -> Self {
        if code == 255 {
            Selector::Any
        } else {
            Selector::Only(RecordType::from_u16(code))
        }
    }
}

/// Where a query arrived from. Opaque to matching; the transport uses it to
/// shape the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryPeer {
    pub address: SocketAddr,
    pub multicast: bool,
}

#[derive(Debug, Clone)]
pub struct DomainQuery {
    pub name: DomainName,
    pub class: Selector<RecordClass>,
    pub record_type: Selector<RecordType>,
    pub peer: Option<QueryPeer>,
}

impl DomainQuery {
    pub fn new(
        name: DomainName,
        class: Selector<RecordClass>,
        record_type: Selector<RecordType>,
    ) -> Self {
        Self {
            name,
            class,
            record_type,
            peer: None,
        }
    }

    pub fn with_peer(mut self, peer: QueryPeer) -> Self {
        self.peer = Some(peer);
        self
    }
}
