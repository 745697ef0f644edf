//! Zonewire Domain Layer
pub mod binding;
pub mod config;
pub mod dns_record;
pub mod domain_name;
pub mod errors;
pub mod query;
pub mod zone;
pub mod zone_file;

pub use binding::{
    BindingStrategy, SocketBinding, TransportProtocol, MDNS_GROUPS, MDNS_IPV4_GROUP,
    MDNS_IPV6_GROUP, MDNS_PORT,
};
pub use config::{CliOverrides, Config, ConfigError, ZoneConfig};
pub use dns_record::{DomainRecord, FieldKind, FieldLayout, RecordClass, RecordField, RecordType};
pub use domain_name::DomainName;
pub use errors::{ConfigurationError, DomainError, EncodingError, ParseError};
pub use query::{DomainQuery, QueryPeer, Selector};
pub use zone::{ExactMatcher, RecordMatcher, WildcardMatcher, ZoneSnapshot};
pub use zone_file::{parse_time_literal, ParseOptions, ParsedZone, ZoneParser};
