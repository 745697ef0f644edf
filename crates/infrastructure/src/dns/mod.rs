pub mod handler;
pub mod query_parser;
pub mod wire_response;

pub use handler::{DnsQueryHandler, DnsReply};
pub use query_parser::{parse_query, ParsedQuery};
pub use wire_response::{build_response, ResponseMode};
