pub mod parser;
pub mod time_literal;
pub mod tokenizer;

pub use parser::{parse, ParseOptions, ParsedZone, ZoneParser};
pub use time_literal::parse_time_literal;
