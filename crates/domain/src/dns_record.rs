pub mod field;
pub mod record;
pub mod record_class;
pub mod record_type;

pub use field::{FieldKind, FieldLayout, RecordField};
pub use record::DomainRecord;
pub use record_class::RecordClass;
pub use record_type::RecordType;
