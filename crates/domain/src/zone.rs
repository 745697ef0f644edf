pub mod matcher;
pub mod snapshot;

pub use matcher::{ExactMatcher, RecordMatcher, WildcardMatcher};
pub use snapshot::ZoneSnapshot;
