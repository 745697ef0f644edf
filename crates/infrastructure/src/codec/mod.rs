mod names;
mod record_codec;

pub use names::{read_name, write_name};
pub use record_codec::WireRecordCodec;
