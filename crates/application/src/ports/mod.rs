mod record_encoder;
mod zone_source;

pub use record_encoder::RecordEncoder;
pub use zone_source::ZoneSource;
