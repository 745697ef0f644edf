//! Zonewire Infrastructure Layer
pub mod codec;
pub mod dns;
pub mod zone_source;
