mod composite;
mod file;
mod http;

pub use composite::CompositeZoneSource;
pub use file::FileZoneSource;
pub use http::HttpZoneSource;
