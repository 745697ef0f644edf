mod config;
mod logging;

pub use config::{cli_overrides, load_config};
pub use logging::init_logging;
