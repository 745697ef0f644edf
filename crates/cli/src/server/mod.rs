pub mod dns;
pub mod reload;
pub mod sockets;

pub use dns::start_dns_server;
pub use reload::watch_reload_signal;
