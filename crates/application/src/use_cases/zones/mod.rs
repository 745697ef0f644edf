pub mod load;
pub mod reload;

pub use load::{LoadReport, LoadZonesUseCase, ZoneLoadFailure};
pub use reload::{ReloadReport, ReloadZonesUseCase};
