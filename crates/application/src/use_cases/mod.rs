pub mod dns;
pub mod zones;

pub use dns::{AnswerQueryUseCase, QueryAnswer, SkippedRecord};
pub use zones::{LoadReport, LoadZonesUseCase, ReloadReport, ReloadZonesUseCase, ZoneLoadFailure};
