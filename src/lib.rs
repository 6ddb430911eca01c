#[forbid(unsafe_code)]
mod emissions;
pub mod fs;
pub mod history;
mod metrics;
mod settings;
mod units;
mod vehicles;

pub use emissions::*;
pub use fs::{BlobStorageProvider, LocalDisk};
pub use history::CalculationRecord;
pub use metrics::*;
pub use settings::*;
pub use units::*;
pub use vehicles::*;
