mod analysis;
pub mod api;
pub mod args;
pub mod commands;
mod config;
mod error;
mod import;
pub mod model;
mod utils;

pub use analysis::{aggregate, AnalysisRow, Recommendation, ANALYSIS_HEADER};
pub use config::Config;
pub use error::Error;
pub use error::Result;
pub use import::{Imported, RawRecord};
