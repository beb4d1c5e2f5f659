pub mod aggregate;
pub mod classifier;
pub mod dashboard;
pub mod engine;
pub mod filter;

pub use crate::domain::model::{JobListing, RadarReport, SearchHit, SearchOutcome};
pub use crate::domain::ports::{ConfigProvider, Pipeline, SearchProvider, Storage};
pub use crate::utils::error::Result;
