pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod presentation;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;

pub use adapters::{cache::CachedSearch, serper::SerperClient, storage::LocalStorage};
pub use app::pipelines::RadarPipeline;
pub use config::{RadarSettings, SearchConfig};
pub use core::{classifier::classify, classifier::informality_rate, engine::RadarEngine};
pub use domain::model::{JobListing, Sector};
pub use utils::error::{RadarError, Result};
