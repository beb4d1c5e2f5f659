#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::cache::DEFAULT_CACHE_CAPACITY;
use crate::core::filter::ListingFilter;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::fmt;
use std::time::Duration;

#[cfg(feature = "cli")]
pub use cli::CliArgs;

pub const API_KEY_ENV: &str = "SERPER_API_KEY";
pub const DEFAULT_ENDPOINT: &str = "https://google.serper.dev/search";
pub const DEFAULT_QUERY: &str = "vagas de emprego Jardim Alegre PR OR Ivaiporã site:bne.com.br OR site:portaljulianobarbosa.com.br";
pub const DEFAULT_COUNTRY: &str = "br";
pub const DEFAULT_LANGUAGE: &str = "pt-BR";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_BUNDLE_NAME: &str = "trampo_local_report.zip";

/// Everything the search client needs, injected at construction.
#[derive(Clone)]
pub struct SearchConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub country: String,
    pub language: String,
    pub timeout: Option<Duration>,
}

impl SearchConfig {
    /// Defaults with the API key taken from the process environment.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()),
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            country: DEFAULT_COUNTRY.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: None,
        }
    }
}

// 不輸出金鑰本身
impl fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("country", &self.country)
            .field("language", &self.language)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Resolved settings for one run: file values, then CLI overrides.
#[derive(Debug, Clone)]
pub struct RadarSettings {
    pub search: SearchConfig,
    pub query: String,
    pub cache_capacity: usize,
    pub output_path: String,
    pub bundle_name: String,
    pub write_bundle: bool,
    pub filter: ListingFilter,
}

impl Default for RadarSettings {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            query: DEFAULT_QUERY.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            bundle_name: DEFAULT_BUNDLE_NAME.to_string(),
            write_bundle: true,
            filter: ListingFilter::default(),
        }
    }
}

impl ConfigProvider for RadarSettings {
    fn query(&self) -> &str {
        &self.query
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn bundle_name(&self) -> &str {
        &self.bundle_name
    }

    fn filter(&self) -> &ListingFilter {
        &self.filter
    }

    fn write_bundle(&self) -> bool {
        self.write_bundle
    }
}

impl Validate for RadarSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_endpoint("search.endpoint", &self.search.endpoint)?;
        validation::validate_non_empty("search.query", &self.query)?;
        validation::validate_non_empty("search.country", &self.search.country)?;
        validation::validate_non_empty("search.language", &self.search.language)?;
        validation::validate_min("cache.capacity", self.cache_capacity, 1)?;

        if self.write_bundle {
            validation::validate_non_empty("load.output_path", &self.output_path)?;
            validation::validate_bundle_name("load.bundle_name", &self.bundle_name)?;
        }

        // 金鑰缺少不在這裡擋，抓取時才回報
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = RadarSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.search.country, "br");
        assert_eq!(settings.search.language, "pt-BR");
    }

    #[test]
    fn test_missing_key_is_not_a_validation_error() {
        let settings = RadarSettings::default();
        assert!(settings.search.api_key.is_none());
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let settings = RadarSettings {
            cache_capacity: 0,
            ..RadarSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bundle_name_checked_only_when_writing() {
        let mut settings = RadarSettings {
            bundle_name: "reports/radar.zip".to_string(),
            ..RadarSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.write_bundle = false;
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = SearchConfig {
            api_key: Some("super-secret".to_string()),
            ..SearchConfig::default()
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }
}
