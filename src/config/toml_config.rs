use crate::config::{RadarSettings, SearchConfig};
use crate::core::filter::ListingFilter;
use crate::utils::error::{RadarError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub search: SearchSection,
    pub cache: Option<CacheSection>,
    pub load: Option<LoadSection>,
    pub filter: Option<ListingFilter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSection {
    pub endpoint: Option<String>,
    pub query: Option<String>,
    pub api_key: Option<String>,
    pub country: Option<String>,
    pub language: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSection {
    pub capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    pub output_path: Option<String>,
    pub bundle_name: Option<String>,
    pub enabled: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(RadarError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| RadarError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SERPER_API_KEY})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| RadarError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Builds run settings on top of `base`; values set in the file win.
    pub fn apply_to(self, base: RadarSettings) -> RadarSettings {
        let search = self.search;
        let defaults = base.search;

        // 未替換的 ${VAR} 視為沒有金鑰
        let api_key = search
            .api_key
            .filter(|key| !key.trim().is_empty() && !key.starts_with("${"))
            .or(defaults.api_key);

        let load = self.load;
        let output_path = load
            .as_ref()
            .and_then(|l| l.output_path.clone())
            .unwrap_or(base.output_path);
        let bundle_name = load
            .as_ref()
            .and_then(|l| l.bundle_name.clone())
            .unwrap_or(base.bundle_name);
        let write_bundle = load
            .as_ref()
            .and_then(|l| l.enabled)
            .unwrap_or(base.write_bundle);

        RadarSettings {
            search: SearchConfig {
                endpoint: search.endpoint.unwrap_or(defaults.endpoint),
                api_key,
                country: search.country.unwrap_or(defaults.country),
                language: search.language.unwrap_or(defaults.language),
                timeout: search
                    .timeout_seconds
                    .map(Duration::from_secs)
                    .or(defaults.timeout),
            },
            query: search.query.unwrap_or(base.query),
            cache_capacity: self
                .cache
                .map(|c| c.capacity)
                .unwrap_or(base.cache_capacity),
            output_path,
            bundle_name,
            write_bundle,
            filter: self.filter.unwrap_or(base.filter),
        }
    }

    pub fn into_settings(self) -> Result<RadarSettings> {
        let settings = self.apply_to(RadarSettings::default());
        settings.validate()?;
        Ok(settings)
    }
}
