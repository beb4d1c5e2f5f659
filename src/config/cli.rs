use crate::config::toml_config::TomlConfig;
use crate::config::{RadarSettings, SearchConfig};
use crate::domain::model::Sector;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "trampo-local")]
#[command(about = "Radar de oportunidades: job listings by economic sector and informality rate")]
pub struct CliArgs {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Search expression sent to the provider
    #[arg(short, long)]
    pub query: Option<String>,

    /// Search endpoint (defaults to the Serper search API)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Only show listings of this sector (label or English name)
    #[arg(long)]
    pub sector: Option<Sector>,

    /// Only show listings in this neighborhood
    #[arg(long)]
    pub neighborhood: Option<String>,

    /// Case-insensitive text the job title must contain
    #[arg(long)]
    pub title: Option<String>,

    /// Directory the report bundle is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Do not write the report bundle
    #[arg(long)]
    pub no_bundle: bool,

    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of listings in the top ranking
    #[arg(long, default_value = "5")]
    pub top: usize,

    /// Keep reading filter commands from stdin after the first report
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// File settings (if any) with the environment key as fallback, then
    /// command-line overrides on top.
    pub fn resolve(&self) -> Result<RadarSettings> {
        let base = RadarSettings {
            search: SearchConfig::from_env(),
            ..RadarSettings::default()
        };

        let mut settings = match &self.config {
            Some(path) => {
                tracing::info!("Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.apply_to(base)
            }
            None => base,
        };

        if let Some(query) = &self.query {
            settings.query = query.clone();
        }
        if let Some(endpoint) = &self.endpoint {
            settings.search.endpoint = endpoint.clone();
        }
        if let Some(output_path) = &self.output_path {
            settings.output_path = output_path.clone();
        }
        if self.no_bundle {
            settings.write_bundle = false;
        }
        if let Some(sector) = self.sector {
            settings.filter.sector = Some(sector);
        }
        if let Some(neighborhood) = &self.neighborhood {
            settings.filter.neighborhood = Some(neighborhood.clone());
        }
        if let Some(title) = &self.title {
            settings.filter.title_contains = Some(title.clone());
        }

        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_filters() {
        let args = CliArgs::parse_from([
            "trampo-local",
            "--sector",
            "Comércio",
            "--neighborhood",
            "Centro",
            "--title",
            "vendedor",
            "--no-bundle",
        ]);

        let settings = args.resolve().unwrap();

        assert_eq!(settings.filter.sector, Some(Sector::Commerce));
        assert_eq!(settings.filter.neighborhood.as_deref(), Some("Centro"));
        assert_eq!(settings.filter.title_contains.as_deref(), Some("vendedor"));
        assert!(!settings.write_bundle);
        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.top, 5);
    }

    #[test]
    fn test_unknown_sector_is_rejected_by_parser() {
        assert!(CliArgs::try_parse_from(["trampo-local", "--sector", "agro"]).is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                br#"
[search]
query = "from file"
endpoint = "https://file.example.com/search"
"#,
            )
            .unwrap();

        let path = temp_file.path().to_str().unwrap().to_string();
        let args = CliArgs::parse_from(["trampo-local", "--config", path.as_str(), "--query", "from cli"]);

        let settings = args.resolve().unwrap();

        assert_eq!(settings.query, "from cli");
        assert_eq!(settings.search.endpoint, "https://file.example.com/search");
    }

    #[test]
    fn test_invalid_endpoint_override_fails() {
        let args = CliArgs::parse_from(["trampo-local", "--endpoint", "not a url"]);
        assert!(args.resolve().is_err());
    }
}
