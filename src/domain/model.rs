use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Neighborhood assigned to every listing until real geolocation exists.
pub const DEFAULT_NEIGHBORHOOD: &str = "Centro";

/// Rendered in place of a salary; the provider never returns one.
pub const SALARY_NOT_INFORMED: &str = "Não informado";

/// One organic result as returned by the search provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
    pub link: String,
}

impl SearchHit {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            snippet: snippet.into(),
            link: link.into(),
        }
    }
}

/// Serialized as the Portuguese label; deserialized through [`FromStr`] so
/// config files accept the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Sector {
    #[serde(rename = "Indústria")]
    Industry,
    #[serde(rename = "Comércio")]
    Commerce,
    #[serde(rename = "Serviços Gerais")]
    GeneralServices,
    #[serde(rename = "Saúde")]
    Health,
    #[serde(rename = "Construção Civil")]
    Construction,
    #[serde(rename = "Outros")]
    Other,
}

impl Sector {
    pub const ALL: [Sector; 6] = [
        Sector::Industry,
        Sector::Commerce,
        Sector::GeneralServices,
        Sector::Health,
        Sector::Construction,
        Sector::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Sector::Industry => "Indústria",
            Sector::Commerce => "Comércio",
            Sector::GeneralServices => "Serviços Gerais",
            Sector::Health => "Saúde",
            Sector::Construction => "Construção Civil",
            Sector::Other => "Outros",
        }
    }

    fn variant_name(&self) -> &'static str {
        match self {
            Sector::Industry => "industry",
            Sector::Commerce => "commerce",
            Sector::GeneralServices => "generalservices",
            Sector::Health => "health",
            Sector::Construction => "construction",
            Sector::Other => "other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = String;

    /// Accepts the Portuguese label or the English variant name, ignoring
    /// case and separators ("general-services", "Serviços Gerais").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        let compact: String = wanted
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();

        Sector::ALL
            .iter()
            .copied()
            .find(|sector| sector.label().to_lowercase() == wanted || sector.variant_name() == compact)
            .ok_or_else(|| {
                let known: Vec<&str> = Sector::ALL.iter().map(|s| s.label()).collect();
                format!("unknown sector '{}' (expected one of: {})", s, known.join(", "))
            })
    }
}

impl TryFrom<String> for Sector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// One normalized job posting. Built once from a [`SearchHit`]; the sector
/// and informality rate are derived and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobListing {
    title: String,
    snippet: String,
    link: String,
    sector: Sector,
    informality_rate: u8,
    neighborhood: String,
    salary: Option<f64>,
    job_count: u32,
}

impl JobListing {
    pub fn new(
        title: impl Into<String>,
        snippet: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let snippet = snippet.into();
        let sector = crate::core::classifier::classify(&title, &snippet);

        Self {
            title,
            snippet,
            link: link.into(),
            sector,
            informality_rate: crate::core::classifier::informality_rate(sector),
            neighborhood: DEFAULT_NEIGHBORHOOD.to_string(),
            salary: None,
            job_count: 1,
        }
    }

    pub fn from_hit(hit: SearchHit) -> Self {
        Self::new(hit.title, hit.snippet, hit.link)
    }

    /// Overrides the placeholder neighborhood at construction time.
    pub fn with_neighborhood(mut self, neighborhood: impl Into<String>) -> Self {
        self.neighborhood = neighborhood.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn snippet(&self) -> &str {
        &self.snippet
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn sector(&self) -> Sector {
        self.sector
    }

    pub fn informality_rate(&self) -> u8 {
        self.informality_rate
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn salary(&self) -> Option<f64> {
        self.salary
    }

    pub fn salary_label(&self) -> String {
        match self.salary {
            Some(value) => format!("R$ {:.2}", value),
            None => SALARY_NOT_INFORMED.to_string(),
        }
    }

    pub fn job_count(&self) -> u32 {
        self.job_count
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorSummary {
    pub sector: Sector,
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeighborhoodSummary {
    pub neighborhood: String,
    pub mean_informality_rate: f64,
}

/// User-visible condition attached to a run. None of these abort the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Configuration(String),
    Transport(String),
    Empty,
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Notice::Configuration(message) | Notice::Transport(message) => message,
            Notice::Empty => "Nenhuma vaga encontrada no momento. Tente novamente mais tarde.",
        }
    }
}

/// Filtered listings plus the summaries recomputed for them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    pub listings: Vec<JobListing>,
    pub sector_summary: Vec<SectorSummary>,
    pub neighborhood_summary: Vec<NeighborhoodSummary>,
}

impl DashboardView {
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn top(&self, n: usize) -> &[JobListing] {
        &self.listings[..n.min(self.listings.len())]
    }
}

/// Raw hits plus the notice raised while fetching them, if any.
#[derive(Debug, Clone, Default)]
pub struct SearchOutcome {
    pub query: String,
    pub hits: Vec<SearchHit>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RadarReport {
    pub generated_at: DateTime<Utc>,
    pub query: String,
    /// Deduplicated, unfiltered listings.
    pub listings: Vec<JobListing>,
    pub duplicates_dropped: usize,
    pub view: DashboardView,
    /// Fetch notice first (if any), then [`Notice::Empty`] when the view
    /// has no listings.
    pub notices: Vec<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_parses_label_and_variant_name() {
        assert_eq!("Indústria".parse::<Sector>().unwrap(), Sector::Industry);
        assert_eq!("construção civil".parse::<Sector>().unwrap(), Sector::Construction);
        assert_eq!("general-services".parse::<Sector>().unwrap(), Sector::GeneralServices);
        assert_eq!("OTHER".parse::<Sector>().unwrap(), Sector::Other);
        assert!("agro".parse::<Sector>().is_err());
    }

    #[test]
    fn test_listing_placeholders() {
        let listing = JobListing::new("Auxiliar", "", "https://www.bne.com.br/vaga/1");
        assert_eq!(listing.neighborhood(), DEFAULT_NEIGHBORHOOD);
        assert_eq!(listing.salary(), None);
        assert_eq!(listing.salary_label(), "Não informado");
        assert_eq!(listing.job_count(), 1);
    }

    #[test]
    fn test_listing_rate_follows_sector() {
        let listing = JobListing::new("Pedreiro para obra", "", "");
        assert_eq!(listing.sector(), Sector::Construction);
        assert_eq!(listing.informality_rate(), 30);
    }

    #[test]
    fn test_view_top_clamps_to_len() {
        let view = DashboardView {
            listings: vec![JobListing::new("a", "", ""), JobListing::new("b", "", "")],
            ..Default::default()
        };
        assert_eq!(view.top(5).len(), 2);
        assert_eq!(view.top(1)[0].title(), "a");
    }

    #[test]
    fn test_sector_deserializes_like_from_str() {
        let cases = [
            ("\"Comércio\"", Sector::Commerce),
            ("\"comércio\"", Sector::Commerce),
            ("\"commerce\"", Sector::Commerce),
            ("\"general_services\"", Sector::GeneralServices),
        ];
        for (json, expected) in cases {
            assert_eq!(serde_json::from_str::<Sector>(json).unwrap(), expected, "{}", json);
        }
        assert!(serde_json::from_str::<Sector>("\"agro\"").is_err());
    }

    #[test]
    fn test_sector_serializes_as_label() {
        let json = serde_json::to_string(&Sector::GeneralServices).unwrap();
        assert_eq!(json, "\"Serviços Gerais\"");
    }
}
