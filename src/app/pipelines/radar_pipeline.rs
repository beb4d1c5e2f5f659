use crate::core::aggregate::{dedupe, enrich};
use crate::core::dashboard::Dashboard;
use crate::core::{ConfigProvider, Pipeline, RadarReport, SearchOutcome, SearchProvider, Storage};
use crate::domain::model::{JobListing, NeighborhoodSummary, Notice, SectorSummary};
use crate::utils::error::{RadarError, Result};
use chrono::Utc;
use serde::Serialize;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const LISTINGS_FILE: &str = "listings.csv";
pub const SECTOR_SUMMARY_FILE: &str = "sector_summary.csv";
pub const NEIGHBORHOOD_SUMMARY_FILE: &str = "neighborhood_summary.csv";
pub const REPORT_FILE: &str = "report.json";

const LISTING_HEADERS: [&str; 8] = [
    "Neighborhood",
    "Economic Sector",
    "Job Count",
    "Informality Rate (%)",
    "Job Title",
    "Snippet",
    "Link",
    "Salary",
];
const SECTOR_HEADERS: [&str; 2] = ["Economic Sector", "Job Count"];
const NEIGHBORHOOD_HEADERS: [&str; 2] = ["Neighborhood", "Informality Rate (%)"];

#[derive(Serialize)]
struct ListingRow<'a> {
    neighborhood: &'a str,
    sector: &'static str,
    job_count: u32,
    informality_rate: u8,
    title: &'a str,
    snippet: &'a str,
    link: &'a str,
    salary: String,
}

impl<'a> From<&'a JobListing> for ListingRow<'a> {
    fn from(listing: &'a JobListing) -> Self {
        Self {
            neighborhood: listing.neighborhood(),
            sector: listing.sector().label(),
            job_count: listing.job_count(),
            informality_rate: listing.informality_rate(),
            title: listing.title(),
            snippet: listing.snippet(),
            link: listing.link(),
            salary: listing.salary_label(),
        }
    }
}

/// Fetch, classify, summarize, and bundle job listings for one query.
pub struct RadarPipeline<P: SearchProvider, S: Storage, C: ConfigProvider> {
    pub(crate) provider: P,
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<P: SearchProvider, S: Storage, C: ConfigProvider> RadarPipeline<P, S, C> {
    pub fn new(provider: P, storage: S, config: C) -> Self {
        Self {
            provider,
            storage,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

#[async_trait::async_trait]
impl<P: SearchProvider, S: Storage, C: ConfigProvider> Pipeline for RadarPipeline<P, S, C> {
    async fn extract(&self) -> Result<SearchOutcome> {
        let query = self.config.query().to_string();
        tracing::info!("Searching job listings for: {}", query);

        // 抓取失敗不中斷流程，改為空結果加上提示
        match self.provider.search(&query).await {
            Ok(hits) => Ok(SearchOutcome {
                query,
                hits,
                notice: None,
            }),
            Err(e) => {
                tracing::error!(
                    "Search failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                tracing::warn!("Suggestion: {}", e.recovery_suggestion());
                Ok(SearchOutcome {
                    query,
                    hits: Vec::new(),
                    notice: Some(e.notice()),
                })
            }
        }
    }

    async fn transform(&self, outcome: SearchOutcome) -> Result<RadarReport> {
        let listings = enrich(outcome.hits);
        let fetched = listings.len();
        let listings = dedupe(listings);
        let duplicates_dropped = fetched - listings.len();

        if duplicates_dropped > 0 {
            tracing::debug!("Dropped {} duplicate listings", duplicates_dropped);
        }

        let dashboard = Dashboard::new(listings);
        let view = dashboard.view(self.config.filter());

        // 抓取提示與「沒有職缺」提示可同時存在
        let mut notices: Vec<Notice> = outcome.notice.into_iter().collect();
        if view.is_empty() {
            tracing::warn!("No listings left to show");
            notices.push(Notice::Empty);
        }

        Ok(RadarReport {
            generated_at: Utc::now(),
            query: outcome.query,
            listings: dashboard.listings().to_vec(),
            duplicates_dropped,
            view,
            notices,
        })
    }

    async fn load(&self, report: &RadarReport) -> Result<Option<String>> {
        if !self.config.write_bundle() {
            tracing::debug!("Bundle output disabled");
            return Ok(None);
        }

        let bundle_name = self.config.bundle_name();
        let output_path = format!("{}/{}", self.config.output_path(), bundle_name);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file(LISTINGS_FILE, SimpleFileOptions::default())?;
            zip.write_all(&to_csv(
                &LISTING_HEADERS,
                report.view.listings.iter().map(ListingRow::from),
            )?)?;

            zip.start_file(SECTOR_SUMMARY_FILE, SimpleFileOptions::default())?;
            zip.write_all(&to_csv(
                &SECTOR_HEADERS,
                report
                    .view
                    .sector_summary
                    .iter()
                    .map(|s: &SectorSummary| (s.sector.label(), s.total_count)),
            )?)?;

            zip.start_file(NEIGHBORHOOD_SUMMARY_FILE, SimpleFileOptions::default())?;
            zip.write_all(&to_csv(
                &NEIGHBORHOOD_HEADERS,
                report
                    .view
                    .neighborhood_summary
                    .iter()
                    .map(|n: &NeighborhoodSummary| (n.neighborhood.as_str(), n.mean_informality_rate)),
            )?)?;

            zip.start_file(REPORT_FILE, SimpleFileOptions::default())?;
            zip.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

            // 完成並取回底層 Vec<u8>
            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing report bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(bundle_name, &zip_data).await?;

        Ok(Some(output_path))
    }
}

/// Header row is always written, even for an empty table.
fn to_csv<T: Serialize>(headers: &[&str], rows: impl IntoIterator<Item = T>) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| RadarError::IoError(e.into_error()))
}
