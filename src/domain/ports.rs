use crate::core::filter::ListingFilter;
use crate::domain::model::{RadarReport, SearchHit, SearchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn query(&self) -> &str;
    fn output_path(&self) -> &str;
    fn bundle_name(&self) -> &str;
    fn filter(&self) -> &ListingFilter;
    /// When false the load phase skips writing the bundle.
    fn write_bundle(&self) -> bool;
}

/// A job-search backend. One call is one outbound request.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SearchOutcome>;
    async fn transform(&self, outcome: SearchOutcome) -> Result<RadarReport>;
    /// Returns the output location, or `None` when nothing was written.
    async fn load(&self, report: &RadarReport) -> Result<Option<String>>;
}
