use crate::core::Pipeline;
use crate::domain::model::RadarReport;
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub report: RadarReport,
    pub output_path: Option<String>,
}

pub struct RadarEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RadarEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting job radar run");

        // Extract
        let outcome = self.pipeline.extract().await?;
        tracing::info!("Fetched {} raw results", outcome.hits.len());

        // Transform
        let report = self.pipeline.transform(outcome).await?;
        tracing::info!(
            "Built {} listings ({} after filters)",
            report.listings.len(),
            report.view.listings.len()
        );

        // Load
        let output_path = self.pipeline.load(&report).await?;
        if let Some(path) = &output_path {
            tracing::info!("Report bundle saved to: {}", path);
        }

        Ok(RunOutcome {
            report,
            output_path,
        })
    }
}
