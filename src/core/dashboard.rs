use crate::core::aggregate::{neighborhood_summary, sector_summary};
use crate::core::filter::ListingFilter;
use crate::domain::model::{DashboardView, JobListing, Sector};

/// The deduplicated listing set that every filtered view is computed from.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    listings: Vec<JobListing>,
}

impl Dashboard {
    pub fn new(listings: Vec<JobListing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[JobListing] {
        &self.listings
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn view(&self, filter: &ListingFilter) -> DashboardView {
        let listings = filter.apply(&self.listings);
        let sector_summary = sector_summary(&listings);
        let neighborhood_summary = neighborhood_summary(&listings);

        DashboardView {
            listings,
            sector_summary,
            neighborhood_summary,
        }
    }

    /// Distinct sectors present, sorted by label.
    pub fn sector_options(&self) -> Vec<Sector> {
        let mut sectors: Vec<Sector> = Vec::new();
        for listing in &self.listings {
            if !sectors.contains(&listing.sector()) {
                sectors.push(listing.sector());
            }
        }
        sectors.sort_by(|a, b| a.label().cmp(b.label()));
        sectors
    }

    /// Distinct neighborhoods present, sorted.
    pub fn neighborhood_options(&self) -> Vec<String> {
        let mut neighborhoods: Vec<String> = self
            .listings
            .iter()
            .map(|l| l.neighborhood().to_string())
            .collect();
        neighborhoods.sort();
        neighborhoods.dedup();
        neighborhoods
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard() -> Dashboard {
        Dashboard::new(vec![
            JobListing::new("Vendedor", "loja", ""),
            JobListing::new("Operador", "produção", ""),
            JobListing::new("Caixa", "comércio", "").with_neighborhood("Vila Nova"),
            JobListing::new("Motorista", "", ""),
        ])
    }

    #[test]
    fn test_view_recomputes_summaries_for_filter() {
        let dashboard = dashboard();

        let all = dashboard.view(&ListingFilter::default());
        assert_eq!(all.listings.len(), 4);
        assert_eq!(all.sector_summary[0].sector, Sector::Commerce);
        assert_eq!(all.sector_summary[0].total_count, 2);

        let centro = dashboard.view(&ListingFilter {
            neighborhood: Some("Centro".to_string()),
            ..Default::default()
        });
        assert_eq!(centro.listings.len(), 3);
        assert_eq!(centro.sector_summary.len(), 3);
        assert_eq!(centro.neighborhood_summary.len(), 1);
        // (40 + 10 + 20) / 3
        let mean = centro.neighborhood_summary[0].mean_informality_rate;
        assert!((mean - 70.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_view_with_unmatched_filter_is_empty() {
        let view = dashboard().view(&ListingFilter {
            sector: Some(Sector::Health),
            ..Default::default()
        });
        assert!(view.is_empty());
        assert!(view.sector_summary.is_empty());
        assert!(view.neighborhood_summary.is_empty());
    }

    #[test]
    fn test_options_are_distinct_and_sorted() {
        let dashboard = dashboard();
        assert_eq!(
            dashboard.sector_options(),
            vec![Sector::Commerce, Sector::Industry, Sector::Other]
        );
        assert_eq!(
            dashboard.neighborhood_options(),
            vec!["Centro".to_string(), "Vila Nova".to_string()]
        );
    }
}
