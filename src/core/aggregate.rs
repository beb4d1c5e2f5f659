use crate::domain::model::{JobListing, NeighborhoodSummary, SearchHit, SectorSummary};
use std::collections::HashSet;

/// Classifies and enriches every hit, in fetch order.
pub fn enrich(hits: Vec<SearchHit>) -> Vec<JobListing> {
    hits.into_iter().map(JobListing::from_hit).collect()
}

/// Drops later listings whose title and snippet both equal an earlier one.
pub fn dedupe(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(listings.len());

    listings
        .into_iter()
        .filter(|listing| seen.insert((listing.title().to_string(), listing.snippet().to_string())))
        .collect()
}

pub fn sector_summary(listings: &[JobListing]) -> Vec<SectorSummary> {
    let mut groups: Vec<SectorSummary> = Vec::new();

    for listing in listings {
        match groups.iter_mut().find(|g| g.sector == listing.sector()) {
            Some(group) => group.total_count += listing.job_count(),
            None => groups.push(SectorSummary {
                sector: listing.sector(),
                total_count: listing.job_count(),
            }),
        }
    }

    // sort_by 是穩定排序，同數量保持出現順序
    groups.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    groups
}

pub fn neighborhood_summary(listings: &[JobListing]) -> Vec<NeighborhoodSummary> {
    let mut groups: Vec<(&str, u64, u64)> = Vec::new();

    for listing in listings {
        let rate = u64::from(listing.informality_rate());
        match groups.iter_mut().find(|(name, _, _)| *name == listing.neighborhood()) {
            Some((_, sum, count)) => {
                *sum += rate;
                *count += 1;
            }
            None => groups.push((listing.neighborhood(), rate, 1)),
        }
    }

    let mut summary: Vec<NeighborhoodSummary> = groups
        .into_iter()
        .map(|(name, sum, count)| NeighborhoodSummary {
            neighborhood: name.to_string(),
            mean_informality_rate: sum as f64 / count as f64,
        })
        .collect();

    summary.sort_by(|a, b| b.mean_informality_rate.total_cmp(&a.mean_informality_rate));
    summary
}
