use crate::domain::model::{JobListing, Sector};
use serde::{Deserialize, Serialize};

/// Filter criteria combined with AND. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingFilter {
    #[serde(default)]
    pub sector: Option<Sector>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub title_contains: Option<String>,
}

impl ListingFilter {
    pub fn is_empty(&self) -> bool {
        self.sector.is_none() && self.neighborhood.is_none() && self.title_needle().is_none()
    }

    fn title_needle(&self) -> Option<String> {
        self.title_contains
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, listing: &JobListing) -> bool {
        self.matches_with_needle(listing, self.title_needle().as_deref())
    }

    fn matches_with_needle(&self, listing: &JobListing, needle: Option<&str>) -> bool {
        if let Some(sector) = self.sector {
            if listing.sector() != sector {
                return false;
            }
        }

        if let Some(neighborhood) = &self.neighborhood {
            if listing.neighborhood() != neighborhood.as_str() {
                return false;
            }
        }

        match needle {
            Some(needle) => listing.title().to_lowercase().contains(needle),
            None => true,
        }
    }

    pub fn apply(&self, listings: &[JobListing]) -> Vec<JobListing> {
        let needle = self.title_needle();

        listings
            .iter()
            .filter(|listing| self.matches_with_needle(listing, needle.as_deref()))
            .cloned()
            .collect()
    }
}
