//! Shared job-offer record and the on-disk record set.

use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{StoreError, load_records, save_records};

/// Placeholder used when a listing carries no summary.
pub const NO_DESCRIPTION: &str = "N/A";

/// One normalized job offer scraped from a results page.
///
/// Field order and keys match the column layout of the persisted record set,
/// so serializing a `Vec<JobOffer>` yields rows of
/// `Job Title, Company, Rating, Location, Age of ad, Salary, Description`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct JobOffer {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    /// Employer rating, 0 when the listing shows none.
    #[serde(rename = "Rating")]
    pub rating: i64,
    #[serde(rename = "Location")]
    pub location: String,
    /// Relative age as published, e.g. "3 days ago".
    #[serde(rename = "Age of ad")]
    pub ad_age: String,
    /// Lowest advertised salary, 0 when none is published.
    #[serde(rename = "Salary")]
    pub salary: i64,
    #[serde(rename = "Description")]
    pub description: String,
}

/// Column headers in serialization order.
pub const COLUMNS: [&str; 7] = [
    "Job Title",
    "Company",
    "Rating",
    "Location",
    "Age of ad",
    "Salary",
    "Description",
];

impl JobOffer {
    /// Cell values in the same order as [`COLUMNS`].
    pub fn cells(&self) -> [String; 7] {
        [
            self.title.clone(),
            self.company.clone(),
            self.rating.to_string(),
            self.location.clone(),
            self.ad_age.clone(),
            self.salary.to_string(),
            self.description.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_column_names() {
        let offer = JobOffer {
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            rating: 4,
            location: "Perth WA".to_string(),
            ad_age: "3 days ago".to_string(),
            salary: 90000,
            description: NO_DESCRIPTION.to_string(),
        };
        let value = serde_json::to_value(&offer).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        for column in COLUMNS {
            assert!(keys.contains(&column), "missing {column}");
        }
        assert_eq!(value["Age of ad"], "3 days ago");
        assert_eq!(value["Salary"], 90000);
    }

    #[test]
    fn test_cells_follow_column_order() {
        let offer = JobOffer {
            title: "T".to_string(),
            company: "C".to_string(),
            rating: 5,
            location: "L".to_string(),
            ad_age: "Today".to_string(),
            salary: 0,
            description: "D".to_string(),
        };
        assert_eq!(offer.cells(), ["T", "C", "5", "L", "Today", "0", "D"].map(String::from));
    }
}
