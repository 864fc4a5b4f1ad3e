//! Post-hoc filtering of the persisted record set.
//!
//! Loads the offers written by the last scrape, keeps the ones matching every
//! given criterion and either prints them as a table or exports them as JSON
//! keyed by their original row index.

use std::io;
use std::path::{Path, PathBuf};

use common::{JobOffer, StoreError, load_records};
use thiserror::Error;
use tracing::info;

pub mod export;
pub mod render;

pub use export::{export_path, write_export};
pub use render::render_table;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode filtered offers: {0}")]
    Json(#[from] serde_json::Error),
}

/// A filtered offer together with its row index in the persisted set.
pub type IndexedOffer<'a> = (usize, &'a JobOffer);

/// Predicates applied conjunctively; `None` means "don't filter on this".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Case-sensitive substring of the job title.
    pub title: Option<String>,
    pub min_rating: Option<i64>,
    pub min_salary: Option<i64>,
}

impl FilterCriteria {
    pub fn matches(&self, offer: &JobOffer) -> bool {
        if let Some(needle) = &self.title {
            if !offer.title.contains(needle.as_str()) {
                return false;
            }
        }
        if let Some(min) = self.min_rating {
            if offer.rating < min {
                return false;
            }
        }
        if let Some(min) = self.min_salary {
            if offer.salary < min {
                return false;
            }
        }
        true
    }

    /// Keeps matching offers in order, each tagged with its original index.
    pub fn apply<'a>(&self, offers: &'a [JobOffer]) -> Vec<IndexedOffer<'a>> {
        offers
            .iter()
            .enumerate()
            .filter(|(_, offer)| self.matches(offer))
            .collect()
    }
}

/// Where the filtered offers ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    Printed { count: usize },
    Saved { count: usize, path: PathBuf },
}

/// Loads the record set at `store`, filters it and prints the result, or
/// writes it to `save` (with `.json` appended when missing).
pub fn filter_records(
    store: &Path,
    criteria: &FilterCriteria,
    save: Option<&str>,
) -> Result<FilterOutcome, FilterError> {
    let offers = load_records(store)?;
    let rows = criteria.apply(&offers);
    info!(kept = rows.len(), total = offers.len(), "filtered record set");

    match save {
        None => {
            println!("{}", render_table(&rows));
            Ok(FilterOutcome::Printed { count: rows.len() })
        }
        Some(name) => {
            let path = export_path(name);
            write_export(&path, &rows)?;
            info!(path = ?path, "saved filtered offers");
            Ok(FilterOutcome::Saved {
                count: rows.len(),
                path,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::save_records;

    fn offer(title: &str, rating: i64, salary: i64) -> JobOffer {
        JobOffer {
            title: title.to_string(),
            company: "Acme".to_string(),
            rating,
            location: "Melbourne VIC".to_string(),
            ad_age: "Just posted".to_string(),
            salary,
            description: "N/A".to_string(),
        }
    }

    fn sample() -> Vec<JobOffer> {
        vec![
            offer("Junior Developer", 0, 0),
            offer("Software Engineer", 4, 70000),
            offer("Senior Engineer", 5, 120000),
        ]
    }

    #[test]
    fn test_rating_and_salary_thresholds_combine() {
        let offers = sample();
        let criteria = FilterCriteria {
            min_rating: Some(4),
            min_salary: Some(100000),
            ..Default::default()
        };

        let rows = criteria.apply(&offers);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, 2);
        assert_eq!(rows[0].1.rating, 5);
        assert_eq!(rows[0].1.salary, 120000);
    }

    #[test]
    fn test_title_match_is_case_sensitive_substring() {
        let mut offers = sample();
        offers.push(offer("engineering lead", 3, 0));
        let criteria = FilterCriteria {
            title: Some("Engineer".to_string()),
            ..Default::default()
        };

        let titles: Vec<&str> = criteria
            .apply(&offers)
            .into_iter()
            .map(|(_, o)| o.title.as_str())
            .collect();

        assert_eq!(titles, ["Software Engineer", "Senior Engineer"]);
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let offers = sample();
        let criteria = FilterCriteria {
            min_rating: Some(4),
            min_salary: Some(70000),
            ..Default::default()
        };

        let indices: Vec<usize> = criteria.apply(&offers).into_iter().map(|(i, _)| i).collect();
        assert_eq!(indices, [1, 2]);
    }

    #[test]
    fn test_no_criteria_keeps_everything_in_order() {
        let offers = sample();
        let rows = FilterCriteria::default().apply(&offers);

        let reloaded: Vec<JobOffer> = rows.into_iter().map(|(_, o)| o.clone()).collect();
        assert_eq!(reloaded, offers);
    }

    #[test]
    fn test_filter_records_saves_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("results.json");
        save_records(&store, &sample()).unwrap();
        let name = dir.path().join("senior").to_string_lossy().into_owned();

        let criteria = FilterCriteria {
            min_salary: Some(100000),
            ..Default::default()
        };
        let outcome = filter_records(&store, &criteria, Some(&name)).unwrap();

        let expected = dir.path().join("senior.json");
        assert_eq!(
            outcome,
            FilterOutcome::Saved {
                count: 1,
                path: expected.clone()
            }
        );
        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(expected).unwrap()).unwrap();
        assert_eq!(written["2"]["Job Title"], "Senior Engineer");
    }

    #[test]
    fn test_filter_records_prints_when_not_saving() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("results.json");
        save_records(&store, &sample()).unwrap();

        let outcome = filter_records(&store, &FilterCriteria::default(), None).unwrap();
        assert_eq!(outcome, FilterOutcome::Printed { count: 3 });
    }

    #[test]
    fn test_filter_records_without_scrape_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("missing.json");

        let err = filter_records(&store, &FilterCriteria::default(), None).unwrap_err();
        assert!(matches!(err, FilterError::Store(StoreError::NotFound(_))));
    }
}
