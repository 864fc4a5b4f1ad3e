//! JSON export of filtered offers, keyed by original row index.

use std::fs;
use std::path::{Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{FilterError, IndexedOffer};

const EXTENSION: &str = ".json";

/// Resolves the export file name. Names already mentioning `.json` anywhere
/// are kept as given.
pub fn export_path(name: &str) -> PathBuf {
    if name.contains(EXTENSION) {
        PathBuf::from(name)
    } else {
        PathBuf::from(format!("{name}{EXTENSION}"))
    }
}

struct ByIndex<'r, 'a>(&'r [IndexedOffer<'a>]);

impl Serialize for ByIndex<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, offer) in self.0 {
            map.serialize_entry(&index.to_string(), offer)?;
        }
        map.end()
    }
}

/// Renders `rows` as `{"<index>": {<columns>}, ...}` in row order.
pub fn to_json(rows: &[IndexedOffer<'_>]) -> Result<String, FilterError> {
    Ok(serde_json::to_string_pretty(&ByIndex(rows))?)
}

pub fn write_export(path: &Path, rows: &[IndexedOffer<'_>]) -> Result<(), FilterError> {
    let json = to_json(rows)?;
    fs::write(path, json).map_err(|source| FilterError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::JobOffer;

    fn offer(title: &str) -> JobOffer {
        JobOffer {
            title: title.to_string(),
            company: "Globex".to_string(),
            rating: 3,
            location: "Brisbane QLD".to_string(),
            ad_age: "30+ days ago".to_string(),
            salary: 65000,
            description: "Build things".to_string(),
        }
    }

    #[test]
    fn test_export_path_appends_extension() {
        assert_eq!(export_path("results"), PathBuf::from("results.json"));
        assert_eq!(export_path("results.json"), PathBuf::from("results.json"));
    }

    #[test]
    fn test_export_path_keeps_names_mentioning_json() {
        assert_eq!(export_path("old.json.bak"), PathBuf::from("old.json.bak"));
    }

    #[test]
    fn test_json_is_keyed_by_original_index_in_row_order() {
        let a = offer("Analyst");
        let b = offer("Architect");
        let rows = vec![(10, &a), (2, &b)];

        let json = to_json(&rows).unwrap();

        let ten = json.find("\"10\"").unwrap();
        let two = json.find("\"2\"").unwrap();
        assert!(ten < two);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["10"]["Job Title"], "Analyst");
        assert_eq!(value["2"]["Company"], "Globex");
        assert_eq!(value["2"]["Salary"], 65000);
    }

    #[test]
    fn test_empty_export_is_empty_object() {
        let value: serde_json::Value = serde_json::from_str(&to_json(&[]).unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
