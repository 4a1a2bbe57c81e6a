use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Outcome – the binary launch result class
// ---------------------------------------------------------------------------

/// Launch result. The source data encodes this as a `class` column with
/// integer values 0 (failure) and 1 (success).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Decode the integer `class` column.
    pub fn from_class(class: i64) -> Result<Self, SchemaError> {
        match class {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(SchemaError::BadOutcomeClass(other)),
        }
    }

    /// Numeric value used by the aggregators (1.0 = success).
    pub fn value(self) -> f64 {
        match self {
            Outcome::Failure => 0.0,
            Outcome::Success => 1.0,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Failure => write!(f, "Failure"),
            Outcome::Success => write!(f, "Success"),
        }
    }
}

// ---------------------------------------------------------------------------
// Schema validation errors
// ---------------------------------------------------------------------------

/// Row-level schema violations caught while loading.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("outcome class must be 0 or 1, got {0}")]
    BadOutcomeClass(i64),
    #[error("payload mass must be non-negative, got {0}")]
    NegativePayload(f64),
    #[error("missing column '{0}'")]
    MissingColumn(&'static str),
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// Raw row as it appears in the source files, decoded by serde.
/// Column names follow the canonical CSV headers.
#[derive(Debug, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Launch Site")]
    pub launch_site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
    #[serde(rename = "class")]
    pub class: i64,
}

/// A single validated launch record.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Invariant: non-negative, enforced at load.
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    pub outcome: Outcome,
}

impl TryFrom<RawRecord> for LaunchRecord {
    type Error = SchemaError;

    fn try_from(raw: RawRecord) -> Result<Self, SchemaError> {
        if raw.payload_mass_kg < 0.0 {
            return Err(SchemaError::NegativePayload(raw.payload_mass_kg));
        }
        Ok(LaunchRecord {
            launch_site: raw.launch_site,
            payload_mass_kg: raw.payload_mass_kg,
            booster_version_category: raw.booster_version_category,
            outcome: Outcome::from_class(raw.class)?,
        })
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full dataset with indices derived once at load time.
/// Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows), in file order.
    pub records: Vec<LaunchRecord>,
    /// Sorted unique launch sites (feeds the site dropdown).
    pub sites: Vec<String>,
    /// Sorted unique booster version categories (feeds the scatter colors).
    pub booster_categories: Vec<String>,
    /// Min/max payload mass over all records; seeds the range selector.
    /// `(0.0, 0.0)` for an empty dataset.
    pub payload_bounds: (f64, f64),
}

impl LaunchDataset {
    /// Build the derived indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<&str> = BTreeSet::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut min_payload = f64::INFINITY;
        let mut max_payload = f64::NEG_INFINITY;

        for rec in &records {
            sites.insert(&rec.launch_site);
            categories.insert(&rec.booster_version_category);
            min_payload = min_payload.min(rec.payload_mass_kg);
            max_payload = max_payload.max(rec.payload_mass_kg);
        }

        let payload_bounds = if records.is_empty() {
            (0.0, 0.0)
        } else {
            (min_payload, max_payload)
        };

        LaunchDataset {
            sites: sites.into_iter().map(String::from).collect(),
            booster_categories: categories.into_iter().map(String::from).collect(),
            payload_bounds,
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: booster.to_string(),
            outcome: Outcome::from_class(class).unwrap(),
        }
    }

    #[test]
    fn derived_indices_are_sorted_and_unique() {
        let ds = LaunchDataset::from_records(vec![
            rec("KSC LC-39A", 4000.0, "FT", 1),
            rec("CCAFS LC-40", 500.0, "v1.0", 0),
            rec("KSC LC-39A", 9600.0, "B5", 1),
        ]);
        assert_eq!(ds.sites, vec!["CCAFS LC-40", "KSC LC-39A"]);
        assert_eq!(ds.booster_categories, vec!["B5", "FT", "v1.0"]);
        assert_eq!(ds.payload_bounds, (500.0, 9600.0));
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn empty_dataset_has_zero_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds, (0.0, 0.0));
        assert!(ds.sites.is_empty());
    }

    #[test]
    fn raw_record_validation() {
        let ok = RawRecord {
            launch_site: "KSC LC-39A".into(),
            payload_mass_kg: 3500.0,
            booster_version_category: "FT".into(),
            class: 1,
        };
        assert_eq!(LaunchRecord::try_from(ok).unwrap().outcome, Outcome::Success);

        let bad_class = RawRecord {
            launch_site: "KSC LC-39A".into(),
            payload_mass_kg: 3500.0,
            booster_version_category: "FT".into(),
            class: 2,
        };
        assert!(matches!(
            LaunchRecord::try_from(bad_class),
            Err(SchemaError::BadOutcomeClass(2))
        ));

        let bad_payload = RawRecord {
            launch_site: "KSC LC-39A".into(),
            payload_mass_kg: -1.0,
            booster_version_category: "FT".into(),
            class: 0,
        };
        assert!(matches!(
            LaunchRecord::try_from(bad_payload),
            Err(SchemaError::NegativePayload(_))
        ));
    }
}
