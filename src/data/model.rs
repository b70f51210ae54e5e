use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – binary launch outcome
// ---------------------------------------------------------------------------

/// Success/failure classification of a single launch.
///
/// The source datasets encode this as an integer `class` column holding 0 or
/// 1; anything else is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map the dataset's binary class column to an outcome.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The numeric class used as the scatter chart's y value.
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Outcome::Success)
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
// LaunchRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single launch record (one row of the source dataset).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Sequential mission number from the source data.
    pub flight_number: i64,
    /// Launch site identifier, one of a small fixed set.
    pub site: String,
    /// Payload mass in kilograms. Non-negative and finite, enforced at load.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Full booster designation, shown in the records table.
    pub booster_version: String,
    /// Categorical booster label used for colour grouping in the scatter chart.
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed site and category indices.
///
/// Immutable after construction: every UI component reads it through a shared
/// reference and nothing mutates records once loaded.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launch records (rows).
    pub records: Vec<LaunchRecord>,
    /// Sorted distinct launch sites. Fixed once the dataset is loaded.
    pub sites: Vec<String>,
    /// Sorted distinct booster version categories.
    pub booster_categories: Vec<String>,
    /// Observed (min, max) payload mass over all records.
    pub payload_extent: (f64, f64),
}

impl LaunchDataset {
    /// Build the site/category indices and payload extent from loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: BTreeSet<&str> = BTreeSet::new();
        let mut categories: BTreeSet<&str> = BTreeSet::new();
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for record in &records {
            sites.insert(record.site.as_str());
            categories.insert(record.booster_category.as_str());
            min = min.min(record.payload_mass_kg);
            max = max.max(record.payload_mass_kg);
        }

        let payload_extent = if records.is_empty() { (0.0, 0.0) } else { (min, max) };
        let sites: Vec<String> = sites.into_iter().map(str::to_string).collect();
        let booster_categories: Vec<String> =
            categories.into_iter().map(str::to_string).collect();

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_extent,
        }
    }

    /// Number of launch records.
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

    fn record(flight: i64, site: &str, payload: f64, class: i64, category: &str) -> LaunchRecord {
        LaunchRecord {
            flight_number: flight,
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: format!("F9 B{flight:04}"),
            booster_category: category.to_string(),
        }
    }

    #[test]
    fn outcome_class_round_trip() {
        assert_eq!(Outcome::from_class(0), Some(Outcome::Failure));
        assert_eq!(Outcome::from_class(1), Some(Outcome::Success));
        assert_eq!(Outcome::from_class(2), None);
        assert_eq!(Outcome::from_class(-1), None);
        assert_eq!(Outcome::Success.class(), 1);
        assert_eq!(Outcome::Failure.class(), 0);
    }

    #[test]
    fn indices_are_sorted_and_distinct() {
        let dataset = LaunchDataset::from_records(vec![
            record(1, "VAFB SLC-4E", 500.0, 1, "v1.1"),
            record(2, "CCAFS LC-40", 2000.0, 0, "v1.0"),
            record(3, "CCAFS LC-40", 3500.0, 1, "v1.1"),
        ]);

        assert_eq!(dataset.sites, vec!["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(dataset.booster_categories, vec!["v1.0", "v1.1"]);
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn payload_extent_spans_observed_masses() {
        let dataset = LaunchDataset::from_records(vec![
            record(1, "A", 600.0, 1, "FT"),
            record(2, "A", 9600.0, 0, "FT"),
            record(3, "B", 2500.0, 1, "B5"),
        ]);
        assert_eq!(dataset.payload_extent, (600.0, 9600.0));
    }

    #[test]
    fn empty_dataset_has_zero_extent() {
        let dataset = LaunchDataset::from_records(Vec::new());
        assert!(dataset.is_empty());
        assert_eq!(dataset.payload_extent, (0.0, 0.0));
    }
}
