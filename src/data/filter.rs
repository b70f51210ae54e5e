use std::collections::BTreeMap;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Dropdown label for the "no site filter" sentinel.
pub const ALL_SITES: &str = "All Sites";

// ---------------------------------------------------------------------------
// Selection types
// ---------------------------------------------------------------------------

/// Which launch site the charts are restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelection {
    /// No site restriction.
    #[default]
    AllSites,
    /// Restrict to a single site. A site absent from the dataset simply
    /// matches nothing; it is not an error.
    Site(String),
}

impl SiteSelection {
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::AllSites => ALL_SITES,
            SiteSelection::Site(site) => site,
        }
    }

    fn admits(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::AllSites => true,
            SiteSelection::Site(site) => record.site == *site,
        }
    }
}

/// Payload mass interval selected with the range sliders.
///
/// The engine does not validate `low <= high`; an inverted range matches
/// nothing. The UI keeps the interval well-formed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    /// Strict on both ends: a mass equal to either bound is outside.
    pub fn surrounds(&self, mass: f64) -> bool {
        self.low < mass && mass < self.high
    }
}

// ---------------------------------------------------------------------------
// Chart-ready output shapes
// ---------------------------------------------------------------------------

/// One slice of the success-breakdown chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSlice {
    pub label: String,
    pub count: usize,
}

/// Aggregated counts plus a chart title, fed straight to the donut renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesData {
    pub title: String,
    pub slices: Vec<SeriesSlice>,
}

impl SeriesData {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|slice| slice.count).sum()
    }
}

/// One marker of the payload/outcome scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Plotted on x, and also drives the marker size.
    pub payload_mass_kg: f64,
    /// Plotted on y as its numeric class (0 or 1).
    pub outcome: Outcome,
    /// Drives the marker colour and legend grouping.
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Success/failure breakdown for the donut chart.
///
/// With [`SiteSelection::AllSites`] the series has one slice per launch site
/// counting its successful launches. With a concrete site the series has one
/// slice per outcome observed at that site, counting all of its launches.
/// Slices are emitted in sorted label order for deterministic rendering.
pub fn site_success_breakdown(dataset: &LaunchDataset, selection: &SiteSelection) -> SeriesData {
    match selection {
        SiteSelection::AllSites => {
            let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
            for record in dataset.records.iter().filter(|r| r.outcome.is_success()) {
                *counts.entry(record.site.as_str()).or_default() += 1;
            }
            SeriesData {
                title: "Total Success Launches By all sites".to_string(),
                slices: counts
                    .into_iter()
                    .map(|(site, count)| SeriesSlice {
                        label: site.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
        SiteSelection::Site(site) => {
            let mut counts: BTreeMap<Outcome, usize> = BTreeMap::new();
            for record in dataset.records.iter().filter(|r| r.site == *site) {
                *counts.entry(record.outcome).or_default() += 1;
            }
            SeriesData {
                title: format!("Total Success Launches for site {site}"),
                slices: counts
                    .into_iter()
                    .map(|(outcome, count)| SeriesSlice {
                        label: outcome.to_string(),
                        count,
                    })
                    .collect(),
            }
        }
    }
}

/// Records passing both the site filter and the strict payload range filter.
///
/// The scatter chart, the records table and the status counts all derive from
/// this one subset, so "the current view" means the same thing everywhere.
pub fn visible_records<'a>(
    dataset: &'a LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    dataset
        .records
        .iter()
        .filter(|record| selection.admits(record))
        .filter(|record| range.surrounds(record.payload_mass_kg))
        .collect()
}

/// Payload/outcome points for the scatter chart: one point per launch whose
/// payload lies strictly inside `range`. An empty result is valid and renders
/// an empty chart.
pub fn payload_outcome_scatter(
    dataset: &LaunchDataset,
    selection: &SiteSelection,
    range: PayloadRange,
) -> Vec<ScatterPoint> {
    visible_records(dataset, selection, range)
        .into_iter()
        .map(|record| ScatterPoint {
            payload_mass_kg: record.payload_mass_kg,
            outcome: record.outcome,
            booster_category: record.booster_category.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, payload: f64, class: i64) -> LaunchRecord {
        LaunchRecord {
            flight_number: 0,
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::from_class(class).unwrap(),
            booster_version: "F9 FT B1021".to_string(),
            booster_category: "FT".to_string(),
        }
    }

    /// Sites {A, B}: A has outcomes (1, 1, 0), B has (1, 0).
    fn two_site_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 1000.0, 1),
            record("A", 2000.0, 1),
            record("A", 3000.0, 0),
            record("B", 4000.0, 1),
            record("B", 5000.0, 0),
        ])
    }

    fn slice_counts(series: &SeriesData) -> Vec<(&str, usize)> {
        series
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect()
    }

    #[test]
    fn all_sites_counts_successes_per_site() {
        let dataset = two_site_dataset();
        let series = site_success_breakdown(&dataset, &SiteSelection::AllSites);

        assert_eq!(series.title, "Total Success Launches By all sites");
        assert_eq!(slice_counts(&series), vec![("A", 2), ("B", 1)]);
    }

    #[test]
    fn all_sites_total_equals_success_row_count() {
        let dataset = two_site_dataset();
        let series = site_success_breakdown(&dataset, &SiteSelection::AllSites);
        let successes = dataset
            .records
            .iter()
            .filter(|r| r.outcome.is_success())
            .count();
        assert_eq!(series.total(), successes);
    }

    #[test]
    fn single_site_groups_by_outcome_without_outcome_filtering() {
        let dataset = two_site_dataset();
        let series =
            site_success_breakdown(&dataset, &SiteSelection::Site("A".to_string()));

        assert_eq!(series.title, "Total Success Launches for site A");
        assert_eq!(slice_counts(&series), vec![("Failure", 1), ("Success", 2)]);
        // Counts cover every row of the site, not just successes.
        assert_eq!(series.total(), 3);
    }

    #[test]
    fn breakdown_labels_come_from_the_dataset() {
        let dataset = two_site_dataset();
        let series = site_success_breakdown(&dataset, &SiteSelection::AllSites);
        for slice in &series.slices {
            assert!(dataset.sites.iter().any(|s| *s == slice.label));
        }
    }

    #[test]
    fn absent_site_yields_empty_results() {
        let dataset = two_site_dataset();
        let selection = SiteSelection::Site("C".to_string());

        let series = site_success_breakdown(&dataset, &selection);
        assert!(series.slices.is_empty());
        assert_eq!(series.total(), 0);

        let points =
            payload_outcome_scatter(&dataset, &selection, PayloadRange::new(0.0, 10_000.0));
        assert!(points.is_empty());
    }

    #[test]
    fn range_bounds_are_strict_on_both_ends() {
        let dataset = LaunchDataset::from_records(vec![
            record("A", 500.0, 1),
            record("A", 1000.0, 0),
            record("A", 1500.0, 1),
        ]);
        let points = payload_outcome_scatter(
            &dataset,
            &SiteSelection::Site("A".to_string()),
            PayloadRange::new(500.0, 1500.0),
        );

        // Rows sitting exactly on a bound are excluded.
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].payload_mass_kg, 1000.0);
    }

    #[test]
    fn every_scatter_point_lies_strictly_inside_the_range() {
        let dataset = two_site_dataset();
        let range = PayloadRange::new(1000.0, 5000.0);
        let points = payload_outcome_scatter(&dataset, &SiteSelection::AllSites, range);

        assert!(!points.is_empty());
        for point in &points {
            assert!(range.low < point.payload_mass_kg);
            assert!(point.payload_mass_kg < range.high);
        }
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let dataset = two_site_dataset();
        let points = payload_outcome_scatter(
            &dataset,
            &SiteSelection::AllSites,
            PayloadRange::new(5000.0, 1000.0),
        );
        assert!(points.is_empty());
    }

    #[test]
    fn operations_are_pure() {
        let dataset = two_site_dataset();
        let selection = SiteSelection::Site("B".to_string());
        let range = PayloadRange::new(0.0, 10_000.0);

        assert_eq!(
            site_success_breakdown(&dataset, &selection),
            site_success_breakdown(&dataset, &selection)
        );
        assert_eq!(
            payload_outcome_scatter(&dataset, &selection, range),
            payload_outcome_scatter(&dataset, &selection, range)
        );
    }

    #[test]
    fn visible_records_applies_site_and_range_together() {
        let dataset = two_site_dataset();
        let visible = visible_records(
            &dataset,
            &SiteSelection::Site("A".to_string()),
            PayloadRange::new(1500.0, 10_000.0),
        );
        let payloads: Vec<f64> = visible.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(payloads, vec![2000.0, 3000.0]);
    }
}
