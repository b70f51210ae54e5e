use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Selection state
// ---------------------------------------------------------------------------

/// Fixed payload slider bounds, independent of the loaded dataset.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1_000.0;

/// The current chart filters. Replaced wholesale on every user interaction;
/// nothing else holds a reference to it across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    pub site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    /// Defaults for a freshly loaded dataset: all sites, and the observed
    /// payload extent clamped to the slider bounds.
    pub fn for_dataset(dataset: &LaunchDataset) -> Self {
        let (min, max) = dataset.payload_extent;
        SelectionState {
            site: SiteSelection::AllSites,
            payload_range: PayloadRange::new(
                min.clamp(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX),
                max.clamp(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX),
            ),
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        SelectionState {
            site: SiteSelection::AllSites,
            payload_range: PayloadRange::new(PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_MAX),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is opened). Read-only once set.
    pub dataset: Option<LaunchDataset>,

    /// Current site and payload range filters.
    pub selection: SelectionState,

    /// Colour per launch site, used by the breakdown chart.
    pub site_colors: Option<ColorMap>,

    /// Colour per booster version category, used by the scatter chart.
    pub booster_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            selection: SelectionState::default(),
            site_colors: None,
            booster_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, rebuild colour maps and reset filters.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.selection = SelectionState::for_dataset(&dataset);
        self.site_colors = Some(ColorMap::new(&dataset.sites));
        self.booster_colors = Some(ColorMap::new(&dataset.booster_categories));
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Replace the selection with a new site, keeping the payload range.
    pub fn select_site(&mut self, site: SiteSelection) {
        self.selection = SelectionState {
            site,
            payload_range: self.selection.payload_range,
        };
    }

    /// Replace the selection with a new payload range, keeping the site.
    pub fn set_payload_range(&mut self, payload_range: PayloadRange) {
        self.selection = SelectionState {
            site: self.selection.site.clone(),
            payload_range,
        };
    }

    /// Restore the default filters for the loaded dataset.
    pub fn reset_selection(&mut self) {
        if let Some(dataset) = &self.dataset {
            self.selection = SelectionState::for_dataset(dataset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn dataset() -> LaunchDataset {
        let record = |site: &str, payload: f64| LaunchRecord {
            flight_number: 1,
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome: Outcome::Success,
            booster_version: "F9 FT B1021".to_string(),
            booster_category: "FT".to_string(),
        };
        LaunchDataset::from_records(vec![record("A", 800.0), record("B", 6000.0)])
    }

    #[test]
    fn default_selection_covers_the_full_slider_range() {
        let selection = SelectionState::default();
        assert_eq!(selection.site, SiteSelection::AllSites);
        assert_eq!(selection.payload_range.low, PAYLOAD_SLIDER_MIN);
        assert_eq!(selection.payload_range.high, PAYLOAD_SLIDER_MAX);
    }

    #[test]
    fn set_dataset_resets_selection_to_observed_extent() {
        let mut state = AppState::default();
        state.status_message = Some("Error: previous load failed".to_string());
        state.set_dataset(dataset());

        assert_eq!(state.selection.site, SiteSelection::AllSites);
        assert_eq!(state.selection.payload_range, PayloadRange::new(800.0, 6000.0));
        assert!(state.status_message.is_none());
        assert!(state.site_colors.is_some());
        assert!(state.booster_colors.is_some());
    }

    #[test]
    fn site_and_range_updates_replace_the_selection_independently() {
        let mut state = AppState::default();
        state.set_dataset(dataset());

        state.select_site(SiteSelection::Site("B".to_string()));
        assert_eq!(state.selection.site, SiteSelection::Site("B".to_string()));
        assert_eq!(state.selection.payload_range, PayloadRange::new(800.0, 6000.0));

        state.set_payload_range(PayloadRange::new(1000.0, 5000.0));
        assert_eq!(state.selection.site, SiteSelection::Site("B".to_string()));
        assert_eq!(state.selection.payload_range, PayloadRange::new(1000.0, 5000.0));
    }

    #[test]
    fn reset_restores_dataset_defaults() {
        let mut state = AppState::default();
        state.set_dataset(dataset());
        state.select_site(SiteSelection::Site("A".to_string()));
        state.set_payload_range(PayloadRange::new(0.0, 100.0));

        state.reset_selection();
        assert_eq!(state.selection, SelectionState::for_dataset(state.dataset.as_ref().unwrap()));
    }
}
