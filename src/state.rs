use crate::color::CategoryColors;
use crate::data::aggregate::{pie_breakdown, scatter_points, PieBreakdown, ScatterPoint};
use crate::data::filter::SiteSelection;
use crate::data::model::LaunchDataset;

/// Upper slider bound for the payload range, in kg.
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<LaunchDataset>,

    /// Current site dropdown value.
    pub site_selection: SiteSelection,

    /// Current payload range `(low, high)` in kg, inclusive.
    pub payload_range: (f64, f64),

    /// Pie chart rows for the current selection (cached).
    pub pie: Option<PieBreakdown>,

    /// Scatter chart rows for the current selection (cached).
    pub scatter: Vec<ScatterPoint>,

    /// Colours for booster version categories.
    pub category_colors: Option<CategoryColors>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            site_selection: SiteSelection::All,
            payload_range: (0.0, PAYLOAD_SLIDER_MAX),
            pie: None,
            scatter: Vec::new(),
            category_colors: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset the selectors, seed the payload
    /// range from the dataset bounds, rebuild colours, recompute charts.
    pub fn set_dataset(&mut self, dataset: LaunchDataset) {
        self.site_selection = SiteSelection::All;
        let (min_payload, max_payload) = dataset.payload_bounds;
        self.payload_range = (
            min_payload.clamp(0.0, PAYLOAD_SLIDER_MAX),
            max_payload.clamp(0.0, PAYLOAD_SLIDER_MAX),
        );
        self.category_colors = Some(CategoryColors::new(&dataset.booster_categories));

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
        self.recompute();
    }

    /// Change the site selection and recompute both charts.
    pub fn set_site(&mut self, selection: SiteSelection) {
        if self.site_selection != selection {
            self.site_selection = selection;
            self.recompute();
        }
    }

    /// Change the payload range and recompute the scatter chart. The
    /// controls keep `low <= high`; the value is stored as given.
    pub fn set_payload_range(&mut self, low: f64, high: f64) {
        if self.payload_range != (low, high) {
            self.payload_range = (low, high);
            self.recompute();
        }
    }

    /// Recompute the cached chart rows from the current selector values.
    pub fn recompute(&mut self) {
        let Some(dataset) = &self.dataset else {
            self.pie = None;
            self.scatter = Vec::new();
            return;
        };
        let (low, high) = self.payload_range;
        self.pie = Some(pie_breakdown(dataset, &self.site_selection));
        self.scatter = scatter_points(dataset, &self.site_selection, low, high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn rec(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
        LaunchRecord {
            launch_site: site.to_string(),
            payload_mass_kg: payload,
            booster_version_category: booster.to_string(),
            outcome: Outcome::from_class(class).unwrap(),
        }
    }

    fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("A", 500.0, "v1", 1),
            rec("A", 1500.0, "v1", 0),
            rec("B", 800.0, "v2", 1),
        ])
    }

    #[test]
    fn set_dataset_seeds_selectors_and_charts() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        assert_eq!(state.site_selection, SiteSelection::All);
        assert_eq!(state.payload_range, (500.0, 1500.0));
        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.slices.len(), 2);
        assert_eq!(state.scatter.len(), 3);
    }

    #[test]
    fn changing_site_recomputes_charts() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());
        state.set_payload_range(0.0, PAYLOAD_SLIDER_MAX);

        state.set_site(SiteSelection::Site("A".into()));
        let pie = state.pie.as_ref().unwrap();
        assert!(pie.success_rate.is_some());
        assert_eq!(state.scatter.len(), 2);
    }

    #[test]
    fn narrowing_payload_range_drops_scatter_points() {
        let mut state = AppState::default();
        state.set_dataset(sample_dataset());

        state.set_payload_range(0.0, 1000.0);
        assert_eq!(state.scatter.len(), 2);

        state.set_payload_range(0.0, 100.0);
        assert!(state.scatter.is_empty());
    }

    #[test]
    fn recompute_without_dataset_clears_charts() {
        let mut state = AppState::default();
        state.recompute();
        assert!(state.pie.is_none());
        assert!(state.scatter.is_empty());
    }
}
