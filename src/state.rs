use crate::callbacks::{CallbackRegistry, EventKind, InputId, OutputId, Selection};
use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::model::LaunchDataset;
use crate::data::query::{PayloadRange, SiteFilter};
use crate::figure::{Figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, read-only until the user opens another file.
    pub dataset: LaunchDataset,

    /// Where the dataset came from, shown in the top bar.
    pub source: String,

    /// Current dropdown and slider values.
    pub selection: Selection,

    /// Displayed scale of the payload slider.
    pub slider: SliderConfig,

    /// Tick positions for `slider`, computed once.
    pub slider_marks: Vec<f64>,

    registry: CallbackRegistry,

    /// Latest figure for each output.
    pub pie: Option<PieFigure>,
    pub scatter: Option<ScatterFigure>,

    /// Booster category colours, fixed for the lifetime of a dataset.
    pub booster_colors: ColorMap,

    /// Whether the record table under the scatter chart is expanded.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(dataset: LaunchDataset, source: String, slider: SliderConfig) -> Self {
        let mut state = Self {
            selection: Selection::initial(&dataset),
            booster_colors: booster_colors(&dataset),
            dataset,
            source,
            slider_marks: slider.marks(),
            slider,
            registry: CallbackRegistry::default(),
            pie: None,
            scatter: None,
            show_table: false,
            status_message: None,
        };
        state.refresh_all();
        state
    }

    /// Swap in a newly loaded dataset, reset the selection and redraw.
    pub fn set_dataset(&mut self, dataset: LaunchDataset, source: String) {
        self.selection = Selection::initial(&dataset);
        self.booster_colors = booster_colors(&dataset);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refresh_all();
    }

    /// Dropdown changed.
    pub fn set_site(&mut self, site: SiteFilter) {
        if self.selection.site == site {
            return;
        }
        log::debug!("site selection changed to '{}'", site.value());
        self.selection.site = site;
        self.handle_input(InputId::SiteDropdown);
    }

    /// Slider changed.
    pub fn set_payload_range(&mut self, range: PayloadRange) {
        if self.selection.payload == range {
            return;
        }
        self.selection.payload = range;
        self.handle_input(InputId::PayloadSlider);
    }

    fn handle_input(&mut self, input: InputId) {
        let results = self.registry.dispatch(
            input,
            EventKind::ValueChanged,
            &self.dataset,
            &self.selection,
        );
        self.apply(results);
    }

    fn refresh_all(&mut self) {
        let results = self.registry.fire_all(&self.dataset, &self.selection);
        self.apply(results);
    }

    fn apply(&mut self, results: Vec<(OutputId, Figure)>) {
        for (output, figure) in results {
            match (output, figure) {
                (OutputId::SuccessPieChart, Figure::Pie(pie)) => self.pie = Some(pie),
                (OutputId::PayloadScatterChart, Figure::Scatter(scatter)) => {
                    self.scatter = Some(scatter)
                }
                (output, figure) => {
                    log::warn!("figure '{}' does not fit output {output}", figure.title());
                }
            }
        }
    }
}

fn booster_colors(dataset: &LaunchDataset) -> ColorMap {
    ColorMap::new(
        dataset
            .records()
            .iter()
            .map(|r| r.booster_category.as_str()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn state() -> AppState {
        let ds = LaunchDataset::from_records(vec![
            record("A", 100.0, 1, "v1.0"),
            record("A", 6000.0, 0, "FT"),
            record("B", 4000.0, 1, "FT"),
        ])
        .unwrap();
        AppState::new(ds, "test.csv".to_string(), SliderConfig::default())
    }

    #[test]
    fn new_state_renders_both_charts() {
        let state = state();
        assert_eq!(state.selection.payload, PayloadRange::new(100.0, 6000.0));
        assert_eq!(
            state.pie.as_ref().map(|p| p.title.as_str()),
            Some("Total Successful launches by Site")
        );
        assert_eq!(state.scatter.as_ref().map(|s| s.points.len()), Some(3));
        assert_eq!(state.slider_marks.len(), 11);
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut state = state();
        state.set_site(SiteFilter::from_value("B"));

        let pie = state.pie.as_ref().unwrap();
        assert_eq!(pie.title, "Total Successful launches for site B");
        assert_eq!(pie.slices.len(), 1);
        let scatter = state.scatter.as_ref().unwrap();
        assert!(scatter.points.iter().all(|p| p.launch_site == "B"));
    }

    #[test]
    fn slider_change_leaves_pie_untouched() {
        let mut state = state();
        let pie_before = state.pie.clone();

        state.set_payload_range(PayloadRange::new(0.0, 5000.0));

        assert_eq!(state.pie, pie_before);
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 2);
    }

    #[test]
    fn replacing_dataset_resets_selection() {
        let mut state = state();
        state.set_site(SiteFilter::from_value("A"));
        state.status_message = Some("old error".into());

        let ds = LaunchDataset::from_records(vec![record("C", 42.0, 0, "B5")]).unwrap();
        state.set_dataset(ds, "other.csv".to_string());

        assert_eq!(state.selection.site, SiteFilter::All);
        assert_eq!(state.selection.payload, PayloadRange::new(42.0, 42.0));
        assert!(state.pie.as_ref().unwrap().is_empty());
        assert_eq!(state.scatter.as_ref().unwrap().points.len(), 1);
        assert_eq!(state.status_message, None);
        assert_eq!(state.source, "other.csv");
    }
}
