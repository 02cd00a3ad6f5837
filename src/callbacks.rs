use std::fmt;

use crate::data::model::LaunchDataset;
use crate::data::query::{PayloadRange, SiteFilter, correlate, summarize};
use crate::figure::{Figure, PieFigure, ScatterFigure};

// ---------------------------------------------------------------------------
// Component identifiers
// ---------------------------------------------------------------------------

/// Interactive controls that emit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

/// Chart areas fed by callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputId {
    SuccessPieChart,
    PayloadScatterChart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    ValueChanged,
}

impl fmt::Display for InputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputId::SiteDropdown => "site-dropdown",
            InputId::PayloadSlider => "payload-slider",
        })
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputId::SuccessPieChart => "success-pie-chart",
            OutputId::PayloadScatterChart => "success-payload-scatter-chart",
        })
    }
}

/// Current value of every input control.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub site: SiteFilter,
    pub payload: PayloadRange,
}

impl Selection {
    /// Initial selection: every site, full observed payload range.
    pub fn initial(dataset: &LaunchDataset) -> Self {
        let summary = dataset.summary();
        Selection {
            site: SiteFilter::All,
            payload: PayloadRange::new(summary.min_payload, summary.max_payload),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Pure function from the dataset and current selection to a figure.
pub type Handler = fn(&LaunchDataset, &Selection) -> Figure;

pub struct Callback {
    pub output: OutputId,
    pub inputs: &'static [(InputId, EventKind)],
    pub handler: Handler,
}

/// Maps input events to the handlers that must re-run. Holds no state of its
/// own; the shell owns the selection and the rendered figures.
pub struct CallbackRegistry {
    callbacks: Vec<Callback>,
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        let mut registry = CallbackRegistry::empty();
        registry.register(Callback {
            output: OutputId::SuccessPieChart,
            inputs: &[(InputId::SiteDropdown, EventKind::ValueChanged)],
            handler: pie_chart,
        });
        registry.register(Callback {
            output: OutputId::PayloadScatterChart,
            inputs: &[
                (InputId::SiteDropdown, EventKind::ValueChanged),
                (InputId::PayloadSlider, EventKind::ValueChanged),
            ],
            handler: scatter_chart,
        });
        registry
    }
}

impl CallbackRegistry {
    pub fn empty() -> Self {
        CallbackRegistry {
            callbacks: Vec::new(),
        }
    }

    pub fn register(&mut self, callback: Callback) {
        self.callbacks.push(callback);
    }

    /// Run every callback subscribed to `(input, event)`, in registration
    /// order.
    pub fn dispatch(
        &self,
        input: InputId,
        event: EventKind,
        dataset: &LaunchDataset,
        selection: &Selection,
    ) -> Vec<(OutputId, Figure)> {
        log::debug!("dispatch {input} {event:?} with {selection:?}");
        self.callbacks
            .iter()
            .filter(|cb| cb.inputs.contains(&(input, event)))
            .map(|cb| (cb.output, (cb.handler)(dataset, selection)))
            .collect()
    }

    /// Compute every output, used for the first frame and after the dataset
    /// is replaced.
    pub fn fire_all(
        &self,
        dataset: &LaunchDataset,
        selection: &Selection,
    ) -> Vec<(OutputId, Figure)> {
        self.callbacks
            .iter()
            .map(|cb| (cb.output, (cb.handler)(dataset, selection)))
            .collect()
    }
}

fn pie_chart(dataset: &LaunchDataset, selection: &Selection) -> Figure {
    Figure::Pie(PieFigure::from_summary(&summarize(dataset, &selection.site)))
}

fn scatter_chart(dataset: &LaunchDataset, selection: &Selection) -> Figure {
    let points = correlate(dataset, &selection.site, selection.payload);
    Figure::Scatter(ScatterFigure::from_points(&selection.site, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            record("A", 100.0, 1, "v1.0"),
            record("A", 6000.0, 0, "FT"),
            record("B", 4000.0, 1, "FT"),
        ])
        .unwrap()
    }

    fn outputs(results: &[(OutputId, Figure)]) -> Vec<OutputId> {
        results.iter().map(|(id, _)| *id).collect()
    }

    #[test]
    fn initial_selection_spans_observed_payloads() {
        let sel = Selection::initial(&dataset());
        assert_eq!(sel.site, SiteFilter::All);
        assert_eq!(sel.payload, PayloadRange::new(100.0, 6000.0));
    }

    #[test]
    fn dropdown_change_recomputes_both_charts() {
        let ds = dataset();
        let registry = CallbackRegistry::default();
        let results = registry.dispatch(
            InputId::SiteDropdown,
            EventKind::ValueChanged,
            &ds,
            &Selection::initial(&ds),
        );
        assert_eq!(
            outputs(&results),
            [OutputId::SuccessPieChart, OutputId::PayloadScatterChart]
        );
    }

    #[test]
    fn slider_change_recomputes_scatter_only() {
        let ds = dataset();
        let registry = CallbackRegistry::default();
        let selection = Selection {
            site: SiteFilter::All,
            payload: PayloadRange::new(0.0, 5000.0),
        };
        let results =
            registry.dispatch(InputId::PayloadSlider, EventKind::ValueChanged, &ds, &selection);

        assert_eq!(outputs(&results), [OutputId::PayloadScatterChart]);
        let Figure::Scatter(scatter) = &results[0].1 else {
            panic!("expected scatter figure");
        };
        let payloads: Vec<f64> = scatter.points.iter().map(|p| p.payload_mass_kg).collect();
        assert_eq!(payloads, [100.0, 4000.0]);
    }

    #[test]
    fn fire_all_produces_every_output() {
        let ds = dataset();
        let registry = CallbackRegistry::default();
        let selection = Selection {
            site: SiteFilter::from_value("A"),
            payload: PayloadRange::new(0.0, 10000.0),
        };
        let results = registry.fire_all(&ds, &selection);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].1.title(), "Total Successful launches for site A");
        assert_eq!(
            results[1].1.title(),
            "Correlation between Payload and Success for site A"
        );
    }

    #[test]
    fn empty_registry_dispatches_nothing() {
        let ds = dataset();
        let results = CallbackRegistry::empty().dispatch(
            InputId::SiteDropdown,
            EventKind::ValueChanged,
            &ds,
            &Selection::initial(&ds),
        );
        assert!(results.is_empty());
    }
}
