use eframe::egui::Ui;
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::color::ColorMap;
use crate::figure::ScatterFigure;

// ---------------------------------------------------------------------------
// Payload / outcome scatter plot
// ---------------------------------------------------------------------------

/// Render the payload-vs-class scatter chart, one series per booster
/// category.
pub fn scatter_chart(ui: &mut Ui, figure: &ScatterFigure, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong(figure.title.as_str()));
    if figure.is_empty() {
        ui.vertical_centered(|ui: &mut Ui| ui.weak("No launches in the selected payload range"));
    }

    Plot::new("success-payload-scatter-chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("{:.0} kg", value.x)
            } else {
                format!("{name}\n{:.0} kg, class {:.0}", value.x, value.y)
            }
        })
        .show(ui, |plot_ui| {
            for series in &figure.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, f64::from(p.outcome.class())])
                    .collect();

                let markers = Points::new(points)
                    .name(&series.booster_category)
                    .color(colors.color_for(&series.booster_category))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0);

                plot_ui.points(markers);
            }
        });
}
