use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui};

use crate::data::query::{PayloadRange, SiteFilter};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input controls
// ---------------------------------------------------------------------------

/// Render the left control panel: site dropdown and payload range.
pub fn side_panel(ui: &mut Ui, state: &mut AppState, site_search: &mut String) {
    ui.heading("Launch Site");
    ui.separator();
    site_dropdown(ui, state, site_search);

    ui.add_space(12.0);
    ui.heading("Payload range (Kg)");
    ui.separator();
    payload_slider(ui, state);

    ui.add_space(12.0);
    ui.separator();
    let summary = state.dataset.summary();
    ui.label(format!(
        "Observed payloads: {:.0} – {:.0} kg",
        summary.min_payload, summary.max_payload
    ));
    ui.label(format!("{} launch sites", summary.sites.len()));
}

/// Searchable dropdown: "All Sites" followed by every site in the dataset.
fn site_dropdown(ui: &mut Ui, state: &mut AppState, site_search: &mut String) {
    let current = state.selection.site.clone();
    let sites = state.dataset.sites().to_vec();
    let mut picked: Option<SiteFilter> = None;

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(current.to_string())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(site_search).hint_text("Select a Launch Site"),
            );
            let needle = site_search.to_lowercase();

            if ui
                .selectable_label(current == SiteFilter::All, SiteFilter::All.to_string())
                .clicked()
            {
                picked = Some(SiteFilter::All);
            }
            for site in sites
                .iter()
                .filter(|s| needle.is_empty() || s.to_lowercase().contains(&needle))
            {
                let filter = SiteFilter::from_value(site);
                if ui.selectable_label(current == filter, site.as_str()).clicked() {
                    picked = Some(filter);
                }
            }
        });

    if let Some(site) = picked {
        site_search.clear();
        state.set_site(site);
    }
}

/// Two handles over the configured scale. The handles may not cross.
///
/// The sliders never clamp or snap on their own: the initial selection is
/// the observed payload range, which may lie off the scale and off-step.
/// Only a drag or an edit by the user replaces it, snapped to the step.
fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let scale = state.slider;
    let PayloadRange { mut low, mut high } = state.selection.payload;

    let low_changed = ui
        .add(
            egui::Slider::new(&mut low, scale.min..=scale.max)
                .clamping(egui::SliderClamping::Never)
                .step_by(scale.step)
                .text("min"),
        )
        .changed();
    let high_changed = ui
        .add(
            egui::Slider::new(&mut high, scale.min..=scale.max)
                .clamping(egui::SliderClamping::Never)
                .step_by(scale.step)
                .text("max"),
        )
        .changed();

    if low_changed {
        low = snap_to_step(low, scale.min, scale.step);
        if low > high {
            high = low;
        }
    }
    if high_changed {
        high = snap_to_step(high, scale.min, scale.step);
        if high < low {
            low = high;
        }
    }
    if low_changed || high_changed {
        state.set_payload_range(PayloadRange::new(low, high));
    }

    slider_marks(ui, &state.slider_marks, scale.min, scale.max);
}

/// Round `value` to the nearest multiple of `step` counted from `origin`.
pub fn snap_to_step(value: f64, origin: f64, step: f64) -> f64 {
    if step > 0.0 {
        origin + ((value - origin) / step).round() * step
    } else {
        value
    }
}

/// Horizontal position of `value` on a ruler `width` pixels wide.
pub fn mark_offset(value: f64, min: f64, max: f64, width: f32) -> f32 {
    if max <= min {
        return 0.0;
    }
    (((value - min) / (max - min)).clamp(0.0, 1.0) as f32) * width
}

fn slider_marks(ui: &mut Ui, marks: &[f64], min: f64, max: f64) {
    let width = ui.spacing().slider_width;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 22.0), Sense::hover());
    let painter = ui.painter_at(rect.expand(12.0));
    let color = ui.visuals().weak_text_color();

    painter.line_segment(
        [rect.left_top(), rect.right_top()],
        Stroke::new(1.0, color),
    );
    for &mark in marks {
        let x = rect.left() + mark_offset(mark, min, max, rect.width());
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + 4.0)],
            Stroke::new(1.0, color),
        );
        painter.text(
            egui::pos2(x, rect.top() + 6.0),
            Align2::CENTER_TOP,
            format!("{mark:.0}"),
            FontId::proportional(9.0),
            color,
        );
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let shown = state.scatter.as_ref().map_or(0, |s| s.points.len());
        ui.label(format!(
            "{} launches loaded from {}, {} in view",
            state.dataset.len(),
            state.source,
            shown
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_table, "Record table")
            .clicked()
        {
            state.show_table = !state.show_table;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open launch records")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launches from {} across sites {:?}",
                    dataset.len(),
                    path.display(),
                    dataset.sites()
                );
                state.set_dataset(dataset, path.display().to_string());
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
