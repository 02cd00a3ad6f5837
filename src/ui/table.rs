use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::query::CorrelationPoint;

const HEADERS: [&str; 6] = [
    "Flight Number",
    "Launch Site",
    "Payload Mass (kg)",
    "class",
    "Booster Version",
    "Booster Version Category",
];

/// Table of the launches currently plotted on the scatter chart.
pub fn record_table(ui: &mut Ui, points: &[CorrelationPoint]) {
    TableBuilder::new(ui)
        .id_salt("record-table")
        .striped(true)
        .resizable(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), HEADERS.len() - 1)
        .column(Column::remainder())
        .min_scrolled_height(0.0)
        .max_scroll_height(260.0)
        .header(20.0, |mut header| {
            for title in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, points.len(), |mut row| {
                let p = &points[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(p.flight_number.map(|n| n.to_string()).unwrap_or_default());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.launch_site.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format!("{:.1}", p.payload_mass_kg));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.outcome.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.booster_version.as_deref().unwrap_or(""));
                });
                row.col(|ui: &mut Ui| {
                    ui.label(p.booster_category.as_str());
                });
            });
        });
}
