use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};

use crate::color::palette_color;
use crate::figure::PieFigure;

// ---------------------------------------------------------------------------
// Pie chart, painted directly (egui_plot has no pie)
// ---------------------------------------------------------------------------

/// Render the success pie chart with a legend to its right.
pub fn pie_chart(ui: &mut Ui, figure: &PieFigure, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| ui.strong(figure.title.as_str()));

    if figure.is_empty() {
        ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| ui.weak("No data"));
        });
        return;
    }

    let shares: Vec<f32> = figure.slices.iter().map(|s| s.share as f32).collect();
    let n = figure.slices.len();

    ui.horizontal(|ui: &mut Ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(height, height), Sense::hover());
        let center = rect.center();
        let radius = rect.width().min(rect.height()) * 0.45;
        let painter = ui.painter_at(rect);
        let outline = Stroke::new(1.0, ui.visuals().panel_fill);

        let mut start = 0.0;
        for (i, share) in shares.iter().enumerate() {
            let sweep = share * TAU;
            let fill = palette_color(i, n);
            for (a, b) in split_sweep(start, sweep) {
                painter.add(Shape::convex_polygon(
                    wedge_points(center, radius, a, b),
                    fill,
                    outline,
                ));
            }
            if *share >= 0.04 {
                let mid = angle_point(center, radius * 0.65, start + sweep / 2.0);
                painter.text(
                    mid,
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", share * 100.0),
                    FontId::proportional(12.0),
                    Color32::WHITE,
                );
            }
            start += sweep;
        }

        if let Some(pos) = response.hover_pos() {
            let d = pos - center;
            if d.length() <= radius {
                let angle = (d.x.atan2(-d.y) + TAU) % TAU;
                if let Some(i) = slice_at_angle(&shares, angle) {
                    let s = &figure.slices[i];
                    response.on_hover_text_at_pointer(format!(
                        "{}: {} ({:.1}%)",
                        s.label,
                        s.count,
                        s.share * 100.0
                    ));
                }
            }
        }

        ui.vertical(|ui: &mut Ui| {
            for (i, s) in figure.slices.iter().enumerate() {
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), Sense::hover());
                    ui.painter().rect_filled(swatch, 2.0, palette_color(i, n));
                    ui.label(format!("{}  ({})", s.label, s.count));
                });
            }
        });
    });
}

/// Point on the circle at `angle` radians clockwise from 12 o'clock
/// (screen y grows downwards).
fn angle_point(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    Pos2::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Split a sweep into pieces of at most a quarter turn so every wedge is a
/// convex polygon.
fn split_sweep(start: f32, sweep: f32) -> Vec<(f32, f32)> {
    let pieces = (sweep / FRAC_PI_2).ceil().max(1.0) as usize;
    let step = sweep / pieces as f32;
    (0..pieces)
        .map(|k| (start + k as f32 * step, step))
        .collect()
}

/// Centre followed by arc points from `start` over `sweep`.
fn wedge_points(center: Pos2, radius: f32, start: f32, sweep: f32) -> Vec<Pos2> {
    let segments = ((sweep / TAU) * 64.0).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(segments + 2);
    points.push(center);
    for k in 0..=segments {
        let a = start + sweep * k as f32 / segments as f32;
        points.push(angle_point(center, radius, a));
    }
    points
}

/// Index of the slice covering `angle` (radians clockwise from 12 o'clock).
fn slice_at_angle(shares: &[f32], angle: f32) -> Option<usize> {
    let mut end = 0.0;
    for (i, share) in shares.iter().enumerate() {
        end += share * TAU;
        if angle < end {
            return Some(i);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_keeps_wedges_under_quarter_turn() {
        let pieces = split_sweep(0.0, TAU * 0.8);
        assert_eq!(pieces.len(), 4);
        assert!(pieces.iter().all(|(_, s)| *s <= FRAC_PI_2 + 1e-6));
        let covered: f32 = pieces.iter().map(|(_, s)| s).sum();
        assert!((covered - TAU * 0.8).abs() < 1e-5);
        assert_eq!(split_sweep(1.0, 0.1), vec![(1.0, 0.1)]);
    }

    #[test]
    fn wedge_starts_at_center_and_twelve_oclock() {
        let center = Pos2::new(50.0, 50.0);
        let points = wedge_points(center, 10.0, 0.0, FRAC_PI_2);
        assert_eq!(points[0], center);
        assert!((points[1] - Pos2::new(50.0, 40.0)).length() < 1e-4);
        assert!((points.last().unwrap().x - 60.0).abs() < 1e-4);
    }

    #[test]
    fn angle_lookup_follows_cumulative_shares() {
        let shares = [0.5, 0.25, 0.25];
        assert_eq!(slice_at_angle(&shares, 0.1), Some(0));
        assert_eq!(slice_at_angle(&shares, TAU * 0.6), Some(1));
        assert_eq!(slice_at_angle(&shares, TAU * 0.9), Some(2));
        assert_eq!(slice_at_angle(&[], 1.0), None);
    }
}
