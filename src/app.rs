use eframe::egui::{self, Ui};

use crate::state::AppState;
use crate::ui::{panels, pie, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashboardApp {
    pub state: AppState,
    pub title: String,
    /// Text typed into the site dropdown's search box.
    site_search: String,
    /// Show egui's inspection window.
    debug: bool,
}

impl LaunchDashboardApp {
    pub fn new(state: AppState, title: String, debug: bool) -> Self {
        Self {
            state,
            title,
            site_search: String::new(),
            debug,
        }
    }
}

impl eframe::App for LaunchDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: inputs ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state, &mut self.site_search);
            });

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| ui.heading(self.title.as_str()));
                    ui.separator();

                    if let Some(figure) = &self.state.pie {
                        pie::pie_chart(ui, figure, 280.0);
                    }
                    ui.add_space(16.0);

                    if let Some(figure) = &self.state.scatter {
                        plot::scatter_chart(ui, figure, &self.state.booster_colors, 320.0);

                        if self.state.show_table {
                            ui.add_space(8.0);
                            table::record_table(ui, &figure.points);
                        }
                    }
                });
        });

        if self.debug {
            egui::Window::new("Inspection").show(ctx, |ui| {
                ctx.inspection_ui(ui);
            });
        }
    }
}
