use eframe::egui;

use crate::state::AppState;
use crate::ui::{donut, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchdeckApp {
    pub state: AppState,
}

impl Default for LaunchdeckApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for LaunchdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: records table ----
        egui::TopBottomPanel::bottom("records_panel")
            .resizable(true)
            .default_height(170.0)
            .show(ctx, |ui| {
                panels::records_table(ui, &self.state);
            });

        // ---- Central panel: donut + scatter ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut egui::Ui| {
                    ui.heading("Open a launch dataset to begin  (File → Open…)");
                });
                return;
            }

            let donut_height = (ui.available_height() * 0.45).max(180.0);
            ui.allocate_ui(egui::vec2(ui.available_width(), donut_height), |ui| {
                donut::success_donut(ui, &self.state);
            });
            ui.separator();
            plot::payload_scatter(ui, &self.state);
        });
    }
}
