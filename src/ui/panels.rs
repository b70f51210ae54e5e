use anyhow::Context;
use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::filter::{self, PayloadRange, SiteSelection, ALL_SITES};
use crate::state::{AppState, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Mission Filters");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the widgets.
    let sites = dataset.sites.clone();
    let n_records = dataset.len();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Site dropdown ----
            ui.strong("Launch Site");
            egui::ComboBox::from_id_salt("site_select")
                .selected_text(state.selection.site.label().to_string())
                .show_ui(ui, |ui: &mut Ui| {
                    let all_selected = state.selection.site == SiteSelection::AllSites;
                    if ui.selectable_label(all_selected, ALL_SITES).clicked() {
                        state.select_site(SiteSelection::AllSites);
                    }
                    for site in &sites {
                        let is_selected = matches!(
                            &state.selection.site,
                            SiteSelection::Site(s) if s == site
                        );
                        if ui.selectable_label(is_selected, site).clicked() {
                            state.select_site(SiteSelection::Site(site.clone()));
                        }
                    }
                });
            ui.separator();

            // ---- Payload range sliders ----
            ui.strong("Payload range (kg)");
            let mut low = state.selection.payload_range.low;
            let mut high = state.selection.payload_range.high;

            let low_changed = ui
                .add(
                    Slider::new(&mut low, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                        .step_by(PAYLOAD_SLIDER_STEP)
                        .text("min"),
                )
                .changed();
            let high_changed = ui
                .add(
                    Slider::new(&mut high, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                        .step_by(PAYLOAD_SLIDER_STEP)
                        .text("max"),
                )
                .changed();

            if low_changed || high_changed {
                // Keep the interval well-formed: dragging one handle past the
                // other drags the other along.
                if low > high {
                    if low_changed {
                        high = low;
                    } else {
                        low = high;
                    }
                }
                state.set_payload_range(PayloadRange::new(low, high));
            }
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_selection();
            }

            ui.add_space(8.0);
            if let Some(ds) = &state.dataset {
                let visible = filter::visible_records(
                    ds,
                    &state.selection.site,
                    state.selection.payload_range,
                )
                .len();
                ui.label(format!("{visible} of {n_records} launches in view"));
            }
        });
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

        if let Some(ds) = &state.dataset {
            let visible = filter::visible_records(
                ds,
                &state.selection.site,
                state.selection.payload_range,
            )
            .len();
            ui.label(format!("{} launches loaded, {} in view", ds.len(), visible));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// List the launch records of the current view.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };

    let visible = filter::visible_records(
        dataset,
        &state.selection.site,
        state.selection.payload_range,
    );

    let header_text = format!("Launch Records  ({} in current view)", visible.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("records_table")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    egui::Grid::new("launch_records")
                        .striped(true)
                        .num_columns(6)
                        .spacing([18.0, 4.0])
                        .show(ui, |ui: &mut Ui| {
                            ui.strong("Flight");
                            ui.strong("Launch Site");
                            ui.strong("Booster Version");
                            ui.strong("Category");
                            ui.strong("Payload (kg)");
                            ui.strong("Outcome");
                            ui.end_row();

                            for record in visible {
                                ui.label(record.flight_number.to_string());
                                ui.label(&record.site);
                                ui.label(&record.booster_version);
                                ui.label(&record.booster_category);
                                ui.label(format!("{:.1}", record.payload_mass_kg));
                                ui.label(record.outcome.to_string());
                                ui.end_row();
                            }
                        });
                });
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
        let loaded = crate::data::loader::load_file(&path)
            .with_context(|| format!("loading {}", path.display()));
        match loaded {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} launch records across {} sites",
                    dataset.len(),
                    dataset.sites.len()
                );
                state.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
