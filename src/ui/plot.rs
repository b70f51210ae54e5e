use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::data::filter;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payload / outcome scatter chart (lower central panel)
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter chart for the current selection.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let points = filter::payload_outcome_scatter(
        dataset,
        &state.selection.site,
        state.selection.payload_range,
    );
    let (_, max_payload) = dataset.payload_extent;

    Plot::new("payload_outcome")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome (1 = success)")
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            let outcome = if value.y > 0.5 { "success" } else { "failure" };
            if name.is_empty() {
                format!("{:.0} kg, {outcome}", value.x)
            } else {
                format!("{name}\n{:.0} kg, {outcome}", value.x)
            }
        })
        .show(ui, |plot_ui| {
            for point in &points {
                let color = state
                    .booster_colors
                    .as_ref()
                    .map(|cm| cm.color_for(&point.booster_category))
                    .unwrap_or(Color32::LIGHT_BLUE);

                // One entry per category in the legend; markers sharing a
                // name toggle together.
                plot_ui.points(
                    Points::new(PlotPoints::from(vec![[
                        point.payload_mass_kg,
                        point.outcome.class() as f64,
                    ]]))
                    .name(&point.booster_category)
                    .color(color)
                    .radius(marker_radius(point.payload_mass_kg, max_payload))
                    .filled(true),
                );
            }
        });
}

/// Marker radius scaled by payload mass, mirroring the chart's x axis.
fn marker_radius(payload_mass_kg: f64, max_payload: f64) -> f32 {
    if max_payload <= 0.0 {
        return 3.0;
    }
    2.0 + 6.0 * (payload_mass_kg / max_payload) as f32
}
