use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{self, Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui};

use crate::data::filter::{self, SiteSelection};
use crate::state::AppState;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(46, 160, 67);
const FAILURE_COLOR: Color32 = Color32::from_rgb(218, 54, 51);

/// Hole radius as a fraction of the outer radius.
const INNER_RADIUS_RATIO: f32 = 0.45;

// ---------------------------------------------------------------------------
// Success breakdown donut (upper central panel)
// ---------------------------------------------------------------------------

/// Render the success-breakdown donut for the current site selection.
pub fn success_donut(ui: &mut Ui, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };

    let breakdown = filter::site_success_breakdown(dataset, &state.selection.site);
    let total = breakdown.total();

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(&breakdown.title);
    });
    ui.add_space(4.0);

    let strong_color = ui.visuals().strong_text_color();
    let weak_color = ui.visuals().weak_text_color();

    ui.horizontal(|ui: &mut Ui| {
        let side = ui
            .available_height()
            .min(ui.available_width() * 0.55)
            .max(120.0);
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
        let center = response.rect.center();
        let outer_radius = side * 0.46;
        let inner_radius = outer_radius * INNER_RADIUS_RATIO;

        if total == 0 {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No matching launches",
                FontId::proportional(14.0),
                weak_color,
            );
            return;
        }

        // Slices start at 12 o'clock and run clockwise.
        let mut angle = -FRAC_PI_2;
        for slice in &breakdown.slices {
            let sweep = TAU * slice.count as f32 / total as f32;
            let color = slice_color(state, &slice.label);
            paint_sector(&painter, center, inner_radius, outer_radius, angle, sweep, color);
            angle += sweep;
        }

        painter.text(
            center,
            Align2::CENTER_CENTER,
            total.to_string(),
            FontId::proportional(22.0),
            strong_color,
        );

        // ---- Legend ----
        ui.add_space(12.0);
        ui.vertical(|ui: &mut Ui| {
            ui.add_space(8.0);
            for slice in &breakdown.slices {
                let color = slice_color(state, &slice.label);
                let percent = 100.0 * slice.count as f64 / total as f64;
                ui.horizontal(|ui: &mut Ui| {
                    let (swatch, swatch_painter) =
                        ui.allocate_painter(egui::vec2(12.0, 12.0), Sense::hover());
                    swatch_painter.rect_filled(swatch.rect, 2.0, color);
                    ui.label(format!("{}: {} ({percent:.1}%)", slice.label, slice.count));
                });
            }
        });
    });
}

/// All-sites mode colours slices by site; single-site mode uses fixed
/// success/failure colours matched on the outcome label.
fn slice_color(state: &AppState, label: &str) -> Color32 {
    match &state.selection.site {
        SiteSelection::AllSites => state
            .site_colors
            .as_ref()
            .map(|cm| cm.color_for(label))
            .unwrap_or(Color32::GRAY),
        SiteSelection::Site(_) => {
            if label == "Success" {
                SUCCESS_COLOR
            } else {
                FAILURE_COLOR
            }
        }
    }
}

/// Fill an annular sector by fanning small convex quads along the arc.
fn paint_sector(
    painter: &egui::Painter,
    center: Pos2,
    inner_radius: f32,
    outer_radius: f32,
    start_angle: f32,
    sweep: f32,
    color: Color32,
) {
    let steps = ((sweep / 0.05).ceil() as usize).max(2);
    for i in 0..steps {
        let a0 = start_angle + sweep * i as f32 / steps as f32;
        let a1 = start_angle + sweep * (i + 1) as f32 / steps as f32;
        let quad = vec![
            center + egui::vec2(a0.cos(), a0.sin()) * outer_radius,
            center + egui::vec2(a1.cos(), a1.sin()) * outer_radius,
            center + egui::vec2(a1.cos(), a1.sin()) * inner_radius,
            center + egui::vec2(a0.cos(), a0.sin()) * inner_radius,
        ];
        painter.add(Shape::convex_polygon(quad, color, Stroke::NONE));
    }
}
