use std::collections::BTreeMap;
use std::f32::consts::TAU;

use eframe::egui::{Color32, Sense, Shape, Stroke, Ui, Vec2};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::color::generate_palette;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the success pie chart with its legend and, for a single-site
/// selection, the success-rate caption. The caption is omitted entirely
/// when the rate is undefined.
pub fn success_pie(ui: &mut Ui, state: &AppState) {
    let Some(pie) = &state.pie else {
        return;
    };

    ui.strong(&pie.title);
    if let Some(rate) = pie.success_rate {
        ui.label(format!("Total success rate: {:.1}%", rate * 100.0));
    }
    ui.add_space(4.0);

    let total: f64 = pie.slices.iter().map(|s| s.value).sum();
    if total <= 0.0 {
        ui.label("No launches match the current selection.");
        return;
    }

    let side = ui
        .available_width()
        .min(ui.available_height() * 0.7)
        .clamp(120.0, 340.0);
    let (response, painter) = ui.allocate_painter(Vec2::splat(side), Sense::hover());
    let center = response.rect.center();
    let radius = side * 0.45;

    let colors = generate_palette(pie.slices.len());

    // Each wedge is drawn as a fan of small triangles so sweeps larger
    // than a half turn fill correctly.
    let mut start = -TAU / 4.0;
    for (slice, color) in pie.slices.iter().zip(&colors) {
        if slice.value <= 0.0 {
            continue;
        }
        let sweep = (slice.value / total) as f32 * TAU;
        let steps = ((sweep / 0.05).ceil() as usize).max(2);
        let mut prev = center + radius * Vec2::angled(start);
        for i in 1..=steps {
            let angle = start + sweep * i as f32 / steps as f32;
            let next = center + radius * Vec2::angled(angle);
            painter.add(Shape::convex_polygon(
                vec![center, prev, next],
                *color,
                Stroke::NONE,
            ));
            prev = next;
        }
        start += sweep;
    }

    // Swatch legend below the pie.
    for (slice, color) in pie.slices.iter().zip(&colors) {
        ui.horizontal(|ui: &mut Ui| {
            let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
            ui.painter().rect_filled(rect, 2.0, *color);
            ui.label(format!("{}: {:.0}", slice.label, slice.value));
        });
    }
}

// ---------------------------------------------------------------------------
// Payload vs outcome scatter chart
// ---------------------------------------------------------------------------

/// Render the payload-vs-outcome scatter, one colored series per booster
/// version category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState) {
    ui.strong("Payload vs. Launch Outcome");
    ui.add_space(4.0);

    // One series per category so the legend groups points by booster.
    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for point in &state.scatter {
        series
            .entry(point.booster_category.as_str())
            .or_default()
            .push([point.payload_mass_kg, point.outcome_value]);
    }

    Plot::new("payload_scatter")
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Launch Outcome")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (category, points) in series {
                let color = state
                    .category_colors
                    .as_ref()
                    .map(|cm| cm.color_for(category))
                    .unwrap_or(Color32::LIGHT_BLUE);

                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(category)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

/// Placeholder shown in the central panel before any dataset is loaded.
pub fn empty_placeholder(ui: &mut Ui) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.heading("Open a launch records file to view charts  (File → Open…)");
    });
}
