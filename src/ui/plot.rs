use std::collections::BTreeMap;
use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::color::outcome_color;
use crate::data::aggregate::PieChart;
use crate::data::model::LaunchRecord;
use crate::state::AppState;

pub const SCATTER_TITLE: &str = "Payload vs. Launch Success by Booster Version Category";

/// Arc points per full turn of the pie.
const PIE_RESOLUTION: usize = 180;

// ---------------------------------------------------------------------------
// Central panel: pie above scatter
// ---------------------------------------------------------------------------

/// Render both charts in the central panel.
pub fn charts(ui: &mut Ui, state: &AppState) {
    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a launch dataset to begin  (File → Open…)");
        });
        return;
    }

    let half = (ui.available_height() - 60.0).max(200.0) / 2.0;
    if let Some(pie) = &state.pie {
        success_pie(ui, state, pie, half);
    }
    ui.separator();
    payload_scatter(ui, state, half);
}

// ---------------------------------------------------------------------------
// Success pie
// ---------------------------------------------------------------------------

fn success_pie(ui: &mut Ui, state: &AppState, pie: &PieChart, height: f32) {
    ui.label(RichText::new(&pie.title).strong());

    let total = pie.total();
    if total <= 0.0 {
        ui.allocate_ui(eframe::egui::vec2(ui.available_width(), height), |ui: &mut Ui| {
            ui.centered_and_justified(|ui: &mut Ui| ui.label("No launches"));
        });
        return;
    }

    let fractions: Vec<f64> = pie.slices.iter().map(|s| s.value / total).collect();

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .legend(Legend::default())
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            for (slice, wedge) in pie.slices.iter().zip(wedges(&fractions)) {
                let color = slice
                    .outcome
                    .map(outcome_color)
                    .unwrap_or_else(|| state.site_colors.color_for(&slice.label));

                // Polygons are filled as convex shapes, so each wedge is drawn in quarter-turn pieces.
                for piece in wedge.pieces() {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(piece))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                if wedge.fraction() > 0.0 {
                    let [x, y] = wedge.label_anchor();
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(format!("{:.1}%", wedge.fraction() * 100.0))
                            .color(Color32::WHITE)
                            .strong(),
                    ));
                }
            }
        });
}

/// One pie wedge as a pair of turn fractions, clockwise from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Wedge {
    start: f64,
    end: f64,
}

/// Lay out consecutive wedges for fractions summing to 1.
fn wedges(fractions: &[f64]) -> Vec<Wedge> {
    let mut start = 0.0;
    fractions
        .iter()
        .map(|f| {
            let wedge = Wedge { start, end: start + f };
            start = wedge.end;
            wedge
        })
        .collect()
}

impl Wedge {
    fn fraction(&self) -> f64 {
        self.end - self.start
    }

    fn point_at(turn: f64, radius: f64) -> [f64; 2] {
        let angle = FRAC_PI_2 - turn * TAU;
        [radius * angle.cos(), radius * angle.sin()]
    }

    /// Centre + arc polygons, each spanning at most a quarter turn.
    fn pieces(&self) -> Vec<Vec<[f64; 2]>> {
        let mut pieces = Vec::new();
        let mut from = self.start;
        while from < self.end {
            let to = (from + 0.25).min(self.end);
            let steps = (((to - from) * PIE_RESOLUTION as f64).ceil() as usize).max(1);
            let mut points = Vec::with_capacity(steps + 2);
            points.push([0.0, 0.0]);
            for i in 0..=steps {
                let turn = from + (to - from) * i as f64 / steps as f64;
                points.push(Self::point_at(turn, 1.0));
            }
            pieces.push(points);
            from = to;
        }
        pieces
    }

    fn label_anchor(&self) -> [f64; 2] {
        Self::point_at((self.start + self.end) / 2.0, 0.65)
    }
}

// ---------------------------------------------------------------------------
// Payload scatter
// ---------------------------------------------------------------------------

fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    ui.label(RichText::new(SCATTER_TITLE).strong());

    let rows = &state.scatter_rows;
    if rows.is_empty() {
        ui.label("No launches");
    }

    Plot::new("payload_scatter")
        .height(height)
        .legend(Legend::default())
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("class")
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| hover_text(rows, name, value))
        .show(ui, |plot_ui| {
            for (category, points) in group_by_booster(rows) {
                plot_ui.points(
                    Points::new(PlotPoints::new(points))
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}

/// Scatter points `[payload, class]` keyed by booster version category.
fn group_by_booster(rows: &[LaunchRecord]) -> BTreeMap<&str, Vec<[f64; 2]>> {
    let mut groups: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for r in rows {
        groups
            .entry(r.booster_version_category.as_str())
            .or_default()
            .push([r.payload_mass_kg, f64::from(r.class())]);
    }
    groups
}

fn hover_text(rows: &[LaunchRecord], name: &str, value: &PlotPoint) -> String {
    let mut text = if name.is_empty() {
        format!("{:.0} kg", value.x)
    } else {
        format!("{name}\n{:.0} kg, class {:.0}", value.x, value.y)
    };
    let hit = rows.iter().find(|r| {
        r.booster_version_category == name
            && r.payload_mass_kg == value.x
            && f64::from(r.class()) == value.y
    });
    if let Some(r) = hit {
        text.push_str(&format!("\n{}", r.launch_site));
        if let Some(n) = r.flight_number {
            text.push_str(&format!("\nflight {n}"));
        }
        if let Some(v) = &r.booster_version {
            text.push_str(&format!("\n{v}"));
        }
    }
    text
}
