use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::{
    PAYLOAD_MARK_STEP, PAYLOAD_SLIDER_MAX, PAYLOAD_SLIDER_MIN, PAYLOAD_SLIDER_STEP, PayloadRange,
    SiteSelection,
};
use crate::state::{AppState, InputEvent};

/// Room left of a slider rail for the value box and its "min"/"max" text.
const SLIDER_TEXT_WIDTH: f32 = 90.0;

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and payload range selector.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Inputs");
    ui.separator();

    let Some(dataset) = &state.dataset else {
        ui.label("No dataset loaded.");
        return;
    };
    let options = dataset.site_options();

    // ---- Launch site dropdown ----
    ui.strong("Launch site");
    let mut selected = state.site.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected.label())
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for option in &options {
                let label = option.label().to_string();
                ui.selectable_value(&mut selected, option.clone(), label);
            }
        });
    if selected != state.site {
        state.dispatch(InputEvent::SiteSelected(selected));
    }
    ui.add_space(8.0);

    // ---- Payload range (kg) ----
    ui.strong("Payload range (Kg):");
    payload_sliders(ui, state);

    ui.separator();
    ui.small(range_summary(&state.site, state.payload_range));
}

/// Min/max sliders over the fixed slider bounds plus a tick row.
///
/// Each slider edits a scratch copy of its bound, since `step_by` snaps the value
/// it is shown with. A copy is written back only when the user moved that slider,
/// so loaded bounds off the 500 kg grid stay exact until dragged.
fn payload_sliders(ui: &mut Ui, state: &mut AppState) {
    let current = state.payload_range;
    let width = (ui.available_width() - SLIDER_TEXT_WIDTH).max(80.0);
    ui.spacing_mut().slider_width = width;

    let mut min = current.min;
    let min_response = ui.add(
        egui::Slider::new(&mut min, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
            .step_by(PAYLOAD_SLIDER_STEP)
            .text("min"),
    );

    let mut max = current.max;
    let max_response = ui.add(
        egui::Slider::new(&mut max, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
            .step_by(PAYLOAD_SLIDER_STEP)
            .text("max"),
    );
    slider_marks(ui, width);

    let mut next = current;
    if moved_by_user(&min_response) {
        next.min = min;
    }
    if moved_by_user(&max_response) {
        next.max = max;
    }
    if ui.small_button("Reset range").clicked() {
        next = state.initial_payload_range();
    }
    if next.is_empty() {
        ui.label(RichText::new("min is above max, nothing matches").color(Color32::YELLOW));
    }
    if next != current {
        state.dispatch(InputEvent::PayloadRangeChanged(next));
    }
}

/// A step-snapped value can report `changed` on a frame nobody touched the slider.
fn moved_by_user(response: &egui::Response) -> bool {
    response.changed() && (response.dragged() || response.clicked() || response.has_focus())
}

/// Tick labels every 1000 kg, laid out under a slider rail of `width`.
fn slider_marks(ui: &mut Ui, width: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 14.0), egui::Sense::hover());
    let color = ui.visuals().weak_text_color();
    let painter = ui.painter();
    for value in mark_values() {
        let t = ((value - PAYLOAD_SLIDER_MIN) / (PAYLOAD_SLIDER_MAX - PAYLOAD_SLIDER_MIN)) as f32;
        let x = rect.left() + t * rect.width();
        painter.line_segment(
            [egui::pos2(x, rect.top()), egui::pos2(x, rect.top() + 3.0)],
            egui::Stroke::new(1.0, color),
        );
        painter.text(
            egui::pos2(x, rect.top() + 3.0),
            egui::Align2::CENTER_TOP,
            mark_label(value),
            egui::FontId::proportional(9.0),
            color,
        );
    }
}

fn mark_values() -> Vec<f64> {
    let count = ((PAYLOAD_SLIDER_MAX - PAYLOAD_SLIDER_MIN) / PAYLOAD_MARK_STEP).round() as usize;
    (0..=count)
        .map(|i| PAYLOAD_SLIDER_MIN + i as f64 * PAYLOAD_MARK_STEP)
        .collect()
}

fn mark_label(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}k", value / 1000.0)
    }
}

fn range_summary(site: &SiteSelection, range: PayloadRange) -> String {
    format!("{} · {:.0}–{:.0} kg", site.label(), range.min, range.max)
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
            ui.label(format!(
                "{} launches loaded, {} in scatter",
                ds.len(),
                state.scatter_rows.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
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
        load_into(state, &path);
    }
}

/// Load `path` into `state`; on failure the previous dataset stays.
pub fn load_into(state: &mut AppState, path: &std::path::Path) {
    match crate::data::loader::load_file(path) {
        Ok(dataset) => {
            if dataset.is_empty() {
                log::warn!("{} contains no launches", path.display());
            }
            log::info!(
                "Loaded {} launches from {} across sites {:?}",
                dataset.len(),
                path.display(),
                dataset.sites()
            );
            state.set_dataset(dataset);
        }
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

    fn run_frame(state: &mut AppState) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| side_panel(ui, state));
        });
    }

    #[test]
    fn off_grid_bounds_survive_a_drawn_frame() {
        let mut state = AppState::default();
        state.set_dataset(LaunchDataset::from_records(vec![
            LaunchRecord::new("KSC LC-39A", 362.0, Outcome::Success, "FT"),
            LaunchRecord::new("VAFB SLC-4E", 9600.0, Outcome::Failure, "B4"),
        ]));

        run_frame(&mut state);
        run_frame(&mut state);

        assert_eq!(state.payload_range, PayloadRange::new(362.0, 9600.0));
        assert_eq!(state.scatter_rows.len(), 2);
    }

    #[test]
    fn marks_every_thousand_kg() {
        let marks = mark_values();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks.first(), Some(&0.0));
        assert_eq!(marks.last(), Some(&10_000.0));
        assert_eq!(mark_label(0.0), "0");
        assert_eq!(mark_label(3000.0), "3k");
        assert_eq!(mark_label(10_000.0), "10k");
    }

    #[test]
    fn failed_load_keeps_previous_dataset() {
        let mut state = AppState::default();
        load_into(&mut state, std::path::Path::new("missing/launches.csv"));
        assert!(state.dataset.is_none());
        assert!(state.status_message.as_deref().unwrap().starts_with("Error:"));
    }

    #[test]
    fn summary_names_site_and_range() {
        let text = range_summary(&SiteSelection::All, PayloadRange::new(0.0, 9600.0));
        assert_eq!(text, "All · 0–9600 kg");
    }
}
