use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Outcome;

pub const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2c, 0xa0, 0x2c);
pub const FAILURE_COLOR: Color32 = Color32::from_rgb(0xd6, 0x27, 0x28);

/// Fixed colour of an outcome wedge: green for success, red for failure.
pub fn outcome_color(outcome: Outcome) -> Color32 {
    match outcome {
        Outcome::Success => SUCCESS_COLOR,
        Outcome::Failure => FAILURE_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.50);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Categorical colour mapping: label → Color32
// ---------------------------------------------------------------------------

/// Maps each distinct category label (booster version, launch site) to a colour.
#[derive(Debug, Clone, Default)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
}

impl CategoryColors {
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let mapping = labels
            .iter()
            .cloned()
            .zip(generate_palette(labels.len()))
            .collect();
        CategoryColors { mapping }
    }

    /// Colour for `label`; labels outside the map are grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping.get(label).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        let unique: BTreeSet<_> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn categories_map_to_palette_and_fallback() {
        let labels: BTreeSet<String> = ["B4", "B5", "FT"].iter().map(|s| s.to_string()).collect();
        let colors = CategoryColors::new(&labels);
        assert_ne!(colors.color_for("B4"), colors.color_for("FT"));
        assert_eq!(colors.color_for("v2.0"), Color32::GRAY);
    }

    #[test]
    fn outcomes_are_green_and_red() {
        assert_eq!(outcome_color(Outcome::Success), SUCCESS_COLOR);
        assert_eq!(outcome_color(Outcome::Failure), FAILURE_COLOR);
    }
}
