use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Species;

/// Single-series fill used by the histogram.
pub const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
/// Darker companion of [`SKY_BLUE`] for the density curve.
pub const STEEL_BLUE: Color32 = Color32::from_rgb(70, 130, 180);

// ---------------------------------------------------------------------------
// Palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting from blue.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    const START_HUE: f32 = 210.0;
    (0..n)
        .map(|i| {
            let hue = (START_HUE + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.5);
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
// Label → colour
// ---------------------------------------------------------------------------

/// Assigns each label a colour, in natural label order, so every chart
/// colours a species the same way.
#[derive(Debug, Clone)]
pub struct SpeciesColors {
    mapping: BTreeMap<Species, Color32>,
    default_color: Color32,
}

impl SpeciesColors {
    pub fn new(labels: &BTreeSet<Species>) -> Self {
        let mapping = labels
            .iter()
            .copied()
            .zip(generate_palette(labels.len()))
            .collect();
        SpeciesColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, species: Species) -> Color32 {
        self.mapping
            .get(&species)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let labels: BTreeSet<Species> = [Species::Setosa].into_iter().collect();
        let colors = SpeciesColors::new(&labels);
        assert_eq!(colors.color_for(Species::Virginica), Color32::GRAY);
        assert_ne!(colors.color_for(Species::Setosa), Color32::GRAY);
    }
}
