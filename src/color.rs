use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: booster version category → Color32
// ---------------------------------------------------------------------------

/// Maps booster version categories to distinct colours for the scatter
/// chart series and legend.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour map from the sorted unique categories.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a booster version category.
    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(5).len(), 5);
    }

    #[test]
    fn categories_get_distinct_colors() {
        let cats = vec!["B4".to_string(), "FT".to_string(), "v1.0".to_string()];
        let colors = CategoryColors::new(&cats);
        assert_ne!(colors.color_for("B4"), colors.color_for("FT"));
        assert_eq!(colors.color_for("unknown"), Color32::GRAY);
    }
}
