use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// An sRGB colour carried in the chart contracts, independent of egui.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for Color32 {
    fn from(c: Rgb) -> Self {
        Color32::from_rgb(c.0, c.1, c.2)
    }
}

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Rgb> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(4, 200.0);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(generate_palette(0, 0.0).is_empty());
    }
}
