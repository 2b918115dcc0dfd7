use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue step between consecutive datasets (golden angle).
const HUE_STEP: f32 = 137.508;

/// Line colour for the dataset at registry position `index`.
///
/// Hues are spaced by the golden angle so neighbouring datasets differ
/// clearly, and a dataset replaced in place keeps its colour.
pub fn dataset_color(index: usize) -> Color32 {
    hue_color((index as f32 * HUE_STEP) % 360.0)
}

fn hue_color(hue: f32) -> Color32 {
    let hsl = Hsl::new(hue, 0.75, 0.45);
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}
