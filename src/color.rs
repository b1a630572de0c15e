use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator (grouped bars)
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
// Diverging colormap: correlation coefficient → Color32
// ---------------------------------------------------------------------------

const COOL: (f32, f32, f32) = (0.23, 0.30, 0.75);
const WARM: (f32, f32, f32) = (0.71, 0.02, 0.15);

/// Map a correlation coefficient in `[-1, 1]` onto a blue–white–red
/// diverging scale. NaN (undefined correlation) renders gray.
pub fn correlation_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    let white = LinSrgb::new(1.0f32, 1.0, 1.0);
    let endpoint = if r < 0.0 { COOL } else { WARM };
    let endpoint = Srgb::new(endpoint.0, endpoint.1, endpoint.2).into_linear();

    let t = (r.abs().min(1.0)) as f32;
    let mixed = white.mix(endpoint, t);
    let srgb: Srgb<f32> = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (srgb.red * 255.0) as u8,
        (srgb.green * 255.0) as u8,
        (srgb.blue * 255.0) as u8,
    )
}
