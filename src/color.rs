use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Mark colours
// ---------------------------------------------------------------------------

/// Fill and stroke colour of the range marks.
pub const STEELBLUE: Srgb<u8> = Srgb::new(70, 130, 180);

/// Lighter variant of `color` used for the hovered mark.
pub fn highlight(color: Srgb<u8>) -> Srgb<u8> {
    let rgb: Srgb = color.into_format();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + 0.15).min(1.0);
    let lighter: Srgb = hsl.into_color();
    lighter.into_format()
}

// ---------------------------------------------------------------------------
// Backend conversions
// ---------------------------------------------------------------------------

pub fn to_color32(color: Srgb<u8>) -> Color32 {
    Color32::from_rgb(color.red, color.green, color.blue)
}

/// `#rrggbb` for SVG attributes.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
