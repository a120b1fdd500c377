//! Colors shared by the chart description and the bitmap frames.

use plotters::style::RGBColor;

/// Categorical palette, assigned by business function index.
pub const CATEGORY_PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),  // Blue
    RGBColor(255, 127, 14),  // Orange
    RGBColor(44, 160, 44),   // Green
    RGBColor(214, 39, 40),   // Red
    RGBColor(148, 103, 189), // Purple
    RGBColor(140, 86, 75),   // Brown
    RGBColor(227, 119, 194), // Pink
    RGBColor(127, 127, 127), // Gray
    RGBColor(188, 189, 34),  // Olive
    RGBColor(23, 190, 207),  // Cyan
];

/// Palette color for the category at `index`, wrapping around.
pub fn category_color(index: usize) -> RGBColor {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

/// Parse a color string (hex format) to `RGBColor`, `None` if malformed.
pub fn parse_color(color_str: &str) -> Option<RGBColor> {
    let hex = color_str.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(hex.get(range)?, 16).ok();
    Some(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Formats a color as `#rrggbb`.
pub fn to_hex(color: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", color.0, color.1, color.2)
}
