//! Color definitions and utilities.

use std::fmt;

/// Represents a color for plotting elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// RGBA color with alpha 0.0-1.0
    Rgba(u8, u8, u8, f64),
    /// Named color (e.g., "red", "C0"), resolved when written out
    Named(String),
}

/// Matplotlib's `tab10` property cycle.
const TAB10: [Color; 10] = [
    Color::Rgb(0x1f, 0x77, 0xb4),
    Color::Rgb(0xff, 0x7f, 0x0e),
    Color::Rgb(0x2c, 0xa0, 0x2c),
    Color::Rgb(0xd6, 0x27, 0x28),
    Color::Rgb(0x94, 0x67, 0xbd),
    Color::Rgb(0x8c, 0x56, 0x4b),
    Color::Rgb(0xe3, 0x77, 0xc2),
    Color::Rgb(0x7f, 0x7f, 0x7f),
    Color::Rgb(0xbc, 0xbd, 0x22),
    Color::Rgb(0x17, 0xbe, 0xcf),
];

impl Color {
    /// Create a new RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create a new RGBA color.
    pub fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Color::Rgba(r, g, b, a.clamp(0.0, 1.0))
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000AA").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Color::Rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)? as f64 / 255.0,
            )),
            _ => None,
        }
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("rgb({},{},{})", r, g, b),
            Color::Rgba(r, g, b, a) => format!("rgba({},{},{},{})", r, g, b, a),
            Color::Named(name) => match named_color(name) {
                Some(color) => color.to_svg_string(),
                // Unknown names are handed to the SVG consumer as CSS colors.
                None => name.clone(),
            },
        }
    }

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 128, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::Rgb(255, 0, 255);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::Rgb(211, 211, 211);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
    pub const TRANSPARENT: Color = Color::Rgba(0, 0, 0, 0.0);
}

impl Default for Color {
    fn default() -> Self {
        TAB10[0].clone()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        if s.starts_with('#') {
            Color::from_hex(s).unwrap_or_else(|| Color::Named(s.to_string()))
        } else {
            Color::Named(s.to_string())
        }
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::from(s.as_str())
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Resolve basic, single-letter and `C0`..`C9` color names.
fn named_color(name: &str) -> Option<Color> {
    let lower = name.to_lowercase();
    if let Some(idx) = lower.strip_prefix('c').and_then(|d| d.parse::<usize>().ok()) {
        return TAB10.get(idx).cloned();
    }
    let color = match lower.as_str() {
        "black" | "k" => Color::BLACK,
        "white" | "w" => Color::WHITE,
        "red" | "r" => Color::RED,
        "green" | "g" => Color::GREEN,
        "blue" | "b" => Color::BLUE,
        "yellow" | "y" => Color::YELLOW,
        "cyan" | "aqua" | "c" => Color::CYAN,
        "magenta" | "fuchsia" | "m" => Color::MAGENTA,
        "orange" => Color::Rgb(255, 165, 0),
        "purple" => Color::Rgb(128, 0, 128),
        "gray" | "grey" => Color::GRAY,
        "lightgray" | "lightgrey" => Color::LIGHT_GRAY,
        "darkgray" | "darkgrey" => Color::DARK_GRAY,
        "pink" => Color::Rgb(255, 192, 203),
        "brown" => Color::Rgb(165, 42, 42),
        "navy" => Color::Rgb(0, 0, 128),
        "teal" => Color::Rgb(0, 128, 128),
        "olive" => Color::Rgb(128, 128, 0),
        _ => return None,
    };
    Some(color)
}

/// Get a color from the default color cycle by index.
pub fn cycle_color(index: usize) -> Color {
    TAB10[index % TAB10.len()].clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#ff8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(Color::from_hex("zz0000"), None);
        assert_eq!(Color::from_hex("#fff"), None);
    }

    #[test]
    fn test_cycle_names_resolve() {
        assert_eq!(Color::from("C1").to_svg_string(), cycle_color(1).to_svg_string());
        assert_eq!(Color::from("r").to_svg_string(), "rgb(255,0,0)");
    }

    #[test]
    fn test_unknown_name_passes_through() {
        assert_eq!(Color::from("rebeccapurple").to_svg_string(), "rebeccapurple");
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle_color(10), cycle_color(0));
    }
}
