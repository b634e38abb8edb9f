//! Marker styles for scatter plots and line plot points.

use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use super::color::Color;
use crate::plotting::error::PlotError;

/// Marker shapes for data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marker {
    #[default]
    None,
    Circle,
    Square,
    Triangle,
    TriangleDown,
    Diamond,
    Plus,
    Cross,
    Star,
    Pentagon,
    Hexagon,
}

impl Marker {
    /// Parse from a matplotlib-style format character.
    pub fn from_format_char(c: char) -> Option<Self> {
        match c {
            'o' => Some(Marker::Circle),
            's' => Some(Marker::Square),
            '^' => Some(Marker::Triangle),
            'v' => Some(Marker::TriangleDown),
            'D' | 'd' => Some(Marker::Diamond),
            '+' => Some(Marker::Plus),
            'x' | 'X' => Some(Marker::Cross),
            '*' => Some(Marker::Star),
            'p' => Some(Marker::Pentagon),
            'h' | 'H' => Some(Marker::Hexagon),
            _ => None,
        }
    }

    /// SVG path data for the marker centered at the origin, `r` being half
    /// the marker size. Circles are drawn as `<circle>` and return `None`.
    pub fn to_svg_path(&self, r: f64) -> Option<String> {
        match self {
            Marker::None | Marker::Circle => None,
            Marker::Square => Some(format!(
                "M{},{} L{},{} L{},{} L{},{} Z",
                -r, -r, r, -r, r, r, -r, r
            )),
            Marker::Triangle => Some(regular_polygon(3, r * 1.15, -FRAC_PI_2)),
            Marker::TriangleDown => Some(regular_polygon(3, r * 1.15, FRAC_PI_2)),
            Marker::Diamond => Some(regular_polygon(4, r * 1.2, -FRAC_PI_2)),
            Marker::Plus => Some(format!("M{},0 L{},0 M0,{} L0,{}", -r, r, -r, r)),
            Marker::Cross => {
                let s = r * 0.707;
                Some(format!(
                    "M{:.2},{:.2} L{:.2},{:.2} M{:.2},{:.2} L{:.2},{:.2}",
                    -s, -s, s, s, -s, s, s, -s
                ))
            }
            Marker::Star => {
                let points = (0..10).map(|i| {
                    let radius = if i % 2 == 0 { r } else { r * 0.4 };
                    let angle = PI * i as f64 / 5.0 - FRAC_PI_2;
                    (radius * angle.cos(), radius * angle.sin())
                });
                Some(closed_path(points))
            }
            Marker::Pentagon => Some(regular_polygon(5, r, -FRAC_PI_2)),
            Marker::Hexagon => Some(regular_polygon(6, r, 0.0)),
        }
    }

    /// Check if this marker should be rendered as a circle element.
    pub fn is_circle(&self) -> bool {
        matches!(self, Marker::Circle)
    }

    /// Open shapes are stroked but never filled.
    pub fn is_open(&self) -> bool {
        matches!(self, Marker::Plus | Marker::Cross)
    }
}

impl FromStr for Marker {
    type Err = PlotError;

    /// Accepts format characters ("o", "^") and names ("circle", "none").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(marker) = Marker::from_format_char(c)
        {
            return Ok(marker);
        }
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Marker::None),
            "circle" => Ok(Marker::Circle),
            "square" => Ok(Marker::Square),
            "triangle" | "triangle_up" => Ok(Marker::Triangle),
            "triangle_down" => Ok(Marker::TriangleDown),
            "diamond" => Ok(Marker::Diamond),
            "plus" => Ok(Marker::Plus),
            "cross" | "x" => Ok(Marker::Cross),
            "star" => Ok(Marker::Star),
            "pentagon" => Ok(Marker::Pentagon),
            "hexagon" => Ok(Marker::Hexagon),
            _ => Err(PlotError::InvalidConfig(format!("unknown marker '{}'", s))),
        }
    }
}

fn regular_polygon(sides: usize, r: f64, start: f64) -> String {
    closed_path((0..sides).map(|i| {
        let angle = start + 2.0 * PI * i as f64 / sides as f64;
        (r * angle.cos(), r * angle.sin())
    }))
}

fn closed_path(points: impl Iterator<Item = (f64, f64)>) -> String {
    let mut path = String::new();
    for (i, (x, y)) in points.enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        path.push_str(&format!("{}{:.2},{:.2}", cmd, x, y));
    }
    path.push_str(" Z");
    path
}

/// Style configuration for markers.
#[derive(Debug, Clone)]
pub struct MarkerStyle {
    /// The marker shape
    pub marker: Marker,
    /// Marker size (diameter in pixels)
    pub size: f64,
    /// Fill color
    pub fill: Color,
    /// Edge/stroke color
    pub edge_color: Color,
    /// Edge/stroke width
    pub edge_width: f64,
    /// Fill opacity
    pub fill_opacity: f64,
}

impl MarkerStyle {
    /// A marker of the given shape filled and edged with `color`.
    pub fn colored(marker: Marker, color: Color) -> Self {
        MarkerStyle {
            marker,
            fill: color.clone(),
            edge_color: color,
            ..Default::default()
        }
    }

    /// Generate SVG style attributes.
    pub fn to_svg_style(&self) -> String {
        let fill = if self.marker.is_open() {
            "none".to_string()
        } else {
            self.fill.to_svg_string()
        };
        let mut attrs = vec![
            format!("fill=\"{}\"", fill),
            format!("stroke=\"{}\"", self.edge_color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.edge_width),
        ];

        if self.fill_opacity < 1.0 {
            attrs.push(format!("fill-opacity=\"{}\"", self.fill_opacity));
        }

        attrs.join(" ")
    }

    /// Render the marker at a pixel position, returning SVG elements.
    pub fn render_at(&self, x: f64, y: f64) -> String {
        let style = self.to_svg_style();
        let radius = self.size / 2.0;

        if self.marker.is_circle() {
            format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\" {}/>\n",
                x, y, radius, style
            )
        } else if let Some(path) = self.marker.to_svg_path(radius) {
            format!(
                "<path d=\"{}\" transform=\"translate({:.2},{:.2})\" {}/>\n",
                path, x, y, style
            )
        } else {
            String::new()
        }
    }
}

impl Default for MarkerStyle {
    fn default() -> Self {
        MarkerStyle {
            marker: Marker::Circle,
            size: 6.0,
            fill: Color::default(),
            edge_color: Color::default(),
            edge_width: 1.0,
            fill_opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_marker() {
        assert_eq!("o".parse::<Marker>().unwrap(), Marker::Circle);
        assert_eq!("^".parse::<Marker>().unwrap(), Marker::Triangle);
        assert_eq!("diamond".parse::<Marker>().unwrap(), Marker::Diamond);
        assert_eq!("none".parse::<Marker>().unwrap(), Marker::None);
        assert!("blob".parse::<Marker>().is_err());
    }

    #[test]
    fn test_render_none_is_empty() {
        let style = MarkerStyle::colored(Marker::None, Color::RED);
        assert!(style.render_at(1.0, 1.0).is_empty());
    }

    #[test]
    fn test_open_marker_not_filled() {
        let style = MarkerStyle::colored(Marker::Cross, Color::RED);
        assert!(style.to_svg_style().starts_with("fill=\"none\""));
    }
}
