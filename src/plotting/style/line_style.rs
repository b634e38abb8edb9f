//! Line styling options.

use std::str::FromStr;

use super::color::Color;
use crate::plotting::error::PlotError;

/// Dash pattern for lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashPattern {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl DashPattern {
    /// Convert to SVG stroke-dasharray value.
    pub fn to_svg_dasharray(&self) -> Option<&'static str> {
        match self {
            DashPattern::Solid => None,
            DashPattern::Dashed => Some("8,4"),
            DashPattern::Dotted => Some("2,2"),
            DashPattern::DashDot => Some("8,4,2,4"),
        }
    }

    /// Match a format-string prefix, returning the pattern and its length.
    pub fn from_format_prefix(s: &str) -> Option<(Self, usize)> {
        // Two-character patterns first
        if s.starts_with("--") {
            Some((DashPattern::Dashed, 2))
        } else if s.starts_with("-.") {
            Some((DashPattern::DashDot, 2))
        } else if s.starts_with(':') {
            Some((DashPattern::Dotted, 1))
        } else if s.starts_with('-') {
            Some((DashPattern::Solid, 1))
        } else {
            None
        }
    }
}

impl FromStr for DashPattern {
    type Err = PlotError;

    /// Accepts both matplotlib short forms ("--") and names ("dashed").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => return Ok(DashPattern::Solid),
            "dashed" => return Ok(DashPattern::Dashed),
            "dotted" => return Ok(DashPattern::Dotted),
            "dashdot" => return Ok(DashPattern::DashDot),
            _ => {}
        }
        match DashPattern::from_format_prefix(s) {
            Some((dash, len)) if len == s.len() => Ok(dash),
            _ => Err(PlotError::InvalidConfig(format!(
                "unknown line style '{}'",
                s
            ))),
        }
    }
}

/// Style configuration for lines.
#[derive(Debug, Clone)]
pub struct LineStyle {
    /// Line color
    pub color: Color,
    /// Line width in pixels
    pub width: f64,
    /// Dash pattern
    pub dash: DashPattern,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl LineStyle {
    /// Create a new line style with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the line width.
    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the dash pattern.
    pub fn dash(mut self, dash: DashPattern) -> Self {
        self.dash = dash;
        self
    }

    /// Set the opacity.
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Generate SVG stroke attributes.
    pub fn to_svg_style(&self) -> String {
        let mut attrs = vec![
            format!("stroke=\"{}\"", self.color.to_svg_string()),
            format!("stroke-width=\"{}\"", self.width),
            "stroke-linecap=\"round\" stroke-linejoin=\"round\" fill=\"none\"".to_string(),
        ];

        if self.opacity < 1.0 {
            attrs.push(format!("stroke-opacity=\"{}\"", self.opacity));
        }

        if let Some(dasharray) = self.dash.to_svg_dasharray() {
            attrs.push(format!("stroke-dasharray=\"{}\"", dasharray));
        }

        attrs.join(" ")
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: Color::default(),
            width: 1.5,
            dash: DashPattern::Solid,
            opacity: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dash_patterns() {
        assert_eq!("--".parse::<DashPattern>().unwrap(), DashPattern::Dashed);
        assert_eq!("-.".parse::<DashPattern>().unwrap(), DashPattern::DashDot);
        assert_eq!("dotted".parse::<DashPattern>().unwrap(), DashPattern::Dotted);
        assert!("--o".parse::<DashPattern>().is_err());
        assert!("wavy".parse::<DashPattern>().is_err());
    }

    #[test]
    fn test_svg_style_includes_dasharray() {
        let style = LineStyle::new().dash(DashPattern::Dashed).opacity(0.5);
        let svg = style.to_svg_style();
        assert!(svg.contains("stroke-dasharray=\"8,4\""));
        assert!(svg.contains("stroke-opacity=\"0.5\""));
    }
}
