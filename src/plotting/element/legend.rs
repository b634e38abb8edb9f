//! Legend configuration.

use std::str::FromStr;

use crate::plotting::error::PlotError;
use crate::plotting::style::{Color, FillStyle, LineStyle, MarkerStyle, TextStyle};

/// Position of the legend inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LegendPosition {
    /// Let the renderer choose; currently placed top-right.
    #[default]
    Best,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Center,
}

impl LegendPosition {
    /// Anchor point for this position, in normalized axes coordinates.
    pub fn anchor(&self) -> (f64, f64) {
        match self {
            LegendPosition::TopLeft => (0.02, 0.98),
            LegendPosition::Best | LegendPosition::TopRight => (0.98, 0.98),
            LegendPosition::BottomLeft => (0.02, 0.02),
            LegendPosition::BottomRight => (0.98, 0.02),
            LegendPosition::Top => (0.5, 0.98),
            LegendPosition::Bottom => (0.5, 0.02),
            LegendPosition::Left => (0.02, 0.5),
            LegendPosition::Right => (0.98, 0.5),
            LegendPosition::Center => (0.5, 0.5),
        }
    }

    /// Horizontal alignment of the legend box relative to its anchor.
    pub fn horizontal(&self) -> Align {
        match self {
            LegendPosition::TopLeft | LegendPosition::BottomLeft | LegendPosition::Left => {
                Align::Start
            }
            LegendPosition::Best
            | LegendPosition::TopRight
            | LegendPosition::BottomRight
            | LegendPosition::Right => Align::End,
            _ => Align::Middle,
        }
    }

    /// Vertical alignment of the legend box relative to its anchor.
    pub fn vertical(&self) -> Align {
        match self {
            LegendPosition::Best
            | LegendPosition::TopLeft
            | LegendPosition::TopRight
            | LegendPosition::Top => Align::Start,
            LegendPosition::BottomLeft | LegendPosition::BottomRight | LegendPosition::Bottom => {
                Align::End
            }
            _ => Align::Middle,
        }
    }
}

/// Box alignment along one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Start,
    Middle,
    End,
}

impl FromStr for LegendPosition {
    type Err = PlotError;

    /// Parses matplotlib location names ("upper right", "lower left", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', '-'], " ");
        let position = match normalized.as_str() {
            "best" => LegendPosition::Best,
            "upper left" | "top left" => LegendPosition::TopLeft,
            "upper right" | "top right" => LegendPosition::TopRight,
            "lower left" | "bottom left" => LegendPosition::BottomLeft,
            "lower right" | "bottom right" => LegendPosition::BottomRight,
            "upper center" | "top" => LegendPosition::Top,
            "lower center" | "bottom" => LegendPosition::Bottom,
            "center left" | "left" => LegendPosition::Left,
            "center right" | "right" => LegendPosition::Right,
            "center" => LegendPosition::Center,
            _ => {
                return Err(PlotError::InvalidConfig(format!(
                    "unknown legend location '{}'",
                    s
                )));
            }
        };
        Ok(position)
    }
}

/// A single entry in the legend.
#[derive(Debug, Clone)]
pub struct LegendEntry {
    /// Label text
    pub label: String,
    /// Line sample (line plots)
    pub line_style: Option<LineStyle>,
    /// Marker sample (scatter plots, lines with markers)
    pub marker_style: Option<MarkerStyle>,
    /// Fill sample (bar charts)
    pub fill_style: Option<FillStyle>,
}

impl LegendEntry {
    /// Create a new legend entry with just a label.
    pub fn new(label: impl Into<String>) -> Self {
        LegendEntry {
            label: label.into(),
            line_style: None,
            marker_style: None,
            fill_style: None,
        }
    }
}

/// Legend configuration.
#[derive(Debug, Clone)]
pub struct Legend {
    /// Legend entries
    pub entries: Vec<LegendEntry>,
    /// Position of the legend
    pub position: LegendPosition,
    /// Whether the legend is visible
    pub visible: bool,
    /// Background fill style
    pub background: FillStyle,
    /// Text style for labels
    pub text_style: TextStyle,
    /// Padding inside the legend box
    pub padding: f64,
    /// Length of the line sample in the legend
    pub line_length: f64,
    /// Gap between line/marker and label
    pub label_gap: f64,
}

impl Legend {
    /// Create a new, visible, empty legend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to the legend.
    pub fn add_entry(&mut self, entry: LegendEntry) {
        self.entries.push(entry);
    }

    /// Approximate rendered box size in pixels.
    pub fn box_size(&self) -> (f64, f64) {
        let line_height = self.text_style.font_size * 1.5;
        let longest = self
            .entries
            .iter()
            .map(|e| e.label.chars().count())
            .max()
            .unwrap_or(0) as f64;
        let text_width = longest * self.text_style.font_size * 0.6;
        (
            self.padding * 2.0 + self.line_length + self.label_gap + text_width,
            self.padding * 2.0 + self.entries.len() as f64 * line_height,
        )
    }
}

impl Default for Legend {
    fn default() -> Self {
        Legend {
            entries: Vec::new(),
            position: LegendPosition::Best,
            visible: true,
            background: FillStyle::new(Color::WHITE)
                .opacity(0.9)
                .stroke(Color::GRAY)
                .stroke_width(0.5),
            text_style: TextStyle::new().font_size(10.0),
            padding: 8.0,
            line_length: 20.0,
            label_gap: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_matplotlib_locations() {
        assert_eq!("upper left".parse::<LegendPosition>().unwrap(), LegendPosition::TopLeft);
        assert_eq!("lower_right".parse::<LegendPosition>().unwrap(), LegendPosition::BottomRight);
        assert_eq!("best".parse::<LegendPosition>().unwrap(), LegendPosition::Best);
        assert_eq!("Center".parse::<LegendPosition>().unwrap(), LegendPosition::Center);
    }

    #[test]
    fn test_parse_unknown_location() {
        let err = "somewhere".parse::<LegendPosition>().unwrap_err();
        assert!(err.to_string().contains("somewhere"));
    }

    #[test]
    fn test_box_grows_with_entries() {
        let mut legend = Legend::new();
        let (_, empty_height) = legend.box_size();
        legend.add_entry(LegendEntry::new("series"));
        let (_, height) = legend.box_size();
        assert!(height > empty_height);
    }
}
