//! Grid line configuration.

use crate::plotting::style::{Color, DashPattern, LineStyle};

/// Configuration for major grid lines.
#[derive(Debug, Clone)]
pub struct GridConfig {
    /// Whether the grid is visible
    pub visible: bool,
    /// Style for grid lines
    pub style: LineStyle,
    /// Draw vertical lines at x ticks
    pub show_x: bool,
    /// Draw horizontal lines at y ticks
    pub show_y: bool,
    /// Grid line opacity
    pub opacity: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            visible: true,
            style: LineStyle::new()
                .color(Color::LIGHT_GRAY)
                .width(0.5)
                .dash(DashPattern::Solid),
            show_x: true,
            show_y: true,
            opacity: 0.8,
        }
    }
}
