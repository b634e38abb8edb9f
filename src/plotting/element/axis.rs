//! Axis configuration.

use crate::plotting::style::{Color, LineStyle, TextStyle};

/// Which edge of the plot area an axis spine is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisPosition {
    Bottom,
    Left,
    Right,
}

/// Configuration for an axis.
#[derive(Debug, Clone)]
pub struct AxisConfig {
    /// Whether the axis is visible
    pub visible: bool,
    /// Edge the spine is attached to
    pub position: AxisPosition,
    /// Spine location as a fraction of the axes width, measured from the
    /// left edge (`1.0` is the right edge). Only used for `Right` axes.
    pub spine_offset: f64,
    /// Axis line style
    pub line_style: LineStyle,
    /// Whether to show tick marks
    pub show_ticks: bool,
    /// Length of tick marks in pixels
    pub tick_length: f64,
    /// Style for tick labels
    pub tick_label_style: TextStyle,
    /// Number of ticks to generate
    pub num_ticks: usize,
    /// Padding between tick marks and labels
    pub tick_padding: f64,
    /// Custom tick positions (overrides automatic generation)
    pub tick_positions: Option<Vec<f64>>,
    /// Custom tick labels (must match tick_positions length)
    pub tick_labels: Option<Vec<String>>,
}

impl AxisConfig {
    /// Default configuration for an axis attached to `position`.
    pub fn at(position: AxisPosition) -> Self {
        AxisConfig {
            position,
            spine_offset: 1.0,
            ..Default::default()
        }
    }

    /// Tick values and their labels, custom ticks taking precedence.
    pub fn ticks_with_labels(&self, auto_ticks: Vec<f64>) -> Vec<(f64, String)> {
        let positions = self.tick_positions.clone().unwrap_or(auto_ticks);
        match self.tick_labels {
            Some(ref labels) => positions.into_iter().zip(labels.iter().cloned()).collect(),
            None => positions
                .into_iter()
                .map(|t| (t, self.format_tick(t)))
                .collect(),
        }
    }

    /// Format a tick value as a label based on its magnitude.
    pub fn format_tick(&self, value: f64) -> String {
        if value == 0.0 {
            "0".to_string()
        } else if value.abs() >= 10000.0 || value.abs() < 0.01 {
            format!("{:.1e}", value)
        } else if value.fract() == 0.0 {
            format!("{:.0}", value)
        } else {
            let s = format!("{:.2}", value);
            s.trim_end_matches('0').to_string()
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        AxisConfig {
            visible: true,
            position: AxisPosition::Left,
            spine_offset: 1.0,
            line_style: LineStyle::new().color(Color::BLACK).width(1.0),
            show_ticks: true,
            tick_length: 5.0,
            tick_label_style: TextStyle::new().font_size(10.0),
            num_ticks: 5,
            tick_padding: 3.0,
            tick_positions: None,
            tick_labels: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tick() {
        let axis = AxisConfig::default();
        assert_eq!(axis.format_tick(0.0), "0");
        assert_eq!(axis.format_tick(20.0), "20");
        assert_eq!(axis.format_tick(2.5), "2.5");
        assert_eq!(axis.format_tick(25000.0), "2.5e4");
    }

    #[test]
    fn test_custom_tick_labels() {
        let mut axis = AxisConfig::at(AxisPosition::Bottom);
        axis.tick_positions = Some(vec![1.0, 2.0]);
        axis.tick_labels = Some(vec!["a".into(), "b".into()]);
        let ticks = axis.ticks_with_labels(vec![0.0, 5.0, 10.0]);
        assert_eq!(ticks, vec![(1.0, "a".to_string()), (2.0, "b".to_string())]);
    }
}
