//! Line and step plot implementation.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, DashPattern, LineStyle, Marker, MarkerStyle};

/// How consecutive points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStyle {
    /// Straight segments between points
    #[default]
    Default,
    /// Staircase where `y[i]` holds over `(x[i-1], x[i]]`
    StepsPre,
}

/// A line plot connecting data points.
#[derive(Debug, Clone)]
pub struct LinePlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub line_style: LineStyle,
    /// Marker drawn at each point (optional)
    pub marker_style: Option<MarkerStyle>,
    pub label: Option<String>,
    pub draw_style: DrawStyle,
}

impl LinePlot {
    /// Create a new line plot from x and y data.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        LinePlot {
            x,
            y,
            line_style: LineStyle::default(),
            marker_style: None,
            label: None,
            draw_style: DrawStyle::Default,
        }
    }

    /// Set the line color, recoloring any marker.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.line_style.color = color.into();
        if let Some(ref mut marker) = self.marker_style {
            marker.fill = self.line_style.color.clone();
            marker.edge_color = self.line_style.color.clone();
        }
        self
    }

    /// Add markers to the line plot.
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker_style = match marker {
            Marker::None => None,
            m => Some(MarkerStyle::colored(m, self.line_style.color.clone())),
        };
        self
    }

    /// Apply a matplotlib-style format string (e.g., "r-", "b--o", "g:s").
    ///
    /// Unrecognized trailing characters are ignored.
    pub fn format(mut self, fmt: &str) -> Self {
        let mut rest = fmt;

        if let Some(c) = rest.chars().next()
            && "bgrcmykw".contains(c)
        {
            self = self.color(Color::Named(c.to_string()));
            rest = &rest[c.len_utf8()..];
        }

        if let Some((dash, len)) = DashPattern::from_format_prefix(rest) {
            self.line_style.dash = dash;
            rest = &rest[len..];
        }

        if let Some(marker) = rest.chars().find_map(Marker::from_format_char) {
            self = self.marker(marker);
        }

        self
    }

    fn path_data(&self, points: &[(f64, f64)]) -> String {
        let mut d = String::new();
        for (i, (x, y)) in points.iter().enumerate() {
            if i == 0 {
                d.push_str(&format!("M{:.2},{:.2}", x, y));
                continue;
            }
            match self.draw_style {
                DrawStyle::Default => d.push_str(&format!(" L{:.2},{:.2}", x, y)),
                DrawStyle::StepsPre => d.push_str(&format!(" V{:.2} H{:.2}", y, x)),
            }
        }
        d
    }
}

impl Plot for LinePlot {
    fn primitive(&self) -> &'static str {
        match self.draw_style {
            DrawStyle::Default => "line",
            DrawStyle::StepsPre => "step",
        }
    }

    fn data(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.y)
    }

    fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.x, &self.y)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn line_style(&self) -> Option<LineStyle> {
        Some(self.line_style.clone())
    }

    fn marker_style(&self) -> Option<MarkerStyle> {
        self.marker_style.clone()
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let mut svg = String::new();

        let points: Vec<(f64, f64)> = self
            .x
            .iter()
            .zip(self.y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(|(&x, &y)| to_pixel(x, y, data_bounds, pixel_bounds))
            .collect();

        if points.len() >= 2 {
            svg.push_str(&format!(
                "<path d=\"{}\" {}/>\n",
                self.path_data(&points),
                self.line_style.to_svg_style()
            ));
        }

        if let Some(ref marker_style) = self.marker_style {
            for &(x, y) in &points {
                svg.push_str(&marker_style.render_at(x, y));
            }
        }

        svg
    }
}
