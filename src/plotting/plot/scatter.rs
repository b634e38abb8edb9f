//! Scatter plot implementation.

use std::fmt::Write as _;

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::{Color, MarkerStyle};

/// A scatter plot showing individual data points.
#[derive(Debug, Clone)]
pub struct ScatterPlot {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub marker_style: MarkerStyle,
    pub label: Option<String>,
}

impl ScatterPlot {
    /// Create a new scatter plot from x and y data.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        ScatterPlot {
            x,
            y,
            marker_style: MarkerStyle::default(),
            label: None,
        }
    }

    /// Set the marker fill and edge color.
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        let c = color.into();
        self.marker_style.fill = c.clone();
        self.marker_style.edge_color = c;
        self
    }

    fn finite_pixels<'a>(
        &'a self,
        data_bounds: &'a Bounds,
        pixel_bounds: &'a Bounds,
    ) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.x
            .iter()
            .zip(self.y.iter())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .map(move |(&x, &y)| to_pixel(x, y, data_bounds, pixel_bounds))
    }
}

impl Plot for ScatterPlot {
    fn primitive(&self) -> &'static str {
        "scatter"
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

    fn marker_style(&self) -> Option<MarkerStyle> {
        Some(self.marker_style.clone())
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        // Circles share their style attributes through a group wrapper
        if self.marker_style.marker.is_circle() {
            let radius = self.marker_style.size / 2.0;
            let mut svg = format!("<g {}>\n", self.marker_style.to_svg_style());
            for (px, py) in self.finite_pixels(data_bounds, pixel_bounds) {
                let _ = writeln!(
                    svg,
                    "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{:.2}\"/>",
                    px, py, radius
                );
            }
            svg.push_str("</g>\n");
            return svg;
        }

        self.finite_pixels(data_bounds, pixel_bounds)
            .map(|(px, py)| self.marker_style.render_at(px, py))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plotting::style::Marker;

    #[test]
    fn test_circles_grouped() {
        let plot = ScatterPlot::new(vec![0.0, 1.0, f64::NAN], vec![0.0, 1.0, 2.0]);
        let svg = plot.render_svg(&Bounds::unit(), &Bounds::new(0.0, 10.0, 0.0, 10.0));
        assert!(svg.starts_with("<g "));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_path_markers() {
        let mut plot = ScatterPlot::new(vec![0.0, 1.0], vec![0.0, 1.0]);
        plot.marker_style.marker = Marker::Square;
        let svg = plot.render_svg(&Bounds::unit(), &Bounds::unit());
        assert_eq!(svg.matches("<path").count(), 2);
    }
}
