//! Vertical bar plot implementation.

use crate::plotting::element::{to_pixel, Bounds};
use crate::plotting::plot::Plot;
use crate::plotting::style::FillStyle;

/// Vertical bars centered on `x`, spanning from `bottom` to `bottom + height`.
#[derive(Debug, Clone)]
pub struct BarPlot {
    pub x: Vec<f64>,
    pub heights: Vec<f64>,
    /// Bar width in data units
    pub width: f64,
    /// Baseline the bars grow from
    pub bottom: f64,
    pub fill_style: FillStyle,
    pub label: Option<String>,
}

impl BarPlot {
    /// Create bars of width 0.8 on a zero baseline.
    pub fn new(x: Vec<f64>, heights: Vec<f64>) -> Self {
        BarPlot {
            x,
            heights,
            width: 0.8,
            bottom: 0.0,
            fill_style: FillStyle::default(),
            label: None,
        }
    }
}

impl Plot for BarPlot {
    fn primitive(&self) -> &'static str {
        "bar"
    }

    fn data(&self) -> (&[f64], &[f64]) {
        (&self.x, &self.heights)
    }

    fn bounds(&self) -> Option<Bounds> {
        let half = self.width / 2.0;
        let mut bounds = Bounds::empty();
        for (&x, &h) in self.x.iter().zip(self.heights.iter()) {
            if x.is_finite() && h.is_finite() {
                bounds.include_point(x - half, self.bottom);
                bounds.include_point(x + half, self.bottom + h);
            }
        }
        bounds.is_finite().then_some(bounds)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn fill_style(&self) -> Option<FillStyle> {
        Some(self.fill_style.clone())
    }

    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String {
        let half = self.width / 2.0;
        let style = self.fill_style.to_svg_style();
        let mut svg = String::new();

        for (&x, &h) in self.x.iter().zip(self.heights.iter()) {
            if !x.is_finite() || !h.is_finite() {
                continue;
            }
            let (left, base) = to_pixel(x - half, self.bottom, data_bounds, pixel_bounds);
            let (right, top) = to_pixel(x + half, self.bottom + h, data_bounds, pixel_bounds);
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
                left.min(right),
                top.min(base),
                (right - left).abs(),
                (base - top).abs(),
                style
            ));
        }

        svg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_include_baseline() {
        let plot = BarPlot::new(vec![1.0, 2.0], vec![3.0, 5.0]);
        let b = plot.bounds().unwrap();
        assert_eq!(b.y_min, 0.0);
        assert_eq!(b.y_max, 5.0);
        assert!((b.x_min - 0.6).abs() < 1e-12);
        assert!((b.x_max - 2.4).abs() < 1e-12);
    }

    #[test]
    fn test_negative_bars_render_positive_height() {
        let plot = BarPlot::new(vec![0.5], vec![-1.0]);
        let data = Bounds::new(0.0, 1.0, -1.0, 1.0);
        let svg = plot.render_svg(&data, &Bounds::new(0.0, 100.0, 0.0, 100.0));
        assert!(svg.contains("y=\"50.00\""));
        assert!(svg.contains("height=\"50.00\""));
    }
}
