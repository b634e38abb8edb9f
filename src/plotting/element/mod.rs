//! Visual elements for plots.

mod axis;
mod grid;
mod legend;
pub mod text;

pub use axis::{AxisConfig, AxisPosition};
pub use grid::GridConfig;
pub use legend::{Align, Legend, LegendEntry, LegendPosition};
pub use text::{escape_xml, Text};

/// Bounding box for elements, in either data or pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Create a new bounds with the given values.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Bounds {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Inverted infinite bounds; the identity for `include_point`.
    pub fn empty() -> Self {
        Bounds::new(
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        )
    }

    /// Create a unit bounds (0 to 1).
    pub fn unit() -> Self {
        Bounds::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Bounds of all finite `(x, y)` pairs, or `None` if there are none.
    pub fn of_points(x: &[f64], y: &[f64]) -> Option<Bounds> {
        let mut bounds = Bounds::empty();
        for (&x, &y) in x.iter().zip(y.iter()) {
            if x.is_finite() && y.is_finite() {
                bounds.include_point(x, y);
            }
        }
        bounds.is_finite().then_some(bounds)
    }

    /// Get the width of the bounds.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Get the height of the bounds.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// True when every edge is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x_min.is_finite()
            && self.x_max.is_finite()
            && self.y_min.is_finite()
            && self.y_max.is_finite()
    }

    /// Expand bounds to include a point.
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Expand bounds to include another bounds.
    pub fn include_bounds(&mut self, other: &Bounds) {
        self.x_min = self.x_min.min(other.x_min);
        self.x_max = self.x_max.max(other.x_max);
        self.y_min = self.y_min.min(other.y_min);
        self.y_max = self.y_max.max(other.y_max);
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::unit()
    }
}

/// Map a data-space point into pixel space. SVG y grows downward.
pub fn to_pixel(x: f64, y: f64, data: &Bounds, pixel: &Bounds) -> (f64, f64) {
    let x_norm = (x - data.x_min) / data.width();
    let y_norm = (y - data.y_min) / data.height();

    let px = pixel.x_min + x_norm * pixel.width();
    let py = pixel.y_max - y_norm * pixel.height();

    (px, py)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_points_skips_non_finite() {
        let b = Bounds::of_points(&[0.0, f64::NAN, 4.0], &[1.0, 100.0, -1.0]).unwrap();
        assert_eq!(b, Bounds::new(0.0, 4.0, -1.0, 1.0));
        assert!(Bounds::of_points(&[f64::NAN], &[1.0]).is_none());
    }

    #[test]
    fn test_to_pixel_flips_y() {
        let data = Bounds::unit();
        let pixel = Bounds::new(0.0, 100.0, 0.0, 50.0);
        assert_eq!(to_pixel(0.0, 0.0, &data, &pixel), (0.0, 50.0));
        assert_eq!(to_pixel(1.0, 1.0, &data, &pixel), (100.0, 0.0));
    }
}
