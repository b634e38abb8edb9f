//! Linear scale transformation.

use super::{nice_ticks, Scale};

/// A linear scale for axis transformation.
#[derive(Debug, Clone)]
pub struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    /// Create a linear scale over the unit range, to be set at render time.
    pub fn auto() -> Self {
        LinearScale { min: 0.0, max: 1.0 }
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale::auto()
    }
}

impl Scale for LinearScale {
    fn transform(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.5;
        }
        (value - self.min) / range
    }

    /// A zero-width range is widened around its value. An inverted range
    /// (`min > max`) is kept and flips the axis direction.
    fn set_range(&mut self, min: f64, max: f64) {
        if min == max {
            let padding = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            self.min = min - padding;
            self.max = max + padding;
        } else {
            self.min = min;
            self.max = max;
        }
    }

    fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn ticks(&self, num_ticks: usize) -> Vec<f64> {
        nice_ticks(self.min.min(self.max), self.min.max(self.max), num_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_range_is_widened() {
        let mut scale = LinearScale::auto();
        scale.set_range(5.0, 5.0);
        let (min, max) = scale.range();
        assert!(min < 5.0 && max > 5.0);
        assert_eq!(scale.transform(5.0), 0.5);
    }

    #[test]
    fn test_inverted_range_is_kept() {
        let mut scale = LinearScale::auto();
        scale.set_range(19.5, 10.0);
        assert_eq!(scale.range(), (19.5, 10.0));
        assert_eq!(scale.transform(19.5), 0.0);
        assert_eq!(scale.transform(10.0), 1.0);

        let ticks = scale.ticks(5);
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|&t| (10.0..=19.5).contains(&t)));
    }
}
