//! Axis scaling and tick generation.

mod linear;

pub use linear::LinearScale;

/// Trait for axis scale transformations.
pub trait Scale: std::fmt::Debug {
    /// Transform a data value to normalized coordinates (0.0 - 1.0).
    fn transform(&self, value: f64) -> f64;

    /// Set the data range for this scale.
    fn set_range(&mut self, min: f64, max: f64);

    /// Get the current data range.
    fn range(&self) -> (f64, f64);

    /// Generate nice tick values for this scale.
    fn ticks(&self, num_ticks: usize) -> Vec<f64>;
}

/// Round `range` to a 1/2/5 x 10^n value.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        match fraction {
            f if f < 1.5 => 1.0,
            f if f < 3.0 => 2.0,
            f if f < 7.0 => 5.0,
            _ => 10.0,
        }
    } else {
        match fraction {
            f if f <= 1.0 => 1.0,
            f if f <= 2.0 => 2.0,
            f if f <= 5.0 => 5.0,
            _ => 10.0,
        }
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick positions inside `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if num_ticks < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let first = (min / spacing).ceil() as i64;
    let last = (max / spacing).floor() as i64;

    (first..=last)
        .map(|i| i as f64 * spacing)
        // Snap values like 0.30000000000000004
        .map(|t| (t / spacing).round() * spacing)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_ticks_unit_range() {
        let ticks = nice_ticks(0.0, 10.0, 5);
        assert_eq!(ticks, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn test_nice_ticks_stay_inside_range() {
        let ticks = nice_ticks(-0.35, 4.35, 5);
        assert!(ticks.iter().all(|&t| (-0.35..=4.35).contains(&t)));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(nice_ticks(3.0, 3.0, 5), vec![3.0]);
    }
}
