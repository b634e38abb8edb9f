//! Conversions from caller data into plot coordinates.

/// Trait for types that can be converted into plot data.
pub trait IntoPlotData {
    /// Convert into a vector of f64 values.
    fn into_plot_data(self) -> Vec<f64>;
}

impl IntoPlotData for Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self
    }
}

impl IntoPlotData for &Vec<f64> {
    fn into_plot_data(self) -> Vec<f64> {
        self.clone()
    }
}

impl IntoPlotData for &[f64] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

impl<const N: usize> IntoPlotData for [f64; N] {
    fn into_plot_data(self) -> Vec<f64> {
        self.to_vec()
    }
}

macro_rules! lossless_into_plot_data {
    ($($t:ty),*) => {
        $(
            impl IntoPlotData for Vec<$t> {
                fn into_plot_data(self) -> Vec<f64> {
                    self.into_iter().map(f64::from).collect()
                }
            }

            impl IntoPlotData for &[$t] {
                fn into_plot_data(self) -> Vec<f64> {
                    self.iter().copied().map(f64::from).collect()
                }
            }
        )*
    };
}

lossless_into_plot_data!(f32, i32, u32);

/// Default x coordinates for a series given only y values: `0, 1, .., n-1`.
pub fn index_positions(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_positions() {
        assert_eq!(index_positions(3), vec![0.0, 1.0, 2.0]);
        assert!(index_positions(0).is_empty());
    }

    #[test]
    fn test_integer_conversion() {
        let v: Vec<i32> = vec![1, -2, 3];
        assert_eq!(v.into_plot_data(), vec![1.0, -2.0, 3.0]);
    }
}
