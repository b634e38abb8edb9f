//! Plot primitives for visualizing data.

mod bar;
mod line;
mod scatter;

pub use bar::BarPlot;
pub use line::{DrawStyle, LinePlot};
pub use scatter::ScatterPlot;

use crate::plotting::element::{Bounds, LegendEntry};
use crate::plotting::style::{FillStyle, LineStyle, MarkerStyle};

/// Trait for plot primitives that can be rendered into an axes.
pub trait Plot {
    /// Name of the primitive ("line", "step", "scatter", "bar").
    fn primitive(&self) -> &'static str;

    /// The x and y data exactly as handed to the primitive.
    fn data(&self) -> (&[f64], &[f64]);

    /// Get the data bounds for this plot.
    fn bounds(&self) -> Option<Bounds>;

    /// Get the label for this plot (for legend).
    fn label(&self) -> Option<&str>;

    /// Get the line style for legend display.
    fn line_style(&self) -> Option<LineStyle> {
        None
    }

    /// Get the marker style for legend display.
    fn marker_style(&self) -> Option<MarkerStyle> {
        None
    }

    /// Get the fill style for legend display.
    fn fill_style(&self) -> Option<FillStyle> {
        None
    }

    /// Create a legend entry for this plot. Unlabelled plots have none.
    fn legend_entry(&self) -> Option<LegendEntry> {
        self.label().map(|label| LegendEntry {
            label: label.to_string(),
            line_style: self.line_style(),
            marker_style: self.marker_style(),
            fill_style: self.fill_style(),
        })
    }

    /// Render this plot to SVG, returning the SVG elements as a string.
    fn render_svg(&self, data_bounds: &Bounds, pixel_bounds: &Bounds) -> String;
}
