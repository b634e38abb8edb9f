//! Minimal matplotlib-like plotting library with SVG output.
//!
//! A [`Figure`] owns a grid of [`Axes`]; each axes collects line, step,
//! scatter and bar primitives and may be twinned to share its x-axis with
//! additional right-hand y-axes.

pub mod axes;
pub mod backend;
pub mod data;
pub mod element;
pub mod error;
pub mod figure;
pub mod plot;
pub mod scale;
pub mod style;

pub use axes::{Axes, AxisLimits};
pub use data::IntoPlotData;
pub use element::{Bounds, Legend, LegendEntry, LegendPosition};
pub use error::{PlotError, PlotResult};
pub use figure::Figure;
pub use plot::{BarPlot, LinePlot, Plot, ScatterPlot};
pub use scale::{LinearScale, Scale};
pub use style::{
    Color, DashPattern, FillStyle, FontStyle, FontWeight, LineStyle, Marker, MarkerStyle,
    TextStyle, Theme, ThemeConfig,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::plotting::axes::Axes;
    pub use crate::plotting::element::LegendPosition;
    pub use crate::plotting::error::{PlotError, PlotResult};
    pub use crate::plotting::figure::Figure;
    pub use crate::plotting::style::{Color, DashPattern, Marker, TextStyle, Theme};
}
