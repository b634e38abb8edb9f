//! Declarative subplot layouts rendered with a matplotlib-like SVG plotting
//! library.
//!
//! Describe a figure as a [`FigureSpec`] (in code or JSON) and hand it to
//! [`layout::render`]:
//!
//! ```no_run
//! use plotspec::config::{AxisGroupSpec, FigureSpec, SeriesSpec, SubplotSpec};
//!
//! let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![
//!     AxisGroupSpec::new(vec![SeriesSpec::new("line", vec![1.0, 4.0, 9.0]).label("squares")]),
//!     AxisGroupSpec::new(vec![SeriesSpec::new("bar", vec![2.0, 1.0, 3.0])]).ylabel("count"),
//! ])]);
//! let mut figure = plotspec::layout::render(&spec)?;
//! figure.save("squares.svg")?;
//! # Ok::<(), plotspec::layout::LayoutError>(())
//! ```

pub mod config;
pub mod layout;
pub mod plotting;
pub mod schema;

pub use config::FigureSpec;
pub use layout::{render, LayoutError, RenderedFigure};
