//! Plot-kind lookup and dispatch.
//!
//! Every series names its kind with a string tag. Tags resolve through a
//! fixed table to a [`PlotKind`], and each kind maps to the function that
//! draws it on an axes.

use crate::plotting::axes::{Axes, LinePlotBuilder};
use crate::plotting::{PlotError, PlotResult};

use super::validate::ResolvedSeries;

/// Closed set of plot kinds the translator can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotKind {
    Line,
    Scatter,
    Bar,
    Step,
}

/// Tag to kind. Several tags may name the same kind.
const KIND_TABLE: &[(&str, PlotKind)] = &[
    ("line", PlotKind::Line),
    ("curve", PlotKind::Line),
    ("plot", PlotKind::Line),
    ("scatter", PlotKind::Scatter),
    ("bar", PlotKind::Bar),
    ("step", PlotKind::Step),
];

type Plotter = fn(&mut Axes, &ResolvedSeries<'_>) -> PlotResult<()>;

const LINE_OPTIONS: &[&str] = &[
    "color", "linewidth", "linestyle", "marker", "markersize", "alpha", "format",
];
const SCATTER_OPTIONS: &[&str] = &["color", "size", "marker", "alpha", "edgewidth"];
const BAR_OPTIONS: &[&str] = &["color", "width", "bottom", "alpha", "edgecolor", "edgewidth"];

impl PlotKind {
    /// Resolve a kind tag, ignoring ASCII case.
    pub fn lookup(tag: &str) -> Option<Self> {
        KIND_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(tag.trim()))
            .map(|&(_, kind)| kind)
    }

    /// All accepted tags.
    pub fn tags() -> impl Iterator<Item = &'static str> {
        KIND_TABLE.iter().map(|(name, _)| *name)
    }

    pub fn name(self) -> &'static str {
        match self {
            PlotKind::Line => "line",
            PlotKind::Scatter => "scatter",
            PlotKind::Bar => "bar",
            PlotKind::Step => "step",
        }
    }

    /// Style options the kind's primitive accepts.
    pub fn accepted_options(self) -> &'static [&'static str] {
        match self {
            PlotKind::Line | PlotKind::Step => LINE_OPTIONS,
            PlotKind::Scatter => SCATTER_OPTIONS,
            PlotKind::Bar => BAR_OPTIONS,
        }
    }

    fn plotter(self) -> Plotter {
        match self {
            PlotKind::Line => plot_line,
            PlotKind::Scatter => plot_scatter,
            PlotKind::Bar => plot_bar,
            PlotKind::Step => plot_step,
        }
    }

    /// Draw `series` on `axes`. Data is handed over unchanged.
    pub(crate) fn draw(self, axes: &mut Axes, series: &ResolvedSeries<'_>) -> PlotResult<()> {
        let accepted = self.accepted_options();
        if let Some(option) = series
            .style
            .set_options()
            .into_iter()
            .find(|option| !accepted.contains(option))
        {
            return Err(PlotError::InvalidConfig(format!(
                "{} does not accept option '{}'",
                self.name(),
                option
            )));
        }
        (self.plotter())(axes, series)
    }
}

fn plot_line(axes: &mut Axes, series: &ResolvedSeries<'_>) -> PlotResult<()> {
    let builder = axes.plot(series.x.to_vec(), series.y.to_vec());
    line_like(builder, series)
}

fn plot_step(axes: &mut Axes, series: &ResolvedSeries<'_>) -> PlotResult<()> {
    let builder = axes.step(series.x.to_vec(), series.y.to_vec());
    line_like(builder, series)
}

fn line_like(mut builder: LinePlotBuilder<'_>, series: &ResolvedSeries<'_>) -> PlotResult<()> {
    let style = series.style;
    if let Some(ref fmt) = style.format {
        builder = builder.format(fmt.clone());
    }
    if let Some(ref color) = series.color {
        builder = builder.color(color.clone());
    }
    if let Some(width) = style.linewidth {
        builder = builder.linewidth(width);
    }
    if let Some(dash) = series.linestyle {
        builder = builder.linestyle(dash);
    }
    if let Some(marker) = series.marker {
        builder = builder.marker(marker);
    }
    if let Some(size) = style.markersize {
        builder = builder.markersize(size);
    }
    if let Some(alpha) = style.alpha {
        builder = builder.alpha(alpha);
    }
    if let Some(label) = series.label {
        builder = builder.label(label);
    }
    builder.build()?;
    Ok(())
}

fn plot_scatter(axes: &mut Axes, series: &ResolvedSeries<'_>) -> PlotResult<()> {
    let style = series.style;
    let mut builder = axes.scatter(series.x.to_vec(), series.y.to_vec());
    if let Some(ref color) = series.color {
        builder = builder.color(color.clone());
    }
    if let Some(size) = style.size {
        builder = builder.size(size);
    }
    if let Some(marker) = series.marker {
        builder = builder.marker(marker);
    }
    if let Some(alpha) = style.alpha {
        builder = builder.alpha(alpha);
    }
    if let Some(width) = style.edgewidth {
        builder = builder.edge_width(width);
    }
    if let Some(label) = series.label {
        builder = builder.label(label);
    }
    builder.build()?;
    Ok(())
}

fn plot_bar(axes: &mut Axes, series: &ResolvedSeries<'_>) -> PlotResult<()> {
    let style = series.style;
    let mut builder = axes.bar(series.x.to_vec(), series.y.to_vec());
    if let Some(ref color) = series.color {
        builder = builder.color(color.clone());
    }
    if let Some(width) = style.width {
        builder = builder.width(width);
    }
    if let Some(bottom) = style.bottom {
        builder = builder.bottom(bottom);
    }
    if let Some(alpha) = style.alpha {
        builder = builder.alpha(alpha);
    }
    if let Some(ref edge) = series.edgecolor {
        builder = builder.edge_color(edge.clone());
    }
    if let Some(width) = style.edgewidth {
        builder = builder.edge_width(width);
    }
    if let Some(label) = series.label {
        builder = builder.label(label);
    }
    builder.build()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeriesStyle;
    use std::borrow::Cow;

    fn series<'a>(kind: PlotKind, x: &'a [f64], y: &'a [f64], style: &'a SeriesStyle) -> ResolvedSeries<'a> {
        ResolvedSeries {
            kind,
            x: Cow::Borrowed(x),
            y,
            label: Some("s"),
            style,
            color: None,
            edgecolor: None,
            linestyle: None,
            marker: None,
        }
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(PlotKind::lookup("curve"), Some(PlotKind::Line));
        assert_eq!(PlotKind::lookup("plot"), Some(PlotKind::Line));
        assert_eq!(PlotKind::lookup("Scatter"), Some(PlotKind::Scatter));
        assert_eq!(PlotKind::lookup("step"), Some(PlotKind::Step));
        assert_eq!(PlotKind::lookup("violin"), None);
        assert_eq!(PlotKind::tags().count(), KIND_TABLE.len());
    }

    #[test]
    fn test_each_kind_reaches_its_primitive() {
        let style = SeriesStyle::default();
        let (x, y) = ([1.0, 2.0, 4.0], [3.0, -1.0, 0.5]);
        for (kind, primitive) in [
            (PlotKind::Line, "line"),
            (PlotKind::Scatter, "scatter"),
            (PlotKind::Bar, "bar"),
            (PlotKind::Step, "step"),
        ] {
            let mut axes = Axes::default();
            kind.draw(&mut axes, &series(kind, &x, &y, &style)).unwrap();
            let plot = &axes.plots()[0];
            assert_eq!(plot.primitive(), primitive);
            assert_eq!(plot.data(), (&x[..], &y[..]));
            assert_eq!(plot.label(), Some("s"));
        }
    }

    #[test]
    fn test_unaccepted_option_rejected() {
        let style = SeriesStyle { marker: Some("o".into()), ..Default::default() };
        let mut axes = Axes::default();
        let err = PlotKind::Bar
            .draw(&mut axes, &series(PlotKind::Bar, &[1.0], &[1.0], &style))
            .unwrap_err();
        assert!(err.to_string().contains("bar does not accept option 'marker'"));
        assert!(axes.plots().is_empty());
    }
}
