//! Translate a [`FigureSpec`] into a rendered [`Figure`].
//!
//! Rendering is a single pass over a validated plan. The grid is allocated
//! in one call, each subplot's left group is drawn on the grid axes, and
//! each right group gets its own twin axes sharing the x-axis. With twins,
//! the group legends are merged into one legend on the last twin.

mod error;
mod kinds;
mod validate;

pub use error::{LayoutError, LayoutResult};
pub use kinds::PlotKind;

use std::path::Path;

use log::{debug, info, warn};

use crate::config::FigureSpec;
use crate::plotting::element::{Legend, LegendEntry};
use crate::plotting::{Axes, Figure, PlotError};
use validate::{GridPlan, GroupPlan, LegendPlan, SubplotPlan};

/// A figure produced from a [`FigureSpec`].
pub struct RenderedFigure {
    pub figure: Figure,
    /// Figure index of each subplot's grid axes, row-major
    pub primary_axes: Vec<usize>,
    /// Figure indices of each subplot's twins, in right-group order
    pub twin_axes: Vec<Vec<usize>>,
}

impl RenderedFigure {
    /// Grid axes of the subplot at row-major position `subplot`.
    pub fn primary(&self, subplot: usize) -> Option<&Axes> {
        self.primary_axes
            .get(subplot)
            .and_then(|&i| self.figure.get(i))
    }

    /// Twin axes of the subplot at row-major position `subplot`.
    pub fn twins(&self, subplot: usize) -> Vec<&Axes> {
        self.twin_axes
            .get(subplot)
            .map(|twins| twins.iter().filter_map(|&i| self.figure.get(i)).collect())
            .unwrap_or_default()
    }

    pub fn to_svg(&mut self) -> String {
        self.figure.render()
    }

    /// Export the figure as SVG.
    pub fn save(&mut self, path: impl AsRef<Path>) -> LayoutResult<()> {
        let path = path.as_ref();
        self.figure.save(path)?;
        info!("Wrote figure to {}", path.display());
        Ok(())
    }
}

/// Validate `spec` without drawing anything.
pub fn check(spec: &FigureSpec) -> LayoutResult<()> {
    validate::plan(spec).map(|_| ())
}

/// Render `spec`.
///
/// The whole description is validated first, so configuration errors and
/// unknown kinds are reported before any plotting call. Errors raised by
/// the plotting library are passed through as [`LayoutError::Plot`].
pub fn render(spec: &FigureSpec) -> LayoutResult<RenderedFigure> {
    let plan = validate::plan(spec)?;
    let options = &spec.figure;

    let mut height = options.row_height * plan.rows as f64;
    if plan.subplots.len() == 1 {
        height *= 2.0;
    }
    let mut figure = Figure::from_inches(options.width, height, options.dpi).theme(plan.theme);
    if let Some(ref color) = plan.background {
        figure = figure.background(color.clone());
    }
    if let Some(ref title) = plan.suptitle {
        figure = figure.suptitle(title.text);
        if let Some(ref mut text) = figure.title {
            text.style = title.apply(text.style.clone());
        }
    }
    debug!(
        "Rendering {}x{} grid on a {:.0}x{:.0} px figure",
        plan.rows, plan.cols, figure.width, figure.height
    );

    let primary_axes = figure.subplots(plan.rows, plan.cols)?;
    let mut twin_axes = Vec::with_capacity(primary_axes.len());
    for (subplot, &index) in plan.subplots.iter().zip(&primary_axes) {
        twin_axes.push(render_subplot(&mut figure, index, subplot)?);
    }

    Ok(RenderedFigure {
        figure,
        primary_axes,
        twin_axes,
    })
}

fn axes_at(figure: &mut Figure, index: usize) -> Result<&mut Axes, PlotError> {
    figure
        .axes_mut(index)
        .ok_or_else(|| PlotError::InvalidConfig(format!("no axes at index {}", index)))
}

fn render_subplot(
    figure: &mut Figure,
    index: usize,
    plan: &SubplotPlan<'_>,
) -> LayoutResult<Vec<usize>> {
    debug!("{}: {} right axis group(s)", plan.location, plan.right.len());
    draw_group(axes_at(figure, index)?, &plan.left)?;

    let mut twins = Vec::with_capacity(plan.right.len());
    for group in &plan.right {
        let twin = figure.twinx(index)?;
        debug!("{}: twin axes {} for {}", plan.location, twin, group.location);
        draw_group(axes_at(figure, twin)?, group)?;
        twins.push(twin);
    }

    let primary = axes_at(figure, index)?;
    if let Some(ref title) = plan.title {
        let style = title.apply(primary.theme.title_style.clone());
        primary.set_title_styled(title.text, style);
    }
    if let Some(ref label) = plan.xlabel {
        let style = label.apply(primary.theme.label_style.clone());
        primary.set_xlabel_styled(label.text, style);
    }
    if let Some((min, max)) = plan.xlim {
        primary.set_xlim(min, max);
    }
    if let Some(ref grid) = plan.grid {
        apply_grid(primary, grid);
    }

    let settings = plan.left.legend.as_ref();
    match twins.last() {
        None => {
            let entries = primary.legend_entries();
            show_legend(primary, settings, entries, &plan.location);
        }
        Some(&last) => {
            let mut entries = Vec::new();
            for &i in std::iter::once(&index).chain(&twins) {
                let axes = axes_at(figure, i)?;
                entries.extend(axes.legend_entries());
                axes.hide_legend();
            }
            show_legend(axes_at(figure, last)?, settings, entries, &plan.location);
        }
    }

    Ok(twins)
}

fn draw_group(axes: &mut Axes, group: &GroupPlan<'_>) -> LayoutResult<()> {
    for (i, series) in group.series.iter().enumerate() {
        debug!(
            "{}, series {}: {} with {} points",
            group.location,
            i + 1,
            series.kind.name(),
            series.y.len()
        );
        series.kind.draw(axes, series)?;
    }

    if let Some(ref label) = group.ylabel {
        let style = label.apply(axes.theme.label_style.clone());
        axes.set_ylabel_styled(label.text, style);
    }
    if let Some((min, max)) = group.ylim {
        axes.set_ylim(min, max);
    }
    if let Some(ref grid) = group.grid {
        apply_grid(axes, grid);
    }
    Ok(())
}

fn apply_grid(axes: &mut Axes, grid: &GridPlan) {
    axes.grid.visible = grid.visible;
    axes.grid.show_x = grid.show_x;
    axes.grid.show_y = grid.show_y;
    if let Some(ref color) = grid.color {
        axes.grid.style.color = color.clone();
    }
    if let Some(width) = grid.linewidth {
        axes.grid.style.width = width;
    }
    if let Some(alpha) = grid.alpha {
        axes.grid.opacity = alpha.clamp(0.0, 1.0);
    }
}

/// Show `entries` as the legend of `axes`. Without settings the legend is
/// shown at the default location.
fn show_legend(
    axes: &mut Axes,
    settings: Option<&LegendPlan>,
    entries: Vec<LegendEntry>,
    location: &str,
) {
    let requested = settings.is_some();
    let settings = settings.copied().unwrap_or_default();
    if !settings.visible {
        axes.hide_legend();
        return;
    }
    if entries.is_empty() {
        if requested {
            warn!("{}: legend requested but no series has a label", location);
        }
        axes.hide_legend();
        return;
    }

    let mut legend = Legend::new();
    legend.position = settings.position;
    legend.entries = entries;
    legend.text_style.color = axes.theme.label_style.color.clone();
    if let Some(size) = settings.fontsize {
        legend.text_style.font_size = size;
    }
    axes.set_legend(legend);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        AxisGroupSpec, AxisSide, LegendSpec, SeriesSpec, SeriesStyle, StyledText, SubplotSpec,
        TextSpec,
    };
    use crate::plotting::LegendPosition;

    fn line(y: Vec<f64>, label: &str) -> SeriesSpec {
        SeriesSpec::new("line", y).label(label)
    }

    fn legend_labels(axes: &Axes) -> Vec<String> {
        axes.legend
            .as_ref()
            .filter(|l| l.visible)
            .map(|l| l.entries.iter().map(|e| e.label.clone()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_left_line_right_bar_share_x() {
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![line(vec![1.0, 2.0, 3.0], "temp").x(vec![0.0, 1.0, 2.0])]),
            AxisGroupSpec::new(vec![SeriesSpec::new("bar", vec![10.0, 30.0]).x(vec![0.5, 4.0])]),
        ])]);
        let rendered = render(&spec).unwrap();
        assert_eq!(rendered.figure.axes().len(), 2);

        let twin = rendered.twin_axes[0][0];
        assert_eq!(rendered.figure.get(twin).unwrap().twin_of(), Some(rendered.primary_axes[0]));
        assert_eq!(
            rendered.figure.x_domain(rendered.primary_axes[0]),
            rendered.figure.x_domain(twin)
        );
        assert_eq!(rendered.twins(0)[0].plots()[0].primitive(), "bar");
    }

    #[test]
    fn test_grid_matches_shape() {
        let subplot = |y: f64| SubplotSpec::new(vec![AxisGroupSpec::new(vec![line(vec![y], "s")])]);
        let spec = FigureSpec {
            rows: vec![
                crate::config::RowSpec(vec![subplot(1.0), subplot(2.0), subplot(3.0)]),
                crate::config::RowSpec(vec![subplot(4.0), subplot(5.0), subplot(6.0)]),
            ],
            ..Default::default()
        };
        let rendered = render(&spec).unwrap();
        assert_eq!(rendered.primary_axes.len(), 6);
        assert!(rendered.twin_axes.iter().all(Vec::is_empty));
        // Row-major: second subplot of the second row holds the fifth series
        assert_eq!(rendered.primary(4).unwrap().plots()[0].data().1, &[5.0]);
        // Two rows of 2 inches at 100 dpi
        assert_eq!(rendered.figure.height, 400.0);
    }

    #[test]
    fn test_single_subplot_doubles_height() {
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![AxisGroupSpec::new(vec![])])]);
        let rendered = render(&spec).unwrap();
        assert_eq!((rendered.figure.width, rendered.figure.height), (800.0, 400.0));
    }

    #[test]
    fn test_dpi_override_scales_canvas() {
        let mut spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![AxisGroupSpec::new(vec![])])]);
        spec.figure.dpi = 300.0;
        let rendered = render(&spec).unwrap();
        assert_eq!((rendered.figure.width, rendered.figure.height), (2400.0, 1200.0));
    }

    #[test]
    fn test_title_override_verbatim() {
        let subplot = SubplotSpec::new(vec![AxisGroupSpec::new(vec![line(vec![1.0], "a")])]).title(
            TextSpec::Styled(StyledText {
                text: "Pressure".into(),
                fontsize: Some(23.5),
                color: Some("#112233".into()),
                ..Default::default()
            }),
        );
        let rendered = render(&FigureSpec::stacked(vec![subplot])).unwrap();
        let title = rendered.primary(0).unwrap().title.as_ref().unwrap();
        assert_eq!(title.content, "Pressure");
        assert_eq!(title.style.font_size, 23.5);
        assert_eq!(title.style.color.to_svg_string(), "rgb(17,34,51)");
        // Theme weight kept where not overridden
        assert_eq!(title.style.weight, crate::plotting::FontWeight::Bold);
    }

    #[test]
    fn test_configuration_error_before_plotting() {
        // The first subplot is valid; the second has two left groups
        let good = SubplotSpec::new(vec![AxisGroupSpec::new(vec![line(vec![1.0], "a")])]);
        let bad = SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![]).side(AxisSide::Left),
            AxisGroupSpec::new(vec![]).side(AxisSide::Left),
        ]);
        let err = render(&FigureSpec::stacked(vec![good, bad])).err().unwrap();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("row 2, column 1"));
    }

    #[test]
    fn test_unsupported_kind_reported() {
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![AxisGroupSpec::new(vec![
            SeriesSpec::new("hexbin", vec![1.0]),
        ])])]);
        match render(&spec).err().unwrap() {
            LayoutError::UnsupportedKind { kind, .. } => assert_eq!(kind, "hexbin"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_plot_errors_pass_through() {
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![AxisGroupSpec::new(vec![
            SeriesSpec::new("scatter", vec![1.0, 2.0]).x(vec![1.0]),
        ])])]);
        assert!(matches!(
            render(&spec).err().unwrap(),
            LayoutError::Plot(PlotError::InvalidData(_))
        ));

        let style = SeriesStyle { width: Some(0.5), ..Default::default() };
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![AxisGroupSpec::new(vec![
            SeriesSpec::new("line", vec![1.0]).style(style),
        ])])]);
        assert!(matches!(
            render(&spec).err().unwrap(),
            LayoutError::Plot(PlotError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_single_group_legend() {
        let group = AxisGroupSpec::new(vec![line(vec![1.0, 2.0], "a"), line(vec![2.0, 1.0], "b")]);
        let rendered = render(&FigureSpec::stacked(vec![SubplotSpec::new(vec![group.clone()])])).unwrap();
        let axes = rendered.primary(0).unwrap();
        assert_eq!(legend_labels(axes), vec!["a", "b"]);
        assert_eq!(axes.legend.as_ref().unwrap().position, LegendPosition::Best);

        let hidden = group.legend(LegendSpec::hidden());
        let rendered = render(&FigureSpec::stacked(vec![SubplotSpec::new(vec![hidden])])).unwrap();
        assert!(legend_labels(rendered.primary(0).unwrap()).is_empty());
    }

    #[test]
    fn test_combined_legend_on_last_twin() {
        let legend = LegendSpec { fontsize: Some(7.0), ..LegendSpec::at("lower left") };
        let subplot = SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![line(vec![1.0], "left")]).legend(legend),
            AxisGroupSpec::new(vec![line(vec![2.0], "right-1")]).legend(LegendSpec::hidden()),
            AxisGroupSpec::new(vec![SeriesSpec::new("bar", vec![3.0]).label("right-2")]),
        ]);
        let rendered = render(&FigureSpec::stacked(vec![subplot])).unwrap();

        let twins = rendered.twins(0);
        assert_eq!(twins.len(), 2);
        assert!(legend_labels(rendered.primary(0).unwrap()).is_empty());
        assert!(legend_labels(twins[0]).is_empty());
        assert_eq!(legend_labels(twins[1]), vec!["left", "right-1", "right-2"]);

        let combined = twins[1].legend.as_ref().unwrap();
        assert_eq!(combined.position, LegendPosition::BottomLeft);
        assert_eq!(combined.text_style.font_size, 7.0);
        assert!(combined.entries[2].fill_style.is_some());

        assert_eq!(twins[0].y_axis.spine_offset, 1.0);
        assert!((twins[1].y_axis.spine_offset - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_hidden_left_legend_hides_combined() {
        let subplot = SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![line(vec![1.0], "left")]).legend(LegendSpec::hidden()),
            AxisGroupSpec::new(vec![line(vec![2.0], "right")]),
        ]);
        let rendered = render(&FigureSpec::stacked(vec![subplot])).unwrap();
        assert!(legend_labels(rendered.twins(0)[0]).is_empty());
        assert!(legend_labels(rendered.primary(0).unwrap()).is_empty());
    }

    #[test]
    fn test_labels_and_limits_applied() {
        let mut subplot = SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![line(vec![1.0, 5.0], "a")]).ylabel("left"),
            AxisGroupSpec::new(vec![line(vec![1.0, 5.0], "b")]).ylabel("right"),
        ])
        .xlabel("time");
        subplot.xlim = Some(crate::config::LimitsSpec::Pair(Some(-1.0), Some(3.0)));
        subplot.axes[1].ylim = Some(crate::config::LimitsSpec::Pair(None, Some(10.0)));

        let rendered = render(&FigureSpec::stacked(vec![subplot])).unwrap();
        let primary = rendered.primary(0).unwrap();
        assert_eq!(primary.x_label.as_ref().unwrap().content, "time");
        assert_eq!(primary.y_label.as_ref().unwrap().content, "left");
        assert_eq!(rendered.figure.x_domain(rendered.twin_axes[0][0]), Some((-1.0, 3.0)));

        let twin = rendered.twins(0)[0];
        assert_eq!(twin.y_label.as_ref().unwrap().content, "right");
        assert_eq!(twin.y_range().1, 10.0);
    }

    #[test]
    fn test_svg_export() {
        let spec = FigureSpec::stacked(vec![SubplotSpec::new(vec![
            AxisGroupSpec::new(vec![line(vec![1.0, 2.0], "a")]),
            AxisGroupSpec::new(vec![line(vec![3.0, 1.0], "b")]),
        ])]);
        let mut rendered = render(&spec).unwrap();
        let svg = rendered.to_svg();
        assert!(svg.contains("<svg"));
        assert!(svg.contains(">a</text>") && svg.contains(">b</text>"));

        let path = std::env::temp_dir().join(format!("plotspec-layout-{}.svg", std::process::id()));
        rendered.save(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(written.starts_with("<?xml"));
    }
}
