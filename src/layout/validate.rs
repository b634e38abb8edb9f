//! Up-front validation of a figure description.
//!
//! [`plan`] checks the whole description before anything is drawn and
//! resolves it into a [`Plan`]: kinds looked up, columns resolved, option
//! strings parsed. Rendering then only walks the plan.

use std::borrow::Cow;
use std::str::FromStr;

use crate::config::{
    AxisGroupSpec, AxisSide, DataRef, FigureSpec, GridSpec, LegendSpec, LimitsSpec, SeriesSpec,
    SeriesStyle, SubplotSpec, TextSpec,
};
use crate::plotting::data::index_positions;
use crate::plotting::style::{Color, DashPattern, FontStyle, FontWeight, Marker, TextStyle, Theme};
use crate::plotting::{LegendPosition, PlotError};

use super::error::{LayoutError, LayoutResult};
use super::kinds::PlotKind;

/// A validated figure, borrowing from its description.
#[derive(Debug)]
pub(crate) struct Plan<'a> {
    pub rows: usize,
    pub cols: usize,
    pub theme: Theme,
    pub background: Option<Color>,
    pub suptitle: Option<TextPlan<'a>>,
    /// Row-major
    pub subplots: Vec<SubplotPlan<'a>>,
}

#[derive(Debug)]
pub(crate) struct SubplotPlan<'a> {
    pub location: String,
    pub title: Option<TextPlan<'a>>,
    pub xlabel: Option<TextPlan<'a>>,
    pub xlim: Option<(Option<f64>, Option<f64>)>,
    pub grid: Option<GridPlan>,
    pub left: GroupPlan<'a>,
    /// In description order
    pub right: Vec<GroupPlan<'a>>,
}

#[derive(Debug)]
pub(crate) struct GroupPlan<'a> {
    pub location: String,
    pub series: Vec<ResolvedSeries<'a>>,
    pub ylabel: Option<TextPlan<'a>>,
    pub ylim: Option<(Option<f64>, Option<f64>)>,
    pub grid: Option<GridPlan>,
    pub legend: Option<LegendPlan>,
}

/// A series ready for dispatch.
#[derive(Debug)]
pub(crate) struct ResolvedSeries<'a> {
    pub kind: PlotKind,
    pub x: Cow<'a, [f64]>,
    pub y: &'a [f64],
    pub label: Option<&'a str>,
    pub style: &'a SeriesStyle,
    pub color: Option<Color>,
    pub edgecolor: Option<Color>,
    pub linestyle: Option<DashPattern>,
    pub marker: Option<Marker>,
}

/// Text with its font overrides parsed.
#[derive(Debug)]
pub(crate) struct TextPlan<'a> {
    pub text: &'a str,
    fontsize: Option<f64>,
    color: Option<Color>,
    weight: Option<FontWeight>,
    style: Option<FontStyle>,
    family: Option<&'a str>,
}

impl TextPlan<'_> {
    /// `base` with every override applied as given.
    pub fn apply(&self, mut base: TextStyle) -> TextStyle {
        if let Some(size) = self.fontsize {
            base.font_size = size;
        }
        if let Some(ref color) = self.color {
            base.color = color.clone();
        }
        if let Some(weight) = self.weight {
            base.weight = weight;
        }
        if let Some(style) = self.style {
            base.style = style;
        }
        if let Some(family) = self.family {
            base.font_family = family.to_string();
        }
        base
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LegendPlan {
    pub visible: bool,
    pub position: LegendPosition,
    pub fontsize: Option<f64>,
}

impl Default for LegendPlan {
    fn default() -> Self {
        LegendPlan {
            visible: true,
            position: LegendPosition::Best,
            fontsize: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct GridPlan {
    pub visible: bool,
    pub show_x: bool,
    pub show_y: bool,
    pub color: Option<Color>,
    pub linewidth: Option<f64>,
    pub alpha: Option<f64>,
}

/// Validate `spec` and resolve it into a plan.
pub(crate) fn plan(spec: &FigureSpec) -> LayoutResult<Plan<'_>> {
    let (rows, cols) = spec.shape();
    if rows == 0 || cols == 0 {
        return Err(LayoutError::config("figure", "the subplot grid is empty"));
    }
    for (r, row) in spec.rows.iter().enumerate() {
        if row.0.len() != cols {
            return Err(LayoutError::config(
                format!("row {}", r + 1),
                format!("expected {} subplots like the first row, found {}", cols, row.0.len()),
            ));
        }
    }

    let options = &spec.figure;
    for (name, value) in [
        ("width", options.width),
        ("row_height", options.row_height),
        ("dpi", options.dpi),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(LayoutError::config(
                "figure",
                format!("{} must be a positive number, got {}", name, value),
            ));
        }
    }
    let theme = match options.theme {
        Some(ref name) => parse_option::<Theme>(name, "figure")?,
        None => Theme::Default,
    };
    let suptitle = options
        .suptitle
        .as_ref()
        .map(|t| text_plan(t, "figure suptitle"))
        .transpose()?;

    let mut subplots = Vec::with_capacity(rows * cols);
    for (r, row) in spec.rows.iter().enumerate() {
        for (c, subplot) in row.0.iter().enumerate() {
            let location = format!("row {}, column {}", r + 1, c + 1);
            subplots.push(subplot_plan(spec, subplot, location)?);
        }
    }

    Ok(Plan {
        rows,
        cols,
        theme,
        background: options.background.as_deref().map(Color::from),
        suptitle,
        subplots,
    })
}

fn subplot_plan<'a>(
    spec: &'a FigureSpec,
    subplot: &'a SubplotSpec,
    location: String,
) -> LayoutResult<SubplotPlan<'a>> {
    if subplot.axes.is_empty() {
        return Err(LayoutError::config(location, "subplot has no axis groups"));
    }

    let mut left = None;
    let mut right = Vec::new();
    for (g, group) in subplot.axes.iter().enumerate() {
        let group_location = format!("{}, axis group {}", location, g + 1);
        match group.resolved_side(g) {
            AxisSide::Left if left.is_some() => {
                return Err(LayoutError::config(
                    group_location,
                    "subplot has more than one left axis group",
                ));
            }
            AxisSide::Left => left = Some(group_plan(spec, group, group_location)?),
            AxisSide::Right => right.push(group_plan(spec, group, group_location)?),
        }
    }
    let left = left.ok_or_else(|| LayoutError::config(&location, "subplot has no left axis group"))?;

    Ok(SubplotPlan {
        title: subplot.title.as_ref().map(|t| text_plan(t, &location)).transpose()?,
        xlabel: subplot.xlabel.as_ref().map(|t| text_plan(t, &location)).transpose()?,
        xlim: subplot.xlim.as_ref().map(|l| limits(l, &location, "xlim")).transpose()?,
        grid: subplot.grid.as_ref().map(|g| grid_plan(g, &location)).transpose()?,
        left,
        right,
        location,
    })
}

fn group_plan<'a>(
    spec: &'a FigureSpec,
    group: &'a AxisGroupSpec,
    location: String,
) -> LayoutResult<GroupPlan<'a>> {
    let series = group
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| resolve_series(spec, s, &format!("{}, series {}", location, i + 1)))
        .collect::<LayoutResult<Vec<_>>>()?;

    Ok(GroupPlan {
        series,
        ylabel: group.ylabel.as_ref().map(|t| text_plan(t, &location)).transpose()?,
        ylim: group.ylim.as_ref().map(|l| limits(l, &location, "ylim")).transpose()?,
        grid: group.grid.as_ref().map(|g| grid_plan(g, &location)).transpose()?,
        legend: group.legend.as_ref().map(|l| legend_plan(l, &location)).transpose()?,
        location,
    })
}

fn resolve_series<'a>(
    spec: &'a FigureSpec,
    series: &'a SeriesSpec,
    location: &str,
) -> LayoutResult<ResolvedSeries<'a>> {
    let kind = PlotKind::lookup(&series.kind).ok_or_else(|| LayoutError::UnsupportedKind {
        kind: series.kind.clone(),
        location: location.to_string(),
    })?;

    let column = |data: &'a DataRef| {
        data.resolve(&spec.data).ok_or_else(|| match data {
            DataRef::Column(name) => {
                LayoutError::config(location, format!("unknown data column '{}'", name))
            }
            DataRef::Values(_) => LayoutError::config(location, "unresolvable data"),
        })
    };
    let y = column(&series.y)?;
    let x = match series.x {
        Some(ref x) => Cow::Borrowed(column(x)?),
        None => Cow::Owned(index_positions(y.len())),
    };

    let style = &series.style;
    Ok(ResolvedSeries {
        kind,
        x,
        y,
        label: series.label.as_deref(),
        style,
        color: style.color.as_deref().map(Color::from),
        edgecolor: style.edgecolor.as_deref().map(Color::from),
        linestyle: style
            .linestyle
            .as_deref()
            .map(|s| parse_option::<DashPattern>(s, location))
            .transpose()?,
        marker: style
            .marker
            .as_deref()
            .map(|s| parse_option::<Marker>(s, location))
            .transpose()?,
    })
}

fn text_plan<'a>(spec: &'a TextSpec, location: &str) -> LayoutResult<TextPlan<'a>> {
    Ok(match spec {
        TextSpec::Plain(text) => TextPlan {
            text,
            fontsize: None,
            color: None,
            weight: None,
            style: None,
            family: None,
        },
        TextSpec::Styled(styled) => {
            if let Some(size) = styled.fontsize
                && (!size.is_finite() || size <= 0.0)
            {
                return Err(LayoutError::config(
                    location,
                    format!("fontsize must be a positive number, got {}", size),
                ));
            }
            TextPlan {
                text: &styled.text,
                fontsize: styled.fontsize,
                color: styled.color.as_deref().map(Color::from),
                weight: styled
                    .weight
                    .as_deref()
                    .map(|s| parse_option::<FontWeight>(s, location))
                    .transpose()?,
                style: styled
                    .style
                    .as_deref()
                    .map(|s| parse_option::<FontStyle>(s, location))
                    .transpose()?,
                family: styled.family.as_deref(),
            }
        }
    })
}

fn limits(spec: &LimitsSpec, location: &str, name: &str) -> LayoutResult<(Option<f64>, Option<f64>)> {
    let (min, max) = spec.bounds();
    if let (Some(lo), Some(hi)) = (min, max)
        && lo >= hi
    {
        return Err(LayoutError::config(
            location,
            format!("{} lower bound {} must be below upper bound {}", name, lo, hi),
        ));
    }
    Ok((min, max))
}

fn legend_plan(spec: &LegendSpec, location: &str) -> LayoutResult<LegendPlan> {
    Ok(LegendPlan {
        visible: spec.visible,
        position: parse_option::<LegendPosition>(&spec.loc, location)?,
        fontsize: spec.fontsize,
    })
}

fn grid_plan(spec: &GridSpec, location: &str) -> LayoutResult<GridPlan> {
    let (show_x, show_y) = match spec.axis.to_lowercase().as_str() {
        "both" => (true, true),
        "x" => (true, false),
        "y" => (false, true),
        other => {
            return Err(LayoutError::config(
                location,
                format!("grid axis must be 'both', 'x' or 'y', got '{}'", other),
            ));
        }
    };
    Ok(GridPlan {
        visible: spec.visible,
        show_x,
        show_y,
        color: spec.color.as_deref().map(Color::from),
        linewidth: spec.linewidth,
        alpha: spec.alpha,
    })
}

/// Parse an option string with the plotting library's own parser.
fn parse_option<T: FromStr<Err = PlotError>>(value: &str, location: &str) -> LayoutResult<T> {
    value.parse::<T>().map_err(|e| match e {
        PlotError::InvalidConfig(message) => LayoutError::config(location, message),
        other => LayoutError::config(location, other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AxisGroupSpec, LegendSpec, RowSpec, StyledText};

    fn line(y: Vec<f64>) -> SeriesSpec {
        SeriesSpec::new("line", y)
    }

    fn single(groups: Vec<AxisGroupSpec>) -> FigureSpec {
        FigureSpec::stacked(vec![SubplotSpec::new(groups)])
    }

    #[test]
    fn test_default_sides() {
        let spec = single(vec![
            AxisGroupSpec::new(vec![line(vec![1.0])]),
            AxisGroupSpec::new(vec![line(vec![2.0])]),
            AxisGroupSpec::new(vec![line(vec![3.0])]),
        ]);
        let plan = plan(&spec).unwrap();
        assert_eq!(plan.subplots[0].right.len(), 2);
        assert_eq!(plan.subplots[0].left.series[0].y, &[1.0]);
    }

    #[test]
    fn test_left_group_may_come_later() {
        let spec = single(vec![
            AxisGroupSpec::new(vec![line(vec![1.0])]).side(AxisSide::Right),
            AxisGroupSpec::new(vec![line(vec![2.0])]).side(AxisSide::Left),
        ]);
        let plan = plan(&spec).unwrap();
        assert_eq!(plan.subplots[0].left.series[0].y, &[2.0]);
        assert_eq!(plan.subplots[0].right[0].series[0].y, &[1.0]);
    }

    #[test]
    fn test_two_left_groups_rejected() {
        let spec = single(vec![
            AxisGroupSpec::new(vec![]),
            AxisGroupSpec::new(vec![]).side(AxisSide::Left),
        ]);
        let err = plan(&spec).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("row 1, column 1, axis group 2"));
    }

    #[test]
    fn test_no_left_group_rejected() {
        let spec = single(vec![AxisGroupSpec::new(vec![]).side(AxisSide::Right)]);
        assert!(plan(&spec).unwrap_err().to_string().contains("no left axis group"));
    }

    #[test]
    fn test_grid_shape_errors() {
        assert!(plan(&FigureSpec::default()).unwrap_err().is_configuration());

        let subplot = || SubplotSpec::new(vec![AxisGroupSpec::new(vec![])]);
        let ragged = FigureSpec {
            rows: vec![RowSpec(vec![subplot(), subplot()]), RowSpec(vec![subplot()])],
            ..Default::default()
        };
        assert!(plan(&ragged).unwrap_err().to_string().contains("row 2"));

        let empty_subplot = FigureSpec::stacked(vec![SubplotSpec::new(vec![])]);
        assert!(plan(&empty_subplot).unwrap_err().is_configuration());
    }

    #[test]
    fn test_unknown_kind_named() {
        let spec = single(vec![AxisGroupSpec::new(vec![SeriesSpec::new("violin", vec![1.0])])]);
        match plan(&spec).unwrap_err() {
            LayoutError::UnsupportedKind { kind, location } => {
                assert_eq!(kind, "violin");
                assert_eq!(location, "row 1, column 1, axis group 1, series 1");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_columns_and_default_x() {
        let spec = single(vec![AxisGroupSpec::new(vec![
            SeriesSpec::new("line", "temp").x("t"),
            SeriesSpec::new("bar", vec![5.0, 6.0, 7.0]),
        ])])
        .with_column("t", vec![10.0, 20.0])
        .with_column("temp", vec![1.5, 2.5]);
        let plan = plan(&spec).unwrap();
        let series = &plan.subplots[0].left.series;
        assert_eq!(&*series[0].x, &[10.0, 20.0]);
        assert_eq!(&*series[1].x, &[0.0, 1.0, 2.0]);

        let missing = single(vec![AxisGroupSpec::new(vec![SeriesSpec::new("line", "nope")])]);
        assert!(super::plan(&missing).unwrap_err().to_string().contains("unknown data column 'nope'"));
    }

    #[test]
    fn test_bad_option_strings() {
        let bad_loc = single(vec![
            AxisGroupSpec::new(vec![line(vec![1.0])]).legend(LegendSpec::at("somewhere")),
        ]);
        assert!(plan(&bad_loc).unwrap_err().to_string().contains("somewhere"));

        let mut bad_marker = line(vec![1.0]);
        bad_marker.style.marker = Some("blob".into());
        assert!(plan(&single(vec![AxisGroupSpec::new(vec![bad_marker])])).is_err());

        let mut bad_theme = single(vec![AxisGroupSpec::new(vec![])]);
        bad_theme.figure.theme = Some("neon".into());
        assert!(plan(&bad_theme).unwrap_err().is_configuration());

        let mut bad_grid = single(vec![AxisGroupSpec::new(vec![])]);
        bad_grid.rows[0].0[0].grid = Some(GridSpec { axis: "z".into(), ..Default::default() });
        assert!(plan(&bad_grid).unwrap_err().to_string().contains("'z'"));
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let mut spec = single(vec![AxisGroupSpec::new(vec![])]);
        spec.rows[0].0[0].xlim = Some(LimitsSpec::Pair(Some(5.0), Some(1.0)));
        assert!(plan(&spec).unwrap_err().to_string().contains("xlim"));

        spec.rows[0].0[0].xlim = Some(LimitsSpec::Pair(Some(5.0), None));
        assert_eq!(plan(&spec).unwrap().subplots[0].xlim, Some((Some(5.0), None)));
    }

    #[test]
    fn test_text_overrides_apply_verbatim() {
        let spec = TextSpec::Styled(StyledText {
            text: "Title".into(),
            fontsize: Some(22.0),
            weight: Some("light".into()),
            ..Default::default()
        });
        let text = text_plan(&spec, "here").unwrap();
        let style = text.apply(TextStyle::new().bold().font_size(14.0).color(Color::RED));
        assert_eq!(style.font_size, 22.0);
        assert_eq!(style.weight, FontWeight::Light);
        assert_eq!(style.color, Color::RED);
    }
}
