//! Declarative figure description.
//!
//! A [`FigureSpec`] describes a grid of subplots. Each subplot holds one
//! left y-axis group and any number of right y-axis groups, and each group
//! lists the series plotted against it. Everything here is plain data: the
//! layout module reads it once and never keeps it.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// ============================================================================
// Figure
// ============================================================================

/// A complete figure: subplot rows, figure options and named data columns.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct FigureSpec {
    /// Subplot grid, one entry per row; all rows have the same length
    pub rows: Vec<RowSpec>,
    #[serde(default)]
    pub figure: FigureOptions,
    /// Named columns that series may reference instead of inline values
    #[serde(default)]
    pub data: IndexMap<String, Vec<f64>>,
}

impl FigureSpec {
    /// Load a figure description from a JSON file
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let spec: FigureSpec = serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(spec)
    }

    /// Subplots stacked vertically in a single column.
    pub fn stacked(subplots: Vec<SubplotSpec>) -> Self {
        FigureSpec {
            rows: subplots.into_iter().map(|s| RowSpec(vec![s])).collect(),
            ..Default::default()
        }
    }

    /// Add a named data column.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.data.insert(name.into(), values);
        self
    }

    /// Number of rows and columns. Columns are taken from the first row.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, |r| r.0.len()))
    }

    /// Total number of subplots across all rows.
    pub fn subplot_count(&self) -> usize {
        self.rows.iter().map(|r| r.0.len()).sum()
    }
}

/// One row of subplots, serialized as a plain array.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(transparent)]
pub struct RowSpec(pub Vec<SubplotSpec>);

/// Figure-level overrides.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct FigureOptions {
    /// Figure width in inches
    #[serde(default = "default_width")]
    pub width: f64,
    /// Height of one subplot row in inches; doubled for a single subplot
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Pixels per inch of the SVG canvas. Defaults to 100, matplotlib's own
    /// default, so one inch maps to 100 SVG user units; set 300 for print.
    #[serde(default = "default_dpi")]
    pub dpi: f64,
    /// Theme name ("default", "dark", "minimal", "seaborn", "high-contrast")
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub suptitle: Option<TextSpec>,
    #[serde(default)]
    pub background: Option<String>,
}

fn default_width() -> f64 { 8.0 }
fn default_row_height() -> f64 { 2.0 }
fn default_dpi() -> f64 { 100.0 }

impl Default for FigureOptions {
    fn default() -> Self {
        FigureOptions {
            width: default_width(),
            row_height: default_row_height(),
            dpi: default_dpi(),
            theme: None,
            suptitle: None,
            background: None,
        }
    }
}

// ============================================================================
// Subplots and axis groups
// ============================================================================

/// One axes region of the grid.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct SubplotSpec {
    /// Y-axis groups; exactly one of them is the left axis
    pub axes: Vec<AxisGroupSpec>,
    #[serde(default)]
    pub title: Option<TextSpec>,
    #[serde(default)]
    pub xlabel: Option<TextSpec>,
    #[serde(default)]
    pub xlim: Option<LimitsSpec>,
    /// Grid of the primary axes
    #[serde(default)]
    pub grid: Option<GridSpec>,
}

impl SubplotSpec {
    pub fn new(axes: Vec<AxisGroupSpec>) -> Self {
        SubplotSpec { axes, ..Default::default() }
    }

    pub fn title(mut self, title: impl Into<TextSpec>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn xlabel(mut self, label: impl Into<TextSpec>) -> Self {
        self.xlabel = Some(label.into());
        self
    }
}

/// Side of the subplot a y-axis group is drawn on.
#[derive(Deserialize, JsonSchema, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AxisSide {
    Left,
    Right,
}

/// Series sharing one y-axis.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct AxisGroupSpec {
    /// Defaults to left for the first group of a subplot, right otherwise
    #[serde(default)]
    pub side: Option<AxisSide>,
    pub series: Vec<SeriesSpec>,
    #[serde(default)]
    pub ylabel: Option<TextSpec>,
    #[serde(default)]
    pub ylim: Option<LimitsSpec>,
    #[serde(default)]
    pub grid: Option<GridSpec>,
    /// Only the left group's legend settings are used when twins exist
    #[serde(default)]
    pub legend: Option<LegendSpec>,
}

impl AxisGroupSpec {
    pub fn new(series: Vec<SeriesSpec>) -> Self {
        AxisGroupSpec { series, ..Default::default() }
    }

    pub fn side(mut self, side: AxisSide) -> Self {
        self.side = Some(side);
        self
    }

    pub fn ylabel(mut self, label: impl Into<TextSpec>) -> Self {
        self.ylabel = Some(label.into());
        self
    }

    pub fn legend(mut self, legend: LegendSpec) -> Self {
        self.legend = Some(legend);
        self
    }

    /// Side this group is drawn on, given its position in the subplot.
    pub fn resolved_side(&self, position: usize) -> AxisSide {
        self.side.unwrap_or(if position == 0 { AxisSide::Left } else { AxisSide::Right })
    }
}

// ============================================================================
// Series
// ============================================================================

/// One plotted series.
#[derive(Deserialize, JsonSchema, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct SeriesSpec {
    /// Plot kind tag ("line", "scatter", "bar", "step", ...)
    pub kind: String,
    pub y: DataRef,
    /// Defaults to 0, 1, ..., len(y) - 1
    #[serde(default)]
    pub x: Option<DataRef>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub style: SeriesStyle,
}

impl SeriesSpec {
    pub fn new(kind: impl Into<String>, y: impl Into<DataRef>) -> Self {
        SeriesSpec {
            kind: kind.into(),
            y: y.into(),
            x: None,
            label: None,
            style: SeriesStyle::default(),
        }
    }

    pub fn x(mut self, x: impl Into<DataRef>) -> Self {
        self.x = Some(x.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn style(mut self, style: SeriesStyle) -> Self {
        self.style = style;
        self
    }
}

/// Styling options handed to the plotting primitive.
///
/// Not every primitive accepts every option; setting one it does not
/// accept is an error at plot time.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeriesStyle {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub linewidth: Option<f64>,
    /// "solid", "dashed", "dotted", "dashdot" or "-", "--", ":", "-."
    #[serde(default)]
    pub linestyle: Option<String>,
    #[serde(default)]
    pub marker: Option<String>,
    #[serde(default)]
    pub markersize: Option<f64>,
    /// Scatter marker diameter in pixels
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub alpha: Option<f64>,
    #[serde(default)]
    pub edgecolor: Option<String>,
    #[serde(default)]
    pub edgewidth: Option<f64>,
    /// Bar width in data units
    #[serde(default)]
    pub width: Option<f64>,
    /// Bar baseline
    #[serde(default)]
    pub bottom: Option<f64>,
    /// Matplotlib format string such as "r--o"
    #[serde(default)]
    pub format: Option<String>,
}

impl SeriesStyle {
    /// Names of the options that are set, in declaration order.
    pub fn set_options(&self) -> Vec<&'static str> {
        let flags = [
            ("color", self.color.is_some()),
            ("linewidth", self.linewidth.is_some()),
            ("linestyle", self.linestyle.is_some()),
            ("marker", self.marker.is_some()),
            ("markersize", self.markersize.is_some()),
            ("size", self.size.is_some()),
            ("alpha", self.alpha.is_some()),
            ("edgecolor", self.edgecolor.is_some()),
            ("edgewidth", self.edgewidth.is_some()),
            ("width", self.width.is_some()),
            ("bottom", self.bottom.is_some()),
            ("format", self.format.is_some()),
        ];
        flags.into_iter().filter(|(_, set)| *set).map(|(name, _)| name).collect()
    }
}

/// Inline values or the name of a column in [`FigureSpec::data`].
#[derive(Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DataRef {
    Values(Vec<f64>),
    Column(String),
}

impl DataRef {
    /// Look up the referenced values; `None` for an unknown column.
    pub fn resolve<'a>(&'a self, data: &'a IndexMap<String, Vec<f64>>) -> Option<&'a [f64]> {
        match self {
            DataRef::Values(values) => Some(values),
            DataRef::Column(name) => data.get(name).map(Vec::as_slice),
        }
    }
}

impl From<Vec<f64>> for DataRef {
    fn from(values: Vec<f64>) -> Self {
        DataRef::Values(values)
    }
}

impl From<&str> for DataRef {
    fn from(name: &str) -> Self {
        DataRef::Column(name.to_string())
    }
}

// ============================================================================
// Option structures
// ============================================================================

/// A label, either plain text or text with font overrides.
#[derive(Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TextSpec {
    Plain(String),
    Styled(StyledText),
}

/// Text with font overrides. Unset fields come from the theme.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct StyledText {
    pub text: String,
    #[serde(default)]
    pub fontsize: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    /// "normal", "bold", "light" or 100-900
    #[serde(default)]
    pub weight: Option<String>,
    /// "normal", "italic" or "oblique"
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
}

impl TextSpec {
    pub fn text(&self) -> &str {
        match self {
            TextSpec::Plain(text) => text,
            TextSpec::Styled(styled) => &styled.text,
        }
    }
}

impl From<&str> for TextSpec {
    fn from(text: &str) -> Self {
        TextSpec::Plain(text.to_string())
    }
}

impl From<StyledText> for TextSpec {
    fn from(styled: StyledText) -> Self {
        TextSpec::Styled(styled)
    }
}

/// Legend settings of an axis group.
#[derive(Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LegendSpec {
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Matplotlib location name ("best", "upper right", "lower left", ...)
    #[serde(default = "default_loc")]
    pub loc: String,
    #[serde(default)]
    pub fontsize: Option<f64>,
}

fn default_true() -> bool { true }
fn default_loc() -> String { "best".to_string() }

impl Default for LegendSpec {
    fn default() -> Self {
        LegendSpec {
            visible: true,
            loc: default_loc(),
            fontsize: None,
        }
    }
}

impl LegendSpec {
    pub fn hidden() -> Self {
        LegendSpec { visible: false, ..Default::default() }
    }

    pub fn at(loc: impl Into<String>) -> Self {
        LegendSpec { loc: loc.into(), ..Default::default() }
    }
}

/// Axis view limits, as `[min, max]` or as an object.
///
/// Either bound may be null or omitted to keep that side auto-scaled.
#[derive(Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LimitsSpec {
    Pair(Option<f64>, Option<f64>),
    Range(LimitsRange),
}

/// Object form of [`LimitsSpec`]. `left`/`bottom` are accepted for the
/// lower bound and `right`/`top` for the upper one.
#[derive(Deserialize, JsonSchema, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LimitsRange {
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    #[serde(default)]
    pub left: Option<f64>,
    #[serde(default)]
    pub right: Option<f64>,
    #[serde(default)]
    pub bottom: Option<f64>,
    #[serde(default)]
    pub top: Option<f64>,
}

impl LimitsSpec {
    /// Lower and upper bound.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self {
            LimitsSpec::Pair(min, max) => (*min, *max),
            LimitsSpec::Range(r) => (
                r.min.or(r.left).or(r.bottom),
                r.max.or(r.right).or(r.top),
            ),
        }
    }
}

/// Grid settings for one axes.
#[derive(Deserialize, JsonSchema, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    #[serde(default = "default_true")]
    pub visible: bool,
    /// "both", "x" or "y"
    #[serde(default = "default_grid_axis")]
    pub axis: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub linewidth: Option<f64>,
    #[serde(default)]
    pub alpha: Option<f64>,
}

fn default_grid_axis() -> String { "both".to_string() }

impl Default for GridSpec {
    fn default() -> Self {
        GridSpec {
            visible: true,
            axis: default_grid_axis(),
            color: None,
            linewidth: None,
            alpha: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_figure() {
        let json = r#"{
            "figure": {"width": 10, "theme": "seaborn", "suptitle": "Run 7"},
            "data": {"t": [0, 1, 2], "temp": [20.5, 21.0, 21.4]},
            "rows": [[{
                "title": {"text": "Sensors", "fontsize": 18},
                "xlabel": "time",
                "xlim": [0, null],
                "axes": [
                    {"series": [{"kind": "line", "x": "t", "y": "temp", "label": "temp",
                                 "style": {"color": "C1", "linestyle": "--"}}],
                     "legend": {"loc": "upper left"}},
                    {"ylim": {"bottom": 0, "top": 5},
                     "series": [{"kind": "bar", "y": [1, 2, 3]}]}
                ]
            }]]
        }"#;
        let spec: FigureSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.shape(), (1, 1));
        assert_eq!(spec.figure.width, 10.0);
        assert_eq!(spec.figure.row_height, 2.0);
        assert_eq!(spec.figure.dpi, 100.0);

        let subplot = &spec.rows[0].0[0];
        assert_eq!(subplot.xlim.as_ref().unwrap().bounds(), (Some(0.0), None));
        assert!(matches!(subplot.title, Some(TextSpec::Styled(ref s)) if s.fontsize == Some(18.0)));
        assert_eq!(subplot.xlabel.as_ref().unwrap().text(), "time");

        let left = &subplot.axes[0];
        assert_eq!(left.resolved_side(0), AxisSide::Left);
        assert_eq!(left.legend.as_ref().unwrap().loc, "upper left");
        assert!(left.legend.as_ref().unwrap().visible);
        assert_eq!(left.series[0].x, Some(DataRef::Column("t".into())));
        assert_eq!(left.series[0].style.set_options(), vec!["color", "linestyle"]);

        let right = &subplot.axes[1];
        assert_eq!(right.resolved_side(1), AxisSide::Right);
        assert_eq!(right.ylim.as_ref().unwrap().bounds(), (Some(0.0), Some(5.0)));
        assert_eq!(right.series[0].y, DataRef::Values(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{"rows": [[{"axes": [{"series": [], "colour": "red"}]}]]}"#;
        assert!(serde_json::from_str::<FigureSpec>(json).is_err());
    }

    #[test]
    fn test_explicit_side_overrides_position() {
        let group = AxisGroupSpec::new(vec![]).side(AxisSide::Right);
        assert_eq!(group.resolved_side(0), AxisSide::Right);
        assert_eq!(AxisGroupSpec::new(vec![]).resolved_side(3), AxisSide::Right);
    }

    #[test]
    fn test_stacked_builds_one_column() {
        let subplot = || SubplotSpec::new(vec![AxisGroupSpec::new(vec![])]);
        let spec = FigureSpec::stacked(vec![subplot(), subplot(), subplot()]);
        assert_eq!(spec.shape(), (3, 1));
        assert_eq!(spec.subplot_count(), 3);
    }

    #[test]
    fn test_resolve_data_ref() {
        let spec = FigureSpec::default().with_column("a", vec![1.0, 2.0]);
        assert_eq!(DataRef::from("a").resolve(&spec.data), Some(&[1.0, 2.0][..]));
        assert_eq!(DataRef::from("b").resolve(&spec.data), None);
        assert_eq!(DataRef::from(vec![3.0]).resolve(&spec.data), Some(&[3.0][..]));
    }

    #[test]
    fn test_legend_and_grid_defaults() {
        let legend: LegendSpec = serde_json::from_str("{}").unwrap();
        assert_eq!(legend, LegendSpec::default());
        let grid: GridSpec = serde_json::from_str(r#"{"axis": "y"}"#).unwrap();
        assert!(grid.visible);
        assert_eq!(grid.axis, "y");
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("plotspec-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"rows": [[{"axes": [{"series": [{"kind": "line", "y": [1, 2]}]}]}]]}"#)
            .unwrap();
        let spec = FigureSpec::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(spec.subplot_count(), 1);

        let missing = FigureSpec::load("/nonexistent/plotspec.json").unwrap_err();
        assert_eq!(missing.kind(), std::io::ErrorKind::NotFound);
    }
}
