//! Axes (subplot) implementation.

use crate::plotting::data::IntoPlotData;
use crate::plotting::element::{
    Align, AxisConfig, AxisPosition, Bounds, GridConfig, Legend, LegendEntry, LegendPosition, Text,
};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::plot::{BarPlot, DrawStyle, LinePlot, Plot, ScatterPlot};
use crate::plotting::scale::{LinearScale, Scale};
use crate::plotting::style::{cycle_color, Color, DashPattern, Marker, TextStyle, ThemeConfig};

/// Fraction of the data range added on each side of auto-scaled axes.
const AUTO_MARGIN: f64 = 0.05;

/// Optional lower and upper view limits for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLimits {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisLimits {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        AxisLimits { min, max }
    }
}

/// Resolve the view range of an axis from its limits and the data extent.
///
/// Sides without an explicit limit follow the data plus a small margin.
pub fn resolve_range(limits: AxisLimits, data: Option<(f64, f64)>) -> (f64, f64) {
    let (mut lo, mut hi) = data.unwrap_or((0.0, 1.0));
    if hi == lo {
        lo -= 0.5;
        hi += 0.5;
    }
    let margin = (hi - lo) * AUTO_MARGIN;
    (
        limits.min.unwrap_or(lo - margin),
        limits.max.unwrap_or(hi + margin),
    )
}

/// An axes object representing a single plot area.
pub struct Axes {
    /// Position within figure (normalized coordinates)
    pub position: Bounds,
    pub x_scale: Box<dyn Scale>,
    pub y_scale: Box<dyn Scale>,
    plots: Vec<Box<dyn Plot>>,
    pub title: Option<Text>,
    pub x_label: Option<Text>,
    pub y_label: Option<Text>,
    pub legend: Option<Legend>,
    pub grid: GridConfig,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    /// Data bounds (computed from plots)
    data_bounds: Option<Bounds>,
    x_lim: AxisLimits,
    y_lim: AxisLimits,
    /// Current color cycle index
    color_index: usize,
    pub theme: ThemeConfig,
    /// Figure index of the axes this one shares its x-axis with
    twin_of: Option<usize>,
}

impl Axes {
    /// Create a new axes styled by `theme`.
    pub fn new(theme: ThemeConfig) -> Self {
        let mut x_axis = AxisConfig::at(AxisPosition::Bottom);
        let mut y_axis = AxisConfig::at(AxisPosition::Left);
        for axis in [&mut x_axis, &mut y_axis] {
            axis.line_style.color = theme.axis_color.clone();
            axis.tick_label_style = theme.tick_style.clone();
        }
        let mut grid = GridConfig::default();
        grid.visible = theme.show_grid;
        grid.style.color = theme.grid_color.clone();
        grid.opacity = theme.grid_opacity;

        Axes {
            position: Bounds::new(0.1, 0.9, 0.1, 0.9),
            x_scale: Box::new(LinearScale::auto()),
            y_scale: Box::new(LinearScale::auto()),
            plots: Vec::new(),
            title: None,
            x_label: None,
            y_label: None,
            legend: None,
            grid,
            x_axis,
            y_axis,
            data_bounds: None,
            x_lim: AxisLimits::default(),
            y_lim: AxisLimits::default(),
            color_index: 0,
            theme,
            twin_of: None,
        }
    }

    /// Create an axes overlaying `parent` (at figure index `parent_index`)
    /// with its y-axis on the right.
    pub(crate) fn twin(parent: &Axes, parent_index: usize) -> Self {
        let mut axes = Axes::new(parent.theme.clone());
        axes.position = parent.position;
        axes.twin_of = Some(parent_index);
        axes.x_axis.visible = false;
        axes.y_axis.position = AxisPosition::Right;
        axes.grid.visible = false;
        axes
    }

    /// Add a line plot.
    pub fn plot(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        LinePlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            linewidth: None,
            linestyle: None,
            marker: None,
            markersize: None,
            alpha: None,
            label: None,
            format: None,
            draw_style: DrawStyle::Default,
        }
    }

    /// Add a step plot; `y[i]` holds over the interval ending at `x[i]`.
    pub fn step(&mut self, x: impl IntoPlotData, y: impl IntoPlotData) -> LinePlotBuilder<'_> {
        let mut builder = self.plot(x, y);
        builder.draw_style = DrawStyle::StepsPre;
        builder
    }

    /// Add a scatter plot.
    pub fn scatter(
        &mut self,
        x: impl IntoPlotData,
        y: impl IntoPlotData,
    ) -> ScatterPlotBuilder<'_> {
        ScatterPlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            y: y.into_plot_data(),
            color: None,
            size: None,
            marker: None,
            alpha: None,
            label: None,
            edge_width: None,
        }
    }

    /// Add a vertical bar plot.
    pub fn bar(&mut self, x: impl IntoPlotData, heights: impl IntoPlotData) -> BarPlotBuilder<'_> {
        BarPlotBuilder {
            axes: self,
            x: x.into_plot_data(),
            heights: heights.into_plot_data(),
            color: None,
            width: None,
            bottom: None,
            alpha: None,
            label: None,
            edge_color: None,
            edge_width: None,
        }
    }

    /// Set the title using the theme's title style.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        let style = self.theme.title_style.clone();
        self.set_title_styled(title, style)
    }

    /// Set the title with an explicit style.
    pub fn set_title_styled(&mut self, title: impl Into<String>, style: TextStyle) -> &mut Self {
        self.title = Some(Text::new(title, style));
        self
    }

    /// Set the x-axis label using the theme's label style.
    pub fn set_xlabel(&mut self, label: impl Into<String>) -> &mut Self {
        let style = self.theme.label_style.clone();
        self.set_xlabel_styled(label, style)
    }

    /// Set the x-axis label with an explicit style.
    pub fn set_xlabel_styled(&mut self, label: impl Into<String>, style: TextStyle) -> &mut Self {
        self.x_label = Some(Text::new(label, style));
        self
    }

    /// Set the y-axis label using the theme's label style.
    pub fn set_ylabel(&mut self, label: impl Into<String>) -> &mut Self {
        let style = self.theme.label_style.clone();
        self.set_ylabel_styled(label, style)
    }

    /// Set the y-axis label with an explicit style. The label is rotated to
    /// run along the axis.
    pub fn set_ylabel_styled(&mut self, label: impl Into<String>, style: TextStyle) -> &mut Self {
        self.y_label = Some(Text::new(label, style.rotation(-90.0)));
        self
    }

    /// Set the x-axis view limits; `None` keeps that side auto-scaled.
    pub fn set_xlim(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        self.x_lim = AxisLimits::new(min, max);
        self
    }

    /// Set the y-axis view limits; `None` keeps that side auto-scaled.
    pub fn set_ylim(&mut self, min: Option<f64>, max: Option<f64>) -> &mut Self {
        self.y_lim = AxisLimits::new(min, max);
        self
    }

    pub fn xlim(&self) -> AxisLimits {
        self.x_lim
    }

    pub fn ylim(&self) -> AxisLimits {
        self.y_lim
    }

    /// Enable or disable the grid.
    pub fn grid(&mut self, visible: bool) -> &mut Self {
        self.grid.visible = visible;
        self
    }

    /// Show the legend.
    pub fn legend(&mut self) -> &mut Self {
        self.legend_at(LegendPosition::Best)
    }

    /// Show the legend at a specific position.
    pub fn legend_at(&mut self, position: LegendPosition) -> &mut Self {
        let legend = self.legend.get_or_insert_with(Legend::new);
        legend.visible = true;
        legend.position = position;
        self
    }

    /// Hide the legend while keeping its entries.
    pub fn hide_legend(&mut self) -> &mut Self {
        if let Some(ref mut legend) = self.legend {
            legend.visible = false;
        }
        self
    }

    /// Replace the legend wholesale, e.g. with entries gathered from twins.
    pub fn set_legend(&mut self, legend: Legend) -> &mut Self {
        self.legend = Some(legend);
        self
    }

    /// Legend entries of all labelled plots, in plotting order.
    pub fn legend_entries(&self) -> Vec<LegendEntry> {
        self.plots.iter().filter_map(|p| p.legend_entry()).collect()
    }

    /// The plots added to this axes.
    pub fn plots(&self) -> &[Box<dyn Plot>] {
        &self.plots
    }

    /// Figure index of the axes this twin shares its x-axis with.
    pub fn twin_of(&self) -> Option<usize> {
        self.twin_of
    }

    /// Extent of the plotted data along x.
    pub fn data_x_range(&self) -> Option<(f64, f64)> {
        self.data_bounds.map(|b| (b.x_min, b.x_max))
    }

    /// Effective y view range.
    pub fn y_range(&self) -> (f64, f64) {
        resolve_range(self.y_lim, self.data_bounds.map(|b| (b.y_min, b.y_max)))
    }

    /// Add a plot to this axes.
    pub(crate) fn add_plot(&mut self, plot: Box<dyn Plot>) {
        if let Some(plot_bounds) = plot.bounds() {
            match self.data_bounds {
                Some(ref mut bounds) => bounds.include_bounds(&plot_bounds),
                None => self.data_bounds = Some(plot_bounds),
            }
        }

        if plot.label().is_some() {
            let legend = self
                .legend
                .get_or_insert_with(|| Legend { visible: false, ..Legend::new() });
            if let Some(entry) = plot.legend_entry() {
                legend.add_entry(entry);
            }
        }

        self.plots.push(plot);
    }

    /// Get the next color from the cycle.
    pub(crate) fn next_color(&mut self) -> Color {
        let color = self.theme.series_color(self.color_index);
        self.color_index += 1;
        color
    }

    /// Render the axes to SVG, using `x_domain` as the x view range.
    pub fn render_svg(&mut self, figure_width: f64, figure_height: f64, x_domain: (f64, f64)) -> String {
        let mut svg = String::new();

        let pixel_bounds = Bounds::new(
            self.position.x_min * figure_width,
            self.position.x_max * figure_width,
            (1.0 - self.position.y_max) * figure_height,
            (1.0 - self.position.y_min) * figure_height,
        );

        self.x_scale.set_range(x_domain.0, x_domain.1);
        let (y_min, y_max) = self.y_range();
        self.y_scale.set_range(y_min, y_max);
        let (x_min, x_max) = self.x_scale.range();
        let (y_min, y_max) = self.y_scale.range();
        let data_bounds = Bounds::new(x_min, x_max, y_min, y_max);

        // Twins overlay their parent and leave its background visible
        if self.twin_of.is_none() {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>\n",
                pixel_bounds.x_min,
                pixel_bounds.y_min,
                pixel_bounds.width(),
                pixel_bounds.height(),
                self.theme.plot_background.to_svg_string()
            ));
        }

        if self.grid.visible {
            svg.push_str(&self.render_grid(&pixel_bounds));
        }

        let clip_id = format!(
            "plot-clip-{:.0}-{:.0}-{}",
            pixel_bounds.x_min,
            pixel_bounds.y_min,
            self.twin_of.map_or(0, |i| i + 1)
        );
        svg.push_str(&format!(
            "<defs><clipPath id=\"{}\"><rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\"/></clipPath></defs>\n",
            clip_id, pixel_bounds.x_min, pixel_bounds.y_min, pixel_bounds.width(), pixel_bounds.height()
        ));
        svg.push_str(&format!("<g clip-path=\"url(#{})\">\n", clip_id));
        for plot in &self.plots {
            svg.push_str(&plot.render_svg(&data_bounds, &pixel_bounds));
        }
        svg.push_str("</g>\n");

        svg.push_str(&self.render_axes(&pixel_bounds));
        svg.push_str(&self.render_labels(&pixel_bounds));

        if let Some(ref legend) = self.legend
            && legend.visible
            && !legend.entries.is_empty()
        {
            svg.push_str(&render_legend(legend, &pixel_bounds));
        }

        svg
    }

    /// Pixel x of the y-axis spine.
    fn y_spine_x(&self, pixel_bounds: &Bounds) -> f64 {
        match self.y_axis.position {
            AxisPosition::Right => {
                pixel_bounds.x_min + self.y_axis.spine_offset * pixel_bounds.width()
            }
            _ => pixel_bounds.x_min,
        }
    }

    fn render_grid(&self, pixel_bounds: &Bounds) -> String {
        let mut svg = String::new();
        let style = &self.grid.style;
        let line = |x1: f64, y1: f64, x2: f64, y2: f64| {
            format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\" stroke-opacity=\"{}\"/>\n",
                x1, y1, x2, y2,
                style.color.to_svg_string(), style.width, self.grid.opacity
            )
        };

        if self.grid.show_x {
            for tick in self.x_scale.ticks(self.x_axis.num_ticks) {
                let px = pixel_bounds.x_min + self.x_scale.transform(tick) * pixel_bounds.width();
                svg.push_str(&line(px, pixel_bounds.y_min, px, pixel_bounds.y_max));
            }
        }

        if self.grid.show_y {
            for tick in self.y_scale.ticks(self.y_axis.num_ticks) {
                let py = pixel_bounds.y_max - self.y_scale.transform(tick) * pixel_bounds.height();
                svg.push_str(&line(pixel_bounds.x_min, py, pixel_bounds.x_max, py));
            }
        }

        svg
    }

    fn render_axes(&self, pixel_bounds: &Bounds) -> String {
        let mut svg = String::new();

        if self.x_axis.visible {
            let axis = &self.x_axis;
            let stroke = axis.line_style.color.to_svg_string();
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                pixel_bounds.x_min, pixel_bounds.y_max,
                pixel_bounds.x_max, pixel_bounds.y_max,
                stroke, axis.line_style.width
            ));

            if axis.show_ticks {
                for (tick, label) in axis.ticks_with_labels(self.x_scale.ticks(axis.num_ticks)) {
                    let px = pixel_bounds.x_min + self.x_scale.transform(tick) * pixel_bounds.width();
                    let tick_end = pixel_bounds.y_max + axis.tick_length;
                    svg.push_str(&format!(
                        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
                        px, pixel_bounds.y_max, px, tick_end, stroke
                    ));
                    svg.push_str(&format!(
                        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"middle\" {}>{}</text>\n",
                        px,
                        tick_end + axis.tick_padding + axis.tick_label_style.font_size,
                        axis.tick_label_style.to_svg_attrs(),
                        crate::plotting::element::escape_xml(&label)
                    ));
                }
            }
        }

        if self.y_axis.visible {
            let axis = &self.y_axis;
            let stroke = axis.line_style.color.to_svg_string();
            let spine_x = self.y_spine_x(pixel_bounds);
            // Ticks point away from the plot area
            let (direction, anchor) = match axis.position {
                AxisPosition::Right => (1.0, "start"),
                _ => (-1.0, "end"),
            };

            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
                spine_x, pixel_bounds.y_min,
                spine_x, pixel_bounds.y_max,
                stroke, axis.line_style.width
            ));

            if axis.show_ticks {
                for (tick, label) in axis.ticks_with_labels(self.y_scale.ticks(axis.num_ticks)) {
                    let py = pixel_bounds.y_max - self.y_scale.transform(tick) * pixel_bounds.height();
                    let tick_end = spine_x + direction * axis.tick_length;
                    svg.push_str(&format!(
                        "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
                        spine_x, py, tick_end, py, stroke
                    ));
                    svg.push_str(&format!(
                        "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" dominant-baseline=\"middle\" {}>{}</text>\n",
                        tick_end + direction * axis.tick_padding,
                        py,
                        anchor,
                        axis.tick_label_style.to_svg_attrs(),
                        crate::plotting::element::escape_xml(&label)
                    ));
                }
            }
        }

        svg
    }

    fn render_labels(&self, pixel_bounds: &Bounds) -> String {
        let mut svg = String::new();
        let center_x = (pixel_bounds.x_min + pixel_bounds.x_max) / 2.0;
        let center_y = (pixel_bounds.y_min + pixel_bounds.y_max) / 2.0;

        if let Some(ref title) = self.title {
            svg.push_str(&title.to_svg_at(center_x, pixel_bounds.y_min - 10.0));
            svg.push('\n');
        }

        if let Some(ref label) = self.x_label {
            svg.push_str(&label.to_svg_at(center_x, pixel_bounds.y_max + 40.0));
            svg.push('\n');
        }

        if let Some(ref label) = self.y_label {
            let x = match self.y_axis.position {
                AxisPosition::Right => self.y_spine_x(pixel_bounds) + 45.0,
                _ => pixel_bounds.x_min - 45.0,
            };
            svg.push_str(&label.to_svg_at(x, center_y));
            svg.push('\n');
        }

        svg
    }
}

fn render_legend(legend: &Legend, pixel_bounds: &Bounds) -> String {
    let mut svg = String::new();

    let (anchor_x, anchor_y) = legend.position.anchor();
    let (width, height) = legend.box_size();
    let line_height = legend.text_style.font_size * 1.5;

    let lx = match legend.position.horizontal() {
        Align::Start => pixel_bounds.x_min + 5.0,
        Align::End => pixel_bounds.x_max - width - 5.0,
        Align::Middle => pixel_bounds.x_min + anchor_x * pixel_bounds.width() - width / 2.0,
    };
    let ly = match legend.position.vertical() {
        Align::Start => pixel_bounds.y_min + 5.0,
        Align::End => pixel_bounds.y_max - height - 5.0,
        Align::Middle => pixel_bounds.y_min + (1.0 - anchor_y) * pixel_bounds.height() - height / 2.0,
    };

    svg.push_str(&format!(
        "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
        lx, ly, width, height,
        legend.background.to_svg_style()
    ));

    for (i, entry) in legend.entries.iter().enumerate() {
        let ey = ly + legend.padding + (i as f64 + 0.5) * line_height;
        let line_x1 = lx + legend.padding;
        let line_x2 = line_x1 + legend.line_length;
        let line_mid = (line_x1 + line_x2) / 2.0;

        if let Some(ref line_style) = entry.line_style {
            let dash_attr = line_style
                .dash
                .to_svg_dasharray()
                .map(|d| format!(" stroke-dasharray=\"{}\"", d))
                .unwrap_or_default();
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"{}/>\n",
                line_x1, ey, line_x2, ey,
                line_style.color.to_svg_string(),
                line_style.width,
                dash_attr
            ));
        }

        // Bars get a swatch
        if let Some(ref fill_style) = entry.fill_style {
            let size = 10.0;
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {}/>\n",
                line_mid - size / 2.0,
                ey - size / 2.0,
                size,
                size,
                fill_style.to_svg_style()
            ));
        }

        if let Some(ref marker_style) = entry.marker_style {
            svg.push_str(&marker_style.render_at(line_mid, ey));
        }

        if entry.line_style.is_none() && entry.marker_style.is_none() && entry.fill_style.is_none() {
            svg.push_str(&format!(
                "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"2\"/>\n",
                line_x1, ey, line_x2, ey,
                cycle_color(i).to_svg_string()
            ));
        }

        svg.push_str(&format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"middle\" {}>{}</text>\n",
            line_x2 + legend.label_gap,
            ey,
            legend.text_style.to_svg_attrs(),
            crate::plotting::element::escape_xml(&entry.label)
        ));
    }

    svg
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(ThemeConfig::default())
    }
}

fn check_lengths(what: &str, x: &[f64], y: &[f64]) -> PlotResult<()> {
    if x.len() != y.len() {
        return Err(PlotError::InvalidData(format!(
            "{}: x and y must have the same length, got {} and {}",
            what,
            x.len(),
            y.len()
        )));
    }
    Ok(())
}

fn check_positive(what: &str, name: &str, value: f64) -> PlotResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(PlotError::InvalidConfig(format!(
            "{}: {} must be a finite non-negative number, got {}",
            what, name, value
        )));
    }
    Ok(())
}

// Builder types for fluent API

/// Builder for line and step plots.
pub struct LinePlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    linewidth: Option<f64>,
    linestyle: Option<DashPattern>,
    marker: Option<Marker>,
    markersize: Option<f64>,
    alpha: Option<f64>,
    label: Option<String>,
    format: Option<String>,
    draw_style: DrawStyle,
}

impl<'a> LinePlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn linewidth(mut self, width: f64) -> Self {
        self.linewidth = Some(width);
        self
    }

    pub fn linestyle(mut self, style: DashPattern) -> Self {
        self.linestyle = Some(style);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn markersize(mut self, size: f64) -> Self {
        self.markersize = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Matplotlib format string; explicit color/linestyle/marker win over it.
    pub fn format(mut self, fmt: impl Into<String>) -> Self {
        self.format = Some(fmt.into());
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        let what = if self.draw_style == DrawStyle::StepsPre { "step" } else { "plot" };
        check_lengths(what, &self.x, &self.y)?;
        if let Some(width) = self.linewidth {
            check_positive(what, "linewidth", width)?;
        }
        if let Some(size) = self.markersize {
            check_positive(what, "markersize", size)?;
        }

        let format_color = self
            .format
            .as_deref()
            .and_then(|f| f.chars().next())
            .is_some_and(|c| "bgrcmykw".contains(c));

        let mut plot = LinePlot::new(self.x, self.y);
        if self.color.is_none() && !format_color {
            plot = plot.color(self.axes.next_color());
        }
        plot.draw_style = self.draw_style;
        plot.line_style.width = self.axes.theme.line_width;

        if let Some(fmt) = self.format {
            plot = plot.format(&fmt);
        }
        if let Some(color) = self.color {
            plot = plot.color(color);
        }
        if let Some(width) = self.linewidth {
            plot.line_style.width = width;
        }
        if let Some(style) = self.linestyle {
            plot.line_style.dash = style;
        }
        if let Some(marker) = self.marker {
            plot = plot.marker(marker);
        }
        if let Some(ref mut marker_style) = plot.marker_style {
            marker_style.size = self.markersize.unwrap_or(self.axes.theme.marker_size);
        }
        if let Some(alpha) = self.alpha {
            plot.line_style.opacity = alpha.clamp(0.0, 1.0);
            if let Some(ref mut marker_style) = plot.marker_style {
                marker_style.fill_opacity = alpha.clamp(0.0, 1.0);
            }
        }
        plot.label = self.label;

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for scatter plots.
pub struct ScatterPlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    color: Option<Color>,
    size: Option<f64>,
    marker: Option<Marker>,
    alpha: Option<f64>,
    label: Option<String>,
    edge_width: Option<f64>,
}

impl<'a> ScatterPlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn edge_width(mut self, width: f64) -> Self {
        self.edge_width = Some(width);
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_lengths("scatter", &self.x, &self.y)?;
        if let Some(size) = self.size {
            check_positive("scatter", "size", size)?;
        }

        let color = match self.color {
            Some(color) => color,
            None => self.axes.next_color(),
        };

        let mut plot = ScatterPlot::new(self.x, self.y).color(color);
        plot.marker_style.size = self.size.unwrap_or(self.axes.theme.marker_size);
        if let Some(marker) = self.marker {
            plot.marker_style.marker = marker;
        }
        if let Some(alpha) = self.alpha {
            plot.marker_style.fill_opacity = alpha.clamp(0.0, 1.0);
        }
        if let Some(ew) = self.edge_width {
            plot.marker_style.edge_width = ew;
        }
        plot.label = self.label;

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}

/// Builder for bar plots.
pub struct BarPlotBuilder<'a> {
    axes: &'a mut Axes,
    x: Vec<f64>,
    heights: Vec<f64>,
    color: Option<Color>,
    width: Option<f64>,
    bottom: Option<f64>,
    alpha: Option<f64>,
    label: Option<String>,
    edge_color: Option<Color>,
    edge_width: Option<f64>,
}

impl<'a> BarPlotBuilder<'a> {
    pub fn color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Bar width in data units (default 0.8).
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn bottom(mut self, bottom: f64) -> Self {
        self.bottom = Some(bottom);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn edge_color(mut self, color: impl Into<Color>) -> Self {
        self.edge_color = Some(color.into());
        self
    }

    pub fn edge_width(mut self, width: f64) -> Self {
        self.edge_width = Some(width);
        self
    }

    pub fn build(self) -> PlotResult<&'a mut Axes> {
        check_lengths("bar", &self.x, &self.heights)?;
        if let Some(h) = self.heights.iter().find(|h| !h.is_finite()) {
            return Err(PlotError::InvalidData(format!(
                "bar: heights must be finite, got {}",
                h
            )));
        }
        if let Some(width) = self.width {
            check_positive("bar", "width", width)?;
        }
        if let Some(bottom) = self.bottom
            && !bottom.is_finite()
        {
            return Err(PlotError::InvalidConfig(format!(
                "bar: bottom must be finite, got {}",
                bottom
            )));
        }

        let color = match self.color {
            Some(color) => color,
            None => self.axes.next_color(),
        };

        let mut plot = BarPlot::new(self.x, self.heights);
        plot.fill_style.color = color;
        if let Some(width) = self.width {
            plot.width = width;
        }
        if let Some(bottom) = self.bottom {
            plot.bottom = bottom;
        }
        if let Some(alpha) = self.alpha {
            plot.fill_style.opacity = alpha.clamp(0.0, 1.0);
        }
        if let Some(edge) = self.edge_color {
            plot.fill_style.stroke = Some(edge);
            plot.fill_style.stroke_width = self.edge_width.unwrap_or(1.0);
        } else if let Some(ew) = self.edge_width {
            plot.fill_style.stroke = Some(Color::BLACK);
            plot.fill_style.stroke_width = ew;
        }
        plot.label = self.label;

        self.axes.add_plot(Box::new(plot));
        Ok(self.axes)
    }
}
