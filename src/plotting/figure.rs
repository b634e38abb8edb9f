//! Figure (canvas) implementation.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::plotting::axes::{resolve_range, Axes};
use crate::plotting::backend::SvgBackend;
use crate::plotting::element::{Bounds, Text};
use crate::plotting::error::{PlotError, PlotResult};
use crate::plotting::style::{Color, Theme, ThemeConfig};

/// Horizontal distance between stacked right spines, as a fraction of the
/// axes width.
pub const TWIN_SPINE_STEP: f64 = 0.2;

/// A figure containing one or more axes (subplots).
pub struct Figure {
    /// Figure width in pixels
    pub width: f64,
    /// Figure height in pixels
    pub height: f64,
    pub background: Color,
    /// Grid axes first, twins appended as they are created
    axes: Vec<Axes>,
    pub theme: ThemeConfig,
    /// Figure title
    pub title: Option<Text>,
}

impl Figure {
    /// Create a new figure with the given dimensions in pixels.
    pub fn new(width: f64, height: f64) -> Self {
        let theme = Theme::Default.config();
        Figure {
            width,
            height,
            background: theme.background.clone(),
            axes: Vec::new(),
            theme,
            title: None,
        }
    }

    /// Create a figure sized in inches at the given resolution.
    pub fn from_inches(width: f64, height: f64, dpi: f64) -> Self {
        Self::new(width * dpi, height * dpi)
    }

    /// Set the background color.
    pub fn background(mut self, color: impl Into<Color>) -> Self {
        self.background = color.into();
        self
    }

    /// Set the theme. Applies to axes created afterwards.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme.config();
        self.background = self.theme.background.clone();
        self
    }

    /// Set the figure title.
    pub fn suptitle(mut self, title: impl Into<String>) -> Self {
        let style = self.theme.title_style.clone();
        let size = style.font_size + 2.0;
        self.title = Some(Text::new(title, style.font_size(size)));
        self
    }

    /// Add a subplot at the given position.
    /// Uses matplotlib-style indexing: (rows, cols, index) where index is 1-based.
    pub fn add_subplot(&mut self, rows: usize, cols: usize, index: usize) -> PlotResult<&mut Axes> {
        if rows == 0 || cols == 0 || index == 0 || index > rows * cols {
            return Err(PlotError::InvalidConfig(format!(
                "subplot index {} is outside a {}x{} grid",
                index, rows, cols
            )));
        }
        let index = index - 1;
        let row = index / cols;
        let col = index % cols;

        // Calculate position with margins
        let margin = 0.06;
        let subplot_width = (1.0 - 2.0 * margin) / cols as f64;
        let subplot_height = (1.0 - 2.0 * margin) / rows as f64;

        let left = margin + col as f64 * subplot_width + 0.04;
        let right = margin + (col + 1) as f64 * subplot_width - 0.04;
        let bottom = margin + (rows - 1 - row) as f64 * subplot_height + 0.05;
        let top = margin + (rows - row) as f64 * subplot_height - 0.03;

        let mut axes = Axes::new(self.theme.clone());
        axes.position = Bounds::new(left, right, bottom, top);

        self.axes.push(axes);
        let last = self.axes.len() - 1;
        Ok(&mut self.axes[last])
    }

    /// Create a `rows` x `cols` grid of subplots, returning their indices
    /// in row-major order.
    pub fn subplots(&mut self, rows: usize, cols: usize) -> PlotResult<Vec<usize>> {
        let first = self.axes.len();
        for i in 1..=(rows * cols).max(1) {
            self.add_subplot(rows, cols, i)?;
        }
        Ok((first..self.axes.len()).collect())
    }

    /// Create an axes sharing the x-axis of the axes at `index`, with its
    /// y-axis on the right. Each further twin of the same axes moves its
    /// spine outward by `TWIN_SPINE_STEP`.
    pub fn twinx(&mut self, index: usize) -> PlotResult<usize> {
        let parent = self
            .axes
            .get(index)
            .ok_or_else(|| PlotError::InvalidConfig(format!("no axes at index {}", index)))?;
        let root = parent.twin_of().unwrap_or(index);
        let existing = self.twins_of(root).count();

        let mut twin = Axes::twin(&self.axes[root], root);
        twin.y_axis.spine_offset = 1.0 + TWIN_SPINE_STEP * existing as f64;

        self.axes.push(twin);
        Ok(self.axes.len() - 1)
    }

    /// Indices of the twins of the axes at `index`, in creation order.
    pub fn twins_of(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.axes
            .iter()
            .enumerate()
            .filter(move |(_, ax)| ax.twin_of() == Some(index))
            .map(|(i, _)| i)
    }

    /// All axes, grid axes first.
    pub fn axes(&self) -> &[Axes] {
        &self.axes
    }

    pub fn get(&self, index: usize) -> Option<&Axes> {
        self.axes.get(index)
    }

    pub fn axes_mut(&mut self, index: usize) -> Option<&mut Axes> {
        self.axes.get_mut(index)
    }

    /// The x view range shared by the axes at `index` and everything twinned
    /// with it. Limits set on the grid axes take priority over the data.
    pub fn x_domain(&self, index: usize) -> Option<(f64, f64)> {
        let axes = self.axes.get(index)?;
        let root = axes.twin_of().unwrap_or(index);
        let data = std::iter::once(root)
            .chain(self.twins_of(root))
            .filter_map(|i| self.axes[i].data_x_range())
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)));
        Some(resolve_range(self.axes[root].xlim(), data))
    }

    /// Render the figure to an SVG string.
    pub fn render(&mut self) -> String {
        let mut backend = SvgBackend::new(self.width, self.height);

        backend.add_content(format!(
            "<rect width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            self.width,
            self.height,
            self.background.to_svg_string()
        ));

        if let Some(ref title) = self.title {
            backend.add_content(title.to_svg_at(self.width / 2.0, title.style.font_size + 8.0));
        }

        let domains: Vec<(f64, f64)> = (0..self.axes.len())
            .map(|i| self.x_domain(i).unwrap_or((0.0, 1.0)))
            .collect();
        for (axes, domain) in self.axes.iter_mut().zip(domains) {
            backend.add_content(axes.render_svg(self.width, self.height, domain));
        }

        backend.render()
    }

    /// Save the figure to a file. A figure without axes has nothing to export.
    pub fn save(&mut self, path: impl AsRef<Path>) -> PlotResult<()> {
        if self.axes.is_empty() {
            return Err(PlotError::EmptyData);
        }
        let svg = self.render();
        let mut file = File::create(path)?;
        file.write_all(svg.as_bytes())?;
        Ok(())
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subplots_row_major() {
        let mut fig = Figure::default();
        let idx = fig.subplots(2, 3).unwrap();
        assert_eq!(idx, vec![0, 1, 2, 3, 4, 5]);
        let top_left = fig.axes()[0].position;
        let bottom_right = fig.axes()[5].position;
        assert!(top_left.y_min > bottom_right.y_max);
        assert!(top_left.x_max < bottom_right.x_min);
    }

    #[test]
    fn test_empty_grid_rejected() {
        let mut fig = Figure::default();
        assert!(fig.subplots(0, 2).is_err());
        assert!(fig.add_subplot(1, 1, 2).is_err());
    }

    #[test]
    fn test_twins_stack_spines() {
        let mut fig = Figure::default();
        fig.subplots(1, 1).unwrap();
        let first = fig.twinx(0).unwrap();
        let second = fig.twinx(first).unwrap();
        assert_eq!(fig.get(first).unwrap().y_axis.spine_offset, 1.0);
        assert!((fig.get(second).unwrap().y_axis.spine_offset - 1.2).abs() < 1e-12);
        assert_eq!(fig.get(second).unwrap().twin_of(), Some(0));
        assert!(fig.twinx(9).is_err());
    }

    #[test]
    fn test_twins_share_x_domain() {
        let mut fig = Figure::default();
        fig.subplots(1, 1).unwrap();
        let twin = fig.twinx(0).unwrap();
        fig.axes_mut(0).unwrap().plot(vec![0.0, 10.0], vec![1.0, 2.0]).build().unwrap();
        fig.axes_mut(twin).unwrap().bar(vec![5.0, 20.0], vec![3.0, 4.0]).build().unwrap();
        assert_eq!(fig.x_domain(0), fig.x_domain(twin));
        let (lo, hi) = fig.x_domain(0).unwrap();
        assert!(lo < -0.4 && hi > 20.4);

        fig.axes_mut(0).unwrap().set_xlim(Some(0.0), Some(5.0));
        assert_eq!(fig.x_domain(twin), Some((0.0, 5.0)));
    }

    #[test]
    fn test_save_without_axes() {
        let mut fig = Figure::default();
        let path = std::env::temp_dir().join("plotspec-empty-figure.svg");
        assert!(matches!(fig.save(&path), Err(PlotError::EmptyData)));
        assert!(!path.exists());
    }

    #[test]
    fn test_from_inches() {
        let fig = Figure::from_inches(8.0, 4.0, 100.0);
        assert_eq!((fig.width, fig.height), (800.0, 400.0));
    }

    #[test]
    fn test_render_includes_suptitle() {
        let mut fig = Figure::default().suptitle("Run <1>");
        fig.subplots(1, 1).unwrap();
        let svg = fig.render();
        assert!(svg.contains("Run &lt;1&gt;"));
    }
}
