//! Predefined themes for figures.

use std::str::FromStr;

use super::color::{cycle_color, Color};
use super::text_style::TextStyle;
use crate::plotting::error::PlotError;

/// Predefined plot themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// White background, tab10 colors
    #[default]
    Default,
    Dark,
    /// Gray text, no grid
    Minimal,
    Seaborn,
    HighContrast,
}

/// Theme configuration containing all style settings.
#[derive(Debug, Clone)]
pub struct ThemeConfig {
    /// Background color for the figure
    pub background: Color,
    /// Background color for the plot area
    pub plot_background: Color,
    /// Color for axis lines and ticks
    pub axis_color: Color,
    /// Color for grid lines
    pub grid_color: Color,
    pub grid_opacity: f64,
    /// Whether to show grid by default
    pub show_grid: bool,
    /// Default title style
    pub title_style: TextStyle,
    /// Default axis label style
    pub label_style: TextStyle,
    /// Default tick label style
    pub tick_style: TextStyle,
    /// Color cycle for plot series
    pub color_cycle: Vec<Color>,
    /// Default line width
    pub line_width: f64,
    /// Default marker size
    pub marker_size: f64,
}

impl Theme {
    /// Get the configuration for this theme.
    pub fn config(&self) -> ThemeConfig {
        match self {
            Theme::Default => ThemeConfig::default(),
            Theme::Dark => {
                let text = Color::rgb(220, 220, 220);
                ThemeConfig {
                    background: Color::rgb(30, 30, 30),
                    plot_background: Color::rgb(40, 40, 40),
                    axis_color: Color::rgb(180, 180, 180),
                    grid_color: Color::rgb(80, 80, 80),
                    grid_opacity: 0.5,
                    ..ThemeConfig::with_text(text, 14.0, 12.0, 10.0)
                }
            }
            Theme::Minimal => {
                let mut config = ThemeConfig {
                    axis_color: Color::GRAY,
                    grid_opacity: 0.3,
                    show_grid: false,
                    line_width: 1.0,
                    marker_size: 5.0,
                    ..ThemeConfig::with_text(Color::DARK_GRAY, 13.0, 11.0, 9.0)
                };
                config.title_style = config.title_style.weight(Default::default());
                config
            }
            Theme::Seaborn => ThemeConfig {
                plot_background: Color::rgb(234, 234, 242),
                axis_color: Color::rgb(100, 100, 100),
                grid_color: Color::WHITE,
                grid_opacity: 1.0,
                color_cycle: [
                    (0x4c, 0x72, 0xb0),
                    (0xdd, 0x84, 0x52),
                    (0x55, 0xa8, 0x68),
                    (0xc4, 0x4e, 0x52),
                    (0x81, 0x72, 0xb3),
                    (0x93, 0x78, 0x60),
                ]
                .into_iter()
                .map(Color::from)
                .collect(),
                line_width: 1.75,
                ..ThemeConfig::with_text(Color::rgb(50, 50, 50), 14.0, 12.0, 10.0)
            },
            Theme::HighContrast => {
                let mut config = ThemeConfig {
                    grid_color: Color::BLACK,
                    grid_opacity: 0.2,
                    color_cycle: vec![
                        Color::BLUE,
                        Color::RED,
                        Color::GREEN,
                        Color::rgb(255, 140, 0),
                        Color::rgb(128, 0, 128),
                        Color::BLACK,
                    ],
                    line_width: 2.5,
                    marker_size: 8.0,
                    ..ThemeConfig::with_text(Color::BLACK, 16.0, 14.0, 12.0)
                };
                config.label_style = config.label_style.bold();
                config
            }
        }
    }
}

impl FromStr for Theme {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "default" => Ok(Theme::Default),
            "dark" => Ok(Theme::Dark),
            "minimal" => Ok(Theme::Minimal),
            "seaborn" => Ok(Theme::Seaborn),
            "high-contrast" => Ok(Theme::HighContrast),
            _ => Err(PlotError::InvalidConfig(format!("unknown theme '{}'", s))),
        }
    }
}

impl ThemeConfig {
    /// Light theme whose text uses `text` at the given title/label/tick sizes.
    fn with_text(text: Color, title: f64, label: f64, tick: f64) -> Self {
        ThemeConfig {
            background: Color::WHITE,
            plot_background: Color::WHITE,
            axis_color: Color::BLACK,
            grid_color: Color::LIGHT_GRAY,
            grid_opacity: 0.8,
            show_grid: true,
            title_style: TextStyle::new().font_size(title).bold().color(text.clone()),
            label_style: TextStyle::new().font_size(label).color(text.clone()),
            tick_style: TextStyle::new().font_size(tick).color(text),
            color_cycle: (0..10).map(cycle_color).collect(),
            line_width: 1.5,
            marker_size: 6.0,
        }
    }

    /// Series color for the n-th plot of an axes.
    pub fn series_color(&self, index: usize) -> Color {
        if self.color_cycle.is_empty() {
            return cycle_color(index);
        }
        self.color_cycle[index % self.color_cycle.len()].clone()
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        ThemeConfig::with_text(Color::BLACK, 14.0, 12.0, 10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_theme() {
        assert_eq!("high_contrast".parse::<Theme>().unwrap(), Theme::HighContrast);
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert!("neon".parse::<Theme>().is_err());
    }

    #[test]
    fn test_minimal_hides_grid() {
        assert!(!Theme::Minimal.config().show_grid);
        assert!(Theme::Default.config().show_grid);
    }

    #[test]
    fn test_series_color_cycles() {
        let config = Theme::HighContrast.config();
        assert_eq!(config.series_color(6), config.series_color(0));
    }
}
