//! Chart rendering trait shared by every chart module

use crate::{ChartConfig, ColorScheme, StyleConfig};
use plotters::prelude::*;
use std::path::Path;
use rentgraph_common::Result;

/// Trait for rendering charts to image files
///
/// Rendering is synchronous; each call draws one complete PNG from the
/// chart's current data and the given configuration.
pub trait ChartRenderer {
    /// Render the chart to a file path
    fn render_to_file(&self, config: &ChartConfig, path: &Path) -> Result<()>;

    /// Get the default style configuration for this renderer
    fn default_style(&self) -> StyleConfig {
        StyleConfig::default()
    }

    /// Get colors from color scheme
    fn get_colors(&self, scheme: &ColorScheme) -> Vec<RGBColor> {
        match scheme {
            ColorScheme::Default => vec![
                RGBColor(31, 119, 180),  // Blue
                RGBColor(255, 127, 14),  // Orange
                RGBColor(44, 160, 44),   // Green
                RGBColor(214, 39, 40),   // Red
                RGBColor(148, 103, 189), // Purple
                RGBColor(140, 86, 75),   // Brown
                RGBColor(227, 119, 194), // Pink
                RGBColor(127, 127, 127), // Gray
            ],
            ColorScheme::Muted => vec![
                RGBColor(166, 206, 227), // Pale Blue
                RGBColor(251, 180, 174), // Pale Red
                RGBColor(179, 226, 205), // Pale Green
                RGBColor(253, 205, 172), // Pale Orange
                RGBColor(203, 213, 232), // Pale Purple
            ],
            ColorScheme::Custom(colors) => {
                colors.iter().map(|color_str| self.parse_color(color_str)).collect()
            }
        }
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &ChartConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map(|color| self.parse_color(color))
            .unwrap_or(RGBColor(255, 255, 255))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    impl ChartRenderer for MockRenderer {
        fn render_to_file(&self, _config: &ChartConfig, _path: &Path) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_color_schemes() {
        let renderer = MockRenderer;

        let default_colors = renderer.get_colors(&ColorScheme::Default);
        assert!(!default_colors.is_empty());
        assert_eq!(default_colors[0], RGBColor(31, 119, 180));

        let custom_colors = vec![
            "#FF0000".to_string(),
            "#00FF00".to_string(),
            "#0000FF".to_string(),
        ];
        let colors = renderer.get_colors(&ColorScheme::Custom(custom_colors));
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0], RGBColor(255, 0, 0));
        assert_eq!(colors[1], RGBColor(0, 255, 0));
        assert_eq!(colors[2], RGBColor(0, 0, 255));
    }

    #[test]
    fn test_color_parsing() {
        let renderer = MockRenderer;

        assert_eq!(renderer.parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(renderer.parse_color("#00FF00"), RGBColor(0, 255, 0));

        // Invalid colors default to black
        assert_eq!(renderer.parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(renderer.parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_default_style() {
        let renderer = MockRenderer;
        let style = renderer.default_style();

        assert!(matches!(style.color_scheme, ColorScheme::Default));
        assert_eq!(style.title_font.size, 16);
    }

    #[test]
    fn test_background_color() {
        let renderer = MockRenderer;
        let mut config = ChartConfig::default();

        let bg_color = renderer.get_background_color(&config);
        assert_eq!(bg_color, RGBColor(255, 255, 255));

        config.style.background_color = Some("#FF0000".to_string());
        let bg_color = renderer.get_background_color(&config);
        assert_eq!(bg_color, RGBColor(255, 0, 0));
    }
}
