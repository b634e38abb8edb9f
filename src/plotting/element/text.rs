//! Text element for titles and axis labels.

use crate::plotting::style::{TextAnchor, TextStyle};

/// A styled piece of text. Position is assigned at render time.
#[derive(Debug, Clone)]
pub struct Text {
    /// The text content
    pub content: String,
    /// Style configuration
    pub style: TextStyle,
}

impl Text {
    /// Create a new text element.
    pub fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Text {
            content: content.into(),
            style,
        }
    }

    /// SVG `<text>` element centered on `(x, y)`, rotated by the style's angle.
    pub fn to_svg_at(&self, x: f64, y: f64) -> String {
        let transform = if self.style.rotation != 0.0 {
            format!(
                " transform=\"rotate({},{:.2},{:.2})\"",
                self.style.rotation, x, y
            )
        } else {
            String::new()
        };

        format!(
            "<text x=\"{:.2}\" y=\"{:.2}\" text-anchor=\"{}\" {}{}>{}</text>",
            x,
            y,
            TextAnchor::Middle.to_svg_string(),
            self.style.to_svg_attrs(),
            transform,
            escape_xml(&self.content)
        )
    }
}

/// Escape special XML characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
    }

    #[test]
    fn test_rotated_text() {
        let text = Text::new("depth", TextStyle::new().rotation(-90.0));
        let svg = text.to_svg_at(10.0, 20.0);
        assert!(svg.contains("rotate(-90,10.00,20.00)"));
        assert!(svg.contains(">depth</text>"));
    }
}
