//! Mapping editor colors and formats onto iced types.
//!
//! ## Learning: Conversion at the Boundary
//!
//! The core crates speak in their own `Color` and `TextFormat` so they never
//! depend on a GUI toolkit. The conversion to iced happens here, once, at
//! the edge of the UI crate.

use codeedit_syntax::{Color, TextFormat};
use iced::font::{self, Font};

/// Converts an editor color to an opaque iced color.
pub fn to_iced(color: Color) -> iced::Color {
    iced::Color::from_rgb8(color.r, color.g, color.b)
}

/// Font used for a run with `format`.
pub fn font_for(format: &TextFormat) -> Font {
    Font {
        weight: if format.is_bold() {
            font::Weight::Bold
        } else {
            font::Weight::Normal
        },
        style: if format.italic {
            font::Style::Italic
        } else {
            font::Style::Normal
        },
        ..Font::MONOSPACE
    }
}

/// Colors of the window chrome around the editor.
pub mod colors {
    use iced::Color;

    pub const PANEL_BG: Color = Color::from_rgb(0.96, 0.96, 0.96);
    pub const DIVIDER: Color = Color::from_rgb(0.75, 0.75, 0.75);
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeedit_syntax::FontWeight;

    #[test]
    fn test_color_conversion() {
        let color = to_iced(Color::rgb(255, 0, 0));
        assert_eq!(color, iced::Color::from_rgb(1.0, 0.0, 0.0));
        assert_eq!(to_iced(Color::BLACK), iced::Color::BLACK);
    }

    #[test]
    fn test_font_follows_format() {
        assert_eq!(font_for(&TextFormat::keyword()).weight, font::Weight::Bold);

        let mut italic = TextFormat::new(Color::BLACK, FontWeight::Normal);
        italic.italic = true;
        let font = font_for(&italic);
        assert_eq!(font.weight, font::Weight::Normal);
        assert_eq!(font.style, font::Style::Italic);
        assert_eq!(font.family, Font::MONOSPACE.family);
    }
}
