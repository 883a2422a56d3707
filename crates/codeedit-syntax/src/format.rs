//! Visual formats attached to highlighted text.

use serde::{Deserialize, Serialize};

use crate::SyntaxError;

/// An opaque RGB color.
///
/// Serialized as `"#rrggbb"` so config files stay readable. A handful of
/// named colors are accepted on input as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const DARK_BLUE: Color = Color::rgb(0, 0, 128);
    pub const DARK_GREEN: Color = Color::rgb(0, 128, 0);
    pub const DARK_RED: Color = Color::rgb(128, 0, 0);
    pub const GRAY: Color = Color::rgb(160, 160, 164);
    pub const LIGHT_GRAY: Color = Color::rgb(192, 192, 192);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from hue (degrees), saturation and value (0-255).
    pub fn from_hsv(hue: u16, saturation: u8, value: u8) -> Self {
        let h = f32::from(hue % 360) / 60.0;
        let s = f32::from(saturation) / 255.0;
        let v = f32::from(value) / 255.0;

        let c = v * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let channel = |f: f32| ((f + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Channels as floats in `0.0..=1.0`.
    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().replace(['_', '-'], "").as_str() {
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "darkblue" => Self::DARK_BLUE,
            "darkgreen" => Self::DARK_GREEN,
            "darkred" => Self::DARK_RED,
            "gray" | "grey" => Self::GRAY,
            "lightgray" | "lightgrey" => Self::LIGHT_GRAY,
            _ => return None,
        };
        Some(color)
    }
}

impl std::str::FromStr for Color {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 && hex.is_ascii() {
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
                if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                    return Ok(Self::rgb(r, g, b));
                }
            }
            return Err(SyntaxError::InvalidColor(s.to_string()));
        }
        Self::named(s).ok_or_else(|| SyntaxError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = SyntaxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Font weight of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// How a highlighted run of text is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFormat {
    /// Solid foreground color
    pub foreground: Color,
    pub weight: FontWeight,
    pub italic: bool,
}

impl TextFormat {
    pub const fn new(foreground: Color, weight: FontWeight) -> Self {
        Self {
            foreground,
            weight,
            italic: false,
        }
    }

    /// Bold dark blue, the default keyword style.
    pub const fn keyword() -> Self {
        Self::new(Color::DARK_BLUE, FontWeight::Bold)
    }

    pub const fn is_bold(&self) -> bool {
        matches!(self.weight, FontWeight::Bold)
    }
}

impl Default for TextFormat {
    fn default() -> Self {
        Self::new(Color::BLACK, FontWeight::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_and_names() {
        assert_eq!("#000080".parse::<Color>().unwrap(), Color::DARK_BLUE);
        assert_eq!("darkBlue".parse::<Color>().unwrap(), Color::DARK_BLUE);
        assert_eq!("light_gray".parse::<Color>().unwrap(), Color::LIGHT_GRAY);
        assert!("#12345".parse::<Color>().is_err());
        assert!("mauve".parse::<Color>().is_err());
    }

    #[test]
    fn test_display_is_hex() {
        assert_eq!(Color::rgb(255, 16, 0).to_string(), "#ff1000");
    }

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Color::from_hsv(0, 255, 255), Color::rgb(255, 0, 0));
        assert_eq!(Color::from_hsv(120, 255, 255), Color::rgb(0, 255, 0));
        assert_eq!(Color::from_hsv(240, 255, 255), Color::rgb(0, 0, 255));
        assert_eq!(Color::from_hsv(77, 0, 191), Color::rgb(191, 191, 191));
    }

    #[test]
    fn test_keyword_format() {
        let format = TextFormat::keyword();
        assert!(format.is_bold());
        assert_eq!(format.foreground, Color::DARK_BLUE);
    }
}
