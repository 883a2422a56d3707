//! Editor configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! The `#[derive(Serialize, Deserialize)]` macro generates code to convert
//! structs to/from TOML. `#[serde(default)]` uses `Default::default()` for
//! missing fields, so a config file only needs the keys it changes:
//!
//! ```toml
//! [font]
//! digit_width = 9
//!
//! [[syntax.rules]]
//! pattern = '"[^"]*"'
//! foreground = "#008000"
//! ```

use codeedit_syntax::{Color, FontWeight, RuleTable, SyntaxResult, TextFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main editor configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor behavior settings
    pub editor: EditorConfig,

    /// Font metrics used for layout
    pub font: FontConfig,

    /// Gutter colors
    pub gutter: GutterConfig,

    /// Highlight rules
    pub syntax: SyntaxConfig,

    /// Animated text demo settings
    pub animation: AnimationConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults
    /// when no file exists there.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::info!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("codeedit").join("config.toml"))
    }

    /// Rejects metrics the layout cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.font.digit_width <= 0 {
            return Err(ConfigError::Invalid(format!(
                "font.digit_width must be positive, got {}",
                self.font.digit_width
            )));
        }
        if self.font.line_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "font.line_height must be positive, got {}",
                self.font.line_height
            )));
        }
        if self.font.size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "font.size must be positive, got {}",
                self.font.size
            )));
        }
        Ok(())
    }
}

/// Editor behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Language used when it cannot be detected from a file name
    pub language: String,

    /// Lines scrolled per wheel notch
    pub scroll_lines: i32,

    /// Initial window width
    pub width: i32,

    /// Initial window height
    pub height: i32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            language: "go".to_string(),
            scroll_lines: 3,
            width: 800,
            height: 600,
        }
    }
}

/// Font metrics. These are inputs: the core never measures glyphs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Font size in pixels
    pub size: f32,

    /// Advance of one digit (and of every glyph, for monospace fonts)
    pub digit_width: i32,

    /// Height of one text line
    pub line_height: i32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            size: 13.0,
            digit_width: 8,
            line_height: 18,
        }
    }
}

/// Gutter appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GutterConfig {
    pub background: Color,
    pub foreground: Color,
}

impl Default for GutterConfig {
    fn default() -> Self {
        Self {
            background: Color::LIGHT_GRAY,
            foreground: Color::BLACK,
        }
    }
}

/// Highlighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Format shared by every built-in keyword rule
    pub keyword: TextFormat,

    /// Format of unhighlighted text
    pub text: TextFormat,

    /// Extra rules, appended after the keywords (and so drawn over them)
    pub rules: Vec<RuleConfig>,
}

impl SyntaxConfig {
    /// Builds the rule table for `language`: keywords first, then extra rules.
    pub fn rule_table(&self, language: &str) -> SyntaxResult<RuleTable> {
        let mut table = RuleTable::for_language(language, self.keyword)?;
        table.extend(RuleTable::with_patterns(
            self.rules
                .iter()
                .map(|rule| (rule.pattern.as_str(), rule.format)),
        )?);
        Ok(table)
    }
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            keyword: TextFormat::keyword(),
            text: TextFormat::new(Color::BLACK, FontWeight::Normal),
            rules: Vec::new(),
        }
    }
}

/// One user-defined highlight rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,

    #[serde(flatten)]
    pub format: TextFormat,
}

/// Animated text demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Tick interval in milliseconds
    pub interval_ms: u64,

    /// Initial text
    pub text: String,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            interval_ms: 60,
            text: "Hello World!".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.editor.language, "go");
        assert_eq!(config.font.digit_width, 8);
        assert_eq!(config.gutter.background, Color::LIGHT_GRAY);
        assert!(config.syntax.keyword.is_bold());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.font.line_height, config.font.line_height);
        assert_eq!(parsed.syntax.keyword, config.syntax.keyword);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r##"
[font]
digit_width = 9

[gutter]
background = "#202020"

[[syntax.rules]]
pattern = '"[^"]*"'
foreground = "darkGreen"
"##
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.font.digit_width, 9);
        assert_eq!(config.font.line_height, 18);
        assert_eq!(config.gutter.background, Color::rgb(0x20, 0x20, 0x20));
        assert_eq!(config.syntax.rules.len(), 1);
        assert_eq!(config.syntax.rules[0].format.foreground, Color::DARK_GREEN);
        assert!(!config.syntax.rules[0].format.is_bold());
    }

    #[test]
    fn test_invalid_metrics_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[font]\nline_height = 0").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gutter]\nforeground = \"#zz0000\"").unwrap();
        assert!(matches!(
            Config::load_from(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_rule_table_puts_extra_rules_last() {
        let mut syntax = SyntaxConfig::default();
        syntax.rules.push(RuleConfig {
            pattern: r"\d+".to_string(),
            format: TextFormat::new(Color::DARK_RED, FontWeight::Normal),
        });
        let table = syntax.rule_table("go").unwrap();
        assert_eq!(table.len(), 26);
        assert_eq!(table.get(25).unwrap().format().foreground, Color::DARK_RED);
    }

    #[test]
    fn test_malformed_extra_rule_fails() {
        let mut syntax = SyntaxConfig::default();
        syntax.rules.push(RuleConfig {
            pattern: "(".to_string(),
            format: TextFormat::default(),
        });
        assert!(syntax.rule_table("go").is_err());
    }
}
