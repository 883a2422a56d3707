//! # codeedit Syntax
//!
//! Lexical syntax highlighting: a table of `(pattern, format)` rules applied
//! to one block of text at a time.
//!
//! ## Why patterns and not a parser?
//!
//! The editor re-highlights a block every time its text changes, with no
//! knowledge of neighbouring blocks. Each rule is a regular expression scanned
//! independently over the block, so the work per keystroke is bounded by the
//! length of one line:
//!
//! ```text
//!  rules ──┐
//!          ├──▶ Highlighter::highlight_block(text) ──▶ spans ──▶ renderer
//!  block ──┘
//! ```

mod format;
mod highlighter;
mod rules;

pub use format::{Color, FontWeight, TextFormat};
pub use highlighter::{FormatSink, Highlighter, Span};
pub use rules::{Rule, RuleTable, keywords, supported_languages};

/// Result type for syntax operations
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors that can occur while building highlight rules.
#[derive(Debug, thiserror::Error)]
pub enum SyntaxError {
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Detects language from file extension.
pub fn detect_language(filename: &str) -> &'static str {
    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("");
    match ext {
        "go" => "go",
        "rs" => "rust",
        "py" | "pyw" | "pyi" => "python",
        "js" | "mjs" | "cjs" | "jsx" | "ts" | "tsx" => "javascript",
        "c" | "h" => "c",
        _ => "text",
    }
}
