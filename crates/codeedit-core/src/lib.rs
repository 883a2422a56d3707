//! # codeedit Core
//!
//! The code editor component: a text viewport and a line-number gutter kept
//! in sync by document notifications.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                       CodeEditor                          │
//! │  ┌────────┐┌─────────────────────────────────────────┐   │
//! │  │ Gutter ││               Viewport                  │   │
//! │  │ Painter││            ViewportPainter              │   │
//! │  └───▲────┘└──────────────────▲──────────────────────┘   │
//! │      │ width_for / repaint    │ block formats            │
//! │  ┌───┴────────────────────────┴──────┐  ┌─────────────┐  │
//! │  │ Document (buffer, layout, events) │◀─│ Highlighter │  │
//! │  └───────────────────────────────────┘  └─────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs synchronously on the caller's thread: an edit is applied,
//! the document queues notifications, and the editor drains them before
//! returning.

pub mod config;
pub mod document;
pub mod editor;
pub mod event;
pub mod gutter;
pub mod paint;
pub mod viewport;

pub use config::{Config, ConfigError};
pub use document::{Document, EditAction};
pub use editor::CodeEditor;
pub use event::{DocumentEvent, EventQueue};
pub use gutter::{GUTTER_MARGIN, GutterPainter, GutterStyle, width_for};
pub use paint::{Align, DisplayList, DrawCommand, PaintTarget, Surface};
pub use viewport::{
    Run, ViewportPainter, ViewportStyle, advance_column, display_column, resolve_runs,
};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Buffer error: {0}")]
    Buffer(#[from] codeedit_buffer::BufferError),

    #[error("Syntax error: {0}")]
    Syntax(#[from] codeedit_syntax::SyntaxError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
