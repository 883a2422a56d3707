//! # codeedit UI
//!
//! The windowed host around the editor component, built with iced.
//!
//! ## Architecture
//!
//! The UI follows the Elm architecture (TEA):
//! - **Model**: [`App`], owning the `CodeEditor` and the wiggly text
//! - **Message**: key presses, wheel scrolls, window resizes, animation ticks
//! - **Update**: forwards input to the editor and invalidates canvas caches
//! - **View**: two canvases side by side (gutter, viewport) above the
//!   animated text
//!
//! ## Learning: Retained Canvas Caches
//!
//! An iced canvas redraws its geometry only when its `Cache` is cleared.
//! The editor tells the app which gutter region needs repainting; the app
//! clears the gutter cache only then, so animation ticks never re-layout
//! line numbers.

pub mod app;
pub mod components;
pub mod theme;
pub mod wiggly;

pub use app::{App, Flags, run};
