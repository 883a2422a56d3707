//! Canvas programs that put the editor on screen.
//!
//! Each half of the editor is its own canvas. Both draw through
//! [`FrameSurface`], which adapts an iced frame to the core `Surface` trait,
//! and ask the editor to paint a specific [`PaintTarget`](codeedit_core::PaintTarget).

pub mod gutter;
pub mod surface;
pub mod viewport;

pub use gutter::GutterCanvas;
pub use surface::FrameSurface;
pub use viewport::ViewportCanvas;

use iced::mouse;

/// Converts a wheel delta into lines, positive meaning "scroll down".
///
/// A wheel notch moves `notch_lines` lines. Pixel deltas from trackpads are
/// divided by the line height and usually come out fractional.
pub fn wheel_lines(delta: mouse::ScrollDelta, line_height: f32, notch_lines: f32) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => -y * notch_lines,
        mouse::ScrollDelta::Pixels { y, .. } => -y / line_height.max(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wheel_lines() {
        assert_eq!(wheel_lines(mouse::ScrollDelta::Lines { x: 0.0, y: -1.0 }, 18.0, 3.0), 3.0);
        assert_eq!(wheel_lines(mouse::ScrollDelta::Pixels { x: 0.0, y: 36.0 }, 18.0, 3.0), -2.0);
        assert_eq!(wheel_lines(mouse::ScrollDelta::Pixels { x: 0.0, y: 5.0 }, 0.0, 3.0), -5.0);
    }
}
