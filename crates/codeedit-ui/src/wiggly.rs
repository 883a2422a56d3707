//! Animated "wiggly" text.
//!
//! ## Learning: Time as a Message
//!
//! The widget never spawns a timer. The app subscribes to
//! `iced::time::every`, each tick arrives as an ordinary message, and the
//! update handler advances the step counter owned here. Drawing only reads
//! the latest step, so there is no shared state between the timer and the
//! renderer.

use codeedit_core::{advance_column, display_column};
use codeedit_syntax::Color;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{self, Geometry, Text};
use iced::{Font, Pixels, Point, Rectangle, Renderer, Theme, mouse};

use crate::app::Message;
use crate::theme::to_iced;

const TAB_WIDTH: usize = 4;

/// One period of a sine wave, scaled to ±100.
pub const SINE_TABLE: [i32; 16] = [
    0, 38, 71, 92, 100, 92, 71, 38, 0, -38, -71, -92, -100, -92, -71, -38,
];

/// Phase of glyph `i` at animation `step`.
pub fn glyph_index(step: usize, i: usize) -> usize {
    (step + i) % SINE_TABLE.len()
}

/// Vertical offset of a glyph at `index`, in pixels.
pub fn glyph_offset(index: usize, line_height: i32) -> i32 {
    -(SINE_TABLE[index % SINE_TABLE.len()] * line_height) / 400
}

/// Color of a glyph at `index`: the hue walks the wheel as the phase does.
pub fn glyph_color(index: usize) -> Color {
    let index = index % SINE_TABLE.len();
    Color::from_hsv(((15 - index) * 16) as u16, 255, 191)
}

/// A positioned, colored character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Display column of the character
    pub column: usize,
    pub dy: i32,
    pub color: Color,
}

/// Text that waves and cycles through colors.
#[derive(Debug, Clone)]
pub struct Wiggly {
    text: String,
    step: usize,
    font_size: f32,
    line_height: i32,
    digit_width: i32,
}

impl Wiggly {
    pub fn new(text: impl Into<String>, font_size: f32, line_height: i32, digit_width: i32) -> Self {
        Self {
            text: text.into(),
            step: 0,
            font_size,
            line_height,
            digit_width,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: String) {
        self.text = text;
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Advances the animation by one frame.
    pub fn tick(&mut self) {
        self.step = (self.step + 1) % SINE_TABLE.len();
    }

    /// Every character of the text as it looks at the current step.
    pub fn glyphs(&self) -> Vec<Glyph> {
        self.text
            .chars()
            .enumerate()
            .scan(0, |column, (i, ch)| {
                let index = glyph_index(self.step, i);
                let glyph = Glyph {
                    ch,
                    column: *column,
                    dy: glyph_offset(index, self.line_height),
                    color: glyph_color(index),
                };
                *column = advance_column(*column, ch, TAB_WIDTH);
                Some(glyph)
            })
            .collect()
    }

    /// Width of the whole text in pixels.
    fn text_width(&self) -> i32 {
        let columns = display_column(&self.text, usize::MAX, TAB_WIDTH);
        columns as i32 * self.digit_width
    }
}

impl canvas::Program<Message> for Wiggly {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        let left = (bounds.width - self.text_width() as f32) / 2.0;
        let baseline = bounds.height / 2.0;

        for glyph in self.glyphs() {
            frame.fill_text(Text {
                content: glyph.ch.to_string(),
                position: Point::new(
                    left + (glyph.column as i32 * self.digit_width) as f32,
                    baseline + glyph.dy as f32,
                ),
                color: to_iced(glyph.color),
                size: Pixels(self.font_size),
                font: Font::MONOSPACE,
                horizontal_alignment: Horizontal::Left,
                vertical_alignment: Vertical::Center,
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }
}
