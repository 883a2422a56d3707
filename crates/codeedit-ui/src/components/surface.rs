//! [`Surface`] over an iced canvas frame.

use codeedit_buffer::{Point, Rect};
use codeedit_core::{Align, Surface};
use codeedit_syntax::{Color, TextFormat};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::canvas::{Frame, Text};
use iced::widget::text::LineHeight;
use iced::{Font, Pixels, Size};

use crate::theme::{font_for, to_iced};

/// Draws core paint commands onto a canvas frame.
pub struct FrameSurface<'a> {
    frame: &'a mut Frame,
    pen: iced::Color,
    font_size: f32,
}

impl<'a> FrameSurface<'a> {
    pub fn new(frame: &'a mut Frame, font_size: f32) -> Self {
        Self {
            frame,
            pen: iced::Color::BLACK,
            font_size,
        }
    }
}

fn point(x: i32, y: i32) -> iced::Point {
    iced::Point::new(x as f32, y as f32)
}

impl Surface for FrameSurface<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.frame.fill_rectangle(
            point(rect.x, rect.y),
            Size::new(rect.width as f32, rect.height as f32),
            to_iced(color),
        );
    }

    fn set_pen(&mut self, color: Color) {
        self.pen = to_iced(color);
    }

    fn draw_text(&mut self, rect: Rect, align: Align, text: &str, line_height: i32) {
        let (x, horizontal_alignment) = match align {
            Align::Left => (rect.left(), Horizontal::Left),
            Align::Right => (rect.right(), Horizontal::Right),
        };
        // Centered on the block's first line.
        let y = rect.top() as f32 + rect.height.min(line_height) as f32 / 2.0;

        self.frame.fill_text(Text {
            content: text.to_string(),
            position: iced::Point::new(x as f32, y),
            color: self.pen,
            size: Pixels(self.font_size),
            line_height: LineHeight::Absolute(Pixels(line_height as f32)),
            font: Font::MONOSPACE,
            horizontal_alignment,
            vertical_alignment: Vertical::Center,
            ..Text::default()
        });
    }

    fn draw_run(&mut self, origin: Point, text: &str, format: &TextFormat, line_height: i32) {
        self.frame.fill_text(Text {
            content: text.to_string(),
            position: point(origin.x, origin.y),
            color: to_iced(format.foreground),
            size: Pixels(self.font_size),
            line_height: LineHeight::Absolute(Pixels(line_height as f32)),
            font: font_for(format),
            horizontal_alignment: Horizontal::Left,
            vertical_alignment: Vertical::Top,
            ..Text::default()
        });
    }
}
