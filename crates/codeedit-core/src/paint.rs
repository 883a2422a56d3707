//! Drawing primitives.
//!
//! ## Learning: Painting Through a Trait
//!
//! The painters never touch a GPU frame directly. They draw onto anything
//! implementing [`Surface`]: the UI wraps an iced canvas frame, tests and
//! benchmarks use [`DisplayList`], which simply records what was drawn so
//! assertions can inspect it afterwards.

use codeedit_buffer::{Point, Rect};
use codeedit_syntax::{Color, TextFormat};

/// Which half of the editor a paint request is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaintTarget {
    Gutter,
    Viewport,
}

/// Horizontal placement of text inside its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
}

/// The primitive set the painters need.
pub trait Surface {
    /// Fills `rect` with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Sets the color used by [`Surface::draw_text`].
    fn set_pen(&mut self, color: Color);

    /// Draws `text` with the current pen, aligned inside `rect`.
    fn draw_text(&mut self, rect: Rect, align: Align, text: &str, line_height: i32);

    /// Draws a run of formatted text with its top-left corner at `origin`.
    fn draw_run(&mut self, origin: Point, text: &str, format: &TextFormat, line_height: i32);
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill {
        rect: Rect,
        color: Color,
    },
    Pen(Color),
    Text {
        rect: Rect,
        align: Align,
        text: String,
        color: Color,
        line_height: i32,
    },
    Run {
        origin: Point,
        text: String,
        format: TextFormat,
        line_height: i32,
    },
}

/// A [`Surface`] that records commands instead of drawing them.
#[derive(Debug, Clone)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
    pen: Color,
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            pen: Color::BLACK,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Text drawn through `draw_text`, in order.
    pub fn labels(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text drawn through `draw_run`, in order.
    pub fn runs(&self) -> Vec<(&str, &TextFormat)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Run { text, format, .. } => Some((text.as_str(), format)),
                _ => None,
            })
            .collect()
    }

    /// Plays the recorded commands onto another surface.
    pub fn replay<S: Surface + ?Sized>(&self, surface: &mut S) {
        for command in &self.commands {
            match command {
                DrawCommand::Fill { rect, color } => surface.fill_rect(*rect, *color),
                DrawCommand::Pen(color) => surface.set_pen(*color),
                DrawCommand::Text {
                    rect,
                    align,
                    text,
                    line_height,
                    ..
                } => surface.draw_text(*rect, *align, text, *line_height),
                DrawCommand::Run {
                    origin,
                    text,
                    format,
                    line_height,
                } => surface.draw_run(*origin, text, format, *line_height),
            }
        }
    }
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for DisplayList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Fill { rect, color });
    }

    fn set_pen(&mut self, color: Color) {
        self.pen = color;
        self.commands.push(DrawCommand::Pen(color));
    }

    fn draw_text(&mut self, rect: Rect, align: Align, text: &str, line_height: i32) {
        self.commands.push(DrawCommand::Text {
            rect,
            align,
            text: text.to_string(),
            color: self.pen,
            line_height,
        });
    }

    fn draw_run(&mut self, origin: Point, text: &str, format: &TextFormat, line_height: i32) {
        self.commands.push(DrawCommand::Run {
            origin,
            text: text.to_string(),
            format: *format,
            line_height,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_uses_current_pen() {
        let mut list = DisplayList::new();
        list.set_pen(Color::DARK_RED);
        list.draw_text(Rect::new(0, 0, 20, 10), Align::Right, "7", 10);

        match &list.commands()[1] {
            DrawCommand::Text { color, text, .. } => {
                assert_eq!(*color, Color::DARK_RED);
                assert_eq!(text, "7");
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(list.labels(), vec!["7"]);
    }

    #[test]
    fn test_replay_reproduces_commands() {
        let mut list = DisplayList::new();
        list.fill_rect(Rect::new(0, 0, 5, 5), Color::WHITE);
        list.set_pen(Color::BLACK);
        list.draw_text(Rect::new(0, 0, 5, 5), Align::Left, "a", 5);
        list.draw_run(Point::new(1, 2), "fn", &TextFormat::keyword(), 5);

        let mut copy = DisplayList::new();
        list.replay(&mut copy);
        assert_eq!(copy.commands(), list.commands());
        assert_eq!(copy.runs().len(), 1);
    }
}
