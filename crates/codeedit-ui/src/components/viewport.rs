//! The text viewport canvas.

use codeedit_core::{CodeEditor, PaintTarget};
use iced::widget::canvas::{self, Cache, Geometry};
use iced::{Rectangle, Renderer, Theme, mouse};

use super::FrameSurface;
use crate::app::Message;

/// Draws the text half of a [`CodeEditor`].
pub struct ViewportCanvas<'a> {
    editor: &'a CodeEditor,
    cache: &'a Cache,
    font_size: f32,
}

impl<'a> ViewportCanvas<'a> {
    pub fn new(editor: &'a CodeEditor, cache: &'a Cache, font_size: f32) -> Self {
        Self {
            editor,
            cache,
            font_size,
        }
    }
}

impl canvas::Program<Message> for ViewportCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        match event {
            canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) if cursor.is_over(bounds) => {
                (canvas::event::Status::Captured, Some(Message::Scrolled(delta)))
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let geometry = self.cache.draw(renderer, bounds.size(), |frame| {
            let region = self.editor.document().viewport_rect();
            let mut surface = FrameSurface::new(frame, self.font_size);
            self.editor
                .paint(PaintTarget::Viewport, region, &mut surface);
        });
        vec![geometry]
    }
}
