//! The line-number gutter canvas.

use codeedit_buffer::Rect;
use codeedit_core::{CodeEditor, PaintTarget};
use iced::widget::canvas::{self, Cache, Geometry};
use iced::{Rectangle, Renderer, Theme, mouse};

use super::FrameSurface;
use crate::app::Message;

/// Draws the gutter half of a [`CodeEditor`].
///
/// The cache is owned by the app and cleared whenever the editor reports a
/// pending gutter update. A cleared `Cache` starts from an empty frame, so the
/// redraw always covers the whole gutter: the band the editor reported only
/// decides *whether* to redraw, and region clipping inside the painter never
/// trims anything here.
pub struct GutterCanvas<'a> {
    editor: &'a CodeEditor,
    cache: &'a Cache,
    font_size: f32,
}

impl<'a> GutterCanvas<'a> {
    pub fn new(editor: &'a CodeEditor, cache: &'a Cache, font_size: f32) -> Self {
        Self {
            editor,
            cache,
            font_size,
        }
    }
}

impl canvas::Program<Message> for GutterCanvas<'_> {
    type State = ();

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<Message>) {
        if let canvas::Event::Mouse(mouse::Event::WheelScrolled { delta }) = event {
            if cursor.is_over(bounds) {
                return (canvas::event::Status::Captured, Some(Message::Scrolled(delta)));
            }
        }
        (canvas::event::Status::Ignored, None)
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
            // The cache redraws the whole frame, so the region is the whole gutter.
            let region = Rect::new(0, 0, bounds.width as i32, bounds.height as i32);
            let mut surface = FrameSurface::new(frame, self.font_size);
            self.editor
                .paint(PaintTarget::Gutter, region, &mut surface);
        });
        vec![geometry]
    }
}
